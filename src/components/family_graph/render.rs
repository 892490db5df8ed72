use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::geometry::{
	CARD_HEIGHT, CARD_RADIUS, CARD_WIDTH, HANDLE_RADIUS, Point, input_anchor, output_anchor,
	step_path,
};
use super::state::EditorState;
use super::types::{Node, NodeKind, lifespan_label};

const BACKGROUND: &str = "#ffffff";
const GRID_DOT: &str = "rgba(122, 99, 33, 0.12)";
const EDGE: &str = "#b58b2b";
const EDGE_SELECTED: &str = "#7a6321";
const CARD_FILL: &str = "#ffffff";
const CARD_BORDER: &str = "#e5e5e5";
const CARD_BORDER_SELECTED: &str = "#a58037";
const HANDLE: &str = "#c89532";
const NAME: &str = "#7a6321";
const RELATIONSHIP: &str = "#525252";
const YEARS: &str = "#a3a3a3";
const GRID_GAP: f64 = 16.0;

pub fn render(state: &EditorState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_grid(state, ctx);
	draw_edges(state, ctx);
	draw_connect_preview(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_grid(state: &EditorState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	// too dense to be useful when zoomed far out
	if k < 0.4 {
		return;
	}
	let (x0, y0) = state.screen_to_graph(0.0, 0.0);
	let (x1, y1) = state.screen_to_graph(state.width, state.height);
	let r = 1.0 / k;
	ctx.set_fill_style_str(GRID_DOT);
	let mut y = (y0 / GRID_GAP).floor() * GRID_GAP;
	while y <= y1 {
		let mut x = (x0 / GRID_GAP).floor() * GRID_GAP;
		while x <= x1 {
			ctx.fill_rect(x - r / 2.0, y - r / 2.0, r, r);
			x += GRID_GAP;
		}
		y += GRID_GAP;
	}
}

fn stroke_path(ctx: &CanvasRenderingContext2d, path: &[Point]) {
	let Some((first, rest)) = path.split_first() else {
		return;
	};
	ctx.begin_path();
	ctx.move_to(first.0, first.1);
	for p in rest {
		ctx.line_to(p.0, p.1);
	}
	ctx.stroke();
}

fn draw_edges(state: &EditorState, ctx: &CanvasRenderingContext2d) {
	for edge in state.graph.edges() {
		let Some(path) = state.edge_path(&edge.source, &edge.target) else {
			continue;
		};
		let (color, width) = if edge.selected {
			(EDGE_SELECTED, 3.0)
		} else {
			(EDGE, 2.0)
		};
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width);
		stroke_path(ctx, &path);
	}
}

fn draw_connect_preview(state: &EditorState, ctx: &CanvasRenderingContext2d) {
	let Some(source) = state.connect.source.as_ref().and_then(|id| state.graph.node(id)) else {
		return;
	};
	let k = state.transform.k;
	ctx.set_stroke_style_str(EDGE);
	ctx.set_line_width(2.0 / k.max(0.5));
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(6.0 / k),
		&JsValue::from_f64(4.0 / k),
	));
	stroke_path(ctx, &step_path(output_anchor(source), state.connect.cursor));
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &EditorState, ctx: &CanvasRenderingContext2d) {
	for node in state.graph.nodes() {
		match &node.kind {
			NodeKind::Member(_) => draw_card(state, node, ctx),
			NodeKind::Union => draw_union(state, node, ctx),
		}
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_card(state: &EditorState, node: &Node, ctx: &CanvasRenderingContext2d) {
	let Some(member) = node.member() else {
		return;
	};
	let k = state.transform.k;
	let (x, y) = (node.x, node.y);

	ctx.set_shadow_color("rgba(0, 0, 0, 0.08)");
	ctx.set_shadow_blur(8.0 * k);
	ctx.set_shadow_offset_y(2.0 * k);
	rounded_rect(ctx, x, y, CARD_WIDTH, CARD_HEIGHT, CARD_RADIUS);
	ctx.set_fill_style_str(CARD_FILL);
	ctx.fill();
	ctx.set_shadow_color("transparent");

	let (border, width) = if node.selected {
		(CARD_BORDER_SELECTED, 2.0)
	} else {
		(CARD_BORDER, 1.0)
	};
	ctx.set_stroke_style_str(border);
	ctx.set_line_width(width);
	ctx.stroke();

	ctx.set_fill_style_str(NAME);
	ctx.set_font("600 16px sans-serif");
	let _ = ctx.fill_text_with_max_width(&member.name, x + 14.0, y + 24.0, CARD_WIDTH - 28.0);
	if let Some(rel) = member.relationship.as_deref() {
		ctx.set_fill_style_str(RELATIONSHIP);
		ctx.set_font("13px sans-serif");
		let _ = ctx.fill_text_with_max_width(rel, x + 14.0, y + 44.0, CARD_WIDTH - 28.0);
	}
	let years = lifespan_label(member.birth_year, member.death_year);
	if !years.is_empty() {
		ctx.set_fill_style_str(YEARS);
		ctx.set_font("11px sans-serif");
		let _ = ctx.fill_text(&years, x + 14.0, y + 62.0);
	}

	let hovered = state.hover.as_ref() == Some(&node.id);
	let r = if hovered {
		HANDLE_RADIUS * 1.5
	} else {
		HANDLE_RADIUS
	};
	ctx.set_fill_style_str(HANDLE);
	for (hx, hy) in [input_anchor(node), output_anchor(node)] {
		ctx.begin_path();
		let _ = ctx.arc(hx, hy, r, 0.0, 2.0 * PI);
		ctx.fill();
	}
}

fn draw_union(state: &EditorState, node: &Node, ctx: &CanvasRenderingContext2d) {
	// Unions stay invisible unless the user is pointing at or has selected one.
	if !node.selected && state.hover.as_ref() != Some(&node.id) {
		return;
	}
	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, HANDLE_RADIUS, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(if node.selected {
		EDGE_SELECTED
	} else {
		HANDLE
	});
	ctx.fill();
}

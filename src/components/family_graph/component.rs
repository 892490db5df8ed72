use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::ev;
use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlInputElement, HtmlTextAreaElement,
	KeyboardEvent, MouseEvent, WheelEvent,
};

use super::graph::GraphAction;
use super::render;
use super::state::{EditorState, Hit};
use super::types::Selection;
use crate::api::Member;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Removal keys only count when the user is not typing into a form field.
fn is_removal_key(ev: &KeyboardEvent) -> bool {
	if ev.key() != "Delete" && ev.key() != "Backspace" {
		return false;
	}
	!ev.target().is_some_and(|t| {
		t.dyn_ref::<HtmlInputElement>().is_some() || t.dyn_ref::<HtmlTextAreaElement>().is_some()
	})
}

/// Family tree canvas: member cards that can be dragged, linked by dragging
/// from a card's bottom handle onto another card, selected, and deleted with
/// Delete or Backspace.
#[component]
pub fn FamilyGraphCanvas(#[prop(into)] members: Signal<Vec<Member>>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<EditorState>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));
	let (state_init, animate_init, alive_init) = (state.clone(), animate.clone(), alive.clone());

	Effect::new(move |_| {
		let members = members.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if let Some(ref mut s) = *state_init.borrow_mut() {
			s.reload(&members);
			info!("family graph reloaded with {} member(s)", members.len());
			return;
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let Some(ctx) = context_2d(&canvas) else {
			warn!("canvas has no 2d context");
			return;
		};
		*state_init.borrow_mut() = Some(EditorState::new(&members, w, h));
		info!("family graph mounted with {} member(s)", members.len());

		let (state_anim, animate_inner, alive_anim) =
			(state_init.clone(), animate_init.clone(), alive_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.dirty {
					render::render(s, &ctx);
					s.dirty = false;
				}
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(cb), Some(win)) = (animate_init.borrow().as_ref(), web_sys::window()) {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_rs = state.clone();
	let resize_handle = window_event_listener(ev::resize, move |_| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		if let Some(ref mut s) = *state_rs.borrow_mut() {
			s.resize(w, h);
		}
	});

	let state_kd = state.clone();
	let key_handle = window_event_listener(ev::keydown, move |ev: KeyboardEvent| {
		if !is_removal_key(&ev) {
			return;
		}
		if let Some(ref mut s) = *state_kd.borrow_mut() {
			if s.graph.has_selection() {
				debug!("removing selection");
				s.dispatch(GraphAction::DeleteSelection);
			}
		}
	});

	on_cleanup(move || {
		alive.store(false, Ordering::Relaxed);
		resize_handle.remove();
		key_handle.remove();
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let mut guard = state_md.borrow_mut();
		let Some(s) = guard.as_mut() else {
			return;
		};
		match s.hit_test(x, y) {
			Hit::OutputHandle(id) => s.start_connect(id, x, y),
			Hit::Node(id) => {
				let already = s.graph.node(&id).is_some_and(|n| n.selected);
				if ev.shift_key() {
					s.dispatch(GraphAction::ToggleSelect(Selection::Node(id.clone())));
				} else if !already {
					s.dispatch(GraphAction::Select(Selection::Node(id.clone())));
				}
				s.start_drag(id, x, y);
			}
			Hit::Edge(id) => {
				let action = if ev.shift_key() {
					GraphAction::ToggleSelect(Selection::Edge(id))
				} else {
					GraphAction::Select(Selection::Edge(id))
				};
				s.dispatch(action);
			}
			Hit::Background => {
				s.dispatch(GraphAction::ClearSelection);
				s.start_pan(x, y);
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let mut guard = state_mm.borrow_mut();
		let Some(s) = guard.as_mut() else {
			return;
		};
		if s.connect.source.is_some() {
			s.connect_to(x, y);
			let over = s.node_at_position(x, y);
			s.set_hover(over);
		} else if s.drag.active {
			s.drag_to(x, y);
		} else if s.pan.active {
			s.pan_to(x, y);
		} else {
			let over = s.node_at_position(x, y);
			s.set_hover(over);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let mut guard = state_mu.borrow_mut();
		let Some(s) = guard.as_mut() else {
			return;
		};
		if s.connect.source.is_some() {
			if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
				s.finish_connect(x, y);
			}
		}
		s.release();
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.release();
			s.set_hover(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="family-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: default;"
		/>
	}
}

use super::geometry::{
	self, EDGE_HIT, HANDLE_HIT, Point, input_anchor, node_contains, output_anchor, step_path,
};
use super::graph::{FamilyGraph, GraphAction};
use super::types::{EdgeId, NodeId};
use crate::api::Member;

const FIT_PADDING: f64 = 40.0;
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<NodeId>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// In-progress drag from a node's output anchor. `cursor` is in world space.
#[derive(Clone, Debug, Default)]
pub struct ConnectState {
	pub source: Option<NodeId>,
	pub cursor: Point,
}

/// What sits under the pointer, most specific first.
#[derive(Clone, Debug, PartialEq)]
pub enum Hit {
	OutputHandle(NodeId),
	Node(NodeId),
	Edge(EdgeId),
	Background,
}

pub struct EditorState {
	pub graph: FamilyGraph,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub connect: ConnectState,
	pub hover: Option<NodeId>,
	pub width: f64,
	pub height: f64,
	/// Set whenever something visible changed since the last frame.
	pub dirty: bool,
}

impl EditorState {
	pub fn new(members: &[Member], width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: FamilyGraph::from_members(members),
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			connect: ConnectState::default(),
			hover: None,
			width,
			height,
			dirty: true,
		};
		state.fit_view();
		state
	}

	/// Rebuild the graph from a fresh member directory. Drawn edges are lost.
	pub fn reload(&mut self, members: &[Member]) {
		self.graph = FamilyGraph::from_members(members);
		self.drag = DragState::default();
		self.connect = ConnectState::default();
		self.hover = None;
		self.fit_view();
	}

	pub fn dispatch(&mut self, action: GraphAction) {
		self.graph.apply(action);
		self.dirty = true;
	}

	/// Center the graph in the viewport, never zooming in past 1:1.
	pub fn fit_view(&mut self) {
		self.dirty = true;
		let Some((lo, hi)) = geometry::bounds(self.graph.nodes()) else {
			self.transform = ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k: 1.0,
			};
			return;
		};
		let (gw, gh) = (hi.0 - lo.0 + 2.0 * FIT_PADDING, hi.1 - lo.1 + 2.0 * FIT_PADDING);
		let k = (self.width / gw).min(self.height / gh).clamp(MIN_ZOOM, 1.0);
		let (cx, cy) = ((lo.0 + hi.0) / 2.0, (lo.1 + hi.1) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Point {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under a screen position. Later nodes draw on top.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeId> {
		let p = self.screen_to_graph(sx, sy);
		self.graph
			.nodes()
			.iter()
			.rev()
			.find(|n| node_contains(n, p))
			.map(|n| n.id.clone())
	}

	pub fn hit_test(&self, sx: f64, sy: f64) -> Hit {
		let p = self.screen_to_graph(sx, sy);
		let handle = self.graph.nodes().iter().rev().find(|n| {
			n.is_member() && geometry::distance(p, output_anchor(n)) < HANDLE_HIT
		});
		if let Some(n) = handle {
			return Hit::OutputHandle(n.id.clone());
		}
		if let Some(id) = self.node_at_position(sx, sy) {
			return Hit::Node(id);
		}
		if let Some(id) = self.edge_at(p) {
			return Hit::Edge(id);
		}
		Hit::Background
	}

	fn edge_at(&self, p: Point) -> Option<EdgeId> {
		self.graph
			.edges()
			.iter()
			.filter_map(|e| {
				let path = self.edge_path(&e.source, &e.target)?;
				let d = geometry::path_distance(p, &path);
				(d < EDGE_HIT).then_some((d, e))
			})
			.min_by(|a, b| a.0.total_cmp(&b.0))
			.map(|(_, e)| e.id.clone())
	}

	pub fn edge_path(&self, source: &NodeId, target: &NodeId) -> Option<[Point; 4]> {
		let (s, t) = (self.graph.node(source)?, self.graph.node(target)?);
		Some(step_path(output_anchor(s), input_anchor(t)))
	}

	pub fn start_drag(&mut self, id: NodeId, sx: f64, sy: f64) {
		let Some(node) = self.graph.node(&id) else {
			return;
		};
		self.drag = DragState {
			active: true,
			start_x: sx,
			start_y: sy,
			node_start_x: node.x,
			node_start_y: node.y,
			node: Some(id),
		};
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(id) = self.drag.node.clone() else {
			return;
		};
		let (dx, dy) = (
			(sx - self.drag.start_x) / self.transform.k,
			(sy - self.drag.start_y) / self.transform.k,
		);
		self.dispatch(GraphAction::MoveNode {
			id,
			x: self.drag.node_start_x + dx,
			y: self.drag.node_start_y + dy,
		});
	}

	pub fn start_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
		self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		self.dirty = true;
	}

	pub fn start_connect(&mut self, source: NodeId, sx: f64, sy: f64) {
		self.connect = ConnectState {
			source: Some(source),
			cursor: self.screen_to_graph(sx, sy),
		};
		self.dirty = true;
	}

	pub fn connect_to(&mut self, sx: f64, sy: f64) {
		self.connect.cursor = self.screen_to_graph(sx, sy);
		self.dirty = true;
	}

	/// Finish a connect drag over whatever node is under the pointer.
	pub fn finish_connect(&mut self, sx: f64, sy: f64) {
		let Some(source) = self.connect.source.take() else {
			return;
		};
		self.dirty = true;
		if let Some(target) = self.node_at_position(sx, sy) {
			self.dispatch(GraphAction::Connect { source, target });
		}
	}

	/// Drop every in-flight gesture.
	pub fn release(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		if self.connect.source.take().is_some() {
			self.dirty = true;
		}
	}

	pub fn set_hover(&mut self, node: Option<NodeId>) {
		if self.hover != node {
			self.hover = node;
			self.dirty = true;
		}
	}

	/// Cursor-anchored zoom by `factor`.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
		self.dirty = true;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.dirty = true;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::family_graph::geometry::{CARD_HEIGHT, CARD_WIDTH};

	fn members(n: i64) -> Vec<Member> {
		(1..=n)
			.map(|id| Member {
				id,
				name: format!("m{id}"),
				..Member::default()
			})
			.collect()
	}

	/// Editor with an identity transform so screen and world coordinates agree.
	fn editor(n: i64) -> EditorState {
		let mut s = EditorState::new(&members(n), 800.0, 600.0);
		s.transform = ViewTransform {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		};
		s
	}

	#[test]
	fn fit_view_centers_single_card() {
		let s = EditorState::new(&members(1), 800.0, 600.0);
		assert_eq!(s.transform.k, 1.0);
		let (cx, cy) = (50.0 + CARD_WIDTH / 2.0, CARD_HEIGHT / 2.0);
		assert_eq!(s.transform.x + cx, 400.0);
		assert_eq!(s.transform.y + cy, 300.0);
	}

	#[test]
	fn fit_view_shrinks_wide_graphs() {
		let s = EditorState::new(&members(9), 400.0, 300.0);
		assert!(s.transform.k < 1.0);
	}

	#[test]
	fn empty_editor_centers_origin() {
		let s = EditorState::new(&[], 800.0, 600.0);
		assert_eq!(
			s.transform,
			ViewTransform {
				x: 400.0,
				y: 300.0,
				k: 1.0
			}
		);
	}

	#[test]
	fn hit_test_prefers_output_handle_over_card() {
		let s = editor(1);
		// bottom-center of the first card
		assert_eq!(s.hit_test(150.0, 71.0), Hit::OutputHandle("1".into()));
		assert_eq!(s.hit_test(60.0, 10.0), Hit::Node("1".into()));
		assert_eq!(s.hit_test(5.0, 500.0), Hit::Background);
	}

	#[test]
	fn connect_gesture_dispatches_connect() {
		let mut s = editor(4);
		s.start_connect("1".into(), 150.0, 72.0);
		assert!(s.connect.source.is_some());
		// card 4 sits at (50, 160)
		s.finish_connect(100.0, 200.0);

		assert!(s.connect.source.is_none());
		assert!(s.graph.has_edge(&"1".into(), &"4".into()));
	}

	#[test]
	fn connect_released_over_background_adds_nothing() {
		let mut s = editor(2);
		s.start_connect("1".into(), 150.0, 72.0);
		s.finish_connect(5.0, 500.0);
		assert!(s.graph.edges().is_empty());
	}

	#[test]
	fn edge_is_hit_along_its_path() {
		let mut s = editor(4);
		s.dispatch(GraphAction::Connect {
			source: "1".into(),
			target: "4".into(),
		});
		// vertical leg at x = 150 between y = 72 and y = 160
		assert!(matches!(s.hit_test(152.0, 110.0), Hit::Edge(_)));
	}

	#[test]
	fn dragging_moves_node_by_world_delta() {
		let mut s = editor(1);
		s.transform.k = 2.0;
		s.start_drag("1".into(), 100.0, 100.0);
		s.drag_to(120.0, 90.0);
		let n = s.graph.node(&"1".into()).unwrap();
		assert_eq!((n.x, n.y), (60.0, -5.0));

		s.release();
		assert!(!s.drag.active);
	}

	#[test]
	fn zoom_is_clamped_and_cursor_anchored() {
		let mut s = editor(1);
		let before = s.screen_to_graph(200.0, 100.0);
		s.zoom_at(200.0, 100.0, 1.1);
		let after = s.screen_to_graph(200.0, 100.0);
		assert!((before.0 - after.0).abs() < 1e-9 && (before.1 - after.1).abs() < 1e-9);

		for _ in 0..100 {
			s.zoom_at(0.0, 0.0, 1.1);
		}
		assert_eq!(s.transform.k, MAX_ZOOM);
	}

	#[test]
	fn reload_discards_edges() {
		let mut s = editor(3);
		s.dispatch(GraphAction::Connect {
			source: "1".into(),
			target: "3".into(),
		});
		s.reload(&members(3));
		assert!(s.graph.edges().is_empty());
		assert_eq!(s.graph.nodes().len(), 3);
	}
}

//! Node and edge collections behind the family tree canvas, driven by
//! [`GraphAction`]s.

use log::debug;

use super::resolver::{Resolution, resolve_connection};
use super::types::{Edge, IdSequence, Node, NodeId, NodeKind, Selection};
use crate::api::Member;

/// Grid used for the initial placement of member cards.
const GRID_COLUMNS: usize = 3;
const GRID_ORIGIN_X: f64 = 50.0;
const GRID_COLUMN_WIDTH: f64 = 260.0;
const GRID_ROW_HEIGHT: f64 = 160.0;

/// Top-left corner of the `index`-th card in the initial grid.
pub fn grid_position(index: usize) -> (f64, f64) {
	(
		GRID_ORIGIN_X + (index % GRID_COLUMNS) as f64 * GRID_COLUMN_WIDTH,
		(index / GRID_COLUMNS) as f64 * GRID_ROW_HEIGHT,
	)
}

/// State transitions of the editor.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphAction {
	/// User drew `source → target`.
	Connect {
		/// Node the drag started from.
		source: NodeId,
		/// Node the drag ended on.
		target: NodeId,
	},
	/// Removal key pressed.
	DeleteSelection,
	/// Member created locally, ahead of the next directory reload.
	AddMember(Member),
	/// Select exactly this item.
	Select(Selection),
	/// Flip the selection mark of this item, keeping the rest.
	ToggleSelect(Selection),
	/// Drop every selection mark.
	ClearSelection,
	/// Node dragged to a new position.
	MoveNode {
		/// Dragged node.
		id: NodeId,
		/// New world-space x.
		x: f64,
		/// New world-space y.
		y: f64,
	},
}

/// Family tree graph: member cards, union anchors and the edges between them.
///
/// No member card ever has more than one incoming edge; a second parent is
/// always folded into a union anchor by [`GraphAction::Connect`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FamilyGraph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	ids: IdSequence,
}

impl FamilyGraph {
	/// One card per member on the initial grid, no edges.
	pub fn from_members(members: &[Member]) -> Self {
		Self::from_members_with_ids(members, IdSequence::default())
	}

	/// As [`FamilyGraph::from_members`], drawing synthetic ids from `ids`.
	pub fn from_members_with_ids(members: &[Member], ids: IdSequence) -> Self {
		let mut graph = Self {
			nodes: Vec::with_capacity(members.len()),
			edges: Vec::new(),
			ids,
		};
		for member in members {
			graph.push_member(member.clone());
		}
		graph
	}

	/// All nodes in insertion order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// All edges in insertion order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Look a node up by id.
	pub fn node(&self, id: &NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == *id)
	}

	/// Whether `source → target` is already drawn.
	pub fn has_edge(&self, source: &NodeId, target: &NodeId) -> bool {
		self.edges.iter().any(|e| e.joins(source, target))
	}

	/// Edges pointing at `id`.
	pub fn incoming(&self, id: &NodeId) -> impl Iterator<Item = &Edge> {
		self.edges.iter().filter(move |e| e.target == *id)
	}

	/// Edges leaving `id`.
	pub fn outgoing(&self, id: &NodeId) -> impl Iterator<Item = &Edge> {
		self.edges.iter().filter(move |e| e.source == *id)
	}

	/// The single edge into `id`, if it has a parent.
	pub fn parent_edge(&self, id: &NodeId) -> Option<&Edge> {
		let mut incoming = self.incoming(id);
		let first = incoming.next();
		debug_assert!(
			self.node(id).is_none_or(|n| n.is_union()) || incoming.next().is_none(),
			"member {id} has more than one parent edge"
		);
		first
	}

	/// Number of union anchors.
	pub fn union_count(&self) -> usize {
		self.nodes.iter().filter(|n| n.is_union()).count()
	}

	/// Whether anything is marked for deletion.
	pub fn has_selection(&self) -> bool {
		self.nodes.iter().any(|n| n.selected) || self.edges.iter().any(|e| e.selected)
	}

	/// `(state, action) → state` form of [`FamilyGraph::apply`].
	pub fn reduce(mut self, action: GraphAction) -> Self {
		self.apply(action);
		self
	}

	/// Run one state transition to completion.
	pub fn apply(&mut self, action: GraphAction) {
		match action {
			GraphAction::Connect { source, target } => self.connect(&source, &target),
			GraphAction::DeleteSelection => self.delete_selection(),
			GraphAction::AddMember(member) => {
				if self.node(&NodeId::member(member.id)).is_some() {
					debug!("member {} already on the canvas", member.id);
					return;
				}
				self.push_member(member);
			}
			GraphAction::Select(sel) => {
				self.clear_selection();
				self.set_selected(&sel, |_| true);
			}
			GraphAction::ToggleSelect(sel) => self.set_selected(&sel, |was| !was),
			GraphAction::ClearSelection => self.clear_selection(),
			GraphAction::MoveNode { id, x, y } => {
				if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
					node.x = x;
					node.y = y;
				}
			}
		}
	}

	fn connect(&mut self, source: &NodeId, target: &NodeId) {
		let resolution = resolve_connection(self, source, target);
		debug!("connect {source} -> {target}: {resolution:?}");
		match resolution {
			Resolution::Ignore => {}
			Resolution::AddEdge { source, target } => self.push_edge(source, target),
			Resolution::JoinUnion { source, union } => self.push_edge(source, union),
			Resolution::CreateUnion {
				replaced,
				parent,
				source,
				child,
				position: (x, y),
			} => {
				self.edges.retain(|e| e.id != replaced);
				let union = self.ids.union_id();
				self.nodes.push(Node {
					id: union.clone(),
					kind: NodeKind::Union,
					x,
					y,
					selected: false,
				});
				self.push_edge(parent, union.clone());
				self.push_edge(source, union.clone());
				self.push_edge(union, child);
			}
		}
	}

	fn delete_selection(&mut self) {
		let removed: Vec<NodeId> = self
			.nodes
			.iter()
			.filter(|n| n.selected)
			.map(|n| n.id.clone())
			.collect();
		self.nodes.retain(|n| !n.selected);
		self.edges
			.retain(|e| !e.selected && !removed.iter().any(|id| e.touches(id)));
		debug!("deleted {} node(s)", removed.len());
	}

	fn clear_selection(&mut self) {
		self.nodes.iter_mut().for_each(|n| n.selected = false);
		self.edges.iter_mut().for_each(|e| e.selected = false);
	}

	fn set_selected(&mut self, sel: &Selection, mark: impl Fn(bool) -> bool) {
		match sel {
			Selection::Node(id) => {
				if let Some(n) = self.nodes.iter_mut().find(|n| n.id == *id) {
					n.selected = mark(n.selected);
				}
			}
			Selection::Edge(id) => {
				if let Some(e) = self.edges.iter_mut().find(|e| e.id == *id) {
					e.selected = mark(e.selected);
				}
			}
		}
	}

	fn push_member(&mut self, member: Member) {
		let slot = self.nodes.iter().filter(|n| n.is_member()).count();
		let (x, y) = grid_position(slot);
		self.nodes.push(Node {
			id: NodeId::member(member.id),
			kind: NodeKind::Member(member),
			x,
			y,
			selected: false,
		});
	}

	fn push_edge(&mut self, source: NodeId, target: NodeId) {
		let id = self.ids.edge_id();
		self.edges.push(Edge {
			id,
			source,
			target,
			selected: false,
		});
	}
}

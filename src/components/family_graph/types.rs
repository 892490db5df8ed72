//! Plain data behind the family tree canvas: ids, nodes, edges and selections.

use std::fmt;

use crate::api::Member;

/// Identity of a node on the canvas.
///
/// Member nodes use the stringified member id, union nodes a generated
/// `union-<n>` token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
	/// Node id for the card of a backend member.
	pub fn member(id: i64) -> Self {
		Self(id.to_string())
	}

	/// Borrow the raw token.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for NodeId {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}

/// Identity of a drawn connection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub String);

impl fmt::Display for EdgeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// What a node stands for.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
	/// Card backed by a member record.
	Member(Member),
	/// Invisible anchor joining the parents of a shared child.
	Union,
}

/// A positioned node. Member positions are the card's top-left corner, union
/// positions the anchor point itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Node identity.
	pub id: NodeId,
	/// Member card or union anchor.
	pub kind: NodeKind,
	/// World-space x.
	pub x: f64,
	/// World-space y.
	pub y: f64,
	/// Marked for deletion by the removal key.
	pub selected: bool,
}

impl Node {
	/// Whether this node is a member card.
	pub fn is_member(&self) -> bool {
		matches!(self.kind, NodeKind::Member(_))
	}

	/// Whether this node is a union anchor.
	pub fn is_union(&self) -> bool {
		matches!(self.kind, NodeKind::Union)
	}

	/// Backing member record, if any.
	pub fn member(&self) -> Option<&Member> {
		match &self.kind {
			NodeKind::Member(m) => Some(m),
			NodeKind::Union => None,
		}
	}
}

/// Directed connection: parent → child, parent → union or union → child.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// Edge identity.
	pub id: EdgeId,
	/// Upstream node.
	pub source: NodeId,
	/// Downstream node.
	pub target: NodeId,
	/// Marked for deletion by the removal key.
	pub selected: bool,
}

impl Edge {
	/// Whether the edge has `id` as either endpoint.
	pub fn touches(&self, id: &NodeId) -> bool {
		self.source == *id || self.target == *id
	}

	/// Whether the edge runs `source → target`.
	pub fn joins(&self, source: &NodeId, target: &NodeId) -> bool {
		self.source == *source && self.target == *target
	}
}

/// Something the user can select on the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
	/// A member card or union anchor.
	Node(NodeId),
	/// A drawn connection.
	Edge(EdgeId),
}

/// Monotonic source of synthetic identifiers.
///
/// Every union node and edge takes the next value, so a graph built from the
/// same members and driven by the same actions always carries the same ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdSequence {
	next: u64,
}

impl IdSequence {
	/// Start the sequence at `next`.
	pub fn starting_at(next: u64) -> Self {
		Self { next }
	}

	fn bump(&mut self) -> u64 {
		let n = self.next;
		self.next += 1;
		n
	}

	/// Fresh union node id.
	pub fn union_id(&mut self) -> NodeId {
		NodeId(format!("union-{}", self.bump()))
	}

	/// Fresh edge id.
	pub fn edge_id(&mut self) -> EdgeId {
		EdgeId(format!("edge-{}", self.bump()))
	}
}

/// Lifespan line shown under a member's name: `1931 — 2004`, `1931`, `— 2004` or empty.
pub fn lifespan_label(birth_year: Option<i32>, death_year: Option<i32>) -> String {
	match (birth_year, death_year) {
		(Some(b), Some(d)) => format!("{b} — {d}"),
		(Some(b), None) => b.to_string(),
		(None, Some(d)) => format!("— {d}"),
		(None, None) => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn id_sequence_is_monotonic_and_shared() {
		let mut ids = IdSequence::default();
		assert_eq!(ids.edge_id(), EdgeId("edge-0".into()));
		assert_eq!(ids.union_id(), NodeId("union-1".into()));
		assert_eq!(ids.edge_id(), EdgeId("edge-2".into()));
	}

	#[test]
	fn lifespan_label_variants() {
		assert_eq!(lifespan_label(Some(1931), Some(2004)), "1931 — 2004");
		assert_eq!(lifespan_label(Some(1931), None), "1931");
		assert_eq!(lifespan_label(None, Some(2004)), "— 2004");
		assert_eq!(lifespan_label(None, None), "");
	}

	#[test]
	fn member_node_id_is_stringified() {
		assert_eq!(NodeId::member(42).as_str(), "42");
	}
}

//! Decides what a drawn connection does to the edge set.
//!
//! Two member cards pointing at the same child are rewritten into a
//! converging pair through an invisible union anchor, so the tree never shows
//! two overlapping parent lines into one card.

use super::graph::FamilyGraph;
use super::types::{EdgeId, NodeId};

/// Vertical offset of a fresh union anchor below its parents' midpoint.
pub const UNION_DROP: f64 = 60.0;

/// Outcome of a proposed `source → target` connection.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
	/// Nothing changes.
	Ignore,
	/// Plain `source → target` edge.
	AddEdge {
		/// Upstream node.
		source: NodeId,
		/// Downstream node.
		target: NodeId,
	},
	/// The child already hangs off a union: `source → union`.
	JoinUnion {
		/// New parent.
		source: NodeId,
		/// Existing union above the child.
		union: NodeId,
	},
	/// The child already has one member parent: replace `parent → child`
	/// with `parent → U`, `source → U`, `U → child`.
	CreateUnion {
		/// Edge `parent → child` to drop.
		replaced: EdgeId,
		/// Existing member parent.
		parent: NodeId,
		/// New member parent.
		source: NodeId,
		/// Shared child.
		child: NodeId,
		/// Where the union anchor goes.
		position: (f64, f64),
	},
}

/// Resolve a connection gesture against the current graph.
///
/// Self loops, unknown ids, duplicates of an existing edge, a second child
/// for a union, and edges that would give an already-parented card a second
/// direct parent all resolve to [`Resolution::Ignore`].
pub fn resolve_connection(graph: &FamilyGraph, source: &NodeId, target: &NodeId) -> Resolution {
	if source == target {
		return Resolution::Ignore;
	}
	let (Some(src), Some(tgt)) = (graph.node(source), graph.node(target)) else {
		return Resolution::Ignore;
	};
	if graph.has_edge(source, target) {
		return Resolution::Ignore;
	}
	// A union feeds exactly one child.
	if src.is_union() && graph.outgoing(source).next().is_some() {
		return Resolution::Ignore;
	}

	let parent_edge = graph.parent_edge(target);

	if !(src.is_member() && tgt.is_member()) {
		// Only member targets are held to a single direct parent.
		if tgt.is_member() && parent_edge.is_some() {
			return Resolution::Ignore;
		}
		return Resolution::AddEdge {
			source: source.clone(),
			target: target.clone(),
		};
	}

	let Some(existing) = parent_edge else {
		return Resolution::AddEdge {
			source: source.clone(),
			target: target.clone(),
		};
	};

	let Some(parent) = graph.node(&existing.source) else {
		return Resolution::Ignore;
	};

	if parent.is_union() {
		if graph.has_edge(source, &parent.id) {
			return Resolution::Ignore;
		}
		return Resolution::JoinUnion {
			source: source.clone(),
			union: parent.id.clone(),
		};
	}

	Resolution::CreateUnion {
		replaced: existing.id.clone(),
		parent: parent.id.clone(),
		source: source.clone(),
		child: target.clone(),
		position: (
			(parent.x + src.x) / 2.0,
			(parent.y + src.y) / 2.0 + UNION_DROP,
		),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::Member;
	use crate::components::family_graph::graph::GraphAction;

	fn member(id: i64, name: &str) -> Member {
		Member {
			id,
			name: name.into(),
			..Member::default()
		}
	}

	fn graph(n: i64) -> FamilyGraph {
		let members: Vec<Member> = (1..=n).map(|i| member(i, &format!("m{i}"))).collect();
		FamilyGraph::from_members(&members)
	}

	fn connect(g: &mut FamilyGraph, s: &str, t: &str) {
		g.apply(GraphAction::Connect {
			source: s.into(),
			target: t.into(),
		});
	}

	#[test]
	fn self_loop_is_ignored() {
		let g = graph(2);
		assert_eq!(resolve_connection(&g, &"1".into(), &"1".into()), Resolution::Ignore);
	}

	#[test]
	fn unknown_ids_are_ignored() {
		let g = graph(2);
		assert_eq!(resolve_connection(&g, &"1".into(), &"9".into()), Resolution::Ignore);
		assert_eq!(resolve_connection(&g, &"9".into(), &"1".into()), Resolution::Ignore);
	}

	#[test]
	fn orphan_child_gets_plain_edge() {
		let g = graph(2);
		assert_eq!(
			resolve_connection(&g, &"1".into(), &"2".into()),
			Resolution::AddEdge {
				source: "1".into(),
				target: "2".into()
			}
		);
	}

	#[test]
	fn second_member_parent_creates_union_between_and_below() {
		let mut g = graph(3);
		connect(&mut g, "1", "3");
		let p = g.node(&"1".into()).cloned().unwrap();
		let q = g.node(&"2".into()).cloned().unwrap();

		match resolve_connection(&g, &"2".into(), &"3".into()) {
			Resolution::CreateUnion {
				parent,
				source,
				child,
				position,
				..
			} => {
				assert_eq!(parent, NodeId::from("1"));
				assert_eq!(source, NodeId::from("2"));
				assert_eq!(child, NodeId::from("3"));
				assert_eq!(position, ((p.x + q.x) / 2.0, (p.y + q.y) / 2.0 + UNION_DROP));
			}
			other => panic!("expected union creation, got {other:?}"),
		}
	}

	#[test]
	fn third_parent_joins_existing_union() {
		let mut g = graph(4);
		connect(&mut g, "1", "3");
		connect(&mut g, "2", "3");
		let union = g.parent_edge(&"3".into()).unwrap().source.clone();

		assert_eq!(
			resolve_connection(&g, &"4".into(), &"3".into()),
			Resolution::JoinUnion {
				source: "4".into(),
				union
			}
		);
	}

	#[test]
	fn repeating_a_parent_link_is_ignored() {
		let mut g = graph(3);
		connect(&mut g, "1", "3");
		assert_eq!(resolve_connection(&g, &"1".into(), &"3".into()), Resolution::Ignore);

		connect(&mut g, "2", "3");
		// 2 already feeds the union above 3
		assert_eq!(resolve_connection(&g, &"2".into(), &"3".into()), Resolution::Ignore);
	}

	#[test]
	fn member_to_union_is_plain_edge() {
		let mut g = graph(4);
		connect(&mut g, "1", "3");
		connect(&mut g, "2", "3");
		let union = g.parent_edge(&"3".into()).unwrap().source.clone();

		assert_eq!(
			resolve_connection(&g, &"4".into(), &union),
			Resolution::AddEdge {
				source: "4".into(),
				target: union
			}
		);
	}

	#[test]
	fn union_into_parented_member_is_ignored() {
		let mut g = graph(4);
		connect(&mut g, "1", "3");
		connect(&mut g, "2", "3");
		connect(&mut g, "1", "4");
		let union = g.parent_edge(&"3".into()).unwrap().source.clone();

		assert_eq!(resolve_connection(&g, &union, &"4".into()), Resolution::Ignore);
	}

	#[test]
	fn union_with_a_child_does_not_take_another() {
		let mut g = graph(4);
		connect(&mut g, "1", "3");
		connect(&mut g, "2", "3");
		let union = g.parent_edge(&"3".into()).unwrap().source.clone();

		assert_eq!(resolve_connection(&g, &union, &"4".into()), Resolution::Ignore);
		connect(&mut g, &union.to_string(), "4");
		assert_eq!(g.outgoing(&union).count(), 1);
		assert_eq!(g.incoming(&"4".into()).count(), 0);
	}
}

//! World-space shapes of cards, anchors and edge paths.

use super::types::Node;

/// Member card width in world units.
pub const CARD_WIDTH: f64 = 200.0;
/// Member card height in world units.
pub const CARD_HEIGHT: f64 = 72.0;
/// Corner radius of a card.
pub const CARD_RADIUS: f64 = 10.0;
/// Drawn radius of a connection handle.
pub const HANDLE_RADIUS: f64 = 4.0;
/// Grab tolerance around an anchor, wider than the drawn handle.
pub const HANDLE_HIT: f64 = 9.0;
/// Click tolerance around a union point.
pub const UNION_HIT: f64 = 8.0;
/// Click tolerance around an edge path.
pub const EDGE_HIT: f64 = 6.0;

/// World-space `(x, y)`.
pub type Point = (f64, f64);

/// Where incoming edges attach: top-center of a card, the point of a union.
pub fn input_anchor(node: &Node) -> Point {
	if node.is_union() {
		(node.x, node.y)
	} else {
		(node.x + CARD_WIDTH / 2.0, node.y)
	}
}

/// Where outgoing edges leave: bottom-center of a card, the point of a union.
pub fn output_anchor(node: &Node) -> Point {
	if node.is_union() {
		(node.x, node.y)
	} else {
		(node.x + CARD_WIDTH / 2.0, node.y + CARD_HEIGHT)
	}
}

/// Orthogonal step path from `from` down to `to`, bending at the vertical midpoint.
pub fn step_path(from: Point, to: Point) -> [Point; 4] {
	let mid_y = (from.1 + to.1) / 2.0;
	[from, (from.0, mid_y), (to.0, mid_y), to]
}

/// Euclidean distance.
pub fn distance(a: Point, b: Point) -> f64 {
	((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// Distance from `p` to the segment `a`-`b`.
pub fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	let len_sq = dx * dx + dy * dy;
	if len_sq < 1e-9 {
		return distance(p, a);
	}
	let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0);
	distance(p, (a.0 + t * dx, a.1 + t * dy))
}

/// Distance from `p` to the nearest segment of `path`.
pub fn path_distance(p: Point, path: &[Point]) -> f64 {
	path.windows(2)
		.map(|w| segment_distance(p, w[0], w[1]))
		.fold(f64::INFINITY, f64::min)
}

/// Whether `p` lands on the node's body.
pub fn node_contains(node: &Node, p: Point) -> bool {
	if node.is_union() {
		distance(p, (node.x, node.y)) < UNION_HIT
	} else {
		p.0 >= node.x && p.0 <= node.x + CARD_WIDTH && p.1 >= node.y && p.1 <= node.y + CARD_HEIGHT
	}
}

/// Bounding box `(min, max)` of all nodes, or `None` for an empty canvas.
pub fn bounds<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Option<(Point, Point)> {
	nodes.into_iter().fold(None, |acc, n| {
		let (w, h) = if n.is_union() {
			(0.0, 0.0)
		} else {
			(CARD_WIDTH, CARD_HEIGHT)
		};
		let (lo, hi) = ((n.x, n.y), (n.x + w, n.y + h));
		Some(match acc {
			None => (lo, hi),
			Some((a, b)) => ((a.0.min(lo.0), a.1.min(lo.1)), (b.0.max(hi.0), b.1.max(hi.1))),
		})
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::Member;
	use crate::components::family_graph::types::{NodeId, NodeKind};

	fn card(x: f64, y: f64) -> Node {
		Node {
			id: NodeId::member(1),
			kind: NodeKind::Member(Member::default()),
			x,
			y,
			selected: false,
		}
	}

	fn union(x: f64, y: f64) -> Node {
		Node {
			id: "union-0".into(),
			kind: NodeKind::Union,
			x,
			y,
			selected: false,
		}
	}

	#[test]
	fn anchors_sit_on_card_edges() {
		let n = card(10.0, 20.0);
		assert_eq!(input_anchor(&n), (110.0, 20.0));
		assert_eq!(output_anchor(&n), (110.0, 92.0));
		let u = union(5.0, 6.0);
		assert_eq!(input_anchor(&u), output_anchor(&u));
	}

	#[test]
	fn step_path_bends_at_midpoint() {
		assert_eq!(
			step_path((0.0, 0.0), (100.0, 40.0)),
			[(0.0, 0.0), (0.0, 20.0), (100.0, 20.0), (100.0, 40.0)]
		);
	}

	#[test]
	fn segment_distance_clamps_to_endpoints() {
		assert_eq!(segment_distance((5.0, 3.0), (0.0, 0.0), (10.0, 0.0)), 3.0);
		assert_eq!(segment_distance((-4.0, 3.0), (0.0, 0.0), (10.0, 0.0)), 5.0);
		assert_eq!(segment_distance((1.0, 1.0), (1.0, 1.0), (1.0, 1.0)), 0.0);
	}

	#[test]
	fn path_distance_picks_nearest_leg() {
		let path = step_path((0.0, 0.0), (100.0, 40.0));
		assert_eq!(path_distance((50.0, 22.0), &path), 2.0);
	}

	#[test]
	fn hit_testing_cards_and_unions() {
		assert!(node_contains(&card(0.0, 0.0), (199.0, 71.0)));
		assert!(!node_contains(&card(0.0, 0.0), (201.0, 10.0)));
		assert!(node_contains(&union(0.0, 0.0), (3.0, 3.0)));
		assert!(!node_contains(&union(0.0, 0.0), (9.0, 0.0)));
	}

	#[test]
	fn bounds_cover_cards_and_unions() {
		let nodes = [card(0.0, 0.0), card(260.0, 160.0), union(-30.0, 50.0)];
		assert_eq!(bounds(&nodes), Some(((-30.0, 0.0), (460.0, 232.0))));
		assert_eq!(bounds(std::iter::empty()), None);
	}
}

//! Editable family tree drawn on a canvas.

mod component;
pub mod geometry;
pub mod graph;
mod render;
pub mod resolver;
mod state;
pub mod types;

pub use component::FamilyGraphCanvas;
pub use graph::{FamilyGraph, GraphAction};
pub use resolver::{Resolution, resolve_connection};
pub use types::{Edge, EdgeId, IdSequence, Node, NodeId, NodeKind, Selection};

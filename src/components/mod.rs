//! Page building blocks: the family tree canvas, the add-member form and the dashboard layout.

pub mod add_member;
pub mod family_graph;
pub mod layout;

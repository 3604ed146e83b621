//! Flow exploration: walking steps, recording routes, and drawing the result.
//!
//! A [`Flow`] starts from one [`Step`](crate::Step) and tries every case of
//! every reached step, depth first. Each path that ends in a terminal outcome
//! becomes a [`Route`]. Routes merge into a [`Graph`] that can be exported as
//! DOT text and rendered with Graphviz through a [`Renderer`].

pub mod graph;
pub mod render;
pub mod route;
pub mod summary;
pub mod walker;

pub use graph::{display, Edge, Graph};
pub use render::{Renderer, Rendered, DEFAULT_FONT, DEFAULT_PROGRAM, GRAPHVIZ_ENV};
pub use route::{Destination, Hop, Leaf, LeafKind, Route};
pub use summary::{Defect, WalkSummary};
pub use walker::{Flow, Replay};

// Resume rendering: document -> visual tree -> positioned page.
// Projection is pure and per-template. On the export path, layout and
// rasterization run inside tokio::task::spawn_blocking.

pub mod classic;
pub mod creative;
pub mod font_metrics;
pub mod layout;
pub mod minimal;
pub mod modern;
pub mod projector;
pub mod tree;

// Re-export the public API consumed by the wizard and export handlers.
pub use layout::{layout, LaidOutPage, PaintOp};
pub use projector::{project, project_all, Projection, RenderFault};
pub use tree::VisualTree;

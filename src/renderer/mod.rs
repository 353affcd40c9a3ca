//! 2D rendering
//!
//! The scene is drawn through the [`Canvas`] trait. [`VertexBatch`] turns
//! those calls into triangles and [`RenderState`] pushes them to WebGPU.

pub mod batch;
pub mod canvas;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use batch::VertexBatch;
pub use canvas::Canvas;
pub use pipeline::{RenderError, RenderState};
pub use scene::draw_frame;
pub use vertex::Vertex;

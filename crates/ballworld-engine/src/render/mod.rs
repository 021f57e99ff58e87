//! GPU rendering subsystem.
//!
//! Renderers consume a [`DrawList`](crate::draw::DrawList) and own their GPU
//! resources (pipelines, buffers, atlas), created lazily on first use.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};

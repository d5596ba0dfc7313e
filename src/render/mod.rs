//! CPU presentation of assembled frames.

mod framebuffer;
mod rasterizer;
mod renderer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{EdgeFunctionRasterizer, Rasterizer};
pub use renderer::Renderer;

//! Edge function-based triangle rasterization.
//!
//! The rasterizer tests each pixel of the triangle's bounding box against
//! three edge equations to determine coverage.
//!
//! # Edge Function
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! This is the 2D cross product (B - A) x (P - A):
//! - Positive value: P is on one side of AB
//! - Negative value: P is on the other side
//! - Zero: P is exactly on the edge
//!
//! A pixel is inside when all three edge functions share the sign of the
//! triangle's signed area, so either winding fills the same pixels.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use super::Rasterizer;
use crate::math::vec3::Vec3;
use crate::render::framebuffer::FrameBuffer;

/// Triangle rasterizer using the edge function algorithm.
///
/// All arithmetic is done in `f32` and the bounding box is clamped to the
/// buffer before iterating, so vertices far outside the screen cost nothing
/// extra and cannot overflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    pub fn new() -> Self {
        EdgeFunctionRasterizer
    }

    /// Signed area of the parallelogram spanned by (B - A) and (P - A).
    #[inline]
    fn edge_function(a: Vec3, b: Vec3, p: Vec3) -> f32 {
        (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
    }
}

impl Rasterizer for EdgeFunctionRasterizer {
    fn fill_triangle(&self, points: [Vec3; 3], buffer: &mut FrameBuffer, color: u32) {
        let [v0, v1, v2] = points;

        let area = Self::edge_function(v0, v1, v2);
        if area.abs() < f32::EPSILON || !area.is_finite() {
            return; // Degenerate triangle
        }

        // Bounding box, clipped to framebuffer bounds. Float-to-int casts
        // saturate, so huge coordinates clamp cleanly.
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i64).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i64).min(buffer.width() as i64 - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i64).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i64).min(buffer.height() as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                // Sample at pixel center
                let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);

                let w0 = Self::edge_function(v1, v2, p);
                let w1 = Self::edge_function(v2, v0, p);
                let w2 = Self::edge_function(v0, v1, p);

                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };

                if inside {
                    buffer.set_pixel(x, y, color);
                }
            }
        }
    }
}

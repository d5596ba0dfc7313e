//! Polygon rasterization.
//!
//! Faces reach the renderer as convex screen-space polygons. A rasterizer only
//! has to fill triangles; polygons are split into a fan around their first
//! vertex.

mod edgefunction;

pub use edgefunction::EdgeFunctionRasterizer;

use super::framebuffer::FrameBuffer;
use crate::math::vec3::Vec3;
use crate::projection::ScreenPoint;

/// Trait for triangle rasterization algorithms.
///
/// Implementors define how triangles are filled into a pixel buffer. Both
/// windings must be accepted: faces keep the winding of their mesh, and the
/// projection may mirror it.
pub trait Rasterizer {
    /// Fill a screen-space triangle (z is ignored) with a flat color.
    fn fill_triangle(&self, points: [Vec3; 3], buffer: &mut FrameBuffer, color: u32);

    /// Fill a convex polygon by fanning it into triangles.
    ///
    /// Polygons with fewer than three points draw nothing.
    fn fill_polygon(&self, points: &[ScreenPoint], buffer: &mut FrameBuffer, color: u32) {
        let Some((&first, rest)) = points.split_first() else {
            return;
        };
        let anchor = to_vec3(first);
        for pair in rest.windows(2) {
            self.fill_triangle([anchor, to_vec3(pair[0]), to_vec3(pair[1])], buffer, color);
        }
    }
}

#[inline]
fn to_vec3(p: ScreenPoint) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, 0.0)
}

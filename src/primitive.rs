//! 2D output of a frame.

use crate::colors::Color;
use crate::projection::ScreenPoint;
use crate::visibility::Rejection;

/// A drawable shape in screen space.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        color: Color,
        width: u32,
    },
    /// Convex polygon, vertices in winding order.
    Polygon {
        points: Vec<ScreenPoint>,
        color: Color,
    },
}

/// Counters collected while assembling a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub faces: usize,
    pub faces_culled: usize,
    pub faces_degenerate: usize,
    pub faces_unprojectable: usize,
    pub polygons: usize,
    pub lines: usize,
    pub edges_dropped: usize,
}

impl FrameStats {
    pub fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::BackFacing => self.faces_culled += 1,
            Rejection::Degenerate => self.faces_degenerate += 1,
            Rejection::Unprojectable => self.faces_unprojectable += 1,
        }
    }
}

/// Everything the presentation layer needs to draw one frame, in draw order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub primitives: Vec<Primitive>,
    pub stats: FrameStats,
}

impl Frame {
    pub fn polygons(&self) -> impl Iterator<Item = (&[ScreenPoint], Color)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Polygon { points, color } => Some((points.as_slice(), *color)),
            Primitive::Line { .. } => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (ScreenPoint, ScreenPoint)> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line { from, to, .. } => Some((*from, *to)),
            Primitive::Polygon { .. } => None,
        })
    }
}

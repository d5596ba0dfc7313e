//! Low-level rendering primitives.
//!
//! Provides the [`Renderer`] struct which owns the color buffer and draws the
//! primitives of a [`Frame`] into it.

use std::path::Path;

use super::framebuffer::FrameBuffer;
use super::rasterizer::{EdgeFunctionRasterizer, Rasterizer};
use crate::colors::{self, Color};
use crate::primitive::{Frame, Primitive};
use crate::projection::ScreenPoint;

pub struct Renderer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
    background: Color,
    rasterizer: EdgeFunctionRasterizer,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let background = colors::BACKGROUND;
        Self {
            color_buffer: vec![background.to_argb(); (width * height) as usize],
            width,
            height,
            background,
            rasterizer: EdgeFunctionRasterizer::new(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.color_buffer = vec![self.background.to_argb(); (width * height) as usize];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background.to_argb());
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        self.as_framebuffer().set_pixel(x, y, color.to_argb());
    }

    /// The color at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(Color::from_argb(
                self.color_buffer[(y * self.width + x) as usize],
            ))
        } else {
            None
        }
    }

    /// Clears to the background and draws every primitive in order.
    pub fn draw(&mut self, frame: &Frame) {
        self.clear();
        for primitive in &frame.primitives {
            match primitive {
                Primitive::Polygon { points, color } => self.fill_polygon(points, *color),
                Primitive::Line {
                    from,
                    to,
                    color,
                    width,
                } => self.draw_line(*from, *to, *color, *width),
            }
        }
    }

    pub fn fill_polygon(&mut self, points: &[ScreenPoint], color: Color) {
        let rasterizer = self.rasterizer;
        rasterizer.fill_polygon(points, &mut self.as_framebuffer(), color.to_argb());
    }

    /// Draws a line between two points using Bresenham's line algorithm,
    /// stamping a `width` x `width` square at every step.
    ///
    /// Bresenham's algorithm tracks an error term that represents the distance
    /// between the ideal line and the current pixel. For each step along the
    /// major axis, it decides whether to also step along the minor axis based
    /// on the accumulated error.
    pub fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Color, width: u32) {
        let color = color.to_argb();
        let brush = width.max(1) as i64;
        let reach = brush / 2;
        let mut buffer = self.as_framebuffer();

        let (x0, y0) = (from.x as i64, from.y as i64);
        let (x1, y1) = (to.x as i64, to.y as i64);

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let x_incr_direction = if x0 < x1 { 1 } else { -1 };
        let y_incr_direction = if y0 < y1 { 1 } else { -1 };

        // Positive error favors x movement, negative favors y.
        let mut err = dx - dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            for oy in -reach..brush - reach {
                for ox in -reach..brush - reach {
                    buffer.set_pixel(x + ox, y + oy, color);
                }
            }

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_incr_direction;
            }
            // Both conditions can be true, resulting in a diagonal step.
            if e2 < dx {
                err += dx;
                y += y_incr_direction;
            }
        }
    }

    /// The color buffer as raw bytes, for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.color_buffer.as_slice())
    }

    /// Bytes per row of [`Self::as_bytes`].
    pub fn pitch(&self) -> usize {
        self.width as usize * std::mem::size_of::<u32>()
    }

    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let c = Color::from_argb(self.color_buffer[(y * self.width + x) as usize]);
            image::Rgba([c.r, c.g, c.b, 0xFF])
        })
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)
    }

    fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(&mut self.color_buffer, self.width, self.height)
    }
}

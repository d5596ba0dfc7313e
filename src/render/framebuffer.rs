//! Frame buffer abstraction for 2D pixel access.

/// A borrowed view into a packed ARGB8888 color buffer.
///
/// Wraps a 1D slice with width/height metadata to enable safe 2D pixel
/// access. Out-of-bounds writes are ignored.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    pub fn new(color_buffer: &'a mut [u32], width: u32, height: u32) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            (width * height) as usize,
            "Color buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x >= 0 && x < self.width as i64 && y >= 0 && y < self.height as i64 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i64, y: i64, color: u32) {
        if let Some(index) = self.index(x, y) {
            self.color_buffer[index] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i64, y: i64) -> Option<u32> {
        self.index(x, y).map(|index| self.color_buffer[index])
    }
}

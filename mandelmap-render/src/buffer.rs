use crate::theme::Rgb;

/// An RGB pixel buffer representing a rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbBuffer {
    pub width: u32,
    pub height: u32,
    /// RGB pixel data, 3 bytes per pixel, row-major order.
    pub pixels: Vec<u8>,
}

impl RgbBuffer {
    /// Create a new buffer filled with a solid color.
    pub fn new(width: u32, height: u32, fill: Rgb) -> Self {
        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        for chunk in pixels.chunks_exact_mut(3) {
            chunk.copy_from_slice(&fill);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    #[inline]
    pub fn put(&mut self, x: u32, y: u32, color: Rgb) {
        let i = self.offset(x, y);
        self.pixels[i..i + 3].copy_from_slice(&color);
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgb {
        let i = self.offset(x, y);
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Fill a rectangle given by its top-left corner (possibly negative),
    /// clipping the draw to the canvas bounds.
    pub fn fill_rect(&mut self, x: i32, y: i32, rect_w: u32, rect_h: u32, color: Rgb) {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (x.saturating_add(rect_w as i32)).clamp(0, self.width as i32) as u32;
        let y1 = (y.saturating_add(rect_h as i32)).clamp(0, self.height as i32) as u32;
        for py in y0..y1 {
            for px in x0..x1 {
                self.put(px, py, color);
            }
        }
    }

    /// Exact 2× nearest-neighbour upscale, used to bring a half-resolution
    /// frame up to display resolution under pixel doubling.
    pub fn upscale2x(&self) -> RgbBuffer {
        let mut out = RgbBuffer::new(self.width * 2, self.height * 2, [0, 0, 0]);
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.get(x, y);
                out.put(x * 2, y * 2, c);
                out.put(x * 2 + 1, y * 2, c);
                out.put(x * 2, y * 2 + 1, c);
                out.put(x * 2 + 1, y * 2 + 1, c);
            }
        }
        out
    }
}

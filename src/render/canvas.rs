//! CPU color buffer with the few drawing primitives the diagnostics need.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::colors;

/// Axis-aligned pixel rectangle. Drawing through it never touches pixels outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && x < self.x + self.width as i32
            && y < self.y + self.height as i32
    }
}

/// Buffer length for a `width` x `height` image, multiplied without `u32` overflow.
#[inline]
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// An ARGB8888 color buffer.
pub struct Canvas {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            color_buffer: vec![colors::BACKGROUND; pixel_count(width, height)],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.color_buffer = vec![colors::BACKGROUND; pixel_count(width, height)];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if self.bounds().contains(x, y) {
            let index = self.index(x as u32, y as u32);
            self.color_buffer[index] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.bounds()
            .contains(x, y)
            .then(|| self.color_buffer[self.index(x as u32, y as u32)])
    }

    /// Fills `rect`, cut to the canvas.
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        for y in rect.y..rect.y + rect.height as i32 {
            for x in rect.x..rect.x + rect.width as i32 {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Bresenham line, only plotting pixels inside `clip`.
    ///
    /// The caller keeps the endpoints near the visible area; the loop runs once
    /// per pixel along the major axis.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32, clip: Rect) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let x_step = if x0 < x1 { 1 } else { -1 };
        let y_step = if y0 < y1 { 1 } else { -1 };

        // Positive error favors x movement, negative favors y.
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            if clip.contains(x, y) {
                self.set_pixel(x, y, color);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_step;
            }
            if e2 < dx {
                err += dx;
                y += y_step;
            }
        }
    }

    /// Bytes in the layout SDL expects for a streaming ARGB8888 texture.
    pub fn to_argb_bytes(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .flat_map(|c| c.to_le_bytes())
            .collect()
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let color = self.color_buffer[self.index(x, y)];
            Rgba(colors::to_rgba_bytes(color))
        })
    }

    /// Writes the canvas to an image file; the format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        let path = path.as_ref();
        self.to_rgba_image().save(path)?;
        log::info!("wrote {}x{} snapshot to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn pixel_count_does_not_wrap_in_u32() {
        assert_eq!(pixel_count(70_000, 70_000), 4_900_000_000);
        assert_eq!(pixel_count(1280, 640), 1280 * 640);
    }

    #[test]
    fn set_pixel_ignores_out_of_bounds() {
        let mut canvas = Canvas::new(4, 3);
        canvas.set_pixel(-1, 0, 1);
        canvas.set_pixel(4, 0, 1);
        canvas.set_pixel(0, 3, 1);
        assert!(canvas.color_buffer.iter().all(|&c| c == colors::BACKGROUND));
        assert_eq!(canvas.get_pixel(4, 0), None);
    }

    #[test]
    fn diagonal_line_hits_both_endpoints() {
        let mut canvas = Canvas::new(10, 10);
        let bounds = canvas.bounds();
        canvas.draw_line(1, 1, 8, 8, colors::WIREFRAME, bounds);
        for i in 1..=8 {
            assert_eq!(canvas.get_pixel(i, i), Some(colors::WIREFRAME));
        }
        assert_eq!(canvas.get_pixel(0, 0), Some(colors::BACKGROUND));
    }

    #[test]
    fn line_respects_clip_rect() {
        let mut canvas = Canvas::new(10, 2);
        canvas.draw_line(0, 0, 9, 0, colors::WIREFRAME, Rect::new(0, 0, 5, 2));
        assert_eq!(canvas.get_pixel(4, 0), Some(colors::WIREFRAME));
        assert_eq!(canvas.get_pixel(5, 0), Some(colors::BACKGROUND));
    }

    #[test]
    fn argb_bytes_are_little_endian() {
        let mut canvas = Canvas::new(1, 1);
        canvas.clear(0xFF112233);
        assert_eq!(canvas.to_argb_bytes(), vec![0x33, 0x22, 0x11, 0xFF]);
    }

    #[test]
    fn image_conversion_keeps_channels() {
        let mut canvas = Canvas::new(2, 1);
        canvas.set_pixel(1, 0, 0xFF112233);
        let image = canvas.to_rgba_image();
        assert_eq!(image.get_pixel(1, 0), &Rgba([0x11, 0x22, 0x33, 0xFF]));
    }
}

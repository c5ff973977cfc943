use image::{Rgba, RgbaImage};

use super::glyphs::{GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, glyph, is_set};
use super::layout::Rect;
use crate::domain::presenter::RenderError;

/// RGBA drawing surface. Every primitive clips to the image bounds.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        for y in rect.y..rect.y.saturating_add(rect.height) {
            for x in rect.x..rect.x.saturating_add(rect.width) {
                self.put(x, y, color);
            }
        }
    }

    pub fn hline(&mut self, x: u32, y: u32, len: u32, color: Rgba<u8>) {
        self.fill_rect(
            Rect {
                x,
                y,
                width: len,
                height: 1,
            },
            color,
        );
    }

    pub fn vline(&mut self, x: u32, y: u32, len: u32, color: Rgba<u8>) {
        self.fill_rect(
            Rect {
                x,
                y,
                width: 1,
                height: len,
            },
            color,
        );
    }

    /// Left-to-right text with its top-left corner at (`x`, `y`).
    pub fn draw_text(&mut self, x: u32, y: u32, text: &str, scale: u32, color: Rgba<u8>) {
        let mut pen = x;
        for ch in text.chars() {
            if let Some(rows) = glyph(ch) {
                self.stamp(*rows, scale, color, |col, row| {
                    (pen.saturating_add(col), y.saturating_add(row))
                });
            }
            pen = pen.saturating_add(GLYPH_ADVANCE * scale);
        }
    }

    /// Bottom-to-top text; `x` is the left edge and `bottom` the baseline end.
    pub fn draw_text_vertical(
        &mut self,
        x: u32,
        bottom: u32,
        text: &str,
        scale: u32,
        color: Rgba<u8>,
    ) {
        let mut pen = 0u32;
        for ch in text.chars() {
            if let Some(rows) = glyph(ch) {
                self.stamp(*rows, scale, color, |col, row| {
                    let lift = pen.saturating_add(col);
                    (x.saturating_add(row), bottom.checked_sub(lift).unwrap_or(u32::MAX))
                });
            }
            pen = pen.saturating_add(GLYPH_ADVANCE * scale);
        }
    }

    pub fn encode_png(self) -> Result<Vec<u8>, RenderError> {
        let (width, height) = self.image.dimensions();
        let mut buffer = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buffer, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder
                .write_header()
                .map_err(|e| RenderError::Encoding(e.to_string()))?;
            writer
                .write_image_data(self.image.as_raw())
                .map_err(|e| RenderError::Encoding(e.to_string()))?;
            writer
                .finish()
                .map_err(|e| RenderError::Encoding(e.to_string()))?;
        }
        Ok(buffer)
    }

    /// Paint each set glyph cell as a `scale`-sized square at the position
    /// `place` maps its scaled (column, row) to.
    fn stamp<F>(&mut self, rows: [u8; 7], scale: u32, color: Rgba<u8>, place: F)
    where
        F: Fn(u32, u32) -> (u32, u32),
    {
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if !is_set(rows, col, row) {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let (px, py) = place(col * scale + dx, row * scale + dy);
                        self.put(px, py, color);
                    }
                }
            }
        }
    }

    fn put(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, color);
        }
    }

    #[cfg(test)]
    fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }
}

/// Pixel width of `text` drawn at `scale`, without trailing spacing.
#[must_use]
pub fn text_width(text: &str, scale: u32) -> u32 {
    let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
    chars
        .saturating_mul(GLYPH_ADVANCE * scale)
        .saturating_sub(scale)
}

/// Pixel height of one line of text drawn at `scale`.
#[must_use]
pub const fn text_height(scale: u32) -> u32 {
    GLYPH_HEIGHT * scale
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn test_fill_rect_clips_to_bounds() {
        let mut canvas = Canvas::new(10, 10, WHITE);
        canvas.fill_rect(
            Rect {
                x: 8,
                y: 8,
                width: 5,
                height: 5,
            },
            BLACK,
        );
        assert_eq!(canvas.pixel(9, 9), BLACK);
        assert_eq!(canvas.pixel(7, 7), WHITE);
    }

    #[test]
    fn test_text_is_drawn_and_measured() {
        let mut canvas = Canvas::new(40, 20, WHITE);
        canvas.draw_text(0, 0, "L", 2, BLACK);
        assert_eq!(canvas.pixel(0, 0), BLACK);
        assert_eq!(canvas.pixel(1, 13), BLACK);
        assert_eq!(canvas.pixel(9, 0), WHITE);
        assert_eq!(text_width("AB", 1), 11);
        assert_eq!(text_height(3), 21);
    }

    #[test]
    fn test_vertical_text_reads_upwards() {
        let mut canvas = Canvas::new(20, 20, WHITE);
        canvas.draw_text_vertical(0, 19, "L", 1, BLACK);
        // Stem of the L runs along the baseline; its foot rises at the far end.
        assert_eq!(canvas.pixel(0, 19), BLACK);
        assert_eq!(canvas.pixel(0, 15), WHITE);
        assert_eq!(canvas.pixel(6, 15), BLACK);
    }

    #[test]
    fn test_encode_png_signature() {
        let bytes = Canvas::new(3, 2, WHITE).encode_png().unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}

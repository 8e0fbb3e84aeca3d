//! Pre-decoded sprites and the sprite blitter.

use image::{RgbImage, RgbaImage};

use crate::error::{RenderError, Result};
use crate::raster::Raster;

/// Key colour that sprite blits never write.
pub const TRANSPARENT_KEY: u32 = 0x000000;

/// A decoded sprite.
///
/// Legacy sprites are stored cropped to their visible pixels, so the trim
/// offsets are added to every draw position.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    width: i32,
    height: i32,
    offset_x: i32,
    offset_y: i32,
    pixels: Vec<u32>,
}

impl Sprite {
    pub fn new(width: i32, height: i32, pixels: Vec<u32>) -> Result<Self> {
        let expected = width.max(0) as usize * height.max(0) as usize;
        if pixels.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            offset_x: 0,
            offset_y: 0,
            pixels,
        })
    }

    pub fn with_offset(mut self, offset_x: i32, offset_y: i32) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    /// Pixels are taken as-is, so black pixels stay transparent.
    pub fn from_rgb_image(image: &RgbImage) -> Self {
        let pixels = image
            .pixels()
            .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
            .collect();
        Self {
            width: image.width() as i32,
            height: image.height() as i32,
            offset_x: 0,
            offset_y: 0,
            pixels,
        }
    }

    /// Pixels with alpha below one half become the transparent key.
    pub fn from_rgba_image(image: &RgbaImage) -> Self {
        let pixels = image
            .pixels()
            .map(|p| {
                if p[3] < 0x80 {
                    TRANSPARENT_KEY
                } else {
                    ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32
                }
            })
            .collect();
        Self {
            width: image.width() as i32,
            height: image.height() as i32,
            offset_x: 0,
            offset_y: 0,
            pixels,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Blit at `(x, y)` plus the trim offset, skipping `key` pixels.
    pub fn draw_keyed(&self, raster: &mut Raster, x: i32, y: i32, key: u32) {
        raster.blit_pixels(
            x.wrapping_add(self.offset_x),
            y.wrapping_add(self.offset_y),
            &self.pixels,
            self.width,
            self.height,
            key,
        );
    }
}

/// Blit `sprite` with black as the transparent key. `None` draws nothing.
pub fn draw_sprite(raster: &mut Raster, sprite: Option<&Sprite>, x: i32, y: i32) {
    if let Some(sprite) = sprite {
        sprite.draw_keyed(raster, x, y, TRANSPARENT_KEY);
    }
}

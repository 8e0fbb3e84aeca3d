//! Font collaborator interface and a glyph-mask font.
//!
//! The compositor only sequences lines and positions; glyph metrics and the
//! actual glyph drawing belong to a [`Font`]. [`BitmapFont`] is the stock
//! implementation for pre-decoded legacy fonts.

use std::collections::HashMap;

use crate::error::{RenderError, Result};
use crate::raster::Raster;

/// Colour used for the drop-shadow pass.
pub const SHADOW_COLOR: u32 = 0x000000;

/// Text drawing provider.
///
/// `y` passed to the drawing methods is the baseline of the line, which is
/// why callers start one `vertical_space` below the widget's top edge.
pub trait Font {
    /// Line height in pixels.
    fn vertical_space(&self) -> i32;

    /// Advance width of `text` in pixels.
    fn text_width(&self, text: &str) -> i32;

    /// Draw `text` in a single colour with its baseline at `y`.
    fn draw_text(&self, raster: &mut Raster, x: i32, y: i32, text: &str, color: u32);

    /// Draw `text` left-aligned at `x`, with a one pixel drop shadow
    /// underneath when `shadowed` is set.
    fn shadow(&self, raster: &mut Raster, x: i32, y: i32, text: &str, shadowed: bool, color: u32) {
        if shadowed {
            self.draw_text(raster, x.wrapping_add(1), y.wrapping_add(1), text, SHADOW_COLOR);
        }
        self.draw_text(raster, x, y, text, color);
    }

    /// Like [`Font::shadow`] but centred horizontally on `x`.
    fn shadow_centre(
        &self,
        raster: &mut Raster,
        x: i32,
        y: i32,
        text: &str,
        shadowed: bool,
        color: u32,
    ) {
        let left = x.wrapping_sub(self.text_width(text) / 2);
        self.shadow(raster, left, y, text, shadowed, color);
    }
}

/// A single glyph: a coverage mask plus placement metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub width: i32,
    pub height: i32,
    /// Horizontal offset of the mask from the pen position.
    pub offset_x: i32,
    /// Vertical offset of the mask from the top of the line.
    pub offset_y: i32,
    /// Pen advance after this glyph.
    pub advance: i32,
    mask: Vec<u8>,
}

impl Glyph {
    /// Create a glyph from a row-major mask of exactly `width * height`
    /// entries. The advance defaults to the mask width.
    pub fn new(width: i32, height: i32, mask: Vec<u8>) -> Result<Self> {
        let expected = width.max(0) as usize * height.max(0) as usize;
        if mask.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: mask.len(),
            });
        }
        Ok(Self {
            width,
            height,
            offset_x: 0,
            offset_y: 0,
            advance: width,
            mask,
        })
    }

    /// A glyph that draws nothing but still advances the pen.
    pub fn blank(advance: i32) -> Self {
        Self {
            width: 0,
            height: 0,
            offset_x: 0,
            offset_y: 0,
            advance,
            mask: Vec::new(),
        }
    }

    pub fn with_offset(mut self, offset_x: i32, offset_y: i32) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    pub fn with_advance(mut self, advance: i32) -> Self {
        self.advance = advance;
        self
    }

    pub fn mask(&self) -> &[u8] {
        &self.mask
    }
}

/// Font made of per-character coverage masks.
///
/// Characters without a glyph are skipped and do not advance the pen.
#[derive(Debug, Clone, Default)]
pub struct BitmapFont {
    vertical_space: i32,
    glyphs: HashMap<char, Glyph>,
}

impl BitmapFont {
    pub fn new(vertical_space: i32) -> Self {
        Self {
            vertical_space,
            glyphs: HashMap::new(),
        }
    }

    pub fn with_glyph(mut self, ch: char, glyph: Glyph) -> Self {
        self.glyphs.insert(ch, glyph);
        self
    }

    pub fn insert_glyph(&mut self, ch: char, glyph: Glyph) {
        self.glyphs.insert(ch, glyph);
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }
}

impl Font for BitmapFont {
    fn vertical_space(&self) -> i32 {
        self.vertical_space
    }

    fn text_width(&self, text: &str) -> i32 {
        text.chars()
            .filter_map(|ch| self.glyphs.get(&ch))
            .fold(0i32, |width, glyph| width.wrapping_add(glyph.advance))
    }

    fn draw_text(&self, raster: &mut Raster, x: i32, y: i32, text: &str, color: u32) {
        let top = y.wrapping_sub(self.vertical_space);
        let mut pen = x;
        for ch in text.chars() {
            let Some(glyph) = self.glyphs.get(&ch) else {
                continue;
            };
            raster.blit_mask(
                pen.wrapping_add(glyph.offset_x),
                top.wrapping_add(glyph.offset_y),
                &glyph.mask,
                glyph.width,
                glyph.height,
                color,
            );
            pen = pen.wrapping_add(glyph.advance);
        }
    }
}

//! Addressable pixel surface with a mutable clip region.
//!
//! Every primitive intersects its footprint with the active [`ClipRect`]
//! before writing; an empty intersection is a silent no-op. Pixels are
//! 24-bit RGB packed as `0x00RRGGBB`.

mod blend;
mod clip;

pub use blend::{blend, weight_from_alpha, OPAQUE_WEIGHT};
pub use clip::{ClipGuard, ClipRect};

use crate::error::{RenderError, Result};

#[derive(Debug, Clone)]
pub struct Raster {
    width: i32,
    height: i32,
    pixels: Vec<u32>,
    clip: ClipRect,
}

impl Raster {
    /// Create a black surface with the clip covering the full bounds.
    ///
    /// Negative dimensions are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
            clip: ClipRect::new(0, 0, width, height),
        }
    }

    /// Re-bind the surface to `buffer`, which must hold exactly
    /// `width * height` pixels. The clip is reset to the new bounds.
    pub fn init(&mut self, height: i32, width: i32, buffer: Vec<u32>) -> Result<()> {
        let expected = width.max(0) as usize * height.max(0) as usize;
        if buffer.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: buffer.len(),
            });
        }
        self.width = width.max(0);
        self.height = height.max(0);
        self.pixels = buffer;
        self.reset_clip();
        Ok(())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    pub fn clip(&self) -> ClipRect {
        self.clip
    }

    pub fn reset_clip(&mut self) {
        self.clip = ClipRect::new(0, 0, self.width, self.height);
    }

    /// Replace the clip, clamped to the surface bounds, and return the
    /// previous one so the caller can restore it.
    pub fn set_clip(&mut self, top: i32, left: i32, right: i32, bottom: i32) -> ClipRect {
        let previous = self.clip;
        self.clip = ClipRect::new(top, left, right, bottom).clamp_to(self.width, self.height);
        previous
    }

    pub fn restore_clip(&mut self, clip: ClipRect) {
        self.clip = clip.clamp_to(self.width, self.height);
    }

    /// Fill the whole surface, ignoring the clip.
    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color & 0xFF_FFFF);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: u32) {
        let Some(area) = self.visible(x, y, width, height) else {
            return;
        };
        let color = color & 0xFF_FFFF;
        for py in area.top..area.bottom {
            let start = self.index(area.left, py);
            let end = start + area.width() as usize;
            self.pixels[start..end].fill(color);
        }
    }

    /// Fill with `color` mixed over the destination at `weight / 256`.
    pub fn fill_rect_blended(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: u32,
        weight: u32,
    ) {
        let Some(area) = self.visible(x, y, width, height) else {
            return;
        };
        for py in area.top..area.bottom {
            let start = self.index(area.left, py);
            let end = start + area.width() as usize;
            for pixel in &mut self.pixels[start..end] {
                *pixel = blend(color, *pixel, weight);
            }
        }
    }

    pub fn draw_hline(&mut self, x: i32, y: i32, width: i32, color: u32) {
        self.fill_rect(x, y, width, 1, color);
    }

    pub fn draw_hline_blended(&mut self, x: i32, y: i32, width: i32, color: u32, weight: u32) {
        self.fill_rect_blended(x, y, width, 1, color, weight);
    }

    pub fn draw_vline(&mut self, x: i32, y: i32, height: i32, color: u32) {
        self.fill_rect(x, y, 1, height, color);
    }

    pub fn draw_vline_blended(&mut self, x: i32, y: i32, height: i32, color: u32, weight: u32) {
        self.fill_rect_blended(x, y, 1, height, color, weight);
    }

    /// One-pixel outline. Edges overlap at the corners.
    pub fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: u32) {
        let (right, bottom) = far_edges(x, y, width, height);
        self.draw_hline(x, y, width, color);
        self.draw_hline(x, bottom, width, color);
        self.draw_vline(x, y, height, color);
        self.draw_vline(right, y, height, color);
    }

    /// Translucent outline. The side edges leave out the corner rows and are
    /// skipped for outlines under 3 rows. Outlines 1 or 2 rows tall blend
    /// their single row twice when it is both top and bottom edge, and
    /// 1 column wide ones blend each side-edge pixel twice.
    pub fn draw_rect_blended(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: u32,
        weight: u32,
    ) {
        let (right, bottom) = far_edges(x, y, width, height);
        self.draw_hline_blended(x, y, width, color, weight);
        self.draw_hline_blended(x, bottom, width, color, weight);
        if height >= 3 {
            let top = y.saturating_add(1);
            self.draw_vline_blended(x, top, height - 2, color, weight);
            self.draw_vline_blended(right, top, height - 2, color, weight);
        }
    }

    /// Copy `src` (row-major, `src_width x src_height`) to `(x, y)`,
    /// leaving destination pixels under `transparent` untouched.
    pub fn blit_pixels(
        &mut self,
        x: i32,
        y: i32,
        src: &[u32],
        src_width: i32,
        src_height: i32,
        transparent: u32,
    ) {
        if src_width <= 0
            || src_height <= 0
            || src.len() < src_width as usize * src_height as usize
        {
            return;
        }
        let Some(area) = self.visible(x, y, src_width, src_height) else {
            return;
        };
        for py in area.top..area.bottom {
            let src_row = offset(py, y) * src_width as usize;
            for px in area.left..area.right {
                let value = src[src_row + offset(px, x)];
                if value != transparent {
                    let index = self.index(px, py);
                    self.pixels[index] = value & 0xFF_FFFF;
                }
            }
        }
    }

    /// Paint `color` wherever the coverage `mask` is non-zero.
    pub fn blit_mask(
        &mut self,
        x: i32,
        y: i32,
        mask: &[u8],
        mask_width: i32,
        mask_height: i32,
        color: u32,
    ) {
        if mask_width <= 0
            || mask_height <= 0
            || mask.len() < mask_width as usize * mask_height as usize
        {
            return;
        }
        let Some(area) = self.visible(x, y, mask_width, mask_height) else {
            return;
        };
        let color = color & 0xFF_FFFF;
        for py in area.top..area.bottom {
            let mask_row = offset(py, y) * mask_width as usize;
            for px in area.left..area.right {
                if mask[mask_row + offset(px, x)] != 0 {
                    let index = self.index(px, py);
                    self.pixels[index] = color;
                }
            }
        }
    }

    /// Footprint of a `width x height` box at `(x, y)` inside the clip.
    fn visible(&self, x: i32, y: i32, width: i32, height: i32) -> Option<ClipRect> {
        if width <= 0 || height <= 0 {
            return None;
        }
        let area = ClipRect::from_bounds(x, y, width, height).intersect(&self.clip);
        (!area.is_empty()).then_some(area)
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Column and row of the right and bottom edges of a `width x height` box.
fn far_edges(x: i32, y: i32, width: i32, height: i32) -> (i32, i32) {
    (
        x.saturating_add(width).saturating_sub(1),
        y.saturating_add(height).saturating_sub(1),
    )
}

/// Distance from `origin` to `pos`, where `pos` lies inside a box starting
/// at `origin`.
#[inline]
fn offset(pos: i32, origin: i32) -> usize {
    (i64::from(pos) - i64::from(origin)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(raster: &Raster, color: u32) -> usize {
        raster.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn fill_rect_respects_clip() {
        let mut raster = Raster::new(10, 10);
        raster.set_clip(2, 2, 6, 6);
        raster.fill_rect(0, 0, 10, 10, 0xFF0000);
        assert_eq!(count(&raster, 0xFF0000), 16);
        assert_eq!(raster.pixel(1, 1), Some(0));
        assert_eq!(raster.pixel(2, 2), Some(0xFF0000));
        assert_eq!(raster.pixel(5, 5), Some(0xFF0000));
        assert_eq!(raster.pixel(6, 6), Some(0));
    }

    #[test]
    fn empty_intersection_is_noop() {
        let mut raster = Raster::new(10, 10);
        raster.set_clip(0, 0, 5, 5);
        raster.fill_rect(7, 7, 3, 3, 0xFFFFFF);
        raster.fill_rect(-20, -20, 5, 5, 0xFFFFFF);
        raster.fill_rect(1, 1, 0, 4, 0xFFFFFF);
        assert_eq!(count(&raster, 0xFFFFFF), 0);
    }

    #[test]
    fn set_clip_clamps_and_returns_previous() {
        let mut raster = Raster::new(8, 4);
        let previous = raster.set_clip(-5, -5, 100, 100);
        assert_eq!(previous, ClipRect::new(0, 0, 8, 4));
        assert_eq!(raster.clip(), ClipRect::new(0, 0, 8, 4));
    }

    #[test]
    fn init_rejects_wrong_buffer_size() {
        let mut raster = Raster::new(1, 1);
        assert!(raster.init(2, 2, vec![0; 3]).is_err());
        raster.init(2, 3, vec![7; 6]).unwrap();
        assert_eq!(raster.width(), 3);
        assert_eq!(raster.height(), 2);
        assert_eq!(raster.clip(), ClipRect::new(0, 0, 3, 2));
        assert_eq!(raster.pixel(2, 1), Some(7));
    }

    #[test]
    fn outline_draws_only_edges() {
        let mut raster = Raster::new(6, 6);
        raster.draw_rect(1, 1, 4, 4, 0x00FF00);
        assert_eq!(count(&raster, 0x00FF00), 12);
        assert_eq!(raster.pixel(2, 2), Some(0));
        assert_eq!(raster.pixel(1, 4), Some(0x00FF00));
        assert_eq!(raster.pixel(4, 1), Some(0x00FF00));
    }

    #[test]
    fn blended_outline_blends_each_pixel_once() {
        let mut raster = Raster::new(6, 6);
        raster.clear(0x000000);
        raster.draw_rect_blended(1, 1, 4, 4, 0xFFFFFF, 128);
        assert_eq!(count(&raster, 0x7F7F7F), 12);
    }

    #[test]
    fn blended_fill_at_opaque_weight_matches_solid_fill() {
        let mut a = Raster::new(4, 4);
        let mut b = Raster::new(4, 4);
        a.clear(0x102030);
        b.clear(0x102030);
        a.fill_rect(0, 0, 4, 4, 0xABCDEF);
        b.fill_rect_blended(0, 0, 4, 4, 0xABCDEF, OPAQUE_WEIGHT);
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn blit_skips_transparent_key_and_clips() {
        let mut raster = Raster::new(4, 4);
        raster.set_clip(0, 0, 3, 3);
        let src = [0x111111, 0x000000, 0x222222, 0x333333];
        raster.blit_pixels(1, 1, &src, 2, 2, 0x000000);
        assert_eq!(raster.pixel(1, 1), Some(0x111111));
        assert_eq!(raster.pixel(2, 1), Some(0));
        assert_eq!(raster.pixel(1, 2), Some(0x222222));
        assert_eq!(raster.pixel(2, 2), Some(0x333333));

        raster.blit_pixels(2, 2, &src, 2, 2, 0x000000);
        assert_eq!(raster.pixel(3, 3), Some(0));
        assert_eq!(raster.pixel(2, 2), Some(0x111111));
    }

    #[test]
    fn single_row_blended_outline_blends_twice() {
        let mut raster = Raster::new(4, 1);
        raster.draw_rect_blended(0, 0, 4, 1, 0xFFFFFF, 128);
        // 0 -> 0x7F on the top edge, then 0x7F -> 0xBF on the bottom edge
        assert_eq!(raster.pixel(0, 0), Some(0xBFBFBF));
        assert_eq!(count(&raster, 0xBFBFBF), 4);
    }

    #[test]
    fn extreme_geometry_does_not_overflow() {
        let mut raster = Raster::new(4, 4);
        raster.draw_rect(i32::MAX, i32::MAX, i32::MAX, i32::MAX, 0xFFFFFF);
        raster.draw_rect_blended(i32::MIN, i32::MIN, i32::MAX, i32::MAX, 0xFFFFFF, 128);
        raster.fill_rect(i32::MAX - 1, 0, i32::MAX, 4, 0xFFFFFF);
        raster.blit_pixels(i32::MIN, i32::MIN, &[1, 2, 3, 4], 2, 2, 0);
        assert_eq!(count(&raster, 0), 16);

        // a box reaching in from far off-surface still draws its visible part
        raster.draw_rect(-(i32::MAX - 2), 0, i32::MAX, 3, 0x00FF00);
        assert_eq!(raster.pixel(1, 0), Some(0x00FF00));
        assert_eq!(raster.pixel(1, 1), Some(0x00FF00));
        assert_eq!(raster.pixel(0, 1), Some(0));
    }

    #[test]
    fn blit_mask_paints_covered_pixels() {
        let mut raster = Raster::new(3, 3);
        raster.blit_mask(0, 0, &[1, 0, 0, 1], 2, 2, 0xFF00FF);
        assert_eq!(raster.pixel(0, 0), Some(0xFF00FF));
        assert_eq!(raster.pixel(1, 0), Some(0));
        assert_eq!(raster.pixel(1, 1), Some(0xFF00FF));
    }
}

//! Clip rectangles and scoped clip acquisition.

use std::ops::{Deref, DerefMut};

use super::Raster;

/// Axis-aligned clip region in surface pixels.
///
/// `left`/`top` are inclusive, `right`/`bottom` exclusive. A rectangle with
/// `right <= left` or `bottom <= top` is empty and admits no writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClipRect {
    pub top: i32,
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ClipRect {
    /// Argument order follows the raster's `set_clip(top, left, right, bottom)`.
    pub const fn new(top: i32, left: i32, right: i32, bottom: i32) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    /// Rectangle covering `width x height` pixels starting at `(x, y)`.
    pub fn from_bounds(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            top: y,
            left: x,
            right: x.saturating_add(width),
            bottom: y.saturating_add(height),
        }
    }

    pub fn width(&self) -> i32 {
        (self.right - self.left).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.bottom - self.top).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Intersection of two rectangles. Disjoint inputs yield an empty
    /// rectangle anchored at the tighter top-left corner.
    pub fn intersect(&self, other: &ClipRect) -> ClipRect {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right).max(left);
        let bottom = self.bottom.min(other.bottom).max(top);
        ClipRect {
            top,
            left,
            right,
            bottom,
        }
    }

    /// Clamp into `[0, width) x [0, height)`.
    pub fn clamp_to(&self, width: i32, height: i32) -> ClipRect {
        self.intersect(&ClipRect::new(0, 0, width, height))
    }
}

/// Scoped clip region on a [`Raster`].
///
/// Entering a guard narrows the raster's clip; dropping it
/// restores whatever clip was active before, on every exit path. The guard
/// derefs to the raster so drawing continues through it.
pub struct ClipGuard<'a> {
    raster: &'a mut Raster,
    saved: ClipRect,
}

impl<'a> ClipGuard<'a> {
    /// Intersect the active clip with `rect` until the guard is dropped.
    pub fn narrow(raster: &'a mut Raster, rect: ClipRect) -> Self {
        let saved = raster.clip;
        raster.clip = saved.intersect(&rect).clamp_to(raster.width, raster.height);
        Self { raster, saved }
    }
}

impl Deref for ClipGuard<'_> {
    type Target = Raster;

    fn deref(&self) -> &Raster {
        self.raster
    }
}

impl DerefMut for ClipGuard<'_> {
    fn deref_mut(&mut self) -> &mut Raster {
        self.raster
    }
}

impl Drop for ClipGuard<'_> {
    fn drop(&mut self) {
        self.raster.restore_clip(self.saved);
    }
}

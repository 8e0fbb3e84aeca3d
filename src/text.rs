//! Multi-line shadowed text layout.

use std::iter::FusedIterator;

use bitflags::bitflags;

use crate::font::Font;
use crate::raster::Raster;

/// Textual line-break marker: a backslash followed by `n`, stored literally
/// in widget text rather than as a control character.
pub const LINE_BREAK: &str = "\\n";

/// Text forced onto widgets whose option is "continue".
pub const CONTINUE_TEXT: &str = "Please wait...";

/// Surface width of the legacy chat viewport that triggers [`legacy_palette`].
pub const LEGACY_VIEWPORT_WIDTH: i32 = 479;

bitflags! {
    /// Layout flags carried by text widgets.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TextStyle: u8 {
        const CENTERED = 1 << 0;
        const SHADOWED = 1 << 1;
    }
}

impl TextStyle {
    pub fn from_flags(centered: bool, shadowed: bool) -> Self {
        let mut style = TextStyle::empty();
        style.set(TextStyle::CENTERED, centered);
        style.set(TextStyle::SHADOWED, shadowed);
        style
    }
}

/// Lines of a widget string, split on [`LINE_BREAK`].
///
/// An empty string yields nothing, and a trailing marker does not produce a
/// trailing empty line.
#[derive(Debug, Clone)]
pub struct TextLines<'a> {
    rest: &'a str,
}

impl<'a> TextLines<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for TextLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest;
        if rest.is_empty() {
            return None;
        }
        match rest.find(LINE_BREAK) {
            Some(at) => {
                self.rest = &rest[at + LINE_BREAK.len()..];
                Some(&rest[..at])
            }
            None => Some(std::mem::take(&mut self.rest)),
        }
    }
}

impl FusedIterator for TextLines<'_> {}

/// Colour remap applied to text on the legacy chat viewport:
/// yellow becomes blue and dark green becomes white.
pub fn legacy_palette(color: u32) -> u32 {
    match color {
        0xFFFF00 => 0x0000FF,
        0x00C000 => 0xFFFFFF,
        other => other,
    }
}

/// Draw `text` line by line inside a box at `(x, y)` of the given `width`.
///
/// The first baseline sits one `vertical_space` below `y` and each further
/// line one more below that. Returns the number of lines drawn.
#[allow(clippy::too_many_arguments)]
pub fn draw_shadowed_text(
    raster: &mut Raster,
    font: &dyn Font,
    x: i32,
    y: i32,
    width: i32,
    text: &str,
    style: TextStyle,
    color: u32,
) -> usize {
    let shadowed = style.contains(TextStyle::SHADOWED);
    let line_height = font.vertical_space();
    let mut baseline = y.wrapping_add(line_height);
    let mut drawn = 0;
    for line in TextLines::new(text) {
        if style.contains(TextStyle::CENTERED) {
            let centre = x.wrapping_add(width / 2);
            font.shadow_centre(raster, centre, baseline, line, shadowed, color);
        } else {
            font.shadow(raster, x, baseline, line, shadowed, color);
        }
        baseline = baseline.wrapping_add(line_height);
        drawn += 1;
    }
    drawn
}

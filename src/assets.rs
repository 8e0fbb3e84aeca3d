//! Asset lookup seam between widget definitions and decoded assets.
//!
//! Widgets refer to sprites and fonts by id; loading and decoding those
//! assets happens elsewhere and is handed to the compositor through
//! [`Assets`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::font::Font;
use crate::sprite::Sprite;

/// Sprite reference as stored in widget definitions: an archive name and
/// the frame index inside it (e.g. `"miscgraphics", 3`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpriteId {
    pub archive: String,
    pub index: u32,
}

impl SpriteId {
    pub fn new(archive: impl Into<String>, index: u32) -> Self {
        Self {
            archive: archive.into(),
            index,
        }
    }
}

impl fmt::Display for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.archive, self.index)
    }
}

/// Index of a font in the client's font set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontId(pub u8);

impl FontId {
    pub const SMALL: FontId = FontId(0);
    pub const REGULAR: FontId = FontId(1);
    pub const BOLD: FontId = FontId(2);
    pub const FANCY: FontId = FontId(3);
}

/// Resolves asset references to decoded assets.
pub trait Assets {
    fn sprite(&self, id: &SpriteId) -> Option<&Sprite>;
    fn font(&self, id: FontId) -> Option<&dyn Font>;
}

/// In-memory [`Assets`] implementation.
#[derive(Default)]
pub struct AssetStore {
    sprites: HashMap<SpriteId, Arc<Sprite>>,
    fonts: HashMap<FontId, Arc<dyn Font>>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_sprite(&mut self, id: SpriteId, sprite: Sprite) {
        self.sprites.insert(id, Arc::new(sprite));
    }

    pub fn insert_font(&mut self, id: FontId, font: impl Font + 'static) {
        self.fonts.insert(id, Arc::new(font));
    }

    pub fn with_sprite(mut self, id: SpriteId, sprite: Sprite) -> Self {
        self.insert_sprite(id, sprite);
        self
    }

    pub fn with_font(mut self, id: FontId, font: impl Font + 'static) -> Self {
        self.insert_font(id, font);
        self
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }
}

impl Assets for AssetStore {
    fn sprite(&self, id: &SpriteId) -> Option<&Sprite> {
        self.sprites.get(id).map(|sprite| &**sprite)
    }

    fn font(&self, id: FontId) -> Option<&dyn Font> {
        self.fonts.get(&id).map(|font| &**font)
    }
}

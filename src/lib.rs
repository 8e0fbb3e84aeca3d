//! Software compositor for legacy game-client interface widgets.
//!
//! A widget table is a flat arena of [`Widget`](widget::Widget) records that
//! refer to each other by [`WidgetId`](widget::WidgetId). Rendering a root
//! walks its subtree and draws containers, rectangles, text and sprites
//! into a [`PixelBuffer`](pixels::PixelBuffer) the size of the root.
//!
//! ```no_run
//! use iface_raster::prelude::*;
//!
//! let mut table: WidgetTable = [
//!     Widget::container(0, 100, 50, ContainerData::new().with_child(WidgetId(1), 10, 10)),
//!     Widget::rectangle(1, 20, 10, RectangleData { filled: true, color: 0xFF0000, alpha: 0 }),
//! ]
//! .into_iter()
//! .collect();
//!
//! let image = render_to_image(&mut table, WidgetId(0), &AssetStore::new());
//! ```
//!
//! Sprites and fonts are not decoded here; callers hand them over through
//! the [`Assets`](assets::Assets) trait.

pub mod assets;
pub mod compositor;
pub mod error;
pub mod font;
pub mod pixels;
pub mod raster;
pub mod render_stats;
pub mod sprite;
pub mod text;
pub mod widget;

pub use compositor::{render_to_image, Compositor, RenderConfig};
pub use error::{RenderError, Result};
pub use pixels::PixelBuffer;

pub mod prelude {
    pub use crate::assets::{AssetStore, Assets, FontId, SpriteId};
    pub use crate::compositor::{render_to_image, Compositor, RenderConfig};
    pub use crate::error::{RenderError, Result};
    pub use crate::font::{BitmapFont, Font, Glyph};
    pub use crate::pixels::PixelBuffer;
    pub use crate::raster::{ClipGuard, ClipRect, Raster};
    pub use crate::sprite::{draw_sprite, Sprite};
    pub use crate::text::{draw_shadowed_text, TextStyle};
    pub use crate::widget::{
        ContainerData, Group, OptionType, RectangleData, SpriteData, TextData, Widget, WidgetId,
        WidgetKind, WidgetTable,
    };
}

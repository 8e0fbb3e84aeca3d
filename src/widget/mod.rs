//! In-memory widget definitions.
//!
//! A widget is one node of an interface. Containers refer to their
//! children by [`WidgetId`] through a shared [`WidgetTable`]; no widget owns
//! another, so the same child record can be reached from several places.

mod table;

use std::fmt;

pub use table::{ChildSlot, ChildSlots, WidgetTable};

use crate::assets::{FontId, SpriteId};
use crate::error::RenderError;

/// Index of a widget in its [`WidgetTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(pub u32);

impl WidgetId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for WidgetId {
    fn from(id: u32) -> Self {
        WidgetId(id)
    }
}

/// Type tag of a widget, with the legacy numeric ids.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Container = 0,
    ModelList = 1,
    Inventory = 2,
    Rectangle = 3,
    Text = 4,
    Sprite = 5,
    Model = 6,
    ItemList = 7,
}

impl Group {
    pub fn name(self) -> &'static str {
        match self {
            Group::Container => "Container",
            Group::ModelList => "Model list",
            Group::Inventory => "Inventory",
            Group::Rectangle => "Rectangle",
            Group::Text => "Text",
            Group::Sprite => "Sprite",
            Group::Model => "Model",
            Group::ItemList => "Item list",
        }
    }

    /// Whether this core draws widgets of this group at all.
    pub fn is_rendered(self) -> bool {
        matches!(
            self,
            Group::Container | Group::Rectangle | Group::Text | Group::Sprite
        )
    }
}

impl TryFrom<u8> for Group {
    type Error = RenderError;

    fn try_from(raw: u8) -> Result<Self, RenderError> {
        Ok(match raw {
            0 => Group::Container,
            1 => Group::ModelList,
            2 => Group::Inventory,
            3 => Group::Rectangle,
            4 => Group::Text,
            5 => Group::Sprite,
            6 => Group::Model,
            7 => Group::ItemList,
            other => return Err(RenderError::UnknownGroup(other)),
        })
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Click behaviour of a widget, with the legacy numeric ids.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OptionType {
    #[default]
    None = 0,
    Ok = 1,
    Usable = 2,
    Close = 3,
    ToggleSetting = 4,
    ResetSetting = 5,
    /// Dialogue "click to continue"; text widgets show a waiting message.
    Continue = 6,
}

impl TryFrom<u8> for OptionType {
    type Error = RenderError;

    fn try_from(raw: u8) -> Result<Self, RenderError> {
        Ok(match raw {
            0 => OptionType::None,
            1 => OptionType::Ok,
            2 => OptionType::Usable,
            3 => OptionType::Close,
            4 => OptionType::ToggleSetting,
            5 => OptionType::ResetSetting,
            6 => OptionType::Continue,
            other => return Err(RenderError::UnknownOptionType(other)),
        })
    }
}

/// Children and scroll state of a container.
///
/// `children`, `child_x` and `child_y` are index-aligned and must have the
/// same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerData {
    pub children: Vec<WidgetId>,
    pub child_x: Vec<i32>,
    pub child_y: Vec<i32>,
    pub scroll_position: i32,
    pub scroll_limit: i32,
}

impl ContainerData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child slot at `(x, y)` relative to the container.
    pub fn push_child(&mut self, id: WidgetId, x: i32, y: i32) {
        self.children.push(id);
        self.child_x.push(x);
        self.child_y.push(y);
    }

    pub fn with_child(mut self, id: WidgetId, x: i32, y: i32) -> Self {
        self.push_child(id, x, y);
        self
    }

    pub fn with_scroll(mut self, position: i32, limit: i32) -> Self {
        self.scroll_position = position;
        self.scroll_limit = limit;
        self
    }

    /// Whether all three child sequences have the same length.
    pub fn is_well_formed(&self) -> bool {
        self.children.len() == self.child_x.len() && self.children.len() == self.child_y.len()
    }

    /// Number of usable child slots (the shortest of the three sequences).
    pub fn slot_count(&self) -> usize {
        self.children
            .len()
            .min(self.child_x.len())
            .min(self.child_y.len())
    }

    /// Largest scroll position a container of `height` pixels allows.
    pub fn max_scroll(&self, height: i32) -> i32 {
        self.scroll_limit.saturating_sub(height).max(0)
    }

    /// Clamp the scroll position into `[0, max_scroll(height)]` in place and
    /// return the clamped value.
    pub fn clamp_scroll(&mut self, height: i32) -> i32 {
        self.scroll_position = self.scroll_position.clamp(0, self.max_scroll(height));
        self.scroll_position
    }
}

/// Rectangle payload. `alpha` 0 is opaque; any other value blends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RectangleData {
    pub filled: bool,
    pub color: u32,
    pub alpha: u8,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextData {
    pub font: FontId,
    /// May contain the literal two-character line-break marker `\n`.
    pub text: String,
    pub color: u32,
    pub centered: bool,
    pub shadowed: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpriteData {
    pub sprite: Option<SpriteId>,
}

/// Per-group payload. The variant is the widget's type tag.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    Container(ContainerData),
    ModelList,
    Inventory,
    Rectangle(RectangleData),
    Text(TextData),
    Sprite(SpriteData),
    Model,
    ItemList,
}

impl WidgetKind {
    pub fn group(&self) -> Group {
        match self {
            WidgetKind::Container(_) => Group::Container,
            WidgetKind::ModelList => Group::ModelList,
            WidgetKind::Inventory => Group::Inventory,
            WidgetKind::Rectangle(_) => Group::Rectangle,
            WidgetKind::Text(_) => Group::Text,
            WidgetKind::Sprite(_) => Group::Sprite,
            WidgetKind::Model => Group::Model,
            WidgetKind::ItemList => Group::ItemList,
        }
    }
}

/// One interface widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub id: WidgetId,
    /// Owning interface; `None` or `Some(id)` marks a root.
    pub parent: Option<WidgetId>,
    pub width: i32,
    pub height: i32,
    /// Extra nudge applied where the widget is placed inside a container.
    pub horizontal_draw_offset: i32,
    pub vertical_draw_offset: i32,
    /// Client-side script hook selector. Not evaluated by the compositor.
    pub content_type: u16,
    pub option_type: OptionType,
    pub kind: WidgetKind,
}

impl Widget {
    pub fn new(id: u32, width: i32, height: i32, kind: WidgetKind) -> Self {
        Self {
            id: WidgetId(id),
            parent: None,
            width,
            height,
            horizontal_draw_offset: 0,
            vertical_draw_offset: 0,
            content_type: 0,
            option_type: OptionType::None,
            kind,
        }
    }

    pub fn container(id: u32, width: i32, height: i32, data: ContainerData) -> Self {
        Self::new(id, width, height, WidgetKind::Container(data))
    }

    pub fn rectangle(id: u32, width: i32, height: i32, data: RectangleData) -> Self {
        Self::new(id, width, height, WidgetKind::Rectangle(data))
    }

    pub fn text(id: u32, width: i32, height: i32, data: TextData) -> Self {
        Self::new(id, width, height, WidgetKind::Text(data))
    }

    pub fn sprite(id: u32, width: i32, height: i32, sprite: Option<SpriteId>) -> Self {
        Self::new(id, width, height, WidgetKind::Sprite(SpriteData { sprite }))
    }

    pub fn with_parent(mut self, parent: u32) -> Self {
        self.parent = Some(WidgetId(parent));
        self
    }

    pub fn with_draw_offset(mut self, horizontal: i32, vertical: i32) -> Self {
        self.horizontal_draw_offset = horizontal;
        self.vertical_draw_offset = vertical;
        self
    }

    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    pub fn group(&self) -> Group {
        self.kind.group()
    }

    /// Width and height are both positive.
    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none_or(|parent| parent == self.id)
    }

    pub fn as_container(&self) -> Option<&ContainerData> {
        match &self.kind {
            WidgetKind::Container(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut ContainerData> {
        match &mut self.kind {
            WidgetKind::Container(data) => Some(data),
            _ => None,
        }
    }
}

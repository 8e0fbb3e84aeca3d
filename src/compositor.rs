//! Widget tree compositor.
//!
//! Walks a container subtree depth-first, in child order, drawing each
//! child onto a single [`Raster`]. Every container narrows the clip to its
//! own bounds for the duration of its children, so nothing a descendant
//! draws can land outside it.

use crate::assets::Assets;
use crate::pixels::PixelBuffer;
use crate::raster::{weight_from_alpha, ClipGuard, ClipRect, Raster};
use crate::render_stats;
use crate::sprite::TRANSPARENT_KEY;
use crate::text::{self, TextStyle, CONTINUE_TEXT, LEGACY_VIEWPORT_WIDTH};
use crate::widget::{
    ContainerData, Group, OptionType, RectangleData, SpriteData, TextData, Widget, WidgetId,
    WidgetKind, WidgetTable,
};

/// Compositor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Initial fill of every surface.
    pub background: u32,
    /// Surface width that switches text to the legacy palette. `None`
    /// disables the remap.
    pub legacy_palette_width: Option<i32>,
    /// Colour the sprite blitter never writes.
    pub transparent_key: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: 0x000000,
            legacy_palette_width: Some(LEGACY_VIEWPORT_WIDTH),
            transparent_key: TRANSPARENT_KEY,
        }
    }
}

impl RenderConfig {
    pub fn with_background(mut self, background: u32) -> Self {
        self.background = background;
        self
    }

    pub fn with_legacy_palette_width(mut self, width: Option<i32>) -> Self {
        self.legacy_palette_width = width;
        self
    }

    pub fn with_transparent_key(mut self, key: u32) -> Self {
        self.transparent_key = key;
        self
    }
}

/// Renders widgets against a set of decoded assets.
pub struct Compositor<'a> {
    assets: &'a dyn Assets,
    config: RenderConfig,
}

impl<'a> Compositor<'a> {
    pub fn new(assets: &'a dyn Assets) -> Self {
        Self::with_config(assets, RenderConfig::default())
    }

    pub fn with_config(assets: &'a dyn Assets, config: RenderConfig) -> Self {
        Self { assets, config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render widget `root` of `table` to a buffer of the root's size.
    ///
    /// Returns `None` if the root is missing or has no area. Containers
    /// reached from the root get their scroll position clamped in place.
    pub fn render(&self, table: &mut WidgetTable, root: WidgetId) -> Option<PixelBuffer> {
        let Some(widget) = table.get(root) else {
            log::debug!("Render root {} not in widget table", root);
            render_stats::record_render_empty();
            return None;
        };
        if !widget.has_area() {
            log::debug!(
                "Render root {} has no area ({}x{})",
                root,
                widget.width,
                widget.height
            );
            render_stats::record_render_empty();
            return None;
        }

        let group = widget.group();
        log::debug!(
            "Rendering {} widget {} at {}x{}",
            group,
            root,
            widget.width,
            widget.height
        );

        let mut raster = Raster::new(widget.width, widget.height);
        raster.clear(self.config.background);
        raster.reset_clip();

        if !group.is_rendered() {
            log::debug!("{} root {} is not drawn, surface stays blank", group, root);
            render_stats::record_unrendered();
        } else if group == Group::Container {
            self.render_container(table, &mut raster, root, 0, 0, 0);
        } else {
            self.draw_widget(&mut raster, widget, 0, 0);
        }

        render_stats::record_render();
        Some(PixelBuffer::from(raster))
    }

    /// Draw the children of container `id` placed at `(x, y)`, with its
    /// content shifted up by `scroll`.
    pub fn render_container(
        &self,
        table: &mut WidgetTable,
        raster: &mut Raster,
        id: WidgetId,
        x: i32,
        y: i32,
        scroll: i32,
    ) {
        let Some(container) = table.get(id) else {
            return;
        };
        let Some(data) = container.as_container() else {
            return;
        };
        if data.children.is_empty() {
            return;
        }

        debug_assert!(
            data.is_well_formed(),
            "container {} has mismatched child sequences",
            id
        );
        if !data.is_well_formed() {
            log::warn!(
                "Container {} has {} children but {} x and {} y offsets, drawing {}",
                id,
                data.children.len(),
                data.child_x.len(),
                data.child_y.len(),
                data.slot_count()
            );
        }

        let slot_count = data.slot_count();
        let bounds = ClipRect::from_bounds(x, y, container.width, container.height);
        log::trace!("Container {} at ({}, {}) scroll {}", id, x, y, scroll);
        render_stats::record_container_entered();

        let mut clipped = ClipGuard::narrow(raster, bounds);

        for index in 0..slot_count {
            let Some(slot) = table.child_slot(id, index) else {
                break;
            };
            let Some(child) = table.get(slot.id) else {
                log::warn!("Container {} skips missing child {}", id, slot.id);
                render_stats::record_child_missing();
                continue;
            };

            // positions wrap like the legacy integer maths
            let child_x = slot
                .x
                .wrapping_add(x)
                .wrapping_add(child.horizontal_draw_offset);
            let child_y = slot
                .y
                .wrapping_add(y)
                .wrapping_sub(scroll)
                .wrapping_add(child.vertical_draw_offset);

            if child.content_type > 0 {
                log::trace!(
                    "Widget {} content type {} not evaluated",
                    slot.id,
                    child.content_type
                );
            }

            match child.group() {
                Group::Container => {
                    let height = child.height;
                    let Some(child_scroll) = table
                        .get_mut(slot.id)
                        .and_then(Widget::as_container_mut)
                        .map(|data| clamp_logged(slot.id, data, height))
                    else {
                        continue;
                    };
                    self.render_container(
                        table,
                        &mut clipped,
                        slot.id,
                        child_x,
                        child_y,
                        child_scroll,
                    );
                    // scrollbar drawing is not part of this renderer
                }
                Group::ModelList => render_stats::record_unrendered(),
                _ => self.draw_widget(&mut clipped, child, child_x, child_y),
            }
        }
    }

    /// Draw a single non-container widget with its top-left at `(x, y)`.
    fn draw_widget(&self, raster: &mut Raster, widget: &Widget, x: i32, y: i32) {
        match &widget.kind {
            WidgetKind::Rectangle(data) => draw_rectangle(raster, widget, data, x, y),
            WidgetKind::Text(data) => self.draw_text(raster, widget, data, x, y),
            WidgetKind::Sprite(data) => self.draw_sprite(raster, widget, data, x, y),
            WidgetKind::Container(_) => {}
            WidgetKind::Inventory
            | WidgetKind::Model
            | WidgetKind::ModelList
            | WidgetKind::ItemList => render_stats::record_unrendered(),
        }
    }

    fn draw_text(&self, raster: &mut Raster, widget: &Widget, data: &TextData, x: i32, y: i32) {
        let Some(font) = self.assets.font(data.font) else {
            log::warn!("Text widget {} uses missing font {}", widget.id, data.font.0);
            return;
        };

        let body = if widget.option_type == OptionType::Continue {
            CONTINUE_TEXT
        } else {
            data.text.as_str()
        };
        let color = if self.config.legacy_palette_width == Some(raster.width()) {
            text::legacy_palette(data.color)
        } else {
            data.color
        };

        let style = TextStyle::from_flags(data.centered, data.shadowed);
        let lines = text::draw_shadowed_text(raster, font, x, y, widget.width, body, style, color);
        render_stats::record_text_lines(lines);
    }

    fn draw_sprite(&self, raster: &mut Raster, widget: &Widget, data: &SpriteData, x: i32, y: i32) {
        let Some(id) = &data.sprite else {
            return;
        };
        let Some(sprite) = self.assets.sprite(id) else {
            log::warn!("Sprite widget {} uses missing sprite {}", widget.id, id);
            return;
        };
        sprite.draw_keyed(raster, x, y, self.config.transparent_key);
        render_stats::record_sprite();
    }
}

fn clamp_logged(id: WidgetId, data: &mut ContainerData, height: i32) -> i32 {
    let before = data.scroll_position;
    let after = data.clamp_scroll(height);
    if before != after {
        log::trace!("Container {} scroll clamped {} -> {}", id, before, after);
    }
    after
}

fn draw_rectangle(raster: &mut Raster, widget: &Widget, data: &RectangleData, x: i32, y: i32) {
    let (width, height) = (widget.width, widget.height);
    match (data.alpha == 0, data.filled) {
        (true, true) => raster.fill_rect(x, y, width, height, data.color),
        (true, false) => raster.draw_rect(x, y, width, height, data.color),
        (false, true) => {
            let weight = weight_from_alpha(data.alpha);
            raster.fill_rect_blended(x, y, width, height, data.color, weight)
        }
        (false, false) => {
            let weight = weight_from_alpha(data.alpha);
            raster.draw_rect_blended(x, y, width, height, data.color, weight)
        }
    }
    render_stats::record_rectangle();
}

/// Render `root` with default settings. See [`Compositor::render`].
pub fn render_to_image(
    table: &mut WidgetTable,
    root: WidgetId,
    assets: &dyn Assets,
) -> Option<PixelBuffer> {
    Compositor::new(assets).render(table, root)
}

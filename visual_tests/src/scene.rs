use crate::{Result, VisualTestError};
use iface_raster::prelude::{
    AssetStore, BitmapFont, Compositor, ContainerData, FontId, Glyph, OptionType, RectangleData,
    RenderConfig, Sprite, SpriteId, TextData, Widget, WidgetId, WidgetTable,
};
use std::path::PathBuf;

/// Configuration for rendering a scene to disk
pub struct SceneConfig {
    /// Name of the scene to render
    pub scene_name: String,
    /// Path where the PNG will be saved
    pub output_path: PathBuf,
}

/// A widget table plus everything needed to render it
pub struct Scene {
    pub table: WidgetTable,
    pub root: WidgetId,
    pub assets: AssetStore,
    pub config: RenderConfig,
}

/// Names of every scene known to [`build_scene`]
pub const SCENES: &[&str] = &[
    "nested_scroll",
    "translucent_panel",
    "clipped_overflow",
    "text_dialog",
    "sprite_icons",
];

/// Build the named scene
pub fn build_scene(name: &str) -> Result<Scene> {
    match name {
        "nested_scroll" => Ok(nested_scroll()),
        "translucent_panel" => Ok(translucent_panel()),
        "clipped_overflow" => Ok(clipped_overflow()),
        "text_dialog" => text_dialog(),
        "sprite_icons" => sprite_icons(),
        _ => Err(VisualTestError::UnknownScene(name.to_string())),
    }
}

/// Render a scene and write it as PNG
pub fn render_scene(config: &SceneConfig) -> Result<()> {
    let mut scene = build_scene(&config.scene_name)?;

    let buffer = Compositor::with_config(&scene.assets, scene.config)
        .render(&mut scene.table, scene.root)
        .ok_or_else(|| {
            VisualTestError::Render(format!("Scene '{}' produced no image", config.scene_name))
        })?;

    buffer.save_png(&config.output_path)?;

    if !config.output_path.exists() {
        return Err(VisualTestError::Render(format!(
            "Image was not created at {}",
            config.output_path.display()
        )));
    }

    Ok(())
}

fn rect(id: u32, width: i32, height: i32, filled: bool, color: u32, alpha: u8) -> Widget {
    Widget::rectangle(
        id,
        width,
        height,
        RectangleData {
            filled,
            color,
            alpha,
        },
    )
}

fn scene(table: WidgetTable) -> Scene {
    Scene {
        table,
        root: WidgetId(0),
        assets: AssetStore::new(),
        config: RenderConfig::default().with_background(0x101018),
    }
}

/// A scrolled list inside a framed panel. The list's scroll position is
/// past its limit and gets clamped while rendering.
fn nested_scroll() -> Scene {
    let mut list = ContainerData::new().with_scroll(150, 100);
    let mut table = WidgetTable::new();
    for row in 0..10u32 {
        let id = 10 + row;
        let shade = 0x20 + row * 0x18;
        table.insert(rect(id, 96, 8, true, (shade << 16) | (0x40 << 8) | (0xFF - shade), 0));
        list.push_child(WidgetId(id), 2, row as i32 * 10);
    }

    let root = ContainerData::new()
        .with_child(WidgetId(1), 0, 0)
        .with_child(WidgetId(2), 10, 20)
        .with_child(WidgetId(3), 9, 19);
    table.extend([
        Widget::container(0, 120, 80, root),
        rect(1, 120, 80, true, 0x3C3C3C, 0),
        Widget::container(2, 100, 40, list),
        rect(3, 102, 42, false, 0xFFFFFF, 0),
    ]);
    scene(table)
}

/// Translucent fills and outlines stacked over opaque colour.
fn translucent_panel() -> Scene {
    let root = ContainerData::new()
        .with_child(WidgetId(1), 0, 0)
        .with_child(WidgetId(2), 0, 30)
        .with_child(WidgetId(3), 10, 10)
        .with_child(WidgetId(4), 40, 10)
        .with_child(WidgetId(5), 4, 4);
    let table = [
        Widget::container(0, 80, 60, root),
        rect(1, 80, 30, true, 0xC03020, 0),
        rect(2, 80, 30, true, 0x2060C0, 0),
        rect(3, 25, 40, true, 0xFFFFFF, 128),
        rect(4, 30, 40, false, 0xFFFF00, 64),
        rect(5, 72, 52, false, 0x000000, 0),
    ]
    .into_iter()
    .collect();
    scene(table)
}

/// A small container whose children reach far past its bounds.
fn clipped_overflow() -> Scene {
    let inner = ContainerData::new()
        .with_child(WidgetId(3), -20, -20)
        .with_child(WidgetId(4), 10, 5);
    let root = ContainerData::new()
        .with_child(WidgetId(1), 0, 0)
        .with_child(WidgetId(2), 20, 15);
    let table = [
        Widget::container(0, 80, 60, root),
        rect(1, 80, 60, true, 0x303030, 0),
        Widget::container(2, 40, 30, inner),
        rect(3, 100, 100, true, 0x20A040, 0),
        rect(4, 60, 8, true, 0xE0E020, 0).with_draw_offset(2, 2),
    ]
    .into_iter()
    .collect();
    scene(table)
}

/// Shadowed dialogue text, one left-aligned and one centred, on a viewport
/// wide enough to trigger the legacy palette.
fn text_dialog() -> Result<Scene> {
    let label = TextData {
        font: FontId::REGULAR,
        text: "HELLO\\nWORLD".into(),
        color: 0xFFFF00,
        centered: false,
        shadowed: true,
    };
    let title = TextData {
        font: FontId::BOLD,
        text: "CENTRE\\nTEXT\\nLINES".into(),
        color: 0x00C000,
        centered: true,
        shadowed: true,
    };
    let prompt = TextData {
        font: FontId::REGULAR,
        text: "unused".into(),
        color: 0x0000FF,
        centered: true,
        shadowed: false,
    };
    let root = ContainerData::new()
        .with_child(WidgetId(1), 0, 0)
        .with_child(WidgetId(2), 8, 8)
        .with_child(WidgetId(3), 200, 8)
        .with_child(WidgetId(4), 0, 60);
    let table = [
        Widget::container(0, 479, 80, root),
        rect(1, 479, 80, true, 0xD8C8A0, 0),
        Widget::text(2, 150, 40, label),
        Widget::text(3, 150, 40, title),
        Widget::text(4, 479, 14, prompt).with_option_type(OptionType::Continue),
    ]
    .into_iter()
    .collect();

    let mut scene = scene(table);
    scene.assets.insert_font(FontId::REGULAR, block_font(10, 5, 7)?);
    scene.assets.insert_font(FontId::BOLD, block_font(12, 7, 9)?);
    Ok(scene)
}

/// Key-transparent sprites, one with trim offsets and one missing.
fn sprite_icons() -> Result<Scene> {
    let gem = SpriteId::new("icons", 0);
    let trimmed = SpriteId::new("icons", 1);
    let root = ContainerData::new()
        .with_child(WidgetId(1), 0, 0)
        .with_child(WidgetId(2), 4, 4)
        .with_child(WidgetId(3), 28, 4)
        .with_child(WidgetId(4), 52, 4)
        .with_child(WidgetId(2), 4, 30);
    let table = [
        Widget::container(0, 80, 50, root),
        rect(1, 80, 50, true, 0x405060, 0),
        Widget::sprite(2, 16, 16, Some(gem.clone())),
        Widget::sprite(3, 16, 16, Some(trimmed.clone())),
        Widget::sprite(4, 16, 16, Some(SpriteId::new("icons", 99))),
    ]
    .into_iter()
    .collect();

    let mut scene = scene(table);
    scene.assets.insert_sprite(gem, diamond(16, 0x30D0F0)?);
    scene
        .assets
        .insert_sprite(trimmed, diamond(10, 0xF07030)?.with_offset(3, 3));
    Ok(scene)
}

/// Diamond on a black (transparent) square.
fn diamond(size: i32, color: u32) -> Result<Sprite> {
    let half = size / 2;
    let pixels = (0..size * size)
        .map(|i| {
            let (x, y) = (i % size, i / size);
            if (x - half).abs() + (y - half).abs() <= half {
                color
            } else {
                0
            }
        })
        .collect();
    Ok(Sprite::new(size, size, pixels)?)
}

/// Deterministic placeholder font covering A-Z and a space.
fn block_font(vertical_space: i32, width: i32, height: i32) -> Result<BitmapFont> {
    let mut font = BitmapFont::new(vertical_space);
    for ch in 'A'..='Z' {
        let code = ch as i32;
        let mask = (0..width * height)
            .map(|i| {
                let (x, y) = (i % width, i / width);
                let edge = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                u8::from(edge || (code >> ((x + y) % 5)) & 1 == 1)
            })
            .collect();
        let glyph = Glyph::new(width, height, mask)?
            .with_offset(0, vertical_space - height)
            .with_advance(width + 1);
        font.insert_glyph(ch, glyph);
    }
    font.insert_glyph(' ', Glyph::blank(width));
    Ok(font)
}

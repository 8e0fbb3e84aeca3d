//! Render a small interface and write it to a PNG.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example scene_to_png -- panel.png
//! ```

use iface_raster::prelude::*;

fn build_table() -> WidgetTable {
    let mut list = ContainerData::new().with_scroll(250, 120);
    let mut table = WidgetTable::new();
    for row in 0..8u32 {
        let id = 20 + row;
        let color = if row % 2 == 0 { 0x5A4A32 } else { 0x6E5C40 };
        table.insert(Widget::rectangle(
            id,
            140,
            14,
            RectangleData {
                filled: true,
                color,
                alpha: 0,
            },
        ));
        list.push_child(WidgetId(id), 0, row as i32 * 15);
    }

    let root = ContainerData::new()
        .with_child(WidgetId(1), 0, 0)
        .with_child(WidgetId(2), 10, 10)
        .with_child(WidgetId(3), 10, 30)
        .with_child(WidgetId(4), 0, 0);

    table.extend([
        Widget::container(0, 160, 100, root),
        Widget::rectangle(
            1,
            160,
            100,
            RectangleData {
                filled: true,
                color: 0x3E3529,
                alpha: 0,
            },
        ),
        Widget::text(
            2,
            140,
            16,
            TextData {
                font: FontId::BOLD,
                text: "Inventory".into(),
                color: 0xFF981F,
                centered: true,
                shadowed: true,
            },
        ),
        Widget::container(3, 140, 60, list),
        Widget::rectangle(
            4,
            160,
            100,
            RectangleData {
                filled: false,
                color: 0xFFFFFF,
                alpha: 128,
            },
        ),
    ]);
    table
}

/// Stand-in font: every letter is a hollow 5x7 box.
fn block_font() -> iface_raster::Result<BitmapFont> {
    let mask: Vec<u8> = (0..35)
        .map(|i| {
            let (x, y) = (i % 5, i / 5);
            u8::from(x == 0 || x == 4 || y == 0 || y == 6)
        })
        .collect();
    let mut font = BitmapFont::new(12);
    for ch in ('a'..='z').chain('A'..='Z') {
        font.insert_glyph(ch, Glyph::new(5, 7, mask.clone())?.with_offset(0, 3).with_advance(6));
    }
    Ok(font)
}

fn main() -> iface_raster::Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "scene.png".to_string());

    let mut table = build_table();
    table.validate()?;

    let assets = AssetStore::new().with_font(FontId::BOLD, block_font()?);
    let Some(image) = render_to_image(&mut table, WidgetId(0), &assets) else {
        log::error!("Root widget produced no image");
        return Ok(());
    };

    image.save_png(&path)?;
    log::info!("Wrote {}x{} image to {}", image.width, image.height, path);
    iface_raster::render_stats::log_stats();
    Ok(())
}

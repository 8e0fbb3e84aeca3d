//! End-to-end compositor behaviour over whole widget tables.

use std::cell::RefCell;
use std::rc::Rc;

use iface_raster::font::SHADOW_COLOR;
use iface_raster::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Font that records every `draw_text` call and paints a single pixel at
/// the pen position so output stays observable.
#[derive(Clone, Default)]
struct RecordingFont {
    vertical_space: i32,
    calls: Rc<RefCell<Vec<(i32, i32, String, u32)>>>,
}

impl RecordingFont {
    fn new(vertical_space: i32) -> Self {
        Self {
            vertical_space,
            calls: Rc::default(),
        }
    }

    fn calls(&self) -> Vec<(i32, i32, String, u32)> {
        self.calls.borrow().clone()
    }
}

impl Font for RecordingFont {
    fn vertical_space(&self) -> i32 {
        self.vertical_space
    }

    fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * 4
    }

    fn draw_text(&self, raster: &mut Raster, x: i32, y: i32, text: &str, color: u32) {
        self.calls.borrow_mut().push((x, y, text.to_string(), color));
        raster.fill_rect(x, y, 1, 1, color);
    }
}

/// Asset provider holding one recording font under every id.
struct FontOnly(RecordingFont);

impl Assets for FontOnly {
    fn sprite(&self, _id: &SpriteId) -> Option<&Sprite> {
        None
    }

    fn font(&self, _id: FontId) -> Option<&dyn Font> {
        Some(&self.0)
    }
}

fn solid(id: u32, width: i32, height: i32, color: u32) -> Widget {
    Widget::rectangle(
        id,
        width,
        height,
        RectangleData {
            filled: true,
            color,
            alpha: 0,
        },
    )
}

fn text(id: u32, width: i32, height: i32, body: &str, color: u32) -> Widget {
    Widget::text(
        id,
        width,
        height,
        TextData {
            font: FontId::REGULAR,
            text: body.to_string(),
            color,
            centered: false,
            shadowed: false,
        },
    )
}

fn table_of(widgets: impl IntoIterator<Item = Widget>) -> WidgetTable {
    widgets.into_iter().collect()
}

#[test]
fn red_block_in_container() {
    init_logger();
    let root = ContainerData::new().with_child(WidgetId(1), 10, 10);
    let mut table = table_of([
        Widget::container(0, 100, 50, root),
        solid(1, 20, 10, 0xFF0000),
    ]);

    let buffer = render_to_image(&mut table, WidgetId(0), &AssetStore::new()).unwrap();
    assert_eq!((buffer.width, buffer.height), (100, 50));
    for y in 0..50 {
        for x in 0..100 {
            let inside = (10..30).contains(&x) && (10..20).contains(&y);
            let expected = if inside { 0xFF0000 } else { 0 };
            assert_eq!(buffer.pixel(x, y), Some(expected), "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn zero_width_root_renders_none() {
    init_logger();
    let mut table = table_of([Widget::container(0, 0, 50, ContainerData::new())]);
    assert!(render_to_image(&mut table, WidgetId(0), &AssetStore::new()).is_none());

    let mut table = table_of([solid(0, 10, -1, 0xFF0000)]);
    assert!(render_to_image(&mut table, WidgetId(0), &AssetStore::new()).is_none());
}

#[test]
fn two_lines_draw_one_vertical_space_apart() {
    init_logger();
    let font = RecordingFont::new(12);
    let assets = FontOnly(font.clone());
    let mut table = table_of([text(0, 60, 40, "Line1\\nLine2", 0xFFFFFF)]);

    render_to_image(&mut table, WidgetId(0), &assets).unwrap();
    assert_eq!(
        font.calls(),
        [
            (0, 12, "Line1".to_string(), 0xFFFFFF),
            (0, 24, "Line2".to_string(), 0xFFFFFF),
        ]
    );
}

#[test]
fn three_lines_follow_baseline_offsets() {
    init_logger();
    let font = RecordingFont::new(10);
    let assets = FontOnly(font.clone());
    let root = ContainerData::new().with_child(WidgetId(1), 5, 7);
    let mut table = table_of([
        Widget::container(0, 80, 60, root),
        text(1, 40, 40, "a\\nb\\nc", 0x00FF00),
    ]);

    render_to_image(&mut table, WidgetId(0), &assets).unwrap();
    let ys: Vec<_> = font.calls().iter().map(|call| (call.0, call.1)).collect();
    assert_eq!(ys, [(5, 17), (5, 27), (5, 37)]);
}

#[test]
fn shadowed_centred_text_draws_shadow_first() {
    init_logger();
    let font = RecordingFont::new(8);
    let assets = FontOnly(font.clone());
    let mut widget = text(0, 40, 20, "abcd", 0xFF00FF);
    if let WidgetKind::Text(data) = &mut widget.kind {
        data.centered = true;
        data.shadowed = true;
    }
    let mut table = table_of([widget]);

    render_to_image(&mut table, WidgetId(0), &assets).unwrap();
    // centre x = 0 + 40 / 2 = 20, text width 16 -> left edge 12
    assert_eq!(
        font.calls(),
        [
            (13, 9, "abcd".to_string(), SHADOW_COLOR),
            (12, 8, "abcd".to_string(), 0xFF00FF),
        ]
    );
}

#[test]
fn scroll_position_is_clamped_in_place() {
    init_logger();
    let list = ContainerData::new()
        .with_child(WidgetId(2), 0, 0)
        .with_scroll(150, 100);
    let root = ContainerData::new().with_child(WidgetId(1), 0, 0);
    let mut table = table_of([
        Widget::container(0, 50, 50, root),
        Widget::container(1, 50, 40, list),
        solid(2, 5, 5, 0xFFFFFF),
    ]);

    render_to_image(&mut table, WidgetId(0), &AssetStore::new()).unwrap();
    let list = table.get(WidgetId(1)).and_then(Widget::as_container).unwrap();
    assert_eq!(list.scroll_position, 60);

    // a second render leaves the clamped value alone
    render_to_image(&mut table, WidgetId(0), &AssetStore::new()).unwrap();
    let list = table.get(WidgetId(1)).and_then(Widget::as_container).unwrap();
    assert_eq!(list.scroll_position, 60);
}

#[test]
fn negative_scroll_clamps_to_zero() {
    init_logger();
    let list = ContainerData::new()
        .with_child(WidgetId(2), 0, 0)
        .with_scroll(-25, 10);
    let root = ContainerData::new().with_child(WidgetId(1), 0, 0);
    let mut table = table_of([
        Widget::container(0, 20, 20, root),
        Widget::container(1, 20, 20, list),
        solid(2, 2, 2, 0xFFFFFF),
    ]);

    let buffer = render_to_image(&mut table, WidgetId(0), &AssetStore::new()).unwrap();
    let list = table.get(WidgetId(1)).and_then(Widget::as_container).unwrap();
    assert_eq!(list.scroll_position, 0);
    assert_eq!(buffer.pixel(0, 0), Some(0xFFFFFF));
}

#[test]
fn missing_child_is_skipped() {
    init_logger();
    let root = ContainerData::new()
        .with_child(WidgetId(1), 0, 0)
        .with_child(WidgetId(77), 0, 0)
        .with_child(WidgetId(2), 5, 0);
    let mut table = table_of([
        Widget::container(0, 10, 10, root),
        solid(1, 2, 2, 0xFF0000),
        solid(2, 2, 2, 0x00FF00),
    ]);

    let buffer = render_to_image(&mut table, WidgetId(0), &AssetStore::new()).unwrap();
    assert_eq!(buffer.pixel(0, 0), Some(0xFF0000));
    assert_eq!(buffer.pixel(5, 0), Some(0x00FF00));
}

#[test]
fn legacy_viewport_remaps_yellow_text() {
    init_logger();
    let font = RecordingFont::new(10);
    let assets = FontOnly(font.clone());
    let root = ContainerData::new()
        .with_child(WidgetId(1), 0, 0)
        .with_child(WidgetId(2), 0, 20);
    let mut table = table_of([
        Widget::container(0, 479, 40, root),
        text(1, 100, 12, "yellow", 0xFFFF00),
        text(2, 100, 12, "green", 49152),
    ]);

    let buffer = render_to_image(&mut table, WidgetId(0), &assets).unwrap();
    let colors: Vec<_> = font.calls().iter().map(|call| call.3).collect();
    assert_eq!(colors, [255, 0xFFFFFF]);
    assert_eq!(buffer.pixel(0, 10), Some(255));
}

#[test]
fn other_viewport_widths_keep_text_colour() {
    init_logger();
    let font = RecordingFont::new(10);
    let assets = FontOnly(font.clone());
    let root = ContainerData::new().with_child(WidgetId(1), 0, 0);
    let mut table = table_of([
        Widget::container(0, 480, 40, root),
        text(1, 100, 12, "yellow", 0xFFFF00),
    ]);

    render_to_image(&mut table, WidgetId(0), &assets).unwrap();
    assert_eq!(font.calls()[0].3, 0xFFFF00);
}

#[test]
fn continue_option_shows_waiting_text() {
    init_logger();
    let font = RecordingFont::new(10);
    let assets = FontOnly(font.clone());
    let mut table =
        table_of([text(0, 100, 12, "Click here", 0x123456).with_option_type(OptionType::Continue)]);

    render_to_image(&mut table, WidgetId(0), &assets).unwrap();
    assert_eq!(
        font.calls(),
        [(0, 10, "Please wait...".to_string(), 0x123456)]
    );
}

#[test]
fn rendering_is_deterministic() {
    init_logger();
    let build = || {
        let list = ContainerData::new()
            .with_child(WidgetId(3), 0, 0)
            .with_child(WidgetId(4), 0, 30)
            .with_scroll(20, 60);
        let root = ContainerData::new()
            .with_child(WidgetId(1), 0, 0)
            .with_child(WidgetId(2), 5, 5);
        table_of([
            Widget::container(0, 60, 60, root),
            solid(1, 60, 60, 0x202020),
            Widget::container(2, 40, 30, list),
            Widget::rectangle(
                3,
                30,
                25,
                RectangleData {
                    filled: true,
                    color: 0xFFFFFF,
                    alpha: 100,
                },
            ),
            solid(4, 30, 25, 0x0080FF),
        ])
    };

    let assets = AssetStore::new();
    let first = render_to_image(&mut build(), WidgetId(0), &assets).unwrap();
    let second = render_to_image(&mut build(), WidgetId(0), &assets).unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn descendants_never_escape_their_container() {
    init_logger();
    let inner = ContainerData::new()
        .with_child(WidgetId(3), -50, -50)
        .with_child(WidgetId(4), 0, 0);
    let root = ContainerData::new().with_child(WidgetId(2), 10, 10);
    let mut table = table_of([
        Widget::container(0, 40, 40, root),
        Widget::container(2, 15, 12, inner),
        solid(3, 200, 200, 0xFF0000),
        Widget::rectangle(
            4,
            100,
            100,
            RectangleData {
                filled: false,
                color: 0x00FF00,
                alpha: 0,
            },
        ),
    ]);

    let buffer = render_to_image(&mut table, WidgetId(0), &AssetStore::new()).unwrap();
    for y in 0..40 {
        for x in 0..40 {
            let inside = (10..25).contains(&x) && (10..22).contains(&y);
            if !inside {
                assert_eq!(buffer.pixel(x, y), Some(0), "escaped at ({}, {})", x, y);
            }
        }
    }
    assert_eq!(buffer.pixel(10, 10), Some(0x00FF00));
    assert_eq!(buffer.pixel(24, 21), Some(0xFF0000));
}

#[test]
fn sibling_after_nested_container_sees_restored_clip() {
    init_logger();
    let inner = ContainerData::new().with_child(WidgetId(3), 0, 0);
    let root = ContainerData::new()
        .with_child(WidgetId(2), 0, 0)
        .with_child(WidgetId(4), 20, 20);
    let mut table = table_of([
        Widget::container(0, 30, 30, root),
        Widget::container(2, 5, 5, inner),
        solid(3, 1, 1, 0x0000FF),
        solid(4, 5, 5, 0xFF0000),
    ]);

    let buffer = render_to_image(&mut table, WidgetId(0), &AssetStore::new()).unwrap();
    assert_eq!(buffer.pixel(24, 24), Some(0xFF0000));
}

#[test]
fn alpha_extremes_and_midpoint() {
    init_logger();
    let rect = |id, alpha| {
        Widget::rectangle(
            id,
            1,
            1,
            RectangleData {
                filled: true,
                color: 0xFFFFFF,
                alpha,
            },
        )
    };
    let root = ContainerData::new()
        .with_child(WidgetId(1), 0, 0)
        .with_child(WidgetId(2), 1, 0)
        .with_child(WidgetId(3), 2, 0);
    let mut table = table_of([
        Widget::container(0, 3, 1, root),
        rect(1, 0),
        rect(2, 255),
        rect(3, 192),
    ]);

    let config = RenderConfig::default().with_background(0x000080);
    let assets = AssetStore::new();
    let buffer = Compositor::with_config(&assets, config)
        .render(&mut table, WidgetId(0))
        .unwrap();

    assert_eq!(buffer.pixel(0, 0), Some(0xFFFFFF));
    assert_eq!(buffer.pixel(1, 0), Some(0x000080));
    // w = 64: r/g = 255 * 64 >> 8 = 63, b = (255 * 64 + 128 * 192) >> 8 = 159
    assert_eq!(buffer.pixel(2, 0), Some(0x3F3F9F));
}

#[test]
fn table_validation_flags_malformed_containers() {
    let mut bad = ContainerData::new().with_child(WidgetId(1), 0, 0);
    bad.child_y.clear();
    let table = table_of([Widget::container(0, 4, 4, bad), solid(1, 1, 1, 0)]);
    assert!(matches!(
        table.validate(),
        Err(RenderError::ChildArity { widget: WidgetId(0), .. })
    ));

    let good = ContainerData::new().with_child(WidgetId(1), 0, 0);
    let table = table_of([Widget::container(0, 4, 4, good), solid(1, 1, 1, 0)]);
    assert!(table.validate().is_ok());
}

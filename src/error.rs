use thiserror::Error;

use crate::widget::WidgetId;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown widget group id: {0}")]
    UnknownGroup(u8),
    #[error("Unknown option type id: {0}")]
    UnknownOptionType(u8),
    #[error("Pixel buffer has {actual} pixels, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error(
        "Widget {widget} has mismatched child slots: {children} ids, {child_x} x offsets, {child_y} y offsets"
    )]
    ChildArity {
        widget: WidgetId,
        children: usize,
        child_x: usize,
        child_y: usize,
    },
    #[error("Widget {parent} references missing child {child}")]
    DanglingChild { parent: WidgetId, child: WidgetId },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, RenderError>;

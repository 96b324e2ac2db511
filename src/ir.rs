//! Backend-agnostic draw commands in millimeter coordinates.
//!
//! The compositor emits these; a drawing backend (screen preview, PDF page,
//! raster) interprets them with its own `draw_text`/`draw_rect`/`draw_line`/
//! `draw_image` primitives. Keeping one command stream is what lets preview
//! and print share a single layout path.

use serde::{Deserialize, Serialize};

use crate::barcode::BarcodeFormat;
use crate::model::TextAlign;
use crate::text_fit::FontSpec;
use crate::units::RectMm;

/// One drawing primitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Text(TextCommand),
    Rect(RectCommand),
    Line(LineCommand),
    Barcode(BarcodeCommand),
}

/// Draw a text block anchored at its top-left corner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextCommand {
    pub x_mm: f64,
    pub y_mm: f64,
    pub text: String,
    pub font: FontSpec,
    pub align: TextAlign,
    /// Wrap/trim bound. `None` means the backend draws unconstrained.
    pub max_width_mm: Option<f64>,
    /// Vertical bound for wrapped blocks; overflow is character-ellipsized.
    pub max_height_mm: Option<f64>,
}

/// Stroke an axis-aligned rectangle outline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectCommand {
    pub rect: RectMm,
    pub stroke_mm: f64,
}

/// Stroke a line segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineCommand {
    pub x1_mm: f64,
    pub y1_mm: f64,
    pub x2_mm: f64,
    pub y2_mm: f64,
    pub stroke_mm: f64,
}

/// Render a barcode image into `rect`.
///
/// `value` is already normalized for the format; backends that fail to encode
/// must skip the command rather than fail the page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarcodeCommand {
    pub value: String,
    pub format: BarcodeFormat,
    pub rect: RectMm,
    pub show_text: bool,
}

//! Printer drift correction: scale about a center, then translate.
//!
//! The order is load-bearing. Translating first and scaling second would
//! multiply the translation by the scale factor, so a 3 mm offset would no
//! longer move output by 3 mm. Sheet-level and label-level corrections are
//! independent and must never both apply to the same output; sheet-packed
//! renders zero out per-label calibration.

use serde::{Deserialize, Serialize};

use crate::ir::{DrawCommand, LineCommand, RectCommand, TextCommand};
use crate::model::{LabelTemplate, SheetSettings, TextAlign};
use crate::text_fit::FontSpec;
use crate::units::RectMm;

/// Scale-about-center-then-translate transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform2d {
    pub scale_x: f64,
    pub scale_y: f64,
    pub center_x_mm: f64,
    pub center_y_mm: f64,
    pub translate_x_mm: f64,
    pub translate_y_mm: f64,
}

impl Default for Transform2d {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2d {
    pub fn identity() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            center_x_mm: 0.0,
            center_y_mm: 0.0,
            translate_x_mm: 0.0,
            translate_y_mm: 0.0,
        }
    }

    /// Sheet-level correction: scale about the sheet's geometric center, then
    /// translate by the sheet offsets. Applied once per packed page.
    pub fn sheet(settings: &SheetSettings) -> Self {
        let s = settings.normalized();
        Self {
            scale_x: s.scale_x,
            scale_y: s.scale_y,
            center_x_mm: s.sheet_width_mm / 2.0,
            center_y_mm: s.sheet_height_mm / 2.0,
            translate_x_mm: s.offset_x_mm,
            translate_y_mm: s.offset_y_mm,
        }
    }

    /// Label-level correction for single-label print/preview paths: scale
    /// about the label's own center, translate by the template offsets.
    pub fn label(template: &LabelTemplate, origin_x_mm: f64, origin_y_mm: f64) -> Self {
        let t = template.normalized();
        Self {
            scale_x: t.scale_x,
            scale_y: t.scale_y,
            center_x_mm: origin_x_mm + t.width_mm / 2.0,
            center_y_mm: origin_y_mm + t.height_mm / 2.0,
            translate_x_mm: t.offset_x_mm,
            translate_y_mm: t.offset_y_mm,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.scale_x == 1.0
            && self.scale_y == 1.0
            && self.translate_x_mm == 0.0
            && self.translate_y_mm == 0.0
    }

    /// Map a point: scale about the center first, then translate.
    pub fn apply(&self, x_mm: f64, y_mm: f64) -> (f64, f64) {
        let x = (x_mm - self.center_x_mm) * self.scale_x + self.center_x_mm + self.translate_x_mm;
        let y = (y_mm - self.center_y_mm) * self.scale_y + self.center_y_mm + self.translate_y_mm;
        (x, y)
    }
}

const RULER_STEP_MM: f64 = 10.0;
const RULER_TICK_LEN_MM: f64 = 5.0;
const RULER_LABEL_STEP_MM: f64 = 50.0;
const RULER_STROKE_MM: f64 = 0.2;
const GRID_STROKE_MM: f64 = 0.1;
const RULER_FONT_PT: f64 = 6.0;

/// Calibration test page: edge rulers every 10 mm (labelled every 50 mm), a
/// light full-page grid, the printable-area outline, and one label outline at
/// the printable origin. Print it, measure the drift with a steel rule, and
/// feed the correction back into the settings.
pub fn test_pattern(settings: &SheetSettings, template: &LabelTemplate) -> Vec<DrawCommand> {
    let s = settings.normalized();
    let t = template.normalized();
    let mut commands = Vec::new();
    let ruler_font = FontSpec::new("Arial", RULER_FONT_PT, false);

    let mut y = 0.0;
    while y <= s.sheet_height_mm {
        commands.push(DrawCommand::Line(LineCommand {
            x1_mm: 0.0,
            y1_mm: y,
            x2_mm: RULER_TICK_LEN_MM,
            y2_mm: y,
            stroke_mm: RULER_STROKE_MM,
        }));
        if (y % RULER_LABEL_STEP_MM).abs() < f64::EPSILON {
            commands.push(DrawCommand::Text(TextCommand {
                x_mm: RULER_TICK_LEN_MM + 1.0,
                y_mm: y,
                text: format!("{y}mm"),
                font: ruler_font.clone(),
                align: TextAlign::Left,
                max_width_mm: None,
                max_height_mm: None,
            }));
        }
        y += RULER_STEP_MM;
    }

    let mut x = 0.0;
    while x <= s.sheet_width_mm {
        commands.push(DrawCommand::Line(LineCommand {
            x1_mm: x,
            y1_mm: 0.0,
            x2_mm: x,
            y2_mm: RULER_TICK_LEN_MM,
            stroke_mm: RULER_STROKE_MM,
        }));
        if (x % RULER_LABEL_STEP_MM).abs() < f64::EPSILON {
            commands.push(DrawCommand::Text(TextCommand {
                x_mm: x,
                y_mm: RULER_TICK_LEN_MM + 1.0,
                text: format!("{x}mm"),
                font: ruler_font.clone(),
                align: TextAlign::Left,
                max_width_mm: None,
                max_height_mm: None,
            }));
        }
        x += RULER_STEP_MM;
    }

    // Light alignment grid across the full sheet.
    let mut x = 0.0;
    while x <= s.sheet_width_mm {
        commands.push(DrawCommand::Line(LineCommand {
            x1_mm: x,
            y1_mm: 0.0,
            x2_mm: x,
            y2_mm: s.sheet_height_mm,
            stroke_mm: GRID_STROKE_MM,
        }));
        x += RULER_STEP_MM;
    }
    let mut y = 0.0;
    while y <= s.sheet_height_mm {
        commands.push(DrawCommand::Line(LineCommand {
            x1_mm: 0.0,
            y1_mm: y,
            x2_mm: s.sheet_width_mm,
            y2_mm: y,
            stroke_mm: GRID_STROKE_MM,
        }));
        y += RULER_STEP_MM;
    }

    commands.push(DrawCommand::Rect(RectCommand {
        rect: RectMm::new(
            s.margin_mm,
            s.margin_mm,
            s.printable_width_mm(),
            s.printable_height_mm(),
        ),
        stroke_mm: RULER_STROKE_MM,
    }));
    commands.push(DrawCommand::Rect(RectCommand {
        rect: RectMm::new(s.margin_mm, s.margin_mm, t.width_mm, t.height_mm),
        stroke_mm: RULER_STROKE_MM,
    }));

    commands
}

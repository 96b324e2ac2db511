//! Plain data model consumed and produced by the layout engine.
//!
//! These types are owned by external collaborators (template catalog, settings
//! store, job queue UI); the engine only ever reads them after `normalized()`
//! has applied the documented clamps, and emits [`PlacedItem`]/[`PackedPage`]
//! values that are never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::barcode::{self, BarcodeFormat};
use crate::units::clamp_f64;

/// Calibration scale bounds for an individual label template.
pub const TEMPLATE_SCALE_MIN: f64 = 0.90;
pub const TEMPLATE_SCALE_MAX: f64 = 1.10;
/// Calibration offset bound (mm) shared by templates and sheets.
pub const CALIBRATION_OFFSET_MAX_MM: f64 = 5.0;
/// Calibration scale bounds at sheet level. Tighter than the per-label band:
/// a sheet-level error also multiplies every label position.
pub const SHEET_SCALE_MIN: f64 = 0.95;
pub const SHEET_SCALE_MAX: f64 = 1.05;
/// Sheet margin bound (mm).
pub const SHEET_MARGIN_MAX_MM: f64 = 40.0;
/// Inter-label gap bound (mm).
pub const SHEET_GAP_MAX_MM: f64 = 20.0;

/// Physical label stock description plus per-label calibration.
///
/// Immutable once a packing run starts; owned by the template catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelTemplate {
    pub id: u32,
    pub name: String,
    pub width_mm: f64,
    pub height_mm: f64,
    pub padding_mm: f64,
    pub offset_x_mm: f64,
    pub offset_y_mm: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub show_ean_default: bool,
    pub show_sku_default: bool,
    pub show_expiry_default: bool,
    pub barcode_enabled_default: bool,
}

impl Default for LabelTemplate {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            width_mm: 150.0,
            height_mm: 38.0,
            padding_mm: 2.0,
            offset_x_mm: 0.0,
            offset_y_mm: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            show_ean_default: false,
            show_sku_default: false,
            show_expiry_default: false,
            barcode_enabled_default: false,
        }
    }
}

impl LabelTemplate {
    /// Copy with all bounded fields clamped and dimensions made non-negative.
    pub fn normalized(&self) -> Self {
        let mut t = self.clone();
        t.width_mm = t.width_mm.max(0.0);
        t.height_mm = t.height_mm.max(0.0);
        t.padding_mm = t.padding_mm.max(0.0);
        t.offset_x_mm = clamp_f64(
            t.offset_x_mm,
            -CALIBRATION_OFFSET_MAX_MM,
            CALIBRATION_OFFSET_MAX_MM,
        );
        t.offset_y_mm = clamp_f64(
            t.offset_y_mm,
            -CALIBRATION_OFFSET_MAX_MM,
            CALIBRATION_OFFSET_MAX_MM,
        );
        t.scale_x = clamp_f64(t.scale_x, TEMPLATE_SCALE_MIN, TEMPLATE_SCALE_MAX);
        t.scale_y = clamp_f64(t.scale_y, TEMPLATE_SCALE_MIN, TEMPLATE_SCALE_MAX);
        t
    }
}

/// One pack-size row on the label: its caption plus optional weight and price.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PackRow {
    pub label: String,
    pub weight_kg: Option<f64>,
    pub price: Option<f64>,
}

impl PackRow {
    fn unit_price(&self) -> Option<f64> {
        match (self.weight_kg, self.price) {
            (Some(weight), Some(price)) if weight > 0.0 => Some(price / weight),
            _ => None,
        }
    }
}

/// Everything the engine renders for one product.
///
/// Carries no identity beyond what the caller supplies; persistence and
/// catalog lookup live outside the core.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelContent {
    pub name: String,
    pub variant_text: String,
    pub small_pack: PackRow,
    pub large_pack: PackRow,
    /// Explicit per-kg unit price; overrides the computed value.
    pub unit_price_override: Option<f64>,
    /// Free-form unit price wording; overrides formatting entirely.
    pub unit_price_text: Option<String>,
    pub ean: Option<String>,
    pub show_ean: bool,
    pub sku: Option<String>,
    pub show_sku: bool,
    /// ISO `YYYY-MM-DD` expiry date.
    pub expiry_date: Option<String>,
    pub show_expiry: bool,
    pub barcode_value: Option<String>,
    pub barcode_format: BarcodeFormat,
    pub barcode_enabled: bool,
    pub barcode_show_text: bool,
    pub notes: Option<String>,
}

impl LabelContent {
    /// Effective per-kg unit price: explicit override, else the large pack's
    /// quotient, else the small pack's.
    pub fn unit_price_per_kg(&self) -> Option<f64> {
        self.unit_price_override
            .or_else(|| self.large_pack.unit_price())
            .or_else(|| self.small_pack.unit_price())
    }

    /// Whether a scannable barcode block should be attempted.
    pub fn has_barcode(&self) -> bool {
        if !self.barcode_enabled {
            return false;
        }
        match self.barcode_value.as_deref() {
            Some(value) => barcode::validate(value, self.barcode_format).0,
            None => false,
        }
    }

    /// Whether any metadata line (EAN/SKU/expiry) is visible.
    pub fn has_meta(&self) -> bool {
        fn shown(flag: bool, value: Option<&str>) -> bool {
            flag && value.is_some_and(|v| !v.trim().is_empty())
        }
        shown(self.show_ean, self.ean.as_deref())
            || shown(self.show_sku, self.sku.as_deref())
            || shown(self.show_expiry, self.expiry_date.as_deref())
    }
}

/// One queue entry: a product on a template, `copies` times.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelJob {
    pub content: LabelContent,
    pub template: LabelTemplate,
    pub copies: u32,
}

impl LabelJob {
    pub fn new(content: LabelContent, template: LabelTemplate, copies: u32) -> Self {
        Self {
            content,
            template,
            copies,
        }
    }

    /// Copy count with the ≥ 1 clamp applied.
    pub fn effective_copies(&self) -> u32 {
        self.copies.max(1)
    }
}

/// Sheet geometry and sheet-level calibration for a packing run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SheetSettings {
    pub sheet_width_mm: f64,
    pub sheet_height_mm: f64,
    pub margin_mm: f64,
    pub gap_mm: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub offset_x_mm: f64,
    pub offset_y_mm: f64,
    /// Draw the printable-area outline and per-item index tags.
    pub debug_overlay: bool,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            sheet_width_mm: 210.0,
            sheet_height_mm: 297.0,
            margin_mm: 8.0,
            gap_mm: 2.0,
            scale_x: 1.0,
            scale_y: 1.0,
            offset_x_mm: 0.0,
            offset_y_mm: 0.0,
            debug_overlay: false,
        }
    }
}

impl SheetSettings {
    /// Copy with every bounded field clamped; non-positive sheet dimensions
    /// fall back to A4 portrait.
    pub fn normalized(&self) -> Self {
        let defaults = Self::default();
        let mut s = self.clone();
        if s.sheet_width_mm <= 0.0 {
            s.sheet_width_mm = defaults.sheet_width_mm;
        }
        if s.sheet_height_mm <= 0.0 {
            s.sheet_height_mm = defaults.sheet_height_mm;
        }
        s.margin_mm = clamp_f64(s.margin_mm, 0.0, SHEET_MARGIN_MAX_MM);
        s.gap_mm = clamp_f64(s.gap_mm, 0.0, SHEET_GAP_MAX_MM);
        s.scale_x = clamp_f64(s.scale_x, SHEET_SCALE_MIN, SHEET_SCALE_MAX);
        s.scale_y = clamp_f64(s.scale_y, SHEET_SCALE_MIN, SHEET_SCALE_MAX);
        s.offset_x_mm = clamp_f64(
            s.offset_x_mm,
            -CALIBRATION_OFFSET_MAX_MM,
            CALIBRATION_OFFSET_MAX_MM,
        );
        s.offset_y_mm = clamp_f64(
            s.offset_y_mm,
            -CALIBRATION_OFFSET_MAX_MM,
            CALIBRATION_OFFSET_MAX_MM,
        );
        s
    }

    /// Width of the margin-inset printable area.
    pub fn printable_width_mm(&self) -> f64 {
        (self.sheet_width_mm - 2.0 * self.margin_mm).max(0.0)
    }

    /// Height of the margin-inset printable area.
    pub fn printable_height_mm(&self) -> f64 {
        (self.sheet_height_mm - 2.0 * self.margin_mm).max(0.0)
    }
}

/// A label instance resolved to a sheet position. Produced only by the packer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub x_mm: f64,
    pub y_mm: f64,
    pub content: LabelContent,
    pub template: LabelTemplate,
}

/// One packed sheet: 0-based index plus its placed items in packing order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PackedPage {
    pub index: usize,
    pub items: Vec<PlacedItem>,
}

/// Horizontal text alignment within a content box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font and alignment for one text role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub family: String,
    pub size_pt: f64,
    pub bold: bool,
    pub align: TextAlign,
}

impl TextStyle {
    fn new(family: &str, size_pt: f64, bold: bool, align: TextAlign) -> Self {
        Self {
            family: family.to_string(),
            size_pt,
            bold,
            align,
        }
    }
}

/// Typography and fixed-geometry knobs shared by every label in a run.
///
/// Persisted by the caller's settings store; the engine treats a value as
/// immutable for the duration of a render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleSettings {
    pub product_name: TextStyle,
    /// Shrink-to-fit floor for the product name.
    pub product_name_min_pt: f64,
    pub variant_text: TextStyle,
    pub price_big: TextStyle,
    pub pack_label_small: TextStyle,
    pub unit_price_small: TextStyle,
    pub meta_font_family: String,
    /// Right (price) column width for standard/wide labels; narrow labels
    /// derive the split from the retail proportion table instead.
    pub right_column_width_mm: f64,
    pub right_top_height_mm: f64,
    pub right_middle_height_mm: f64,
    pub right_bottom_height_mm: f64,
    pub border_thickness_mm: f64,
    pub show_separator_between_packs: bool,
    pub show_bottom_separator: bool,
    pub crop_marks_enabled: bool,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            product_name: TextStyle::new("Arial", 14.0, true, TextAlign::Left),
            product_name_min_pt: 8.0,
            variant_text: TextStyle::new("Arial", 9.0, false, TextAlign::Left),
            price_big: TextStyle::new("Arial", 12.0, true, TextAlign::Right),
            pack_label_small: TextStyle::new("Arial", 7.0, false, TextAlign::Left),
            unit_price_small: TextStyle::new("Arial", 7.0, false, TextAlign::Left),
            meta_font_family: "Arial".to_string(),
            right_column_width_mm: 58.0,
            right_top_height_mm: 12.0,
            right_middle_height_mm: 13.0,
            right_bottom_height_mm: 13.0,
            border_thickness_mm: 0.25,
            show_separator_between_packs: true,
            show_bottom_separator: true,
            crop_marks_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_normalization_clamps_calibration() {
        let t = LabelTemplate {
            offset_x_mm: 9.0,
            offset_y_mm: -9.0,
            scale_x: 1.5,
            scale_y: 0.2,
            ..LabelTemplate::default()
        }
        .normalized();
        assert_eq!(t.offset_x_mm, 5.0);
        assert_eq!(t.offset_y_mm, -5.0);
        assert_eq!(t.scale_x, TEMPLATE_SCALE_MAX);
        assert_eq!(t.scale_y, TEMPLATE_SCALE_MIN);
    }

    #[test]
    fn sheet_normalization_falls_back_to_a4() {
        let s = SheetSettings {
            sheet_width_mm: 0.0,
            sheet_height_mm: -3.0,
            margin_mm: 99.0,
            gap_mm: 50.0,
            scale_x: 2.0,
            offset_y_mm: -20.0,
            ..SheetSettings::default()
        }
        .normalized();
        assert_eq!(s.sheet_width_mm, 210.0);
        assert_eq!(s.sheet_height_mm, 297.0);
        assert_eq!(s.margin_mm, SHEET_MARGIN_MAX_MM);
        assert_eq!(s.gap_mm, SHEET_GAP_MAX_MM);
        assert_eq!(s.scale_x, SHEET_SCALE_MAX);
        assert_eq!(s.offset_y_mm, -CALIBRATION_OFFSET_MAX_MM);
    }

    #[test]
    fn unit_price_prefers_override_then_large_pack() {
        let mut content = LabelContent {
            small_pack: PackRow {
                label: "2 kg".to_string(),
                weight_kg: Some(2.0),
                price: Some(10.0),
            },
            large_pack: PackRow {
                label: "10 kg".to_string(),
                weight_kg: Some(10.0),
                price: Some(40.0),
            },
            ..LabelContent::default()
        };
        assert_eq!(content.unit_price_per_kg(), Some(4.0));
        content.unit_price_override = Some(3.5);
        assert_eq!(content.unit_price_per_kg(), Some(3.5));
        content.unit_price_override = None;
        content.large_pack.weight_kg = None;
        assert_eq!(content.unit_price_per_kg(), Some(5.0));
    }

    #[test]
    fn meta_requires_both_flag_and_value() {
        let mut content = LabelContent {
            ean: Some("4006381333931".to_string()),
            ..LabelContent::default()
        };
        assert!(!content.has_meta());
        content.show_ean = true;
        assert!(content.has_meta());
        content.ean = Some("   ".to_string());
        assert!(!content.has_meta());
    }

    #[test]
    fn barcode_needs_enable_flag_and_valid_value() {
        let mut content = LabelContent {
            barcode_value: Some("4006381333931".to_string()),
            ..LabelContent::default()
        };
        assert!(!content.has_barcode());
        content.barcode_enabled = true;
        assert!(content.has_barcode());
        content.barcode_value = Some("not-a-number".to_string());
        assert!(!content.has_barcode());
    }
}

//! Width-bucket classification and the retail proportion tables.
//!
//! Label width decides which proportion table governs the column split, the
//! inter-column gap, and barcode sizing. Every resolved value is clamped to a
//! band so no template dimensions can produce an unreadable layout. The
//! ratios are field-tuned for shelf stock; do not re-derive them.

use serde::{Deserialize, Serialize};

use crate::units::clamp_f64;

/// Narrow/standard boundary (mm); widths below are narrow.
pub const NARROW_THRESHOLD_MM: f64 = 90.0;
/// Standard/wide boundary (mm); widths at or above are wide.
pub const WIDE_THRESHOLD_MM: f64 = 110.0;

/// Label width bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidthClass {
    Narrow,
    Standard,
    Wide,
}

/// Classify a label width into its layout bucket.
pub fn classify_width(width_mm: f64) -> WidthClass {
    if width_mm < NARROW_THRESHOLD_MM {
        WidthClass::Narrow
    } else if width_mm >= WIDE_THRESHOLD_MM {
        WidthClass::Wide
    } else {
        WidthClass::Standard
    }
}

/// Proportion table for one width bucket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetailProportions {
    /// Left (text) column share of label width, with its permitted band.
    pub left_ratio: f64,
    pub left_ratio_min: f64,
    pub left_ratio_max: f64,
    /// Inter-column gap share of label width, with its mm band.
    pub gap_ratio: f64,
    pub gap_min_mm: f64,
    pub gap_max_mm: f64,
    /// Barcode width share of label width, with its mm band.
    pub barcode_width_ratio: f64,
    pub barcode_width_min_mm: f64,
    pub barcode_width_max_mm: f64,
    /// Barcode height share of label height, with its mm band.
    pub barcode_height_ratio: f64,
    pub barcode_height_min_mm: f64,
    pub barcode_height_max_mm: f64,
    /// Human-readable barcode digits size (pt).
    pub barcode_text_pt: f64,
    /// Metadata row size (pt) in this bucket.
    pub meta_pt: f64,
}

const WIDE: RetailProportions = RetailProportions {
    left_ratio: 0.58,
    left_ratio_min: 0.55,
    left_ratio_max: 0.62,
    gap_ratio: 0.015,
    gap_min_mm: 1.5,
    gap_max_mm: 2.5,
    barcode_width_ratio: 0.85,
    barcode_width_min_mm: 55.0,
    barcode_width_max_mm: 75.0,
    barcode_height_ratio: 0.32,
    barcode_height_min_mm: 10.0,
    barcode_height_max_mm: 13.0,
    barcode_text_pt: 6.5,
    meta_pt: 5.7,
};

// Narrow stock gives the text column a larger share; the band is symmetric
// around the tuned ratio.
const NARROW: RetailProportions = RetailProportions {
    left_ratio: 0.62,
    left_ratio_min: 0.58,
    left_ratio_max: 0.66,
    gap_ratio: 0.015,
    gap_min_mm: 1.5,
    gap_max_mm: 2.5,
    barcode_width_ratio: 0.55,
    barcode_width_min_mm: 34.0,
    barcode_width_max_mm: 48.0,
    barcode_height_ratio: 0.28,
    barcode_height_min_mm: 9.0,
    barcode_height_max_mm: 12.0,
    barcode_text_pt: 6.5,
    meta_pt: 5.7,
};

impl WidthClass {
    /// Proportion table for this bucket. Standard stock shares the wide
    /// table; only narrow stock needs its own ratios.
    pub fn proportions(&self) -> &'static RetailProportions {
        match self {
            WidthClass::Narrow => &NARROW,
            WidthClass::Standard | WidthClass::Wide => &WIDE,
        }
    }
}

impl RetailProportions {
    /// Left column width for a label of `label_width_mm`, clamped to the
    /// ratio band.
    pub fn left_column_mm(&self, label_width_mm: f64) -> f64 {
        clamp_f64(
            label_width_mm * self.left_ratio,
            label_width_mm * self.left_ratio_min,
            label_width_mm * self.left_ratio_max,
        )
    }

    /// Inter-column gap for a label of `label_width_mm`.
    pub fn gap_mm(&self, label_width_mm: f64) -> f64 {
        clamp_f64(
            label_width_mm * self.gap_ratio,
            self.gap_min_mm,
            self.gap_max_mm,
        )
    }

    /// Barcode image size (width, height) for a label of the given size.
    pub fn barcode_size_mm(&self, label_width_mm: f64, label_height_mm: f64) -> (f64, f64) {
        let width = clamp_f64(
            label_width_mm * self.barcode_width_ratio,
            self.barcode_width_min_mm,
            self.barcode_width_max_mm,
        );
        let height = clamp_f64(
            label_height_mm * self.barcode_height_ratio,
            self.barcode_height_min_mm,
            self.barcode_height_max_mm,
        );
        (width, height)
    }
}

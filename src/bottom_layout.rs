//! Bottom-area space solver: how much of a label's height goes to the
//! barcode block and the metadata row.
//!
//! All proportions and floors here are field-tuned legibility constants.
//! Changing them changes whether printed barcodes scan and whether the meta
//! row stays readable, so they are named rather than derived.

use serde::{Deserialize, Serialize};

use crate::units::clamp_f64;

/// Minimum height (mm) the main content block (title + prices) must keep.
pub const MIN_MAIN_CONTENT_MM: f64 = 10.0;
/// Barcode bar height band (mm).
pub const BARCODE_HEIGHT_MIN_MM: f64 = 10.0;
pub const BARCODE_HEIGHT_MAX_MM: f64 = 18.0;
/// Barcode bar height as a proportion of label height.
pub const BARCODE_HEIGHT_RATIO: f64 = 0.35;
/// Gap under the bars for the human-readable digits (mm).
pub const BARCODE_TEXT_GAP_MM: f64 = 2.0;
/// Metadata row height band (mm).
pub const META_AREA_MIN_MM: f64 = 5.0;
pub const META_AREA_MAX_MM: f64 = 8.0;
/// Metadata row height as a proportion of label height.
pub const META_AREA_RATIO: f64 = 0.18;
/// Quiet zone band left/right of the bars (mm). Scanners need this clear.
pub const QUIET_ZONE_MIN_MM: f64 = 2.0;
pub const QUIET_ZONE_MAX_MM: f64 = 4.0;
/// Quiet zone as a proportion of label width.
pub const QUIET_ZONE_RATIO: f64 = 0.02;
/// Metadata row font size (pt). Small but readable.
pub const META_FONT_PT: f64 = 6.0;
/// Metadata line advance (mm); the row holds up to two lines.
pub const META_LINE_HEIGHT_MM: f64 = 3.5;

/// Solved vertical split of one label. Pure function output, recomputed per
/// render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BottomLayout {
    pub main_content_mm: f64,
    pub barcode_area_mm: f64,
    pub meta_area_mm: f64,
    pub show_barcode: bool,
    pub show_meta: bool,
    pub barcode_height_mm: f64,
    pub quiet_zone_mm: f64,
}

/// Barcode bar height for a label of the given size.
pub fn barcode_height_mm(height_mm: f64) -> f64 {
    clamp_f64(
        height_mm * BARCODE_HEIGHT_RATIO,
        BARCODE_HEIGHT_MIN_MM,
        BARCODE_HEIGHT_MAX_MM,
    )
}

/// Total barcode block height: bars plus the human-readable text gap.
pub fn barcode_area_mm(height_mm: f64) -> f64 {
    barcode_height_mm(height_mm) + BARCODE_TEXT_GAP_MM
}

/// Metadata row height for a label of the given size.
pub fn meta_area_mm(height_mm: f64) -> f64 {
    clamp_f64(
        height_mm * META_AREA_RATIO,
        META_AREA_MIN_MM,
        META_AREA_MAX_MM,
    )
}

/// Quiet zone width for a label of the given size.
pub fn quiet_zone_mm(width_mm: f64) -> f64 {
    clamp_f64(
        width_mm * QUIET_ZONE_RATIO,
        QUIET_ZONE_MIN_MM,
        QUIET_ZONE_MAX_MM,
    )
}

/// Solve the bottom-area split for one label.
///
/// Degradation priority is main content > barcode > meta:
/// 1. Both blocks at their proportional size, if the main floor holds.
/// 2. Drop meta.
/// 3. Shrink the barcode block toward its 12 mm minimum.
/// 4. Drop the barcode entirely.
pub fn compute(
    width_mm: f64,
    height_mm: f64,
    padding_mm: f64,
    has_barcode: bool,
    has_meta: bool,
) -> BottomLayout {
    let available = (height_mm - padding_mm * 2.0).max(0.0);
    let quiet_zone = quiet_zone_mm(width_mm);

    let mut barcode_area = if has_barcode {
        barcode_area_mm(height_mm)
    } else {
        0.0
    };
    let meta_area = if has_meta { meta_area_mm(height_mm) } else { 0.0 };

    let main = available - barcode_area - meta_area;
    if main >= MIN_MAIN_CONTENT_MM {
        return BottomLayout {
            main_content_mm: main,
            barcode_area_mm: barcode_area,
            meta_area_mm: meta_area,
            show_barcode: has_barcode,
            show_meta: has_meta,
            barcode_height_mm: if has_barcode {
                barcode_height_mm(height_mm)
            } else {
                0.0
            },
            quiet_zone_mm: quiet_zone,
        };
    }

    // Tight. Meta goes first.
    let main = available - barcode_area;
    if main >= MIN_MAIN_CONTENT_MM {
        return BottomLayout {
            main_content_mm: main,
            barcode_area_mm: barcode_area,
            meta_area_mm: 0.0,
            show_barcode: has_barcode,
            show_meta: false,
            barcode_height_mm: if has_barcode {
                barcode_height_mm(height_mm)
            } else {
                0.0
            },
            quiet_zone_mm: quiet_zone,
        };
    }

    // Still tight. Shrink the barcode block, but never below the scannable
    // minimum; drop it if even that starves the main content.
    let min_barcode_area = if has_barcode {
        BARCODE_HEIGHT_MIN_MM + BARCODE_TEXT_GAP_MM
    } else {
        0.0
    };
    barcode_area = barcode_area.min((available - MIN_MAIN_CONTENT_MM).max(0.0));
    if has_barcode && barcode_area < min_barcode_area {
        barcode_area = min_barcode_area;
    }
    let mut main = available - barcode_area;
    if main < MIN_MAIN_CONTENT_MM && has_barcode {
        barcode_area = 0.0;
        main = available;
    }

    let bar_height = if barcode_area > 0.0 {
        (barcode_area - BARCODE_TEXT_GAP_MM).max(BARCODE_HEIGHT_MIN_MM)
    } else {
        0.0
    };
    BottomLayout {
        main_content_mm: main,
        barcode_area_mm: barcode_area,
        meta_area_mm: 0.0,
        show_barcode: barcode_area > 0.0,
        show_meta: false,
        barcode_height_mm: bar_height,
        quiet_zone_mm: quiet_zone,
    }
}

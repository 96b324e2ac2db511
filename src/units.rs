//! Millimeter-first units and shared geometry helpers.
//!
//! Every layout computation in this crate works in floating-point millimeters.
//! Conversions to typographic points or device units happen only at the edges,
//! when a drawing backend asks for them.

use serde::{Deserialize, Serialize};

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Typographic points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Convert millimeters to typographic points.
pub fn mm_to_pt(mm: f64) -> f64 {
    mm / MM_PER_INCH * POINTS_PER_INCH
}

/// Convert typographic points to millimeters.
pub fn pt_to_mm(pt: f64) -> f64 {
    pt / POINTS_PER_INCH * MM_PER_INCH
}

/// Convert millimeters to device units at the given resolution.
pub fn mm_to_device(mm: f64, dpi: f64) -> f64 {
    mm / MM_PER_INCH * dpi
}

/// Convert device units at the given resolution back to millimeters.
pub fn device_to_mm(units: f64, dpi: f64) -> f64 {
    units / dpi * MM_PER_INCH
}

/// Clamp `value` into `[min, max]`.
///
/// Used for every bounded setting in the crate (calibration scale/offset,
/// margins, legibility bands). `min > max` collapses to `max`.
pub fn clamp_f64(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Axis-aligned rectangle in millimeters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RectMm {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectMm {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Shrink the rectangle by `by` on all four sides. Degenerate insets
    /// collapse to a zero-size rectangle at the center.
    pub fn inset(&self, by: f64) -> Self {
        Self::new(
            self.x + by,
            self.y + by,
            self.width - 2.0 * by,
            self.height - 2.0 * by,
        )
    }

    /// Whether `other` lies fully inside `self`, allowing `tolerance_mm`
    /// of overhang on each edge.
    pub fn contains_rect(&self, other: &RectMm, tolerance_mm: f64) -> bool {
        other.x >= self.x - tolerance_mm
            && other.y >= self.y - tolerance_mm
            && other.right() <= self.right() + tolerance_mm
            && other.bottom() <= self.bottom() + tolerance_mm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_orders_bounds() {
        assert_eq!(clamp_f64(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_f64(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_f64(11.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn mm_pt_round_trip() {
        let mm = 38.0;
        assert!((pt_to_mm(mm_to_pt(mm)) - mm).abs() < 1e-9);
    }

    #[test]
    fn mm_device_round_trip() {
        // A4 width at common printer resolutions.
        for dpi in [96.0, 300.0, 600.0] {
            assert!((device_to_mm(mm_to_device(210.0, dpi), dpi) - 210.0).abs() < 1e-9);
        }
        assert_eq!(mm_to_device(25.4, 300.0), 300.0);
    }

    #[test]
    fn rect_never_negative() {
        let r = RectMm::new(0.0, 0.0, 10.0, 10.0).inset(6.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 0.0);
    }

    #[test]
    fn contains_rect_honors_tolerance() {
        let outer = RectMm::new(10.0, 10.0, 100.0, 100.0);
        let slightly_over = RectMm::new(10.0, 10.0, 100.3, 100.0);
        assert!(outer.contains_rect(&slightly_over, 0.5));
        assert!(!outer.contains_rect(&slightly_over, 0.1));
    }
}

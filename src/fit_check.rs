//! Pre-flight template fit validation.
//!
//! A template larger than the printable area can never be placed, so the
//! whole batch is rejected before any page exists. All offending templates
//! are reported together; partial prints are not allowed.

use core::fmt;

use crate::model::{LabelJob, SheetSettings};
use crate::packer::PACK_TOLERANCE_MM;

/// One template that cannot fit the printable area.
#[derive(Clone, Debug, PartialEq)]
pub struct FitViolation {
    pub template_id: u32,
    pub template_name: String,
    pub width_mm: f64,
    pub height_mm: f64,
    pub printable_width_mm: f64,
    pub printable_height_mm: f64,
}

impl fmt::Display for FitViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} x {} mm) > printable area ({} x {} mm)",
            self.template_name,
            self.width_mm,
            self.height_mm,
            self.printable_width_mm,
            self.printable_height_mm
        )
    }
}

/// Batch-fatal aggregate of every fit violation in a job set.
#[derive(Clone, Debug, PartialEq)]
pub struct FitError {
    pub violations: Vec<FitViolation>,
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} template(s) exceed the printable area: ",
            self.violations.len()
        )?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FitError {}

/// Check every distinct template referenced by `jobs` against the printable
/// area. Templates are deduplicated by id, keeping the first occurrence, so
/// each offender is reported at most once.
///
/// Empty result = the batch may be packed.
pub fn validate_fit(jobs: &[LabelJob], settings: &SheetSettings) -> Vec<FitViolation> {
    let s = settings.normalized();
    let printable_w = s.printable_width_mm();
    let printable_h = s.printable_height_mm();

    let mut seen_ids: Vec<u32> = Vec::new();
    let mut violations = Vec::new();
    for job in jobs {
        let t = job.template.normalized();
        if seen_ids.contains(&t.id) {
            continue;
        }
        seen_ids.push(t.id);
        if t.width_mm > printable_w + PACK_TOLERANCE_MM
            || t.height_mm > printable_h + PACK_TOLERANCE_MM
        {
            violations.push(FitViolation {
                template_id: t.id,
                template_name: t.name.clone(),
                width_mm: t.width_mm,
                height_mm: t.height_mm,
                printable_width_mm: printable_w,
                printable_height_mm: printable_h,
            });
        }
    }
    log::debug!(
        "fit check: {} distinct template(s), {} violation(s)",
        seen_ids.len(),
        violations.len()
    );
    violations
}

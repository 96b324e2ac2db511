//! Deterministic shelf packer.
//!
//! Jobs expand into copy instances in queue order and flow left-to-right,
//! top-to-bottom across the printable area: each row is as tall as its
//! tallest label, rows that overflow wrap, pages that overflow break.
//! Single pass, no backtracking, so identical input always produces
//! identical placement — required for reproducible previews and reprints.

use crate::fit_check::{validate_fit, FitError};
use crate::model::{LabelJob, PackedPage, PlacedItem, SheetSettings};

/// Slack (mm) absorbed at row/page boundaries so floating-point accumulation
/// across a row never wraps an item that physically fits.
pub const PACK_TOLERANCE_MM: f64 = 0.5;

/// Outcome counters for one packing run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackReport {
    /// Instances placed onto pages.
    pub placed: usize,
    /// Instances skipped by the escape path (template could not fit even at
    /// a fresh page origin). Non-zero only when packing unvalidated jobs.
    pub skipped: usize,
    /// Queue-order indices (over expanded instances) of skipped instances.
    pub skipped_instances: Vec<usize>,
}

/// Pack `jobs` onto sheets. Convenience wrapper over [`pack_with_report`]
/// that discards the counters.
pub fn pack(jobs: &[LabelJob], settings: &SheetSettings) -> Vec<PackedPage> {
    pack_with_report(jobs, settings).0
}

/// Validate template fit, then pack. Any violation aborts the whole batch
/// before a single page is produced.
pub fn pack_checked(
    jobs: &[LabelJob],
    settings: &SheetSettings,
) -> Result<Vec<PackedPage>, FitError> {
    let violations = validate_fit(jobs, settings);
    if !violations.is_empty() {
        return Err(FitError { violations });
    }
    Ok(pack(jobs, settings))
}

/// Pack `jobs` onto sheets and report placement/skip counts.
///
/// The skip escape exists as a fail-safe for callers that bypass
/// [`pack_checked`]: an instance that does not fit even at a fresh page
/// origin is dropped with a warning instead of looping forever. Validated
/// batches never hit it.
pub fn pack_with_report(
    jobs: &[LabelJob],
    settings: &SheetSettings,
) -> (Vec<PackedPage>, PackReport) {
    let s = settings.normalized();
    let margin = s.margin_mm;
    let gap = s.gap_mm;
    let printable_right = s.sheet_width_mm - margin;
    let printable_bottom = s.sheet_height_mm - margin;

    let mut pages: Vec<PackedPage> = Vec::new();
    let mut current: Vec<PlacedItem> = Vec::new();
    let mut page_index = 0usize;
    let mut x = margin;
    let mut y = margin;
    let mut row_height = 0.0f64;
    let mut report = PackReport::default();
    let mut instance_index = 0usize;

    for job in jobs {
        let template = job.template.normalized();
        let width = template.width_mm;
        let height = template.height_mm;

        for _ in 0..job.effective_copies() {
            // Row break: the item overflows the right edge and the row is
            // not empty.
            if x + width > printable_right + PACK_TOLERANCE_MM && x > margin {
                x = margin;
                y += row_height + gap;
                row_height = 0.0;
            }

            // Page break: the fresh row overflows the bottom edge and the
            // page is not empty.
            if y + height > printable_bottom + PACK_TOLERANCE_MM && y > margin {
                pages.push(PackedPage {
                    index: page_index,
                    items: std::mem::take(&mut current),
                });
                page_index += 1;
                x = margin;
                y = margin;
                row_height = 0.0;
            }

            // Escape: does not fit even at a fresh origin. The fit validator
            // is expected to have rejected such templates already.
            if x + width > printable_right + PACK_TOLERANCE_MM
                || y + height > printable_bottom + PACK_TOLERANCE_MM
            {
                log::warn!(
                    "skipping label instance {} ('{}', {} x {} mm): template does not fit the printable area",
                    instance_index,
                    template.name,
                    width,
                    height
                );
                report.skipped += 1;
                report.skipped_instances.push(instance_index);
                instance_index += 1;
                continue;
            }

            current.push(PlacedItem {
                x_mm: x,
                y_mm: y,
                content: job.content.clone(),
                template: template.clone(),
            });
            report.placed += 1;
            instance_index += 1;
            x += width + gap;
            row_height = row_height.max(height);
        }
    }

    if !current.is_empty() {
        pages.push(PackedPage {
            index: page_index,
            items: current,
        });
    }

    log::debug!(
        "packed {} instance(s) onto {} page(s), {} skipped",
        report.placed,
        pages.len(),
        report.skipped
    );
    (pages, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LabelContent, LabelTemplate};

    fn job(width_mm: f64, height_mm: f64, copies: u32) -> LabelJob {
        LabelJob::new(
            LabelContent::default(),
            LabelTemplate {
                id: (width_mm * 10.0) as u32,
                name: format!("{width_mm}x{height_mm}"),
                width_mm,
                height_mm,
                ..LabelTemplate::default()
            },
            copies,
        )
    }

    #[test]
    fn single_label_lands_at_margin_origin() {
        let pages = pack(&[job(150.0, 38.0, 1)], &SheetSettings::default());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].index, 0);
        assert_eq!(pages[0].items.len(), 1);
        assert_eq!(pages[0].items[0].x_mm, 8.0);
        assert_eq!(pages[0].items[0].y_mm, 8.0);
    }

    #[test]
    fn zero_copies_still_prints_one() {
        let pages = pack(&[job(150.0, 38.0, 0)], &SheetSettings::default());
        assert_eq!(pages[0].items.len(), 1);
    }

    #[test]
    fn empty_queue_produces_no_pages() {
        let pages = pack(&[], &SheetSettings::default());
        assert!(pages.is_empty());
    }

    #[test]
    fn rows_wrap_at_printable_right() {
        // Printable width 194; two 150 mm labels cannot share a row.
        let pages = pack(&[job(150.0, 38.0, 2)], &SheetSettings::default());
        assert_eq!(pages.len(), 1);
        let items = &pages[0].items;
        assert_eq!(items[0].y_mm, 8.0);
        assert_eq!(items[1].x_mm, 8.0);
        assert_eq!(items[1].y_mm, 8.0 + 38.0 + 2.0);
    }

    #[test]
    fn narrow_labels_share_a_row() {
        // 60+2+60+2+60 = 184 <= 194.
        let pages = pack(&[job(60.0, 30.0, 3)], &SheetSettings::default());
        let items = &pages[0].items;
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.y_mm == 8.0));
        assert_eq!(items[1].x_mm, 8.0 + 60.0 + 2.0);
        assert_eq!(items[2].x_mm, 8.0 + 2.0 * 62.0);
    }

    #[test]
    fn row_height_follows_tallest_item() {
        let jobs = [job(60.0, 30.0, 1), job(60.0, 50.0, 1), job(150.0, 38.0, 1)];
        let pages = pack(&jobs, &SheetSettings::default());
        let items = &pages[0].items;
        // Third label wraps; the new row starts below the 50 mm item.
        assert_eq!(items[2].x_mm, 8.0);
        assert_eq!(items[2].y_mm, 8.0 + 50.0 + 2.0);
    }

    #[test]
    fn pages_break_when_rows_run_out() {
        // 38 mm rows + 2 mm gap: 7 rows fit in 281 mm (7*38+6*2 = 278).
        let pages = pack(&[job(150.0, 38.0, 8)], &SheetSettings::default());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].index, 0);
        assert_eq!(pages[0].items.len(), 7);
        assert_eq!(pages[1].index, 1);
        assert_eq!(pages[1].items.len(), 1);
        assert_eq!(pages[1].items[0].x_mm, 8.0);
        assert_eq!(pages[1].items[0].y_mm, 8.0);
    }

    #[test]
    fn oversize_instance_is_skipped_and_reported() {
        let jobs = [job(300.0, 38.0, 2), job(150.0, 38.0, 1)];
        let (pages, report) = pack_with_report(&jobs, &SheetSettings::default());
        assert_eq!(report.skipped, 2);
        assert_eq!(report.skipped_instances, vec![0, 1]);
        assert_eq!(report.placed, 1);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].items[0].x_mm, 8.0);
    }

    #[test]
    fn pack_checked_rejects_oversize_batches_wholesale() {
        let jobs = [job(150.0, 38.0, 1), job(300.0, 38.0, 1)];
        let err = match pack_checked(&jobs, &SheetSettings::default()) {
            Err(err) => err,
            Ok(_) => panic!("expected fit error"),
        };
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].width_mm, 300.0);
    }

    #[test]
    fn pack_checked_passes_clean_batches() {
        let jobs = [job(150.0, 38.0, 3)];
        let pages = match pack_checked(&jobs, &SheetSettings::default()) {
            Ok(pages) => pages,
            Err(err) => panic!("unexpected fit error: {err}"),
        };
        assert_eq!(pages[0].items.len(), 3);
    }

    #[test]
    fn packing_is_deterministic() {
        let jobs = [job(60.0, 30.0, 5), job(150.0, 38.0, 3), job(98.0, 40.0, 2)];
        let first = pack(&jobs, &SheetSettings::default());
        let second = pack(&jobs, &SheetSettings::default());
        assert_eq!(first, second);
    }

    #[test]
    fn mixed_templates_preserve_queue_order() {
        let jobs = [job(60.0, 30.0, 2), job(150.0, 38.0, 1)];
        let pages = pack(&jobs, &SheetSettings::default());
        let names: Vec<&str> = pages[0]
            .items
            .iter()
            .map(|i| i.template.name.as_str())
            .collect();
        assert_eq!(names, vec!["60x30", "60x30", "150x38"]);
    }
}

//! Deterministic sheet layout and calibration engine for retail shelf labels.
//!
//! The crate is a pure layout core: callers hand it label content, templates,
//! and sheet/style settings, and get back packed pages of backend-agnostic
//! [`DrawCommand`]s plus a calibration [`Transform2d`] to apply when drawing.
//! It performs no I/O and holds no state; identical input always produces
//! identical output.
//!
//! Typical flow: validate with [`validate_fit`], pack with [`pack`] (or
//! [`pack_checked`]), then compose each page with [`compose_page`]. Single
//! labels on cut stock go through [`compose_single`] instead, and
//! [`test_pattern`] produces the page used to measure printer drift.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

pub mod barcode;
pub mod bottom_layout;
mod calibration;
mod compositor;
mod fit_check;
pub mod format;
mod ir;
mod model;
mod packer;
pub mod retail;
mod text_fit;
pub mod units;

pub use calibration::{test_pattern, Transform2d};
pub use compositor::{
    compose_label, compose_page, compose_single, label_regions, LabelRegions, PageRender,
};
pub use fit_check::{validate_fit, FitError, FitViolation};
pub use ir::{BarcodeCommand, DrawCommand, LineCommand, RectCommand, TextCommand};
pub use model::{
    LabelContent, LabelJob, LabelTemplate, PackRow, PackedPage, PlacedItem, SheetSettings,
    StyleSettings, TextAlign, TextStyle,
};
pub use packer::{pack, pack_checked, pack_with_report, PackReport, PACK_TOLERANCE_MM};
pub use text_fit::{
    fit_title, truncate_line, FontSpec, HeuristicMeasurer, TextMeasurer, TitleFit,
};

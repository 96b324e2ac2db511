//! Barcode value validation and normalization.
//!
//! Validation never fails the surrounding label: an invalid or missing value
//! simply suppresses the barcode block. Encoding to bars is the drawing
//! backend's job; this module only decides whether a value is encodable.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Supported barcode symbologies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarcodeFormat {
    /// EAN-13 (also accepts 12-digit input; the check digit is the encoder's
    /// concern).
    #[default]
    Ean13,
    /// Code 128, free-form text.
    Code128,
}

impl BarcodeFormat {
    /// Parse a format tag case-insensitively. Unknown tags fall back to
    /// EAN-13, the retail default.
    pub fn parse(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("CODE128") {
            Self::Code128
        } else {
            Self::Ean13
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ean13 => "EAN13",
            Self::Code128 => "CODE128",
        }
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BarcodeFormat {
    type Err = std::convert::Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(tag))
    }
}

/// Validate a raw barcode value for `format`.
///
/// Returns `(is_valid, message)`. An empty value is invalid but carries no
/// message: it is the ordinary "no barcode" case, not an input error.
///
/// EAN-13: digits only (embedded whitespace tolerated), 12 or 13 digits.
/// Code 128: any non-empty value after trimming.
pub fn validate(value: &str, format: BarcodeFormat) -> (bool, Option<String>) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return (false, None);
    }

    match format {
        BarcodeFormat::Code128 => (true, None),
        BarcodeFormat::Ean13 => {
            let digit_count = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
            let has_non_digit = trimmed
                .chars()
                .any(|c| !c.is_ascii_digit() && !c.is_whitespace());
            if has_non_digit || (digit_count != 12 && digit_count != 13) {
                (false, Some("invalid EAN-13 value".to_string()))
            } else {
                (true, None)
            }
        }
    }
}

/// Normalize a value for encoding: EAN-13 keeps digits only, Code 128 trims.
pub fn normalize(value: &str, format: BarcodeFormat) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match format {
        BarcodeFormat::Code128 => trimmed.to_string(),
        BarcodeFormat::Ean13 => trimmed.chars().filter(|c| c.is_ascii_digit()).collect(),
    }
}

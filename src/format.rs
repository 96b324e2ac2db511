//! Retail price and date formatting for the euro locale used on the labels:
//! decimal comma, trailing `€`, `dd.MM.yyyy` expiry dates.

/// Format a price as `"12,34 €"`. `None` renders as empty.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(value) => format!("{:.2} €", value).replace('.', ","),
        None => String::new(),
    }
}

/// Format a per-kg unit price as `"1 kg = 7,90 €"`. `None` renders as empty.
pub fn format_unit_price(price_per_kg: Option<f64>) -> String {
    match price_per_kg {
        Some(value) => format!("1 kg = {}", format_price(Some(value))),
        None => String::new(),
    }
}

/// Reformat an ISO `YYYY-MM-DD` date (a leading date-time prefix is accepted)
/// as `dd.MM.yyyy`. Anything unparseable passes through unchanged so a
/// hand-typed expiry note still prints.
pub fn format_expiry(iso: &str) -> String {
    let trimmed = iso.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    let mut parts = date_part.splitn(3, '-');
    let (year, month, day) = match (parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d)) => (y, m, d),
        _ => return trimmed.to_string(),
    };
    let valid = year.len() == 4
        && (1..=2).contains(&month.len())
        && (1..=2).contains(&day.len())
        && year.chars().all(|c| c.is_ascii_digit())
        && month.chars().all(|c| c.is_ascii_digit())
        && day.chars().all(|c| c.is_ascii_digit());
    if !valid {
        return trimmed.to_string();
    }
    format!("{day:0>2}.{month:0>2}.{year}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_uses_decimal_comma_and_euro_suffix() {
        assert_eq!(format_price(Some(12.34)), "12,34 €");
        assert_eq!(format_price(Some(5.0)), "5,00 €");
        assert_eq!(format_price(Some(7.899)), "7,90 €");
        assert_eq!(format_price(None), "");
    }

    #[test]
    fn unit_price_has_per_kg_prefix() {
        assert_eq!(format_unit_price(Some(3.5)), "1 kg = 3,50 €");
        assert_eq!(format_unit_price(None), "");
    }

    #[test]
    fn expiry_reformats_iso_dates() {
        assert_eq!(format_expiry("2025-03-31"), "31.03.2025");
        assert_eq!(format_expiry("2025-3-1"), "01.03.2025");
        assert_eq!(format_expiry("2025-03-31T00:00:00"), "31.03.2025");
    }

    #[test]
    fn expiry_passes_freeform_text_through() {
        assert_eq!(format_expiry("after opening: 3 days"), "after opening: 3 days");
        assert_eq!(format_expiry("31.03.2025"), "31.03.2025");
        assert_eq!(format_expiry(""), "");
    }
}

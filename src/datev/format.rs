//! DATEV locale formatting for amounts, dates and text fields.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Maximum length of Belegfeld 1.
pub const DOCUMENT_NUMBER_MAX: usize = 36;

/// Maximum length of Buchungstext.
pub const POSTING_TEXT_MAX: usize = 60;

/// Format a Decimal as German number: comma separator, 2 decimal places,
/// no digit grouping.
pub fn format_amount(d: Decimal) -> String {
    let scaled = d.round_dp(2);
    let s = format!("{:.2}", scaled);
    s.replace('.', ",")
}

/// Belegdatum: `ddMM`.
pub fn document_date(d: NaiveDate) -> String {
    d.format("%d%m").to_string()
}

/// Due date in Belegfeld 2: `ddMMyy`.
pub fn due_date(d: NaiveDate) -> String {
    d.format("%d%m%y").to_string()
}

/// Header dates: `yyyyMMdd`.
pub fn compact_date(d: NaiveDate) -> String {
    d.format("%Y%m%d").to_string()
}

/// Truncate to at most `max` characters (not bytes).
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn format_amount_basic() {
        assert_eq!(format_amount(Decimal::new(12345, 1)), "1234,50");
        assert_eq!(format_amount(Decimal::new(2495, 2)), "24,95");
        assert_eq!(format_amount(Decimal::new(100, 0)), "100,00");
    }

    #[test]
    fn format_amount_zero_and_negative() {
        assert_eq!(format_amount(Decimal::ZERO), "0,00");
        assert_eq!(format_amount(Decimal::new(-125, 1)), "-12,50");
    }

    #[test]
    fn format_amount_rounds() {
        assert_eq!(format_amount(Decimal::new(123456, 3)), "123,46");
    }

    #[test]
    fn format_amount_has_no_grouping() {
        assert_eq!(format_amount(Decimal::new(123456789, 2)), "1234567,89");
    }

    #[test]
    fn date_formats() {
        let d = date(2024, 3, 5);
        assert_eq!(document_date(d), "0503");
        assert_eq!(due_date(d), "050324");
        assert_eq!(compact_date(d), "20240305");
    }

    #[test]
    fn truncate_short() {
        assert_eq!(truncate("abc", 5), "abc");
    }

    #[test]
    fn truncate_long() {
        assert_eq!(truncate("abcdef", 3), "abc");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Müller & Söhne", 4), "Müll");
        assert_eq!(truncate("Ä", 1), "Ä");
    }
}

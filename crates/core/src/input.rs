//! Parsing of free-text form input into typed field values.
//!
//! Every parser treats blank input as "no value" and reports anything it
//! cannot read as a [`CoreError`], leaving it to the caller to decide whether
//! to keep the previous value.

use chrono::NaiveDate;

use crate::error::CoreError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_percentage(text: &str) -> Result<Option<f64>, CoreError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let pct: f64 = text
        .parse()
        .map_err(|_| CoreError::InvalidPercentage(text.to_string()))?;
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(CoreError::InvalidPercentage(text.to_string()));
    }
    Ok(Some(pct))
}

pub fn parse_date(text: &str) -> Result<Option<NaiveDate>, CoreError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map(Some)
        .map_err(|_| CoreError::InvalidDate(text.to_string()))
}

pub fn parse_vintage(text: &str) -> Result<Option<i32>, CoreError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<i32>() {
        Ok(year) if year >= 0 => Ok(Some(year)),
        _ => Err(CoreError::InvalidNumber(text.to_string())),
    }
}

pub fn parse_price(text: &str) -> Result<Option<f64>, CoreError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(Some(price)),
        _ => Err(CoreError::InvalidNumber(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_no_value() {
        assert_eq!(parse_percentage("  ").unwrap(), None);
        assert_eq!(parse_date("").unwrap(), None);
        assert_eq!(parse_vintage("").unwrap(), None);
        assert_eq!(parse_price("").unwrap(), None);
    }

    #[test]
    fn percentage_bounds() {
        assert_eq!(parse_percentage("42.5").unwrap(), Some(42.5));
        assert_eq!(parse_percentage("100").unwrap(), Some(100.0));
        assert!(parse_percentage("100.1").is_err());
        assert!(parse_percentage("-1").is_err());
        assert!(parse_percentage("NaN").is_err());
        assert!(matches!(
            parse_percentage("half"),
            Err(CoreError::InvalidPercentage(s)) if s == "half"
        ));
    }

    #[test]
    fn dates_use_iso_format() {
        assert_eq!(parse_date("2024-02-29").unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("29/02/2024").is_err());
    }

    #[test]
    fn numbers_reject_negatives() {
        assert_eq!(parse_vintage("2015").unwrap(), Some(2015));
        assert!(parse_vintage("-2015").is_err());
        assert!(parse_vintage("MMXV").is_err());
        assert_eq!(parse_price("3800").unwrap(), Some(3800.0));
        assert!(parse_price("-5").is_err());
    }
}

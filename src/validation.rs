//! Field validators shared by the attendance and returns forms
//!
//! The `*_partial` predicates run on every keystroke and accept any legal
//! prefix of a value, so a field never holds text that could not become
//! valid. The `parse_*` functions are the hard gates applied when an entry
//! is added or a form is submitted.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::models::period::{MAX_YEAR, MIN_YEAR};
use crate::models::{Money, ReportingMonth};

/// Most digits allowed before the decimal point of an offerings amount
pub const MAX_OFFERING_DIGITS: usize = 9;

/// Most digits allowed in a members or guests count
pub const MAX_COUNT_DIGITS: usize = 6;

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Empty or up to three digits
pub fn sheet_number_partial(raw: &str) -> bool {
    raw.len() <= 3 && all_digits(raw)
}

/// Empty, or one or two digits whose value is a day of the month
pub fn day_partial(raw: &str) -> bool {
    if raw.is_empty() {
        return true;
    }
    if raw.len() > 2 || !all_digits(raw) {
        return false;
    }
    matches!(raw.parse::<u8>(), Ok(1..=31))
}

/// Empty or digits only (members, guests)
pub fn count_partial(raw: &str) -> bool {
    raw.len() <= MAX_COUNT_DIGITS && all_digits(raw)
}

/// Empty, or digits with at most one decimal point and two decimals
pub fn offerings_partial(raw: &str) -> bool {
    let (whole, frac) = raw.split_once('.').unwrap_or((raw, ""));
    whole.len() <= MAX_OFFERING_DIGITS && all_digits(whole) && all_digits(frac) && frac.len() <= 2
}

/// Empty, or one or two digits whose value is a calendar month
pub fn month_partial(raw: &str) -> bool {
    if raw.is_empty() {
        return true;
    }
    raw.len() <= 2 && all_digits(raw) && matches!(raw.parse::<u32>(), Ok(0..=12))
}

/// Empty or up to four digits
pub fn year_partial(raw: &str) -> bool {
    raw.len() <= 4 && all_digits(raw)
}

/// Sheet number must be exactly three digits
pub fn parse_sheet_number(raw: &str) -> Result<String, ValidationError> {
    let raw = raw.trim();
    if raw.len() == 3 && all_digits(raw) {
        Ok(raw.to_string())
    } else {
        Err(ValidationError::SheetNumber)
    }
}

/// Day is required and must lie in 1..=31
pub fn parse_day(raw: &str) -> Result<u8, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::DayRequired);
    }
    match raw.parse::<u8>() {
        Ok(day @ 1..=31) if day_partial(raw) => Ok(day),
        _ => Err(ValidationError::DayOutOfRange(raw.to_string())),
    }
}

/// A non-negative head count; blank counts as zero
pub fn parse_count(field: &'static str, raw: &str) -> Result<u32, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    if !all_digits(raw) {
        return Err(ValidationError::InvalidCount {
            field,
            value: raw.to_string(),
        });
    }
    if raw.len() > MAX_COUNT_DIGITS {
        return Err(ValidationError::CountTooLarge {
            field,
            value: raw.to_string(),
        });
    }
    raw.parse().map_err(|_| ValidationError::InvalidCount {
        field,
        value: raw.to_string(),
    })
}

/// Offerings amount; blank counts as zero
pub fn parse_offerings(raw: &str) -> Result<Money, ValidationError> {
    let raw = raw.trim();
    let whole = raw.split_once('.').map_or(raw, |(whole, _)| whole);
    if whole.len() > MAX_OFFERING_DIGITS && all_digits(whole) {
        return Err(ValidationError::OfferingsTooLarge(raw.to_string()));
    }
    if !offerings_partial(raw) {
        return Err(ValidationError::InvalidOfferings(raw.to_string()));
    }
    Money::parse(raw).map_err(|_| ValidationError::InvalidOfferings(raw.to_string()))
}

pub fn parse_month(raw: &str) -> Result<u32, ValidationError> {
    match raw.trim().parse::<u32>() {
        Ok(month @ 1..=12) => Ok(month),
        _ => Err(ValidationError::InvalidMonth(raw.trim().to_string())),
    }
}

pub fn parse_year(raw: &str) -> Result<i32, ValidationError> {
    match raw.trim().parse::<i32>() {
        Ok(year) if (MIN_YEAR..=MAX_YEAR).contains(&year) => Ok(year),
        _ => Err(ValidationError::InvalidYear(raw.trim().to_string())),
    }
}

/// Month and year fields combined
pub fn parse_reporting_month(month: &str, year: &str) -> Result<ReportingMonth, ValidationError> {
    ReportingMonth::new(parse_year(year)?, parse_month(month)?)
}

/// Trimmed value of a required text field
pub fn require_non_empty(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// A plausible email address: one `@`, a local part, and a dotted domain
pub fn parse_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim();
    let invalid = || ValidationError::InvalidEmail(email.to_string());

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(email.to_string())
}

/// Quantity of items returned, at least one
pub fn parse_quantity(raw: &str) -> Result<u32, ValidationError> {
    match raw.trim().parse::<u32>() {
        Ok(qty) if qty >= 1 => Ok(qty),
        _ => Err(ValidationError::InvalidQuantity(raw.trim().to_string())),
    }
}

/// ISO calendar date, `YYYY-MM-DD`
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(raw.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_number_partial() {
        assert!(sheet_number_partial(""));
        assert!(sheet_number_partial("0"));
        assert!(sheet_number_partial("001"));
        assert!(!sheet_number_partial("0012"));
        assert!(!sheet_number_partial("0a"));
    }

    #[test]
    fn test_day_partial() {
        assert!(day_partial(""));
        assert!(day_partial("1"));
        assert!(day_partial("31"));
        assert!(day_partial("09"));
        assert!(!day_partial("0"));
        assert!(!day_partial("32"));
        assert!(!day_partial("123"));
        assert!(!day_partial("1a"));
    }

    #[test]
    fn test_count_partial() {
        assert!(count_partial(""));
        assert!(count_partial("40"));
        assert!(!count_partial("-1"));
        assert!(!count_partial("4.0"));
    }

    #[test]
    fn test_offerings_partial() {
        assert!(offerings_partial(""));
        assert!(offerings_partial("120"));
        assert!(offerings_partial("120."));
        assert!(offerings_partial("120.5"));
        assert!(offerings_partial("120.50"));
        assert!(offerings_partial(".5"));
        assert!(!offerings_partial("120.505"));
        assert!(!offerings_partial("1.2.3"));
        assert!(!offerings_partial("12a"));
    }

    #[test]
    fn test_month_and_year_partial() {
        assert!(month_partial("0"));
        assert!(month_partial("12"));
        assert!(!month_partial("13"));
        assert!(year_partial("202"));
        assert!(!year_partial("20255"));
    }

    #[test]
    fn test_parse_sheet_number_requires_three_digits() {
        assert_eq!(parse_sheet_number("001").unwrap(), "001");
        for bad in ["", "1", "01", "0001", "abc"] {
            assert_eq!(parse_sheet_number(bad), Err(ValidationError::SheetNumber));
        }
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(parse_day("5").unwrap(), 5);
        assert_eq!(parse_day(""), Err(ValidationError::DayRequired));
        assert!(matches!(parse_day("0"), Err(ValidationError::DayOutOfRange(_))));
        assert!(matches!(parse_day("32"), Err(ValidationError::DayOutOfRange(_))));
    }

    #[test]
    fn test_parse_count_and_offerings_default_to_zero() {
        assert_eq!(parse_count("Members", "").unwrap(), 0);
        assert_eq!(parse_count("Guests", "12").unwrap(), 12);
        assert!(parse_count("Guests", "1.5").is_err());
        assert_eq!(parse_offerings("").unwrap(), Money::zero());
        assert_eq!(parse_offerings("120.50").unwrap(), Money::from_cents(12050));
        assert!(parse_offerings("1.999").is_err());
    }

    #[test]
    fn test_amounts_and_counts_are_bounded() {
        assert!(offerings_partial("999999999.99"));
        assert!(!offerings_partial("1000000000"));
        assert!(!offerings_partial("90000000000000000"));
        assert!(count_partial("999999"));
        assert!(!count_partial("1000000"));

        assert_eq!(
            parse_offerings("999999999.99").unwrap(),
            Money::from_cents(99_999_999_999)
        );
        assert_eq!(
            parse_offerings("1000000000.00"),
            Err(ValidationError::OfferingsTooLarge("1000000000.00".into()))
        );
        assert_eq!(
            parse_count("Members", "1234567"),
            Err(ValidationError::CountTooLarge {
                field: "Members",
                value: "1234567".into()
            })
        );
    }

    #[test]
    fn test_parse_reporting_month() {
        let month = parse_reporting_month("3", "2025").unwrap();
        assert_eq!(month.to_string(), "March 2025");
        assert!(parse_reporting_month("13", "2025").is_err());
        assert!(parse_reporting_month("3", "1999").is_err());
    }

    #[test]
    fn test_parse_email() {
        assert!(parse_email("customer@example.com").is_ok());
        assert!(parse_email(" a@b.co ").is_ok());
        for bad in ["", "plain", "@example.com", "a@b", "a@@b.com", "a b@c.com", "a@b..com"] {
            assert!(parse_email(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_parse_quantity_and_required() {
        assert_eq!(parse_quantity("2").unwrap(), 2);
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("").is_err());
        assert_eq!(
            require_non_empty("Full Name", "  "),
            Err(ValidationError::Required("Full Name"))
        );
        assert_eq!(require_non_empty("Full Name", " Jo ").unwrap(), "Jo");
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2025-02-28").is_ok());
        assert!(parse_date("2025-02-30").is_err());
    }
}

//! Calendar date parsing shared by pantry items and expiry prediction.

use chrono::NaiveDate;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date string that is not `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{input}` is not a YYYY-MM-DD date")]
pub struct CalendarDateError {
    input: String,
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use pantry_backend::domain::parse_calendar_date;
///
/// assert_eq!(
///     parse_calendar_date("2024-05-20").unwrap(),
///     NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
/// );
/// assert!(parse_calendar_date("20/05/2024").is_err());
/// ```
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, CalendarDateError> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| CalendarDateError {
        input: input.to_owned(),
    })
}

/// Render a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2024-02-29", 2024, 2, 29)]
    #[case("1999-12-31", 1999, 12, 31)]
    fn parses_valid_dates(#[case] raw: &str, #[case] y: i32, #[case] m: u32, #[case] d: u32) {
        let parsed = parse_calendar_date(raw).expect("valid date");
        assert_eq!(Some(parsed), NaiveDate::from_ymd_opt(y, m, d));
    }

    #[rstest]
    #[case("")]
    #[case("2023-02-29")]
    #[case("2024/05/20")]
    #[case("20-05-2024")]
    #[case("2024-05-20T00:00:00")]
    #[case("yesterday")]
    fn rejects_malformed_dates(#[case] raw: &str) {
        assert!(parse_calendar_date(raw).is_err());
    }

    #[rstest]
    fn formats_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).expect("valid date");
        assert_eq!(format_calendar_date(date), "2024-05-03");
    }
}

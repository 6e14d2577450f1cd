// DocWatch - core/dates.rs
//
// Due-date parsing policy for CSV import.
//
// Stage 1 tries the exact numeric format list; stage 2 is a best-effort
// free-form fallback for the looser inputs an Italian-locale spreadsheet
// produces (dates with a time component, dotted dates, spelled-out months).
// Any time-of-day present in the input is discarded: due dates are
// date-only throughout the application.

use chrono::{NaiveDate, NaiveDateTime};

/// Exact formats accepted first, in priority order.
///
/// chrono's `%d` and `%m` accept one- or two-digit values when parsing, so
/// each entry covers both the padded and unpadded spelling (15/3/2024 and
/// 15/03/2024 alike). These formats are purely numeric and therefore read
/// the same under Italian and locale-neutral conventions.
const EXACT_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

/// Free-form date-plus-time fallback formats. The parsed time is dropped.
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Italian month names, full and abbreviated, in calendar order.
const ITALIAN_MONTHS: [(&str, &str); 12] = [
    ("gennaio", "gen"),
    ("febbraio", "feb"),
    ("marzo", "mar"),
    ("aprile", "apr"),
    ("maggio", "mag"),
    ("giugno", "giu"),
    ("luglio", "lug"),
    ("agosto", "ago"),
    ("settembre", "set"),
    ("ottobre", "ott"),
    ("novembre", "nov"),
    ("dicembre", "dic"),
];

/// Parse a due-date field, trying each stage of the policy in order.
///
/// Surrounding whitespace is tolerated. Returns `None` when no stage
/// matches; the caller decides what a non-parsing field means (the CSV
/// codec drops the row).
pub fn parse_due_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    for format in EXACT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }

    // Dotted day-first dates (15.03.2024), common in continental exports.
    if let Ok(date) = NaiveDate::parse_from_str(s, "%d.%m.%Y") {
        return Some(date);
    }

    parse_italian_month_name(s)
}

/// Parse "15 marzo 2024" / "15 mar 2024" style dates.
///
/// Accepts exactly three whitespace-separated tokens: day, Italian month
/// name (full or three-letter, case-insensitive), year.
fn parse_italian_month_name(s: &str) -> Option<NaiveDate> {
    let mut tokens = s.split_whitespace();
    let (day, month_name, year) = (tokens.next()?, tokens.next()?, tokens.next()?);
    if tokens.next().is_some() {
        return None;
    }

    let day: u32 = day.parse().ok()?;
    let year: i32 = year.parse().ok()?;

    let month_lower = month_name.to_lowercase();
    let month = ITALIAN_MONTHS
        .iter()
        .position(|(full, abbr)| month_lower == *full || month_lower == *abbr)?
        as u32
        + 1;

    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_all_exact_formats_agree() {
        let expected = date(2024, 3, 15);
        for input in ["15/03/2024", "15-03-2024", "2024-03-15"] {
            assert_eq!(parse_due_date(input), Some(expected), "input {input:?}");
        }
    }

    #[test]
    fn test_unpadded_day_and_month() {
        assert_eq!(parse_due_date("5/3/2024"), Some(date(2024, 3, 5)));
        assert_eq!(parse_due_date("5-3-2024"), Some(date(2024, 3, 5)));
    }

    #[test]
    fn test_whitespace_tolerated() {
        assert_eq!(parse_due_date("  15/03/2024  "), Some(date(2024, 3, 15)));
    }

    #[test]
    fn test_time_component_discarded() {
        assert_eq!(
            parse_due_date("15/03/2024 10:30:00"),
            Some(date(2024, 3, 15))
        );
        assert_eq!(parse_due_date("2024-03-15 23:59"), Some(date(2024, 3, 15)));
        assert_eq!(
            parse_due_date("2024-03-15T08:00:00"),
            Some(date(2024, 3, 15))
        );
    }

    #[test]
    fn test_dotted_date() {
        assert_eq!(parse_due_date("15.03.2024"), Some(date(2024, 3, 15)));
    }

    #[test]
    fn test_italian_month_names() {
        assert_eq!(parse_due_date("15 marzo 2024"), Some(date(2024, 3, 15)));
        assert_eq!(parse_due_date("15 mar 2024"), Some(date(2024, 3, 15)));
        assert_eq!(parse_due_date("1 Gennaio 2025"), Some(date(2025, 1, 1)));
        assert_eq!(parse_due_date("31 dicembre 2024"), Some(date(2024, 12, 31)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_due_date(""), None);
        assert_eq!(parse_due_date("   "), None);
        assert_eq!(parse_due_date("not a date"), None);
        assert_eq!(parse_due_date("32/01/2024"), None);
        assert_eq!(parse_due_date("15/13/2024"), None);
        assert_eq!(parse_due_date("15 m??o 2024"), None);
    }

    #[test]
    fn test_invalid_calendar_dates_rejected() {
        assert_eq!(parse_due_date("30/02/2024"), None);
        assert_eq!(parse_due_date("29/02/2023"), None);
        // 2024 is a leap year.
        assert_eq!(parse_due_date("29/02/2024"), Some(date(2024, 2, 29)));
    }
}

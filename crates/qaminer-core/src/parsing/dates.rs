use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static ISO_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})$").expect("valid ISO date regex")
});

static NUMERIC_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})[-/.](\d{1,2})[-/.](\d{4}|\d{2})$").expect("valid numeric date regex")
});

/// Output format for every exported date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A parsed date, and whether its numeric fields only made sense in the
/// order opposite to the one requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub date: NaiveDate,
    pub swapped: bool,
}

impl ParsedDate {
    /// Render as `YYYY-MM-DD`.
    pub fn formatted(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Parse the leading date token of `s`.
///
/// `YYYY-MM-DD` is unambiguous. For `NN/NN/YYYY` (also with `.` or `-`
/// separators, or a two-digit year) the caller decides the order: with
/// `day_first` the first number is the day, otherwise the month. When the
/// requested order cannot form a valid date (`13/01/2020` read month-first)
/// the other order is tried and the result is marked `swapped`.
pub fn parse_date(s: &str, day_first: bool) -> Option<ParsedDate> {
    let token = s.split_whitespace().next()?;

    if let Some(caps) = ISO_DATE_RE.captures(token) {
        let date = NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        )?;
        return Some(ParsedDate {
            date,
            swapped: false,
        });
    }

    let caps = NUMERIC_DATE_RE.captures(token)?;
    let first: u32 = caps[1].parse().ok()?;
    let second: u32 = caps[2].parse().ok()?;
    let year = expand_year(&caps[3])?;

    let (day, month) = if day_first {
        (first, second)
    } else {
        (second, first)
    };
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => Some(ParsedDate {
            date,
            swapped: false,
        }),
        None => NaiveDate::from_ymd_opt(year, day, month).map(|date| ParsedDate {
            date,
            swapped: true,
        }),
    }
}

/// Two-digit years pivot at 70: `69` is 2069, `70` is 1970.
fn expand_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    Some(match (s.len(), year) {
        (2, y) if y < 70 => 2000 + y,
        (2, y) => 1900 + y,
        (_, y) => y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn date(s: &str, day_first: bool) -> Option<NaiveDate> {
        parse_date(s, day_first).map(|p| p.date)
    }

    #[test]
    fn test_ambiguous_date_follows_flag() {
        assert_eq!(date("01/02/2020", true), ymd(2020, 2, 1));
        assert_eq!(date("01/02/2020", false), ymd(2020, 1, 2));
    }

    #[test]
    fn test_unambiguous_falls_back_to_other_order() {
        assert_eq!(date("13/01/2020", false), ymd(2020, 1, 13));
        assert_eq!(date("01/13/2020", true), ymd(2020, 1, 13));
    }

    #[test]
    fn test_iso_and_dotted() {
        assert_eq!(date("2019-06-21", false), ymd(2019, 6, 21));
        assert_eq!(date("21.06.2019", true), ymd(2019, 6, 21));
    }

    #[test]
    fn test_leading_token_only() {
        assert_eq!(date("6/21/2019 10:15:03 AM", false), ymd(2019, 6, 21));
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(date("06/21/19", false), ymd(2019, 6, 21));
        assert_eq!(date("06/21/85", false), ymd(1985, 6, 21));
    }

    #[test]
    fn test_rejects_non_dates() {
        assert_eq!(date("", false), None);
        assert_eq!(date("Treatment", false), None);
        assert_eq!(date("31/31/2020", true), None);
    }

    #[test]
    fn test_swapped_order_is_marked() {
        let flagged = parse_date("01/02/2020", true).unwrap();
        assert!(!flagged.swapped);
        assert_eq!(flagged.formatted(), "2020-02-01");

        let swapped = parse_date("13/01/2020", false).unwrap();
        assert!(swapped.swapped);
        assert_eq!(swapped.formatted(), "2020-01-13");

        assert!(!parse_date("2020-01-13", true).unwrap().swapped);
    }
}

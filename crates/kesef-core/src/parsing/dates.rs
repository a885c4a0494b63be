use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

/// Earliest year accepted on a statement row.
pub const MIN_YEAR: i32 = 1990;

/// Numeric formats in the order they are tried. The flag marks 2-digit years.
const NUMERIC_FORMATS: &[(&str, bool)] = &[
    ("%d/%m/%Y", false),
    ("%d/%m/%y", true),
    ("%d-%m-%Y", false),
    ("%d-%m-%y", true),
    ("%d.%m.%Y", false),
    ("%d.%m.%y", true),
    ("%Y-%m-%d", false),
    ("%Y/%m/%d", false),
    ("%m/%d/%Y", false),
    ("%m/%d/%y", true),
];

const HEBREW_MONTHS: &[(&str, u32)] = &[
    ("ינואר", 1),
    ("פברואר", 2),
    ("מרץ", 3),
    ("אפריל", 4),
    ("מאי", 5),
    ("יוני", 6),
    ("יולי", 7),
    ("אוגוסט", 8),
    ("ספטמבר", 9),
    ("אוקטובר", 10),
    ("נובמבר", 11),
    ("דצמבר", 12),
];

static NAMED_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})\s+(\w+)\s+(\d{4})").expect("valid regex"));

/// Parse a statement date, accepting years in [1990, current year + 1].
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    parse_date_until(s, Local::now().year() + 1)
}

/// Parse a statement date with an explicit upper year bound.
pub fn parse_date_until(s: &str, max_year: i32) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let in_range = |d: &NaiveDate| (MIN_YEAR..=max_year).contains(&d.year());

    for (fmt, short_year) in NUMERIC_FORMATS {
        let Ok(parsed) = NaiveDate::parse_from_str(s, fmt) else {
            continue;
        };
        let date = if *short_year {
            match with_statement_century(parsed) {
                Some(d) => d,
                None => continue,
            }
        } else {
            parsed
        };
        if in_range(&date) {
            return Some(date);
        }
    }

    parse_named_month(s).filter(in_range)
}

/// Map a 2-digit year onto 2000-2049 or 1950-1999.
fn with_statement_century(date: NaiveDate) -> Option<NaiveDate> {
    let yy = date.year().rem_euclid(100);
    let year = if yy < 50 { 2000 + yy } else { 1900 + yy };
    date.with_year(year)
}

/// Parse "15 ינואר 2025" style dates.
fn parse_named_month(s: &str) -> Option<NaiveDate> {
    let caps = NAMED_MONTH.captures(s)?;
    let day: u32 = caps[1].parse().ok()?;
    let month = month_number(&caps[2])?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn month_number(name: &str) -> Option<u32> {
    HEBREW_MONTHS
        .iter()
        .find(|(m, _)| *m == name)
        .map(|(_, n)| *n)
}

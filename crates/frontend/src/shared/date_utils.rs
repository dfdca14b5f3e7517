//! Date helpers for filter defaults and display.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};

const ISO_DATE: &str = "%Y-%m-%d";

pub fn to_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

pub fn parse_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE).ok()
}

/// Same calendar day one year earlier; Feb 29 maps to Feb 28.
pub fn one_year_before(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(12)).unwrap_or(date)
}

/// Years from `from` to `to`, newest first.
pub fn year_options(from: i32, to: i32) -> Vec<i32> {
    (from..=to).rev().collect()
}

pub fn current_year(today: NaiveDate) -> i32 {
    today.year()
}

/// Date part of an ISO date or timestamp.
fn parse_date_part(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    let date_part = value.split('T').next().unwrap_or(value);
    parse_iso(date_part)
}

/// `2024-03-15` -> `2024년 3월 15일`
pub fn format_date_long(value: &str) -> String {
    if value.trim().is_empty() {
        return "-".to_string();
    }
    match parse_date_part(value) {
        Some(d) => format!("{}년 {}월 {}일", d.year(), d.month(), d.day()),
        None => value.to_string(),
    }
}

/// `2024-03-15T14:02:26Z` -> `2024-03-15`
pub fn format_date_short(value: &str) -> String {
    if value.trim().is_empty() {
        return "-".to_string();
    }
    match parse_date_part(value) {
        Some(d) => to_iso(d),
        None => value.to_string(),
    }
}

/// `2024-03-15T14:02:26.123Z` -> `2024-03-15 14:02`
pub fn format_datetime(value: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_one_year_before() {
        assert_eq!(one_year_before(date(2024, 6, 15)), date(2023, 6, 15));
        assert_eq!(one_year_before(date(2024, 2, 29)), date(2023, 2, 28));
    }

    #[test]
    fn test_iso_round_trip() {
        assert_eq!(to_iso(date(2024, 1, 5)), "2024-01-05");
        assert_eq!(parse_iso("2024-01-05"), Some(date(2024, 1, 5)));
        assert_eq!(parse_iso("05.01.2024"), None);
    }

    #[test]
    fn test_year_options() {
        assert_eq!(year_options(2020, 2023), vec![2023, 2022, 2021, 2020]);
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(format_date_long("2024-03-15"), "2024년 3월 15일");
        assert_eq!(format_date_short("2024-03-15T14:02:26Z"), "2024-03-15");
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "2024-03-15 14:02");
        assert_eq!(format_datetime("2024-03-15T14:02:26.123456"), "2024-03-15 14:02");
        assert_eq!(format_date_short(""), "-");
        assert_eq!(format_datetime("invalid"), "invalid");
    }
}

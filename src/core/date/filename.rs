//! Capture dates encoded in well-known file naming conventions.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// A naming convention with the fixed offsets of its date fields
struct NamePattern {
    regex: Regex,
    year: usize,
    month: usize,
    day: usize,
}

impl NamePattern {
    fn new(pattern: &str, year: usize, month: usize, day: usize) -> Self {
        Self {
            regex: Regex::new(pattern).expect("filename date patterns are valid"),
            year,
            month,
            day,
        }
    }

    fn date(&self, name: &str) -> Option<NaiveDate> {
        let year: i32 = name.get(self.year..self.year + 4)?.parse().ok()?;
        let month: u32 = name.get(self.month..self.month + 2)?.parse().ok()?;
        let day: u32 = name.get(self.day..self.day + 2)?.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Tested in order; the first pattern that matches decides
static PATTERNS: LazyLock<[NamePattern; 4]> = LazyLock::new(|| {
    [
        // WP_20180521_14_05_33_Pro.jpg
        NamePattern::new(r"^WP\w(20|19)[0-9]{6}\w[0-9]{2}\w[0-9]{2}\w[0-9]{2}", 3, 7, 9),
        // WP_20140310_001.jpg
        NamePattern::new(r"^WP\w(20|19)[0-9]{6}\w[0-9]{3}", 3, 7, 9),
        // IMG_20210304_153000.jpg
        NamePattern::new(r"^IMG\w(20|19)[0-9]{6}\w[0-9]{6}", 4, 8, 10),
        // 20210304_153000.jpg
        NamePattern::new(r"^(20|19)[0-9]{6}\w[0-9]{6}", 0, 4, 6),
    ]
});

/// Derive a date from a bare file name.
///
/// Returns `None` when no convention matches, or when the matching
/// convention's fields do not form a valid calendar date.
pub fn date_from_name(name: &str) -> Option<NaiveDate> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.regex.is_match(name))
        .and_then(|pattern| pattern.date(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    #[test]
    fn camera_style_names() {
        assert_eq!(date_from_name("IMG_20210304_153000.jpg"), ymd(2021, 3, 4));
        assert_eq!(date_from_name("IMG_19991231_235959.jpg"), ymd(1999, 12, 31));
    }

    #[test]
    fn bare_timestamp_names() {
        assert_eq!(date_from_name("20200815_101500.mp4"), ymd(2020, 8, 15));
    }

    #[test]
    fn messaging_export_long_form() {
        assert_eq!(date_from_name("WP_20180521_14_05_33_Pro.jpg"), ymd(2018, 5, 21));
    }

    #[test]
    fn messaging_export_short_form() {
        assert_eq!(date_from_name("WP_20140310_001.jpg"), ymd(2014, 3, 10));
    }

    #[test]
    fn prefix_letters_are_case_sensitive() {
        assert_eq!(date_from_name("img_20210304_153000.jpg"), None);
        assert_eq!(date_from_name("wp_20180521_14_05_33.jpg"), None);
    }

    #[test]
    fn year_must_start_with_19_or_20() {
        assert_eq!(date_from_name("IMG_21210304_153000.jpg"), None);
        assert_eq!(date_from_name("18990101_000000.jpg"), None);
    }

    #[test]
    fn pattern_must_be_at_start_of_name() {
        assert_eq!(date_from_name("holiday IMG_20210304_153000.jpg"), None);
    }

    #[test]
    fn invalid_calendar_date_yields_none() {
        assert_eq!(date_from_name("IMG_20211304_153000.jpg"), None);
        assert_eq!(date_from_name("20210230_120000.jpg"), None);
    }

    #[test]
    fn unrelated_names_yield_none() {
        assert_eq!(date_from_name("photo.jpg"), None);
        assert_eq!(date_from_name("DSC_0001.JPG"), None);
    }
}

//! Small helpers shared by the scraper and the output writer.
//!
//! - Year extraction from sfadb year-page URLs
//! - Text predicates and normalisation for scraped elements
//! - String truncation for logging

use scraper::ElementRef;
use tracing::error;

/// Parse the award year from a year-page URL.
///
/// sfadb year pages end in `_<year>` (e.g. `Hugo_Awards_1953`), so the last
/// underscore-delimited segment is parsed as an integer. Anything else is
/// logged at error level and mapped to `0`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(year_from_url("http://www.sfadb.com/Hugo_Awards_1953"), 1953);
/// assert_eq!(year_from_url("http://www.sfadb.com/Hugo_Awards"), 0);
/// ```
pub fn year_from_url(url: &str) -> u32 {
    let tail = url.rsplit('_').next().unwrap_or_default();
    match tail.parse::<u32>() {
        Ok(year) => year,
        Err(e) => {
            error!(%url, segment = %tail, error = %e, "Invalid year format in URL");
            0
        }
    }
}

/// True when `text` is non-empty and made only of digits.
///
/// Used to tell year links (`1953`) from the rest of the navigation.
pub fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// All text below `element`, with whitespace runs collapsed to one space
/// and the ends trimmed.
pub fn normalized_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to a char
/// boundary) with an ellipsis and the number of dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_year_from_url() {
        assert_eq!(year_from_url("http://www.sfadb.com/Hugo_Awards_1953"), 1953);
        assert_eq!(year_from_url("Nebula_Awards_2021"), 2021);
    }

    #[test]
    fn test_year_from_url_malformed_is_zero() {
        assert_eq!(year_from_url("http://www.sfadb.com/Hugo_Awards"), 0);
        assert_eq!(year_from_url("http://www.sfadb.com/Locus_Awards_19x3"), 0);
        assert_eq!(year_from_url(""), 0);
    }

    #[test]
    fn test_is_all_digits() {
        assert!(is_all_digits("1953"));
        assert!(!is_all_digits(""));
        assert!(!is_all_digits("1953a"));
        assert!(!is_all_digits(" 1953"));
        assert!(!is_all_digits("Hugo Awards"));
    }

    #[test]
    fn test_normalized_text() {
        let html = Html::parse_fragment("<b>  The <i>Demolished</i>\n   Man </b>");
        let b = Selector::parse("b").unwrap();
        let el = html.select(&b).next().unwrap();
        assert_eq!(normalized_text(&el), "The Demolished Man");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        let s = "ééééé";
        let result = truncate_for_log(s, 3);
        assert!(result.starts_with('é'));
        assert!(result.contains("…(+8 bytes)"));
    }
}

//! Tracing setup driven by the `LOG_LEVEL` environment variable.
//!
//! `LOG_LEVEL` takes the usual severity names, case-insensitive. `WARNING`
//! and `CRITICAL` are accepted as aliases of `warn` and `error`. When the
//! variable is unset or empty the level is `warn`. Anything else is rejected
//! before the crawl starts.

use crate::error::CrawlError;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt as tfmt, EnvFilter};

/// Name of the environment variable selecting the log level.
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// Crates whose output is capped at `warn` whatever `LOG_LEVEL` says.
const QUIET_TARGETS: &[&str] = &[
    "hyper",
    "hyper_util",
    "reqwest",
    "rustls",
    "html5ever",
    "selectors",
];

/// Map a `LOG_LEVEL` value onto a tracing level filter.
pub fn parse_level(raw: Option<&str>) -> Result<LevelFilter, CrawlError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(LevelFilter::WARN);
    };

    match raw.to_ascii_uppercase().as_str() {
        "TRACE" => Ok(LevelFilter::TRACE),
        "DEBUG" => Ok(LevelFilter::DEBUG),
        "INFO" => Ok(LevelFilter::INFO),
        "WARN" | "WARNING" => Ok(LevelFilter::WARN),
        "ERROR" | "CRITICAL" => Ok(LevelFilter::ERROR),
        "OFF" => Ok(LevelFilter::OFF),
        _ => Err(CrawlError::InvalidLogLevel(raw.to_string())),
    }
}

/// Build the filter: the chosen level for everything, with HTTP/HTML
/// internals held at `warn`.
pub fn build_filter(level: LevelFilter) -> Result<EnvFilter, CrawlError> {
    let cap = level.min(LevelFilter::WARN);
    let directives = std::iter::once(directive_level(level))
        .chain(
            QUIET_TARGETS
                .iter()
                .map(|target| format!("{target}={}", directive_level(cap))),
        )
        .collect::<Vec<_>>()
        .join(",");

    EnvFilter::try_new(&directives).map_err(|_| CrawlError::InvalidLogLevel(directives))
}

fn directive_level(level: LevelFilter) -> String {
    level.to_string().to_ascii_lowercase()
}

/// Install the global subscriber. Fails if `LOG_LEVEL` is unrecognized.
pub fn init() -> Result<(), CrawlError> {
    let raw = std::env::var(LOG_LEVEL_VAR).ok();
    let level = parse_level(raw.as_deref())?;

    tfmt()
        .with_env_filter(build_filter(level)?)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(parse_level(None).unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level(Some("")).unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level(Some("   ")).unwrap(), LevelFilter::WARN);
    }

    #[test]
    fn test_standard_names_case_insensitive() {
        assert_eq!(parse_level(Some("debug")).unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level(Some("INFO")).unwrap(), LevelFilter::INFO);
        assert_eq!(parse_level(Some("Warning")).unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level(Some("critical")).unwrap(), LevelFilter::ERROR);
        assert_eq!(parse_level(Some("trace")).unwrap(), LevelFilter::TRACE);
    }

    #[test]
    fn test_unknown_level_fails_fast() {
        match parse_level(Some("chatty")) {
            Err(CrawlError::InvalidLogLevel(v)) => assert_eq!(v, "chatty"),
            other => panic!("expected InvalidLogLevel, got {other:?}"),
        }
    }

    #[test]
    fn test_filter_caps_http_targets() {
        let filter = build_filter(LevelFilter::DEBUG)
            .unwrap()
            .to_string()
            .to_ascii_lowercase();
        assert!(filter.contains("hyper=warn"));
        assert!(filter.contains("reqwest=warn"));
        assert!(filter.contains("debug"));
    }
}

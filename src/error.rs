//! Error types for the crawl.
//!
//! Only failures that stop the crawl live here. Structural surprises in the
//! scraped HTML (a missing title, an unparsable year) are absorbed by the
//! scraper with placeholder values and never become a [`CrawlError`].

use thiserror::Error;

/// A fatal crawl error.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Connection refused, DNS failure, timeout, or a body that could not be read.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A base URL or a scraped href that cannot be turned into a URL.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// Writing the output file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// `LOG_LEVEL` held something that is not a severity name.
    #[error("unrecognized LOG_LEVEL value {0:?}")]
    InvalidLogLevel(String),
}

//! Page fetching and site scrapers.
//!
//! The crawl uses one [`reqwest::Client`] for its whole lifetime, so every
//! request shares the same connection pool. The client is dropped, closing
//! its pooled connections, when the crawl returns on any path.
//!
//! # Submodules
//!
//! | Site | Module | Notes |
//! |------|--------|-------|
//! | Science Fiction Awards Database | [`sfadb`] | Award index pages link one page per year |

pub mod sfadb;

use crate::error::CrawlError;
use crate::utils::truncate_for_log;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, trace};

/// Upper bound on a single request, connect through body.
///
/// A request that exceeds it fails like any other transport error.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP session shared by the whole crawl.
pub fn build_client() -> Result<Client, CrawlError> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

/// GET `url` and return the body as text.
///
/// The status code is not inspected: an error page is returned like any
/// other page and simply yields nothing when parsed. Transport failures
/// are returned to the caller.
#[instrument(level = "debug", skip(client))]
pub async fn fetch(client: &Client, url: &str) -> Result<String, CrawlError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;

    debug!(%status, bytes = body.len(), "Fetched page");
    trace!(body = %truncate_for_log(&body, 500), "Page body");
    Ok(body)
}

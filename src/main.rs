//! # Award Winners
//!
//! Crawls the Science Fiction Awards Database for Hugo, Nebula and Locus
//! novel winners and writes them, grouped by year, to a YAML file.
//!
//! ## Usage
//!
//! ```sh
//! LOG_LEVEL=info award_winners award-winners.yml
//! ```
//!
//! ## Architecture
//!
//! The crawl is a straight pipeline, one request at a time:
//! 1. **Indexing**: fetch each award's index page and collect the year links
//! 2. **Extraction**: fetch each year page and pull out the novel winners
//! 3. **Aggregation**: fold every page into one collection keyed by title
//! 4. **Output**: group by year and write the YAML document

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};

mod cli;
mod error;
mod logging;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use outputs::yaml;
use scrapers::sfadb::{AWARDS, BASE_URL, Sfadb};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init()?;

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(output_file = %args.output_file.display(), "Parsed CLI arguments");

    let client = scrapers::build_client()?;
    let site = Sfadb::new(client, BASE_URL)?;

    let winners = match site.process_awards(&AWARDS).await {
        Ok(winners) => winners,
        Err(e) => {
            error!(error = %e, "Crawl failed; nothing written");
            return Err(e.into());
        }
    };
    // Release the pooled connections before writing.
    drop(site);

    yaml::save_to_yaml(&winners, &args.output_file).await?;

    let elapsed = start_time.elapsed();
    info!(
        titles = winners.len(),
        path = %args.output_file.display(),
        ?elapsed,
        "Execution complete"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::sfadb::tests::{award_site, local_client, spawn_site};

    #[tokio::test]
    async fn test_crawl_then_save_writes_grouped_document() {
        let (base_url, shutdown, handle) = spawn_site(award_site());
        let site = Sfadb::new(local_client(), &base_url).unwrap();
        let winners = site.process_awards(&AWARDS).await.unwrap();
        shutdown.send(()).unwrap();
        handle.join().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("award-winners.yml");
        yaml::save_to_yaml(&winners, &path).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let doc: Vec<std::collections::BTreeMap<u32, Vec<models::WinnerRecord>>> =
            serde_yaml::from_str(&written).unwrap();
        let years: Vec<u32> = doc.iter().flat_map(|m| m.keys().copied()).collect();
        assert_eq!(years, vec![1953, 1966]);
        assert_eq!(doc[1][&1966][0].title, "Dune");
        assert_eq!(doc[1][&1966][0].awards, vec!["Hugo", "Nebula"]);
    }

    #[tokio::test]
    async fn test_empty_crawl_still_writes_valid_file() {
        let (base_url, shutdown, handle) = spawn_site(award_site());
        let site = Sfadb::new(local_client(), &base_url).unwrap();
        let winners = site.process_awards(&AWARDS[2..]).await.unwrap();
        shutdown.send(()).unwrap();
        handle.join().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.yml");
        yaml::save_to_yaml(&winners, &path).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let doc: Vec<serde_yaml::Value> = serde_yaml::from_str(&written).unwrap();
        assert!(doc.is_empty());
    }
}

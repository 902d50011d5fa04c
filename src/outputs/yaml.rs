//! YAML output for the aggregated winners.
//!
//! The document is a sequence of single-key mappings, one per year, in the
//! order the years were first seen during the crawl:
//!
//! ```yaml
//! - 1953:
//!     - title: The Demolished Man
//!       author: Alfred Bester
//!       awards:
//!         - Hugo
//!       year: 1953
//! ```
//!
//! Block mappings are indented by 2 and block sequences by 4 with the dash
//! offset by 2. `serde_yaml` cannot be told to indent this way, so the
//! layout is written here and `serde_yaml` only encodes the string scalars
//! (which takes care of quoting titles like `Yes` or `Foo: Bar`).

use crate::error::CrawlError;
use crate::models::{WinnerRecord, Winners, YearGroup};
use std::fmt::Write;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Render the year groups as a YAML document.
pub fn render(groups: &[YearGroup]) -> Result<String, CrawlError> {
    if groups.is_empty() {
        return Ok("[]\n".to_string());
    }

    let mut out = String::new();
    for group in groups {
        writeln!(out, "- {}:", group.year).unwrap();
        for record in &group.winners {
            write_record(&mut out, record)?;
        }
    }
    Ok(out)
}

fn write_record(out: &mut String, record: &WinnerRecord) -> Result<(), CrawlError> {
    writeln!(out, "    - title: {}", scalar(&record.title)?).unwrap();
    writeln!(out, "      author: {}", scalar(&record.author)?).unwrap();
    writeln!(out, "      awards:").unwrap();
    for award in &record.awards {
        writeln!(out, "        - {}", scalar(award)?).unwrap();
    }
    writeln!(out, "      year: {}", record.year).unwrap();
    Ok(())
}

/// A string as a single-line YAML scalar, quoted when plain style would
/// change its meaning.
fn scalar(value: &str) -> Result<String, CrawlError> {
    let encoded = serde_yaml::to_string(value)?;
    Ok(encoded.trim_end_matches('\n').to_string())
}

/// Group `winners` by year and write them to `output_file`, replacing any
/// existing content.
#[instrument(level = "info", skip_all, fields(path = %output_file.display()))]
pub async fn save_to_yaml(winners: &Winners, output_file: &Path) -> Result<(), CrawlError> {
    let groups = winners.group_by_year();
    let yaml = render(&groups)?;

    fs::write(output_file, yaml).await?;
    info!(years = groups.len(), titles = winners.len(), "Wrote YAML output");
    Ok(())
}

//! Command-line interface definitions for the award crawler.
//!
//! The only argument is where to write the YAML document. Verbosity is
//! controlled through the `LOG_LEVEL` environment variable (see
//! [`crate::logging`]).

use clap::Parser;
use std::path::PathBuf;

/// Default output file name.
pub const DEFAULT_OUTPUT_FILE: &str = "award-winners.yml";

/// Fetch and save award-winning novel details.
///
/// # Examples
///
/// ```sh
/// # Write to ./award-winners.yml
/// award_winners
///
/// # Write somewhere else, with progress logging
/// LOG_LEVEL=info award_winners data/winners.yml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output file to save the award-winning novel details
    #[arg(value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,
}

//! Output generation.
//!
//! - [`yaml`]: writes the aggregated winners, grouped by year, to a YAML file
//!
//! The file is written once, after the whole crawl has finished; a crawl
//! that fails part-way leaves any existing file untouched.

pub mod yaml;

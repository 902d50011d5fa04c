//! Data models for award winners and their aggregated representation.
//!
//! This module defines the core data structures used throughout the crawl:
//! - [`AwardSource`]: a configured award and the path of its index page
//! - [`WinnerRecord`]: one winning novel with the awards it has collected
//! - [`Winners`]: the title-keyed, insertion-ordered collection that every
//!   year page is folded into
//! - [`YearGroup`]: one `{year: [records]}` entry of the output document

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Placeholder used when a winner row has no bold title element.
pub const TITLE_NOT_FOUND: &str = "Title not found";
/// Placeholder used when a winner row has no author link.
pub const AUTHOR_NOT_FOUND: &str = "Author not found";

/// An award to crawl: its display name and the index page path on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwardSource {
    /// Display name written into each record's `awards` list (e.g. `"Hugo"`).
    pub name: &'static str,
    /// Path of the award's index page relative to the site root.
    pub path: &'static str,
}

/// A relative link to one year's results page for one award.
pub type YearLink = String;

/// A winning novel.
///
/// `year` and `author` are fixed by the first page the title was seen on;
/// `awards` grows as the same title turns up under other awards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WinnerRecord {
    pub title: String,
    pub author: String,
    /// Award names in the order they were first credited, without repeats.
    pub awards: Vec<String>,
    /// Award year, `0` when it could not be read from the page URL.
    pub year: u32,
}

impl WinnerRecord {
    pub fn new(title: String, author: String, year: u32, award: &str) -> Self {
        Self {
            title,
            author,
            awards: vec![award.to_string()],
            year,
        }
    }

    /// Credit `award` to this title unless it already has it.
    ///
    /// Returns `true` when the award was new.
    pub fn add_award(&mut self, award: &str) -> bool {
        if self.awards.iter().any(|a| a == award) {
            return false;
        }
        self.awards.push(award.to_string());
        true
    }
}

/// Winner records keyed by title, iterated in first-insertion order.
///
/// Titles are the only key: the same title from two different years
/// collapses into one record that keeps the first year seen.
#[derive(Debug, Default, Clone)]
pub struct Winners {
    index: HashMap<String, usize>,
    records: Vec<WinnerRecord>,
}

impl Winners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&WinnerRecord> {
        self.index.get(title).map(|&i| &self.records[i])
    }

    /// Records in the order their titles were first inserted.
    pub fn iter(&self) -> impl Iterator<Item = &WinnerRecord> {
        self.records.iter()
    }

    /// Insert a record, or union its awards into the existing record with
    /// the same title. Scalar fields of an existing record are never
    /// overwritten.
    pub fn merge(&mut self, record: WinnerRecord) {
        match self.index.get(&record.title) {
            Some(&i) => {
                let existing = &mut self.records[i];
                for award in &record.awards {
                    existing.add_award(award);
                }
            }
            None => {
                self.index.insert(record.title.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    /// Fold a whole batch (typically one year page) into this collection.
    pub fn merge_all(&mut self, batch: Winners) {
        for record in batch.records {
            self.merge(record);
        }
    }

    /// Group records by year, years in the order they were first seen.
    pub fn group_by_year(&self) -> Vec<YearGroup> {
        self.iter()
            .map(|r| r.year)
            .unique()
            .map(|year| YearGroup {
                year,
                winners: self
                    .iter()
                    .filter(|r| r.year == year)
                    .cloned()
                    .collect(),
            })
            .collect()
    }
}

/// One entry of the output document: every winner of a given year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGroup {
    pub year: u32,
    pub winners: Vec<WinnerRecord>,
}

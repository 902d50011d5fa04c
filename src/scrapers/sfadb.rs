//! Science Fiction Awards Database scraper.
//!
//! sfadb publishes one index page per award, linking to one results page per
//! year. Year pages group nominees under `div.category` headings followed by
//! a list; the winning row carries a `span.winner` marker followed by the
//! title in `<b>` and the author in `<a>`:
//!
//! ```html
//! <div class="category">Novel</div>
//! <ul>
//!   <li><span class="winner">Winner</span> <b>The Demolished Man</b>, <a href="Alfred_Bester">Alfred Bester</a></li>
//!   <li><b>Some Nominee</b>, <a href="Someone">Someone</a></li>
//! </ul>
//! ```
//!
//! # URL Pattern
//!
//! Award index pages live at `/<Award>_Awards` and year pages at
//! `/<Award>_Awards_<year>`; the year is read back from that suffix.

use crate::error::CrawlError;
use crate::models::{
    AUTHOR_NOT_FOUND, AwardSource, TITLE_NOT_FOUND, WinnerRecord, Winners, YearLink,
};
use crate::scrapers::fetch;
use crate::utils::{is_all_digits, normalized_text, year_from_url};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Root of the site every award and year path is resolved against.
pub const BASE_URL: &str = "http://www.sfadb.com";

/// Awards crawled, in crawl order.
pub const AWARDS: [AwardSource; 3] = [
    AwardSource { name: "Hugo", path: "/Hugo_Awards" },
    AwardSource { name: "Nebula", path: "/Nebula_Awards" },
    AwardSource { name: "Locus", path: "/Locus_Awards" },
];

/// Category headings that hold novel winners.
pub const NOVEL_CATEGORIES: [&str; 3] = ["Novel", "Sf Novel", "Fantasy Novel"];

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static CATEGORY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div.category").unwrap());
static ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());
static WINNER_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("span.winner").unwrap());

/// Extract the hrefs of every link whose text is a bare year.
///
/// Anchors with empty or non-numeric text (navigation, author links, the
/// award's own name) are skipped. Order follows the document.
pub fn parse_year_links(html: &str) -> Vec<YearLink> {
    let document = Html::parse_document(html);
    let links: Vec<YearLink> = document
        .select(&ANCHOR_SELECTOR)
        .filter(|a| is_all_digits(&a.text().collect::<String>()))
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect();
    links
}

/// Extract the novel winners from one year page.
///
/// `year_url` is the page's absolute URL and supplies the year. A title that
/// wins under two novel categories on the same page is returned once.
pub fn parse_novel_winners(html: &str, year_url: &str, award_name: &str) -> Winners {
    let document = Html::parse_document(html);
    let mut winners = Winners::new();
    let mut categories_found = 0usize;
    let mut page_year = None;

    for name in NOVEL_CATEGORIES {
        let Some(category) = find_category(&document, name) else {
            continue;
        };
        categories_found += 1;

        let Some(list) = next_sibling_element(category, &["ol", "ul"]) else {
            debug!(category = name, url = %year_url, "Category has no list");
            continue;
        };

        for item in list.select(&ITEM_SELECTOR) {
            let Some(marker) = item.select(&WINNER_SELECTOR).next() else {
                continue;
            };

            let title = next_sibling_element(marker, &["b"])
                .map(|b| normalized_text(&b))
                .unwrap_or_else(|| TITLE_NOT_FOUND.to_string());
            let author = next_sibling_element(marker, &["a"])
                .map(|a| normalized_text(&a))
                .unwrap_or_else(|| AUTHOR_NOT_FOUND.to_string());
            let year = *page_year.get_or_insert_with(|| year_from_url(year_url));

            if winners.get(&title).is_some() {
                debug!(year, %title, %author, award = award_name, category = name, "Found tied winner");
            } else {
                debug!(year, %title, %author, award = award_name, category = name, "Extracted winner");
            }
            winners.merge(WinnerRecord::new(title, author, year, award_name));
        }
    }

    if categories_found == 0 {
        warn!(categories = ?NOVEL_CATEGORIES, url = %year_url, "None of the novel categories found");
    } else if winners.is_empty() {
        debug!(url = %year_url, "Novel categories found but no winner marked");
    }
    winners
}

/// First `div.category` whose text is exactly `name`.
fn find_category<'a>(document: &'a Html, name: &str) -> Option<ElementRef<'a>> {
    document
        .select(&CATEGORY_SELECTOR)
        .find(|div| div.text().collect::<String>() == name)
}

/// First following sibling element with one of the given tag names.
fn next_sibling_element<'a>(element: ElementRef<'a>, names: &[&str]) -> Option<ElementRef<'a>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| names.contains(&sibling.value().name()))
}

/// Crawler for one sfadb site root, holding the crawl's HTTP session.
#[derive(Debug)]
pub struct Sfadb {
    client: Client,
    base_url: Url,
}

impl Sfadb {
    /// Create a crawler rooted at `base_url` (normally [`BASE_URL`]).
    pub fn new(client: Client, base_url: &str) -> Result<Self, CrawlError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    /// Resolve a site path or href against the site root.
    pub fn resolve(&self, path: &str) -> Result<Url, CrawlError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Fetch an award's index page and return its year links.
    #[instrument(level = "info", skip(self, award), fields(award = award.name))]
    pub async fn get_year_links(&self, award: &AwardSource) -> Result<Vec<YearLink>, CrawlError> {
        let award_url = self.resolve(award.path)?;
        let html = fetch(&self.client, award_url.as_str()).await?;
        let links = parse_year_links(&html);

        info!(count = links.len(), url = %award_url, "Indexed year links");
        Ok(links)
    }

    /// Fetch one year page and return its novel winners for `award_name`.
    #[instrument(level = "info", skip(self))]
    pub async fn get_novel_winners(
        &self,
        year_path: &str,
        award_name: &str,
    ) -> Result<Winners, CrawlError> {
        let year_url = self.resolve(year_path)?;
        let html = fetch(&self.client, year_url.as_str()).await?;
        Ok(parse_novel_winners(&html, year_url.as_str(), award_name))
    }

    /// Crawl every award in order, one request at a time, folding each year
    /// page into a single title-keyed collection.
    #[instrument(level = "info", skip_all)]
    pub async fn process_awards(&self, awards: &[AwardSource]) -> Result<Winners, CrawlError> {
        let mut winners = Winners::new();

        for award in awards {
            info!(award = award.name, "Processing award");
            let year_links = self.get_year_links(award).await?;
            if year_links.is_empty() {
                warn!(award = award.name, "No year links found");
            }

            for year_path in year_links {
                info!(award = award.name, %year_path, "Processing year");
                let year_winners = self.get_novel_winners(&year_path, award.name).await?;
                winners.merge_all(year_winners);
            }
        }

        Ok(winners)
    }
}

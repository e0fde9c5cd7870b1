//! Scraper for the Heart of Midlothian fixtures-and-results page
//!
//! The page lists the whole season as repeated `div.fixtureItem` blocks in
//! chronological order. The markup shape is fixed; any deviation from it is a
//! structural error rather than something to paper over, since a silently
//! misread block would corrupt the outcome columns downstream.

use crate::{HeartsError, Result};
use scraper::{ElementRef, Html, Selector};
use std::path::{Path, PathBuf};

/// Scraper for the club's published fixtures page
pub struct HeartsFcScraper {
    client: reqwest::blocking::Client,
    url: String,
    /// Optional path for saving the fetched markup for inspection
    snapshot_path: Option<PathBuf>,
}

impl HeartsFcScraper {
    pub fn new(url: &str) -> Self {
        HeartsFcScraper {
            client: super::http_client(),
            url: url.to_string(),
            snapshot_path: None,
        }
    }

    /// Save the fetched page markup to the given path before parsing
    pub fn with_snapshot<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.snapshot_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Fetch the fixtures page and extract every fixture block
    pub fn fetch_all(&self) -> Result<Vec<RawFixture>> {
        log::debug!("Fetching {}", self.url);

        let response = self.client.get(&self.url).send()?;
        log::info!("HTTP {} from {}", response.status(), self.url);

        let html = response.error_for_status()?.text()?;

        if let Some(path) = &self.snapshot_path {
            std::fs::write(path, &html)?;
            log::info!("Saved page snapshot to {}", path.display());
        }

        self.parse_page(&html)
    }

    /// Parse a saved page snapshot (for offline runs and tests)
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<RawFixture>> {
        let html = std::fs::read_to_string(path.as_ref())?;
        self.parse_page(&html)
    }

    /// Extract raw fixture fields from page markup, in document order
    pub fn parse_page(&self, html: &str) -> Result<Vec<RawFixture>> {
        let document = Html::parse_document(html);

        let item_selector = Selector::parse("div.fixtureItem").unwrap();
        let date_selector = Selector::parse("h5").unwrap();
        let competition_selector = Selector::parse("small").unwrap();
        let role_selector = Selector::parse("div.fixtureItemClass").unwrap();
        let para_selector = Selector::parse("p").unwrap();
        let team_selector = Selector::parse("span").unwrap();
        let score_selector = Selector::parse("div.fixtureItemMeta").unwrap();

        let mut fixtures = Vec::new();

        for (i, block) in document.select(&item_selector).enumerate() {
            let index = i + 1;

            let date_raw = first_text(&block, &date_selector)
                .ok_or_else(|| missing(index, "h5 date heading"))?;
            let competition = first_text(&block, &competition_selector)
                .ok_or_else(|| missing(index, "small competition annotation"))?;
            let venue_role_raw = first_text(&block, &role_selector)
                .ok_or_else(|| missing(index, "fixtureItemClass home/away marker"))?;
            let venue = block
                .select(&para_selector)
                .nth(2)
                .map(|el| text_of(&el))
                .ok_or_else(|| missing(index, "third p venue line"))?;

            // Exactly two spans per block: home team then away team. Any other
            // count means the page shape changed and extraction must stop.
            let teams: Vec<String> = block.select(&team_selector).map(|el| text_of(&el)).collect();
            if teams.len() != 2 {
                return Err(HeartsError::Structure(format!(
                    "fixture block {}: expected exactly 2 team spans, found {}",
                    index,
                    teams.len()
                )));
            }

            let meta = block
                .select(&score_selector)
                .next()
                .ok_or_else(|| missing(index, "fixtureItemMeta score"))?;
            // The meta element reads "FT:\n 2 - 1" for played matches and a
            // kickoff time for unplayed ones. Collapse whitespace, drop the
            // full-time prefix and keep the rest as one opaque token.
            let compact: String = meta
                .text()
                .collect::<String>()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            let score_raw = compact.strip_prefix("FT:").unwrap_or(&compact).to_string();

            fixtures.push(RawFixture {
                date_raw,
                competition,
                venue_role_raw,
                venue,
                home_team: teams[0].clone(),
                away_team: teams[1].clone(),
                score_raw,
            });
        }

        log::info!("Extracted {} fixture blocks", fixtures.len());
        Ok(fixtures)
    }
}

fn text_of(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn first_text(block: &ElementRef, selector: &Selector) -> Option<String> {
    block.select(selector).next().map(|el| text_of(&el))
}

fn missing(index: usize, what: &str) -> HeartsError {
    HeartsError::Structure(format!("fixture block {}: missing {}", index, what))
}

/// Raw per-block fields as published, before any type coercion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFixture {
    pub date_raw: String,
    pub competition: String,
    pub venue_role_raw: String,
    pub venue: String,
    pub home_team: String,
    pub away_team: String,
    /// Whitespace-stripped score text, e.g. "2-1" or "KO:15:00"
    pub score_raw: String,
}

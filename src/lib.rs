//! Heart of Midlothian fixtures and results scraper
//!
//! Fetches the club's published fixtures-and-results page, extracts one record
//! per match, derives the outcome from the club's perspective and exports the
//! season as a CSV file.

pub mod data;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Whether the tracked club plays at home or away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VenueRole {
    Home,
    Away,
}

impl VenueRole {
    /// Parse the single-letter marker shown on the fixtures page
    pub fn from_marker(s: &str) -> Option<Self> {
        match s.trim() {
            "H" => Some(VenueRole::Home),
            "A" => Some(VenueRole::Away),
            _ => None,
        }
    }
}

impl fmt::Display for VenueRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VenueRole::Home => write!(f, "H"),
            VenueRole::Away => write!(f, "A"),
        }
    }
}

/// Full-time score of a match, or the placeholder for one not yet kicked off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Score {
    Played { home: u32, away: u32 },
    NotYetPlayed,
}

impl Score {
    /// Outcome from the perspective of one side.
    ///
    /// Symmetric: a 2-1 home score is a win for the home side and a loss for
    /// the away side.
    pub fn outcome_for(&self, is_home: bool) -> Outcome {
        match *self {
            Score::NotYetPlayed => Outcome::NotYetPlayed,
            Score::Played { home, away } => {
                let (us, them) = if is_home { (home, away) } else { (away, home) };
                match us.cmp(&them) {
                    std::cmp::Ordering::Greater => Outcome::Win,
                    std::cmp::Ordering::Less => Outcome::Loss,
                    std::cmp::Ordering::Equal => Outcome::Draw,
                }
            }
        }
    }
}

/// Match outcome from the tracked club's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
    NotYetPlayed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "W"),
            Outcome::Loss => write!(f, "L"),
            Outcome::Draw => write!(f, "D"),
            Outcome::NotYetPlayed => write!(f, "TBD"),
        }
    }
}

impl std::str::FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "W" => Ok(Outcome::Win),
            "L" => Ok(Outcome::Loss),
            "D" => Ok(Outcome::Draw),
            "TBD" => Ok(Outcome::NotYetPlayed),
            _ => Err(format!("Unknown outcome: {}", s)),
        }
    }
}

/// One fully transformed match record, in source-page order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// Date string exactly as published
    pub date_raw: String,
    pub date: NaiveDate,
    pub competition: String,
    pub venue_role: VenueRole,
    pub venue: String,
    pub home_team: String,
    pub away_team: String,
    pub score: Score,
    pub outcome: Outcome,
}

impl Fixture {
    /// True when the tracked club is listed as the home side
    pub fn club_at_home(&self, club: &str) -> bool {
        self.home_team == club
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum HeartsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected page structure: {0}")]
    Structure(String),

    #[error("Unparseable match date: {0}")]
    DateParse(String),

    #[error("Invalid goal count: {0}")]
    Coerce(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, HeartsError>;

/// Application configuration loaded from hearts.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub club: ClubConfig,
    pub scrape: ScrapeConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubConfig {
    /// Canonical club name as it appears in the fixture team spans
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    pub url: String,
    /// Where the fetched page markup is saved for inspection
    pub snapshot_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub csv_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            club: ClubConfig {
                name: "Heart of Midlothian".to_string(),
            },
            scrape: ScrapeConfig {
                url: "https://www.heartsfc.co.uk/fixtures/first-team/fixtures-and-results"
                    .to_string(),
                snapshot_path: "hearts_fixtures_and_results.html".to_string(),
            },
            output: OutputConfig {
                csv_path: "hearts_fixtures_results.csv".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HeartsError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| HeartsError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HeartsError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

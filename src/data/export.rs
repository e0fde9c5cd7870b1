//! CSV export of the transformed season
//!
//! One labeled row per match, in source-page order. The reader side exists so
//! the `show` command and tests can load an exported season back.

use crate::{Fixture, HeartsError, Outcome, Result, Score, VenueRole};
use chrono::NaiveDate;
use std::path::Path;

const HEADERS: [&str; 11] = [
    "Match_day",
    "Date",
    "Date_formatted",
    "Competition",
    "Home_or_Away",
    "Venue",
    "Home_team",
    "Away_team",
    "Home_team_goals",
    "Away_team_goals",
    "Win/Loss/Draw",
];

/// Sentinel written in the goal and outcome columns of unplayed fixtures
const TBD: &str = "TBD";

/// Write the season to a CSV file, overwriting any existing file.
///
/// Rows are labeled `Match_day_1` through `Match_day_K` in record order.
pub fn write_csv<P: AsRef<Path>>(fixtures: &[Fixture], path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(HEADERS)?;

    for (i, f) in fixtures.iter().enumerate() {
        let (home_goals, away_goals) = match f.score {
            Score::Played { home, away } => (home.to_string(), away.to_string()),
            Score::NotYetPlayed => (TBD.to_string(), TBD.to_string()),
        };

        writer.write_record([
            format!("Match_day_{}", i + 1),
            f.date_raw.clone(),
            f.date.format("%Y-%m-%d").to_string(),
            f.competition.clone(),
            f.venue_role.to_string(),
            f.venue.clone(),
            f.home_team.clone(),
            f.away_team.clone(),
            home_goals,
            away_goals,
            f.outcome.to_string(),
        ])?;
    }

    writer.flush()?;
    log::info!("Wrote {} rows to {}", fixtures.len(), path.as_ref().display());
    Ok(())
}

/// Read an exported season back into records.
///
/// Validates the `Match_day_N` label sequence while reading.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Fixture>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut fixtures = Vec::new();

    for (i, row) in reader.records().enumerate() {
        let row = row?;
        if row.len() != HEADERS.len() {
            return Err(HeartsError::Structure(format!(
                "CSV row {}: expected {} fields, found {}",
                i + 1,
                HEADERS.len(),
                row.len()
            )));
        }

        let expected_label = format!("Match_day_{}", i + 1);
        if &row[0] != expected_label {
            return Err(HeartsError::Structure(format!(
                "CSV row {}: label {:?} where {:?} was expected",
                i + 1,
                &row[0],
                expected_label
            )));
        }

        let date = NaiveDate::parse_from_str(&row[2], "%Y-%m-%d")
            .map_err(|_| HeartsError::DateParse(row[2].to_string()))?;
        let venue_role = VenueRole::from_marker(&row[4]).ok_or_else(|| {
            HeartsError::Structure(format!("unknown home/away marker {:?}", &row[4]))
        })?;
        let outcome: Outcome = row[10].parse().map_err(HeartsError::Coerce)?;

        let score = if &row[8] == TBD || &row[9] == TBD {
            Score::NotYetPlayed
        } else {
            Score::Played {
                home: parse_goal_field(&row[8])?,
                away: parse_goal_field(&row[9])?,
            }
        };

        fixtures.push(Fixture {
            date_raw: row[1].to_string(),
            date,
            competition: row[3].to_string(),
            venue_role,
            venue: row[5].to_string(),
            home_team: row[6].to_string(),
            away_team: row[7].to_string(),
            score,
            outcome,
        });
    }

    Ok(fixtures)
}

fn parse_goal_field(token: &str) -> Result<u32> {
    token
        .parse()
        .map_err(|_| HeartsError::Coerce(format!("{:?} is not a goal count", token)))
}

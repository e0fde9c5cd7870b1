//! Raw fixture fields to typed match records
//!
//! Runs the derived-column passes over the extracted season: date parsing,
//! score splitting, venue-role parsing, outcome derivation and the
//! not-yet-played override for fixtures on or after the run date.

use crate::data::scrapers::heartsfc::RawFixture;
use crate::{Fixture, HeartsError, Result, Score, VenueRole};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashMap;

/// Transform the extracted season into typed records.
///
/// `today` is the run date; every fixture dated on or after it is forced to
/// the not-yet-played sentinel regardless of what the score column held.
pub fn transform(raw: Vec<RawFixture>, club: &str, today: NaiveDate) -> Result<Vec<Fixture>> {
    raw.into_iter()
        .map(|r| transform_one(r, club, today))
        .collect()
}

fn transform_one(raw: RawFixture, club: &str, today: NaiveDate) -> Result<Fixture> {
    let date = parse_match_date(&raw.date_raw)?;

    let venue_role = VenueRole::from_marker(&raw.venue_role_raw).ok_or_else(|| {
        HeartsError::Structure(format!(
            "unknown home/away marker {:?} for {}",
            raw.venue_role_raw, raw.date_raw
        ))
    })?;

    // Exactly one side must be the tracked club, otherwise the outcome
    // comparison below has nothing to anchor on.
    let club_sides = [&raw.home_team, &raw.away_team]
        .iter()
        .filter(|team| team.as_str() == club)
        .count();
    if club_sides != 1 {
        return Err(HeartsError::Structure(format!(
            "{} v {}: expected {:?} on exactly one side",
            raw.home_team, raw.away_team, club
        )));
    }

    let mut score = parse_score(&raw.score_raw)?;
    if date >= today {
        score = Score::NotYetPlayed;
    }
    let outcome = score.outcome_for(raw.home_team == club);

    Ok(Fixture {
        date_raw: raw.date_raw,
        date,
        competition: raw.competition,
        venue_role,
        venue: raw.venue,
        home_team: raw.home_team,
        away_team: raw.away_team,
        score,
        outcome,
    })
}

/// Parse a published match date.
///
/// The site writes dates long-form ("Saturday 31st July 2021"); older markup
/// revisions abbreviated the month, and ISO dates are accepted as a fallback.
pub fn parse_match_date(s: &str) -> Result<NaiveDate> {
    let month_map: HashMap<&str, u32> = [
        ("jan", 1),
        ("feb", 2),
        ("mar", 3),
        ("apr", 4),
        ("may", 5),
        ("jun", 6),
        ("jul", 7),
        ("aug", 8),
        ("sep", 9),
        ("oct", 10),
        ("nov", 11),
        ("dec", 12),
    ]
    .into_iter()
    .collect();

    // "31st July 2021", "31 Jul 2021" (weekday prefix ignored)
    let day_first = Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+(\d{4})",
    )
    .unwrap();
    if let Some(caps) = day_first.captures(s) {
        let day: u32 = caps[1].parse().map_err(|_| date_error(s))?;
        let month = month_map[caps[2].to_lowercase().as_str()];
        let year: i32 = caps[3].parse().map_err(|_| date_error(s))?;
        return NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| date_error(s));
    }

    // "July 31st, 2021"
    let month_first = Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})",
    )
    .unwrap();
    if let Some(caps) = month_first.captures(s) {
        let month = month_map[caps[1].to_lowercase().as_str()];
        let day: u32 = caps[2].parse().map_err(|_| date_error(s))?;
        let year: i32 = caps[3].parse().map_err(|_| date_error(s))?;
        return NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| date_error(s));
    }

    // "2021-07-31"
    let iso = Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap();
    if let Some(caps) = iso.captures(s) {
        let year: i32 = caps[1].parse().map_err(|_| date_error(s))?;
        let month: u32 = caps[2].parse().map_err(|_| date_error(s))?;
        let day: u32 = caps[3].parse().map_err(|_| date_error(s))?;
        return NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| date_error(s));
    }

    Err(date_error(s))
}

fn date_error(s: &str) -> HeartsError {
    HeartsError::DateParse(s.to_string())
}

/// Split raw score text into goal counts.
///
/// A kickoff time ("KO:15:00") stands in for the score on unplayed fixtures
/// and maps straight to the sentinel; it is never split into goals.
pub fn parse_score(s: &str) -> Result<Score> {
    let kickoff = Regex::new(r"^KO:\d{2}:\d{2}$").unwrap();
    if kickoff.is_match(s) {
        return Ok(Score::NotYetPlayed);
    }

    let (home, away) = s
        .split_once('-')
        .ok_or_else(|| HeartsError::Coerce(format!("score text {:?} has no separator", s)))?;

    Ok(Score::Played {
        home: parse_goals(home)?,
        away: parse_goals(away)?,
    })
}

fn parse_goals(token: &str) -> Result<u32> {
    token
        .parse()
        .map_err(|_| HeartsError::Coerce(format!("{:?} is not a goal count", token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Outcome;

    const CLUB: &str = "Heart of Midlothian";

    fn raw(home: &str, away: &str, score: &str, role: &str) -> RawFixture {
        RawFixture {
            date_raw: "Saturday 31st July 2021".to_string(),
            competition: "cinch Premiership".to_string(),
            venue_role_raw: role.to_string(),
            venue: "Tynecastle Park".to_string(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            score_raw: score.to_string(),
        }
    }

    fn run_date() -> NaiveDate {
        // Any date after the 2021/22 season
        NaiveDate::from_ymd_opt(2022, 6, 1).unwrap()
    }

    #[test]
    fn test_date_grammar() {
        let expected = NaiveDate::from_ymd_opt(2021, 7, 31).unwrap();
        assert_eq!(parse_match_date("Saturday 31st July 2021").unwrap(), expected);
        assert_eq!(parse_match_date("31 Jul 2021").unwrap(), expected);
        assert_eq!(parse_match_date("July 31st, 2021").unwrap(), expected);
        assert_eq!(parse_match_date("2021-07-31").unwrap(), expected);

        assert!(matches!(
            parse_match_date("kick off to be confirmed"),
            Err(HeartsError::DateParse(_))
        ));
        // A real grammar match with an impossible day still fails
        assert!(matches!(
            parse_match_date("30 Feb 2021"),
            Err(HeartsError::DateParse(_))
        ));
    }

    #[test]
    fn test_score_split() {
        assert_eq!(parse_score("2-1").unwrap(), Score::Played { home: 2, away: 1 });
        assert_eq!(parse_score("0-0").unwrap(), Score::Played { home: 0, away: 0 });
        assert_eq!(parse_score("KO:15:00").unwrap(), Score::NotYetPlayed);

        assert!(matches!(parse_score("2:1"), Err(HeartsError::Coerce(_))));
        assert!(matches!(parse_score("2-x"), Err(HeartsError::Coerce(_))));
        assert!(matches!(parse_score("KO:soon"), Err(HeartsError::Coerce(_))));
    }

    #[test]
    fn test_home_win() {
        let fixtures =
            transform(vec![raw(CLUB, "Celtic", "2-1", "H")], CLUB, run_date()).unwrap();
        assert_eq!(fixtures[0].score, Score::Played { home: 2, away: 1 });
        assert_eq!(fixtures[0].outcome, Outcome::Win);
        assert_eq!(fixtures[0].venue_role, VenueRole::Home);
    }

    #[test]
    fn test_outcome_is_symmetric_for_away_fixtures() {
        // Same 2-1 score line, but the club is the away side: a loss
        let fixtures =
            transform(vec![raw("Celtic", CLUB, "2-1", "A")], CLUB, run_date()).unwrap();
        assert_eq!(fixtures[0].outcome, Outcome::Loss);

        let fixtures =
            transform(vec![raw("Celtic", CLUB, "1-3", "A")], CLUB, run_date()).unwrap();
        assert_eq!(fixtures[0].outcome, Outcome::Win);

        let fixtures =
            transform(vec![raw("Celtic", CLUB, "1-1", "A")], CLUB, run_date()).unwrap();
        assert_eq!(fixtures[0].outcome, Outcome::Draw);
    }

    #[test]
    fn test_kickoff_time_never_becomes_a_score() {
        // Match date well in the past, yet the page shows a kickoff time:
        // the sentinel wins over the date check.
        let fixtures =
            transform(vec![raw(CLUB, "Celtic", "KO:15:00", "H")], CLUB, run_date()).unwrap();
        assert_eq!(fixtures[0].score, Score::NotYetPlayed);
        assert_eq!(fixtures[0].outcome, Outcome::NotYetPlayed);
    }

    #[test]
    fn test_future_fixture_overrides_parsed_score() {
        // A parseable score on a fixture dated after the run date is discarded
        let fixture = raw(CLUB, "Celtic", "3-0", "H");
        let day_before = NaiveDate::from_ymd_opt(2021, 7, 30).unwrap();

        let fixtures = transform(vec![fixture.clone()], CLUB, day_before).unwrap();
        assert_eq!(fixtures[0].score, Score::NotYetPlayed);
        assert_eq!(fixtures[0].outcome, Outcome::NotYetPlayed);

        // On the day itself the match still counts as not played
        let match_day = NaiveDate::from_ymd_opt(2021, 7, 31).unwrap();
        let fixtures = transform(vec![fixture.clone()], CLUB, match_day).unwrap();
        assert_eq!(fixtures[0].outcome, Outcome::NotYetPlayed);

        // The day after, the parsed score stands
        let day_after = NaiveDate::from_ymd_opt(2021, 8, 1).unwrap();
        let fixtures = transform(vec![fixture], CLUB, day_after).unwrap();
        assert_eq!(fixtures[0].score, Score::Played { home: 3, away: 0 });
        assert_eq!(fixtures[0].outcome, Outcome::Win);
    }

    #[test]
    fn test_club_must_appear_on_exactly_one_side() {
        let err = transform(vec![raw("Celtic", "Rangers", "2-1", "H")], CLUB, run_date())
            .unwrap_err();
        assert!(matches!(err, HeartsError::Structure(_)));

        let err = transform(vec![raw(CLUB, CLUB, "2-1", "H")], CLUB, run_date()).unwrap_err();
        assert!(matches!(err, HeartsError::Structure(_)));
    }

    #[test]
    fn test_unknown_venue_marker() {
        let err = transform(vec![raw(CLUB, "Celtic", "2-1", "N")], CLUB, run_date())
            .unwrap_err();
        assert!(matches!(err, HeartsError::Structure(_)));
    }
}

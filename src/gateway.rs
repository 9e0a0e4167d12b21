use chrono::{Duration as ChronoDuration, NaiveDate, TimeZone, Utc};
use tracing::{debug, info, warn};

use crate::config::FootballDataConfig;
use crate::error::{FetchError, HistoryError};
use crate::football_data::{
    FootballDataClient, HistoryQuery, MatchQuery, MatchSource, parse_match_json,
    parse_matches_json,
};
use crate::model::{Match, TeamRef};

const STATUS_SCHEDULED: &str = "SCHEDULED";
const STATUS_FINISHED: &str = "FINISHED";

/// Where match data comes from, decided once at startup.
pub enum DataMode {
    /// No provider token: fixed illustrative fixtures, no network.
    Demo,
    Live(Box<dyn MatchSource>),
}

impl DataMode {
    pub fn from_config(cfg: &FootballDataConfig) -> Self {
        match FootballDataClient::from_config(cfg) {
            Some(client) => DataMode::Live(Box::new(client)),
            None => DataMode::Demo,
        }
    }
}

pub struct MatchDataGateway {
    mode: DataMode,
    competitions: Option<String>,
    window_days: i64,
    fetch_limit: u32,
}

impl MatchDataGateway {
    pub fn new(mode: DataMode, cfg: &FootballDataConfig) -> Self {
        if matches!(mode, DataMode::Demo) {
            warn!("no football-data token configured; serving demo fixtures");
        }
        Self {
            mode,
            competitions: cfg.competitions.clone(),
            window_days: cfg.window_days,
            fetch_limit: cfg.fetch_limit,
        }
    }

    pub fn from_config(cfg: &FootballDataConfig) -> Self {
        Self::new(DataMode::from_config(cfg), cfg)
    }

    pub fn is_demo(&self) -> bool {
        matches!(self.mode, DataMode::Demo)
    }

    /// Scheduled matches from today through today + window days.
    pub fn list_scheduled_matches(&self) -> Vec<Match> {
        self.list_scheduled_matches_from(Utc::now().date_naive())
    }

    pub fn list_scheduled_matches_from(&self, today: NaiveDate) -> Vec<Match> {
        let source = match &self.mode {
            DataMode::Demo => return demo_matches(),
            DataMode::Live(source) => source,
        };

        let query = MatchQuery {
            status: STATUS_SCHEDULED.to_string(),
            date_from: today,
            date_to: today + ChronoDuration::days(self.window_days),
            competitions: self.competitions.clone(),
        };
        let body = match source.fetch_matches(&query) {
            Ok(body) => body,
            Err(err) => {
                warn!("scheduled matches fetch failed: {err}");
                return Vec::new();
            }
        };
        match parse_matches_json(&body) {
            Ok(matches) => {
                info!(count = matches.len(), "scheduled matches fetched");
                matches
            }
            Err(err) => {
                warn!("scheduled matches parse failed: {err:#}");
                Vec::new()
            }
        }
    }

    /// Resolves a match id to the match and its participants. Always absent
    /// in demo mode: demo fixtures carry no history to aggregate.
    pub fn get_match_by_id(&self, match_id: u64) -> Option<Match> {
        let source = match &self.mode {
            DataMode::Demo => {
                debug!(match_id, "match lookup skipped in demo mode");
                return None;
            }
            DataMode::Live(source) => source,
        };

        let body = match source.fetch_match(match_id) {
            Ok(body) => body,
            Err(FetchError::RateLimited) => {
                warn!(match_id, "match lookup rate limited");
                return None;
            }
            Err(FetchError::NotFound) => {
                debug!(match_id, "match not found");
                return None;
            }
            Err(err) => {
                warn!(match_id, "match lookup failed: {err}");
                return None;
            }
        };
        match parse_match_json(&body) {
            Ok(found) => found,
            Err(err) => {
                warn!(match_id, "match lookup parse failed: {err:#}");
                None
            }
        }
    }

    /// Most recent finished matches for a team, newest first as the provider
    /// returns them. An empty `Ok` means the team genuinely has no data.
    pub fn get_team_recent_matches(&self, team_id: u64) -> Result<Vec<Match>, HistoryError> {
        let source = match &self.mode {
            DataMode::Demo => {
                return Err(HistoryError::Unavailable(
                    "no football-data token configured".to_string(),
                ));
            }
            DataMode::Live(source) => source,
        };

        let query = HistoryQuery {
            status: STATUS_FINISHED.to_string(),
            limit: self.fetch_limit,
        };
        let body = source.fetch_team_matches(team_id, &query).map_err(|err| {
            warn!(team_id, "team history fetch failed: {err}");
            HistoryError::from(err)
        })?;
        parse_matches_json(&body).map_err(|err| {
            warn!(team_id, "team history parse failed: {err:#}");
            HistoryError::Unavailable(format!("{err:#}"))
        })
    }
}

/// Illustrative fixtures served when no provider token is configured.
/// Listing only; they cannot be resolved or aggregated.
pub fn demo_matches() -> Vec<Match> {
    vec![
        demo_match(1001, (2025, 12, 14, 15, 0), (57, "Arsenal"), (61, "Chelsea")),
        demo_match(1002, (2025, 12, 14, 17, 30), (64, "Liverpool"), (65, "Man City")),
    ]
}

fn demo_match(
    id: u64,
    (year, month, day, hour, minute): (i32, u32, u32, u32, u32),
    home: (u64, &str),
    away: (u64, &str),
) -> Match {
    let scheduled_time = Utc
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default();
    Match {
        id,
        scheduled_time,
        home_team: TeamRef {
            id: home.0,
            name: home.1.to_string(),
        },
        away_team: TeamRef {
            id: away.0,
            name: away.1.to_string(),
        },
        competition_name: Some("Premier League".to_string()),
        status: Some(STATUS_SCHEDULED.to_string()),
        finished_score: None,
    }
}

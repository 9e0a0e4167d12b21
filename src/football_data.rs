use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::config::FootballDataConfig;
use crate::error::FetchError;
use crate::http_client::{http_client, send_for_text};
use crate::model::{Match, Score, TeamRef};

const AUTH_HEADER: &str = "X-Auth-Token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchQuery {
    pub status: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub competitions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub status: String,
    pub limit: u32,
}

/// Raw access to the sports-data provider. Implementations return response
/// bodies untouched; decoding happens in [`parse_matches_json`] and
/// [`parse_match_json`].
pub trait MatchSource: Send + Sync {
    fn fetch_matches(&self, query: &MatchQuery) -> Result<String, FetchError>;

    fn fetch_match(&self, match_id: u64) -> Result<String, FetchError>;

    fn fetch_team_matches(&self, team_id: u64, query: &HistoryQuery)
    -> Result<String, FetchError>;
}

/// football-data.org v4 over blocking HTTP.
pub struct FootballDataClient {
    cfg: FootballDataConfig,
    api_key: String,
}

impl FootballDataClient {
    /// Returns `None` when no API token is configured.
    pub fn from_config(cfg: &FootballDataConfig) -> Option<Self> {
        let api_key = cfg.api_key.clone()?;
        Some(Self {
            cfg: cfg.clone(),
            api_key,
        })
    }

    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String, FetchError> {
        let client = http_client().map_err(|err| FetchError::Transport(format!("{err:#}")))?;
        let url = format!("{}{path}", self.cfg.base_url.trim_end_matches('/'));
        let req = client
            .get(&url)
            .query(query)
            .header(AUTH_HEADER, self.api_key.as_str())
            .timeout(self.cfg.timeout);
        send_for_text(req)
    }
}

impl MatchSource for FootballDataClient {
    fn fetch_matches(&self, query: &MatchQuery) -> Result<String, FetchError> {
        let mut params = vec![
            ("status", query.status.clone()),
            ("dateFrom", query.date_from.format("%Y-%m-%d").to_string()),
            ("dateTo", query.date_to.format("%Y-%m-%d").to_string()),
        ];
        if let Some(competitions) = query.competitions.as_ref() {
            params.push(("competitions", competitions.clone()));
        }
        self.get("/matches", &params)
    }

    fn fetch_match(&self, match_id: u64) -> Result<String, FetchError> {
        self.get(&format!("/matches/{match_id}"), &[])
    }

    fn fetch_team_matches(
        &self,
        team_id: u64,
        query: &HistoryQuery,
    ) -> Result<String, FetchError> {
        self.get(
            &format!("/teams/{team_id}/matches"),
            &[
                ("status", query.status.clone()),
                ("limit", query.limit.to_string()),
            ],
        )
    }
}

#[derive(Debug, Deserialize)]
struct MatchesResponse {
    #[serde(default)]
    matches: Vec<ApiMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMatch {
    id: u64,
    utc_date: DateTime<Utc>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    competition: Option<ApiCompetition>,
    home_team: ApiTeam,
    away_team: ApiTeam,
    #[serde(default)]
    score: Option<ApiScore>,
}

#[derive(Debug, Deserialize)]
struct ApiCompetition {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiTeam {
    // Unannounced knockout participants come back as nulls.
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiScore {
    #[serde(default)]
    full_time: Option<ApiGoals>,
}

#[derive(Debug, Deserialize)]
struct ApiGoals {
    home: Option<u32>,
    away: Option<u32>,
}

/// Decodes a match list body (`/matches` or `/teams/{id}/matches`).
pub fn parse_matches_json(raw: &str) -> Result<Vec<Match>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let data: MatchesResponse =
        serde_json::from_str(trimmed).context("invalid football-data matches json")?;
    Ok(data.matches.into_iter().map(into_match).collect())
}

/// Decodes a single match body (`/matches/{id}`). `null` or empty means absent.
pub fn parse_match_json(raw: &str) -> Result<Option<Match>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    let data: ApiMatch =
        serde_json::from_str(trimmed).context("invalid football-data match json")?;
    Ok(Some(into_match(data)))
}

fn into_match(m: ApiMatch) -> Match {
    let finished_score = m
        .score
        .and_then(|s| s.full_time)
        .and_then(|goals| match (goals.home, goals.away) {
            (Some(home), Some(away)) => Some(Score { home, away }),
            _ => None,
        });

    Match {
        id: m.id,
        scheduled_time: m.utc_date,
        home_team: into_team(m.home_team),
        away_team: into_team(m.away_team),
        competition_name: m.competition.and_then(|c| c.name),
        status: m.status,
        finished_score,
    }
}

/// Unknown participants get id 0, which never names a real team.
fn into_team(team: ApiTeam) -> TeamRef {
    TeamRef {
        id: team.id.unwrap_or(0),
        name: team.name.unwrap_or_else(|| "TBD".to_string()),
    }
}

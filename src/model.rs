use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: u64,
    pub name: String,
}

impl TeamRef {
    /// `false` for participants the provider has not announced yet.
    pub fn is_known(&self) -> bool {
        self.id != 0
    }
}

/// Full-time goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: u64,
    pub scheduled_time: DateTime<Utc>,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    pub competition_name: Option<String>,
    pub status: Option<String>,
    pub finished_score: Option<Score>,
}

impl Match {
    pub fn is_finished(&self) -> bool {
        self.finished_score.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecentForm {
    pub team_id: u64,
    pub team_name: String,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub avg_goals_scored: f64,
    pub avg_goals_conceded: f64,
    pub sample_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    RateLimited,
    UpstreamFailure,
}

/// Per-team entry of a prediction response's `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamStats {
    Form(TeamRecentForm),
    Unavailable {
        name: String,
        error: String,
        reason: UnavailableReason,
    },
    Placeholder {
        name: String,
        info: String,
    },
}

impl TeamStats {
    pub fn placeholder(name: &str, info: &str) -> Self {
        TeamStats::Placeholder {
            name: name.to_string(),
            info: info.to_string(),
        }
    }

    pub fn form(&self) -> Option<&TeamRecentForm> {
        match self {
            TeamStats::Form(form) => Some(form),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            TeamStats::Unavailable {
                reason: UnavailableReason::RateLimited,
                ..
            }
        )
    }
}

/// Oracle output. Percentages are passed through as returned and need not
/// sum to 100. Whole percentages serialize as integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(rename = "home_win", serialize_with = "serialize_pct")]
    pub home_win_pct: f64,
    #[serde(rename = "draw", serialize_with = "serialize_pct")]
    pub draw_pct: f64,
    #[serde(rename = "away_win", serialize_with = "serialize_pct")]
    pub away_win_pct: f64,
    #[serde(rename = "analysis")]
    pub analysis_text: String,
}

impl PredictionResult {
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self {
            home_win_pct: 0.0,
            draw_pct: 0.0,
            away_win_pct: 0.0,
            analysis_text: format!("prediction failed: {reason}"),
        }
    }
}

fn serialize_pct<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let v = *value;
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        serializer.serialize_i64(v as i64)
    } else {
        serializer.serialize_f64(v)
    }
}

/// Simplified match row returned by the match listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchListing {
    pub id: u64,
    #[serde(rename = "utcDate")]
    pub utc_date: DateTime<Utc>,
    #[serde(rename = "homeTeam")]
    pub home_team: TeamRef,
    #[serde(rename = "awayTeam")]
    pub away_team: TeamRef,
    pub competition: Option<String>,
}

impl From<&Match> for MatchListing {
    fn from(m: &Match) -> Self {
        Self {
            id: m.id,
            utc_date: m.scheduled_time,
            home_team: m.home_team.clone(),
            away_team: m.away_team.clone(),
            competition: m.competition_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictQuery {
    pub home_team: String,
    pub away_team: String,
    pub match_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictDetails {
    pub home_stats: TeamStats,
    pub away_stats: TeamStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(rename = "match")]
    pub fixture: String,
    pub prediction: PredictionResult,
    pub details: PredictDetails,
}

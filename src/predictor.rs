use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::{MAX_SAMPLE_SIZE, OracleConfig};
use crate::json_extract::extract_json_object;
use crate::model::{PredictionResult, TeamStats};
use crate::oracle::{OpenAiOracle, PredictionOracle};

pub const DEMO_HOME_WIN: f64 = 40.0;
pub const DEMO_DRAW: f64 = 30.0;
pub const DEMO_AWAY_WIN: f64 = 30.0;
pub const DEMO_ANALYSIS: &str =
    "API key missing. Returning mock prediction. Home team seems strong.";

/// How predictions are produced, decided once at startup.
pub enum PredictionMode {
    /// No oracle credential: fixed illustrative result, no network.
    Demo,
    Live(Box<dyn PredictionOracle>),
}

impl PredictionMode {
    pub fn from_config(cfg: &OracleConfig) -> Self {
        match OpenAiOracle::from_config(cfg) {
            Some(oracle) => PredictionMode::Live(Box::new(oracle)),
            None => PredictionMode::Demo,
        }
    }
}

pub struct PredictionOrchestrator {
    mode: PredictionMode,
    language: String,
    sample_size: usize,
}

impl PredictionOrchestrator {
    pub fn new(mode: PredictionMode, language: impl Into<String>) -> Self {
        if matches!(mode, PredictionMode::Demo) {
            warn!("no oracle key configured; predictions run in demo mode");
        }
        Self {
            mode,
            language: language.into(),
            sample_size: MAX_SAMPLE_SIZE,
        }
    }

    /// Window size quoted in the prompt; should match the aggregation.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size.clamp(1, MAX_SAMPLE_SIZE);
        self
    }

    pub fn from_config(cfg: &OracleConfig) -> Self {
        Self::new(PredictionMode::from_config(cfg), cfg.language.clone())
    }

    pub fn is_demo(&self) -> bool {
        matches!(self.mode, PredictionMode::Demo)
    }

    /// One oracle call per invocation. Never fails: oracle or parse errors
    /// come back as a zeroed result carrying the reason.
    pub fn predict(
        &self,
        home_team: &str,
        away_team: &str,
        home_stats: &TeamStats,
        away_stats: &TeamStats,
    ) -> PredictionResult {
        let oracle = match &self.mode {
            PredictionMode::Demo => return demo_prediction(),
            PredictionMode::Live(oracle) => oracle,
        };

        let system = system_instruction(&self.language);
        let prompt = build_prompt(
            home_team,
            away_team,
            home_stats,
            away_stats,
            self.sample_size,
            &self.language,
        );

        let result = oracle
            .complete(&system, &prompt)
            .and_then(|text| parse_prediction(&text));
        match result {
            Ok(prediction) => {
                info!(
                    home = home_team,
                    away = away_team,
                    home_win = prediction.home_win_pct,
                    draw = prediction.draw_pct,
                    away_win = prediction.away_win_pct,
                    "prediction received"
                );
                prediction
            }
            Err(err) => {
                warn!(home = home_team, away = away_team, "prediction failed: {err:#}");
                PredictionResult::failed(format!("{err:#}"))
            }
        }
    }
}

pub fn demo_prediction() -> PredictionResult {
    PredictionResult {
        home_win_pct: DEMO_HOME_WIN,
        draw_pct: DEMO_DRAW,
        away_win_pct: DEMO_AWAY_WIN,
        analysis_text: DEMO_ANALYSIS.to_string(),
    }
}

pub fn system_instruction(language: &str) -> String {
    format!(
        "You are a football expert assistant. Return only JSON. \
         Analysis must be written in {language}."
    )
}

pub fn build_prompt(
    home_team: &str,
    away_team: &str,
    home_stats: &TeamStats,
    away_stats: &TeamStats,
    sample_size: usize,
    language: &str,
) -> String {
    format!(
        "Predict the outcome of a football match between {home_team} (Home) and {away_team} (Away).\n\
         \n\
         Home Stats (Last {sample_size}): {home}\n\
         Away Stats (Last {sample_size}): {away}\n\
         \n\
         Return a single JSON object with exactly these keys: \"home_win\" (int %), \"draw\" (int %), \
         \"away_win\" (int %), \"analysis\" (string).\n\
         \"analysis\" MUST be written in {language}.",
        home = stats_json(home_stats),
        away = stats_json(away_stats),
    )
}

fn stats_json(stats: &TeamStats) -> String {
    serde_json::to_string(stats).unwrap_or_else(|_| "{}".to_string())
}

#[derive(Debug, Deserialize)]
struct OraclePrediction {
    home_win: f64,
    draw: f64,
    away_win: f64,
    analysis: String,
}

/// Parses oracle free text into a prediction, tolerating chatter or code
/// fences around the JSON object.
pub fn parse_prediction(text: &str) -> Result<PredictionResult> {
    let candidate = extract_json_object(text);
    let parsed: OraclePrediction = serde_json::from_str(candidate).with_context(|| {
        let preview = candidate.chars().take(200).collect::<String>();
        format!("invalid prediction json: {preview}")
    })?;
    Ok(PredictionResult {
        home_win_pct: parsed.home_win,
        draw_pct: parsed.draw,
        away_win_pct: parsed.away_win,
        analysis_text: parsed.analysis,
    })
}

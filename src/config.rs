use std::env;
use std::time::Duration;

const DEFAULT_FOOTBALL_DATA_URL: &str = "https://api.football-data.org/v4";
const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";
const DEFAULT_COMPETITIONS: &str = "2021";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_LANGUAGE: &str = "Japanese";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const MAX_SAMPLE_SIZE: usize = 5;
pub const MAX_FETCH_LIMIT: u32 = 10;

#[derive(Debug, Clone)]
pub struct FootballDataConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub competitions: Option<String>,
    pub window_days: i64,
    pub fetch_limit: u32,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub language: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub football_data: FootballDataConfig,
    pub oracle: OracleConfig,
    pub sample_size: usize,
}

impl AppConfig {
    /// Reads every setting from the process environment. Blank values count
    /// as unset; numeric values are clamped to their supported range.
    pub fn from_env() -> Self {
        let timeout = Duration::from_secs(
            env_parse("REQUEST_TIMEOUT_SECS")
                .unwrap_or(DEFAULT_TIMEOUT_SECS)
                .clamp(1, 60),
        );

        let competitions = match env::var("FOOTBALL_DATA_COMPETITIONS") {
            Ok(raw) => non_empty(&raw),
            Err(_) => Some(DEFAULT_COMPETITIONS.to_string()),
        };

        let football_data = FootballDataConfig {
            api_key: opt_env("FOOTBALL_DATA_API_KEY"),
            base_url: opt_env("FOOTBALL_DATA_BASE_URL")
                .unwrap_or_else(|| DEFAULT_FOOTBALL_DATA_URL.to_string()),
            competitions,
            window_days: env_parse::<i64>("MATCH_WINDOW_DAYS").unwrap_or(10).clamp(1, 30),
            fetch_limit: env_parse("FORM_FETCH_LIMIT")
                .unwrap_or(MAX_FETCH_LIMIT)
                .clamp(1, MAX_FETCH_LIMIT),
            timeout,
        };

        let oracle = OracleConfig {
            api_key: opt_env("OPENAI_API_KEY"),
            base_url: opt_env("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string()),
            model: opt_env("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: env_parse("OPENAI_TEMPERATURE")
                .unwrap_or(0.7_f32)
                .clamp(0.0, 2.0),
            language: opt_env("ANALYSIS_LANGUAGE").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            timeout,
        };

        Self {
            football_data,
            oracle,
            sample_size: env_parse("FORM_SAMPLE_SIZE")
                .unwrap_or(MAX_SAMPLE_SIZE)
                .clamp(1, MAX_SAMPLE_SIZE),
        }
    }
}

impl Default for FootballDataConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_FOOTBALL_DATA_URL.to_string(),
            competitions: Some(DEFAULT_COMPETITIONS.to_string()),
            window_days: 10,
            fetch_limit: MAX_FETCH_LIMIT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            football_data: FootballDataConfig::default(),
            oracle: OracleConfig::default(),
            sample_size: MAX_SAMPLE_SIZE,
        }
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|val| non_empty(&val))
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    opt_env(key).and_then(|val| val.parse::<T>().ok())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

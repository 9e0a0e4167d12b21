#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};

use pitchcast::error::FetchError;
use pitchcast::football_data::{HistoryQuery, MatchQuery, MatchSource};
use pitchcast::oracle::PredictionOracle;

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

/// Canned provider responses keyed by endpoint.
pub struct FakeSource {
    pub matches: Result<String, FetchError>,
    pub details: HashMap<u64, Result<String, FetchError>>,
    pub teams: HashMap<u64, Result<String, FetchError>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            matches: Ok("{\"matches\":[]}".to_string()),
            details: HashMap::new(),
            teams: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_matches(mut self, reply: Result<String, FetchError>) -> Self {
        self.matches = reply;
        self
    }

    pub fn with_detail(mut self, match_id: u64, reply: Result<String, FetchError>) -> Self {
        self.details.insert(match_id, reply);
        self
    }

    pub fn with_team(mut self, team_id: u64, reply: Result<String, FetchError>) -> Self {
        self.teams.insert(team_id, reply);
        self
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MatchSource for FakeSource {
    fn fetch_matches(&self, query: &MatchQuery) -> Result<String, FetchError> {
        self.record(format!(
            "matches status={} from={} to={} competitions={}",
            query.status,
            query.date_from,
            query.date_to,
            query.competitions.as_deref().unwrap_or("-")
        ));
        self.matches.clone()
    }

    fn fetch_match(&self, match_id: u64) -> Result<String, FetchError> {
        self.record(format!("match {match_id}"));
        self.details
            .get(&match_id)
            .cloned()
            .unwrap_or(Err(FetchError::NotFound))
    }

    fn fetch_team_matches(
        &self,
        team_id: u64,
        query: &HistoryQuery,
    ) -> Result<String, FetchError> {
        self.record(format!(
            "team {team_id} status={} limit={}",
            query.status, query.limit
        ));
        self.teams
            .get(&team_id)
            .cloned()
            .unwrap_or_else(|| Ok("{\"matches\":[]}".to_string()))
    }
}

/// Oracle returning a fixed reply and remembering every prompt it saw.
pub struct FakeOracle {
    reply: Result<String, String>,
    pub prompts: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeOracle {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_string()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl PredictionOracle for FakeOracle {
    fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));
        self.reply.clone().map_err(|reason| anyhow!(reason))
    }
}

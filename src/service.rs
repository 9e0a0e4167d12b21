use tracing::info;

use crate::config::AppConfig;
use crate::error::HistoryError;
use crate::form::summarize;
use crate::gateway::MatchDataGateway;
use crate::model::{
    MatchListing, PredictDetails, PredictQuery, PredictResponse, TeamRef, TeamStats,
    UnavailableReason,
};
use crate::predictor::PredictionOrchestrator;

pub const INFO_NO_MATCH_ID: &str = "no match id provided";
pub const INFO_LOOKUP_FAILED: &str = "failed to fetch real stats";
pub const INFO_UNKNOWN_PARTICIPANT: &str = "participant not yet known";

/// Request pipeline behind the match listing and prediction endpoints:
/// resolve, aggregate, predict. Holds no per-request state.
pub struct PredictionService {
    gateway: MatchDataGateway,
    orchestrator: PredictionOrchestrator,
    sample_size: usize,
}

impl PredictionService {
    pub fn new(
        gateway: MatchDataGateway,
        orchestrator: PredictionOrchestrator,
        sample_size: usize,
    ) -> Self {
        Self {
            gateway,
            orchestrator,
            sample_size,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(
            MatchDataGateway::from_config(&cfg.football_data),
            PredictionOrchestrator::from_config(&cfg.oracle).with_sample_size(cfg.sample_size),
            cfg.sample_size,
        )
    }

    pub fn list_matches(&self) -> Vec<MatchListing> {
        self.gateway
            .list_scheduled_matches()
            .iter()
            .map(MatchListing::from)
            .collect()
    }

    pub fn predict(&self, query: &PredictQuery) -> PredictResponse {
        let (home_stats, away_stats) = self.collect_stats(query);
        let prediction = self.orchestrator.predict(
            &query.home_team,
            &query.away_team,
            &home_stats,
            &away_stats,
        );

        PredictResponse {
            fixture: format!("{} vs {}", query.home_team, query.away_team),
            prediction,
            details: PredictDetails {
                home_stats,
                away_stats,
            },
        }
    }

    fn collect_stats(&self, query: &PredictQuery) -> (TeamStats, TeamStats) {
        let Some(match_id) = query.match_id else {
            return (
                TeamStats::placeholder(&query.home_team, INFO_NO_MATCH_ID),
                TeamStats::placeholder(&query.away_team, INFO_NO_MATCH_ID),
            );
        };
        let Some(fixture) = self.gateway.get_match_by_id(match_id) else {
            return (
                TeamStats::placeholder(&query.home_team, INFO_LOOKUP_FAILED),
                TeamStats::placeholder(&query.away_team, INFO_LOOKUP_FAILED),
            );
        };

        info!(
            match_id,
            home_id = fixture.home_team.id,
            away_id = fixture.away_team.id,
            "resolved match participants"
        );
        rayon::join(
            || self.team_stats(&fixture.home_team),
            || self.team_stats(&fixture.away_team),
        )
    }

    fn team_stats(&self, team: &TeamRef) -> TeamStats {
        if !team.is_known() {
            return TeamStats::placeholder(&team.name, INFO_UNKNOWN_PARTICIPANT);
        }
        match self.gateway.get_team_recent_matches(team.id) {
            Ok(history) => TeamStats::Form(summarize(
                team.id,
                &team.name,
                &history,
                self.sample_size,
            )),
            Err(err) => {
                let reason = match err {
                    HistoryError::RateLimited => UnavailableReason::RateLimited,
                    HistoryError::Unavailable(_) => UnavailableReason::UpstreamFailure,
                };
                TeamStats::Unavailable {
                    name: team.name.clone(),
                    error: err.to_string(),
                    reason,
                }
            }
        }
    }
}

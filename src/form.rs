use crate::config::MAX_SAMPLE_SIZE;
use crate::model::{Match, TeamRecentForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

pub fn classify_outcome(goals_for: u32, goals_against: u32) -> Outcome {
    if goals_for > goals_against {
        Outcome::Win
    } else if goals_for < goals_against {
        Outcome::Loss
    } else {
        Outcome::Draw
    }
}

/// Recent form over the default window of five finished matches.
pub fn summarize_recent(team_id: u64, team_name: &str, raw_matches: &[Match]) -> TeamRecentForm {
    summarize(team_id, team_name, raw_matches, MAX_SAMPLE_SIZE)
}

/// Reduces a team's history to a [`TeamRecentForm`].
///
/// `raw_matches` is expected newest first. Unfinished records are skipped and
/// do not count toward the sample; the reduction stops after `sample_size`
/// finished records (never more than five). A short history yields a smaller
/// `sample_size` rather than being padded.
pub fn summarize(
    team_id: u64,
    team_name: &str,
    raw_matches: &[Match],
    sample_size: usize,
) -> TeamRecentForm {
    let limit = sample_size.min(MAX_SAMPLE_SIZE);

    let mut form = TeamRecentForm {
        team_id,
        team_name: team_name.to_string(),
        wins: 0,
        draws: 0,
        losses: 0,
        avg_goals_scored: 0.0,
        avg_goals_conceded: 0.0,
        sample_size: 0,
    };
    let mut scored = 0u32;
    let mut conceded = 0u32;

    for m in raw_matches {
        if (form.sample_size as usize) >= limit {
            break;
        }
        let Some(score) = m.finished_score else {
            continue;
        };

        let is_home = m.home_team.id == team_id;
        let (mine, theirs) = if is_home {
            (score.home, score.away)
        } else {
            (score.away, score.home)
        };
        scored += mine;
        conceded += theirs;

        match classify_outcome(mine, theirs) {
            Outcome::Win => form.wins += 1,
            Outcome::Draw => form.draws += 1,
            Outcome::Loss => form.losses += 1,
        }
        form.sample_size += 1;
    }

    if form.sample_size > 0 {
        let n = f64::from(form.sample_size);
        form.avg_goals_scored = round2(f64::from(scored) / n);
        form.avg_goals_conceded = round2(f64::from(conceded) / n);
    }
    form
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{Outcome, classify_outcome, round2};

    #[test]
    fn outcome_follows_goal_difference() {
        assert_eq!(classify_outcome(2, 0), Outcome::Win);
        assert_eq!(classify_outcome(1, 1), Outcome::Draw);
        assert_eq!(classify_outcome(0, 3), Outcome::Loss);
    }

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(round2(7.0 / 3.0), 2.33);
        assert_eq!(round2(5.0 / 3.0), 1.67);
        assert_eq!(round2(1.6), 1.6);
    }
}

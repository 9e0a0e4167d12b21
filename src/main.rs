use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use pitchcast::config::AppConfig;
use pitchcast::model::PredictQuery;
use pitchcast::service::PredictionService;

const USAGE: &str = "usage:
  pitchcast matches
  pitchcast predict --home-team <name> --away-team <name> [--match-id <id>]";

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let Some(command) = args.first() else {
        println!("{USAGE}");
        return Ok(());
    };

    let cfg = AppConfig::from_env();
    let service = PredictionService::from_config(&cfg);

    let json = match command.as_str() {
        "matches" => serde_json::to_string_pretty(&service.list_matches())
            .context("serialize match listing")?,
        "predict" => {
            let query = parse_predict_args(&args[1..])?;
            serde_json::to_string_pretty(&service.predict(&query))
                .context("serialize prediction")?
        }
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            return Ok(());
        }
        other => return Err(anyhow!("unknown command `{other}`\n{USAGE}")),
    };
    println!("{json}");
    Ok(())
}

fn parse_predict_args(args: &[String]) -> Result<PredictQuery> {
    let home_team = flag_value(args, "--home-team").context("--home-team is required")?;
    let away_team = flag_value(args, "--away-team").context("--away-team is required")?;
    let match_id = match flag_value(args, "--match-id") {
        Some(raw) => Some(
            raw.parse::<u64>()
                .with_context(|| format!("invalid --match-id `{raw}`"))?,
        ),
        None => None,
    };
    Ok(PredictQuery {
        home_team,
        away_team,
        match_id,
    })
}

/// Value of `--flag value` or `--flag=value`. Another flag is never taken
/// as a value.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&prefix)
            && let Some(value) = usable_value(raw)
        {
            return Some(value);
        }
        if arg == flag
            && let Some(next) = args.get(idx + 1)
            && let Some(value) = usable_value(next)
        {
            return Some(value);
        }
    }
    None
}

fn usable_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with("--") {
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn both_flag_forms_are_accepted() {
        let query = parse_predict_args(&args(&[
            "--home-team",
            "Arsenal",
            "--away-team=Chelsea",
            "--match-id",
            "538001",
        ]))
        .unwrap();
        assert_eq!(query.home_team, "Arsenal");
        assert_eq!(query.away_team, "Chelsea");
        assert_eq!(query.match_id, Some(538001));
    }

    #[test]
    fn missing_value_does_not_swallow_the_next_flag() {
        let err = parse_predict_args(&args(&["--home-team", "--away-team", "Chelsea"]))
            .unwrap_err();
        assert!(err.to_string().contains("--home-team is required"), "{err}");
        assert_eq!(
            flag_value(&args(&["--home-team", "--away-team", "Chelsea"]), "--away-team"),
            Some("Chelsea".to_string())
        );
        assert_eq!(flag_value(&args(&["--home-team=--away-team"]), "--home-team"), None);
    }

    #[test]
    fn bad_match_id_is_rejected() {
        let err = parse_predict_args(&args(&[
            "--home-team",
            "A",
            "--away-team",
            "B",
            "--match-id",
            "abc",
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("invalid --match-id `abc`"));
    }
}

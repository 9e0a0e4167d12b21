mod common;

use chrono::NaiveDate;

use pitchcast::config::FootballDataConfig;
use pitchcast::error::{FetchError, HistoryError};
use pitchcast::gateway::{DataMode, MatchDataGateway, demo_matches};

use common::{FakeSource, read_fixture};

fn live(source: FakeSource) -> MatchDataGateway {
    MatchDataGateway::new(DataMode::Live(Box::new(source)), &FootballDataConfig::default())
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 10).unwrap()
}

#[test]
fn scheduled_listing_queries_a_ten_day_window() {
    let source = FakeSource::new().with_matches(Ok(read_fixture("scheduled_matches.json")));
    let calls = source.calls.clone();
    let gateway = live(source);

    let matches = gateway.list_scheduled_matches_from(today());
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].id, 538001);

    let calls = calls.lock().unwrap();
    assert_eq!(
        calls.as_slice(),
        ["matches status=SCHEDULED from=2025-12-10 to=2025-12-20 competitions=2021"]
    );
}

#[test]
fn competition_filter_can_be_disabled() {
    let source = FakeSource::new();
    let calls = source.calls.clone();
    let cfg = FootballDataConfig {
        competitions: None,
        window_days: 3,
        ..FootballDataConfig::default()
    };
    let gateway = MatchDataGateway::new(DataMode::Live(Box::new(source)), &cfg);

    assert!(gateway.list_scheduled_matches_from(today()).is_empty());
    assert_eq!(
        calls.lock().unwrap().as_slice(),
        ["matches status=SCHEDULED from=2025-12-10 to=2025-12-13 competitions=-"]
    );
}

#[test]
fn listing_failures_degrade_to_empty() {
    let failures = [
        Err(FetchError::RateLimited),
        Err(FetchError::Transport("request timed out".to_string())),
        Err(FetchError::Status {
            status: 503,
            snippet: "maintenance".to_string(),
        }),
        Ok("<html>not json</html>".to_string()),
    ];
    for reply in failures {
        let gateway = live(FakeSource::new().with_matches(reply));
        assert!(gateway.list_scheduled_matches_from(today()).is_empty());
    }
}

#[test]
fn demo_mode_serves_fixed_fixtures() {
    let gateway = MatchDataGateway::from_config(&FootballDataConfig::default());
    assert!(gateway.is_demo());

    let matches = gateway.list_scheduled_matches();
    assert_eq!(matches, demo_matches());
    let ids = matches.iter().map(|m| m.id).collect::<Vec<_>>();
    assert_eq!(ids, [1001_u64, 1002]);
    assert_eq!(matches[0].home_team.name, "Arsenal");
    assert_eq!(matches[1].away_team.name, "Man City");

    assert!(gateway.get_match_by_id(1001).is_none());
    assert!(gateway.get_match_by_id(42).is_none());
    assert!(matches!(
        gateway.get_team_recent_matches(57),
        Err(HistoryError::Unavailable(_))
    ));
}

#[test]
fn match_lookup_resolves_participants() {
    let gateway = live(FakeSource::new().with_detail(538001, Ok(read_fixture("match_detail.json"))));
    let m = gateway.get_match_by_id(538001).expect("match resolves");
    assert_eq!((m.home_team.id, m.away_team.id), (57, 61));
}

#[test]
fn match_lookup_is_absent_on_throttle_or_missing() {
    let gateway = live(
        FakeSource::new()
            .with_detail(1, Err(FetchError::RateLimited))
            .with_detail(2, Err(FetchError::NotFound))
            .with_detail(3, Err(FetchError::Transport("connection reset".to_string())))
            .with_detail(4, Ok("{broken".to_string()))
            .with_detail(5, Ok("null".to_string())),
    );
    for id in 1..=5 {
        assert!(gateway.get_match_by_id(id).is_none(), "match {id} should be absent");
    }
}

#[test]
fn team_history_uses_finished_status_and_limit() {
    let source = FakeSource::new().with_team(57, Ok(read_fixture("team_matches.json")));
    let calls = source.calls.clone();
    let gateway = live(source);

    let history = gateway.get_team_recent_matches(57).expect("history");
    assert_eq!(history.len(), 7);
    assert_eq!(
        calls.lock().unwrap().as_slice(),
        ["team 57 status=FINISHED limit=10"]
    );
}

#[test]
fn team_history_distinguishes_throttle_from_no_data() {
    let gateway = live(
        FakeSource::new()
            .with_team(1, Err(FetchError::RateLimited))
            .with_team(2, Ok("{\"matches\":[]}".to_string()))
            .with_team(3, Err(FetchError::Transport("timed out".to_string())))
            .with_team(4, Ok("not json".to_string())),
    );

    assert_eq!(gateway.get_team_recent_matches(1), Err(HistoryError::RateLimited));
    assert_eq!(gateway.get_team_recent_matches(2), Ok(Vec::new()));
    assert!(matches!(
        gateway.get_team_recent_matches(3),
        Err(HistoryError::Unavailable(_))
    ));
    assert!(matches!(
        gateway.get_team_recent_matches(4),
        Err(HistoryError::Unavailable(_))
    ));
}

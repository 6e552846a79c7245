use chartwatch::{
    ChartSize, DashError, Dashboard, DashboardConfig, LoadOutcome, MemSource, Metric, WeekId, load_configured,
    load_weeks,
};

fn manifest(weeks: &[&str]) -> String {
    let weeks: Vec<String> = weeks.iter().map(|w| format!("{w:?}")).collect();
    format!(r#"{{"songs_dir": "charts", "weeks": [{}]}}"#, weeks.join(", "))
}

fn source(weeks: &[(&str, &str)]) -> MemSource {
    let mut src = MemSource::default();
    let names: Vec<&str> = weeks.iter().map(|(w, _)| *w).collect();
    src.insert("manifest.json", manifest(&names).into_bytes());
    for (week, body) in weeks {
        src.insert(format!("charts/{week}.json"), body.as_bytes().to_vec());
    }
    src
}

const WEEK_A: &str = r#"[
    {"week": "2017-01-05", "artist": "Drake, Future", "song": "Used to This", "rank": 0, "streams": "1,000,000"},
    {"week": "2017-01-05", "artist": "Ed Sheeran", "song": "Shape of You", "rank": 1, "streams": "500,000"}
]"#;

const WEEK_B: &str = r#"[
    {"week": "2017-01-12", "artist": "Ed Sheeran", "song": "Shape of You", "rank": 0, "streams": "2,000,000"}
]"#;

#[test]
fn two_weeks_end_to_end() {
    // listed out of date order on purpose
    let src = source(&[("2017-01-12", WEEK_B), ("2017-01-05", WEEK_A)]);
    let config = DashboardConfig::from_source(&src).unwrap();
    let dashboard = Dashboard::load(&src, &config).unwrap();

    let view = dashboard.view().unwrap();
    let weeks: Vec<&str> = view.aggregates.iter().map(|a| a.week.as_str()).collect();
    assert_eq!(weeks, ["2017-01-05", "2017-01-12"]);
    let totals: Vec<u64> = view.aggregates.iter().map(|a| a.total_streams).collect();
    assert_eq!(totals, [1_500_000, 2_000_000]);

    assert_eq!(view.top_songs.len(), 1);
    assert_eq!(view.top_songs[0].song, "Shape of You");
    assert_eq!(view.top_songs[0].position, 1);
}

#[test]
fn filters_flow_through_the_view() {
    let src = source(&[("2017-01-05", WEEK_A), ("2017-01-12", WEEK_B)]);
    let config = DashboardConfig::from_source(&src).unwrap();
    let mut dashboard = Dashboard::load(&src, &config).unwrap();

    dashboard.select_artist("Future").unwrap();
    let view = dashboard.view().unwrap();
    assert_eq!(view.title, "Listening Trends For Future");
    assert_eq!(view.aggregates.len(), 1);
    assert_eq!(view.aggregates[0].total_streams, 1_000_000);

    dashboard.select_artist("all").unwrap();
    dashboard.select_time_range("2017-01-1").unwrap();
    dashboard.select_metric("rank").unwrap();
    let view = dashboard.view().unwrap();
    assert_eq!(view.aggregates.len(), 1);
    assert_eq!(view.metric, Metric::Rank);

    let svg = view.trend_svg(ChartSize::default()).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("Rank 0.0"));

    dashboard.select_artist("Nobody").unwrap();
    assert!(matches!(dashboard.view(), Err(DashError::NoData)));
}

#[test]
fn average_rank_ignores_top_ten_truncation() {
    let rows: Vec<String> = (0..12)
        .map(|rank| format!(
            r#"{{"week": "2017-01-05", "artist": "A", "song": "s{rank}", "rank": {rank}, "streams": "1"}}"#
        ))
        .collect();
    let body = format!("[{}]", rows.join(","));
    let src = source(&[("2017-01-05", &body)]);
    let config = DashboardConfig::from_source(&src).unwrap();

    let view = Dashboard::load(&src, &config).unwrap().view().unwrap();
    let week = &view.aggregates[0];
    assert_eq!(week.songs.len(), 10);
    assert_eq!(week.record_count, 12);
    assert!((week.average_rank - 5.5).abs() < 1e-9);
    assert_eq!(view.top_songs.len(), 10);
}

#[test]
fn one_missing_week_fails_strict_load() {
    let mut src = source(&[("2017-01-05", WEEK_A)]);
    src.insert("manifest.json", manifest(&["2017-01-05", "2017-01-12"]).into_bytes());
    let config = DashboardConfig::from_source(&src).unwrap();

    match Dashboard::load(&src, &config) {
        Err(DashError::LoadFailed { weeks, .. }) => assert_eq!(weeks, ["2017-01-12"]),
        other => panic!("expected LoadFailed, got {other:?}"),
    }

    let outcome = load_configured(&src, &config).unwrap();
    assert!(matches!(outcome, LoadOutcome::Partial { .. }));
    assert_eq!(outcome.failures().len(), 1);
    assert_eq!(outcome.into_partial().unwrap().len(), 2);
}

#[test]
fn malformed_streams_fail_loudly() {
    let bad = r#"[{"week": "2017-01-05", "artist": "A", "song": "s", "rank": 0, "streams": "1.000.000"}]"#;
    let src = source(&[("2017-01-05", bad)]);
    let config = DashboardConfig::from_source(&src).unwrap();
    let weeks = [WeekId::parse("2017-01-05").unwrap()];

    let outcome = load_weeks(&src, &config, &weeks);
    let failures = outcome.failures();
    assert_eq!(failures.len(), 1);
    assert!(matches!(failures[0].error, DashError::MalformedField { field: "streams", .. }));
}

#[test]
fn artists_are_split_and_sorted() {
    let src = source(&[("2017-01-05", WEEK_A), ("2017-01-12", WEEK_B)]);
    let config = DashboardConfig::from_source(&src).unwrap();
    let dashboard = Dashboard::load(&src, &config).unwrap();
    assert_eq!(dashboard.artists().to_vec(), ["Drake", "Ed Sheeran", "Future"]);
}

use funnel_rs::core::{RawEventCounts, StageCounts, stage_counts};
use funnel_rs::ingest::{
    CountOrigin, CountSource, default_stage_counts, resolve_counts, resolve_upload,
};

const EVENT_EXPORT: &str = "\
# Firebase export
Event name,Event count
first_open,1000
level_end,400
in_app_purchase,20
app_remove,150
session_start,3000
";

fn defaults() -> StageCounts {
    stage_counts([("Open", 100.0), ("Play", 80.0), ("Win", 30.0)])
}

#[test]
fn generic_csv_takes_priority() {
    let resolution = resolve_counts(
        &CountSource::upload("stage,count\nA,100\nB,50\n"),
        &defaults(),
        RawEventCounts::default(),
    );

    assert_eq!(resolution.origin, CountOrigin::GenericCsv);
    assert_eq!(resolution.counts, stage_counts([("A", 100.0), ("B", 50.0)]));
    assert_eq!(resolution.raw_events, RawEventCounts::default());
    assert!(resolution.warning.is_none());
}

#[test]
fn event_overview_is_the_fallback_parser() {
    let resolution = resolve_counts(
        &CountSource::upload(EVENT_EXPORT),
        &defaults(),
        RawEventCounts::default(),
    );

    assert_eq!(resolution.origin, CountOrigin::EventOverview);
    assert_eq!(
        resolution.counts,
        stage_counts([
            ("Installs", 1000.0),
            ("Level Completed", 400.0),
            ("In-App Purchase", 20.0),
            ("Uninstall", 150.0),
        ])
    );
    assert_eq!(resolution.raw_events.session_start, 3000.0);
}

#[test]
fn malformed_upload_falls_back_to_default_with_warning() {
    let resolution = resolve_counts(
        &CountSource::upload("foo,bar\n1,2\n"),
        &defaults(),
        RawEventCounts::default(),
    );

    assert_eq!(resolution.origin, CountOrigin::Default);
    assert_eq!(resolution.counts, defaults());
    let warning = resolution.warning.expect("warning for rejected upload");
    assert!(warning.starts_with("Could not read CSV"));
}

#[test]
fn event_table_without_funnel_events_falls_back() {
    let resolution = resolve_counts(
        &CountSource::upload("Event name,Event count\nscreen_view,10\n"),
        &defaults(),
        RawEventCounts::default(),
    );

    assert_eq!(resolution.origin, CountOrigin::Default);
    assert!(resolution.warning.is_some());
}

#[test]
fn empty_upload_slot_uses_defaults_silently() {
    let resolution = resolve_counts(
        &CountSource::Upload { contents: None },
        &defaults(),
        RawEventCounts::default(),
    );

    assert_eq!(resolution.origin, CountOrigin::Default);
    assert_eq!(resolution.counts, defaults());
    assert!(resolution.warning.is_none());
}

#[test]
fn manual_edits_replace_counts_but_not_stage_order() {
    let mut edits = StageCounts::new();
    edits.insert("Win".to_owned(), 45.0);
    edits.insert("Unknown".to_owned(), 1.0);
    edits.insert("Open".to_owned(), 120.0);

    let resolution = resolve_counts(
        &CountSource::Manual { edits },
        &defaults(),
        RawEventCounts::default(),
    );

    assert_eq!(resolution.origin, CountOrigin::Manual);
    assert_eq!(
        resolution.counts,
        stage_counts([("Open", 120.0), ("Play", 80.0), ("Win", 45.0)])
    );
}

#[test]
fn nonzero_manual_event_overrides_win_over_parsed_counts() {
    let overrides = RawEventCounts {
        first_open: 2000.0,
        session_start: 0.0,
        ..RawEventCounts::default()
    };
    let resolution = resolve_counts(&CountSource::upload(EVENT_EXPORT), &defaults(), overrides);

    assert_eq!(resolution.raw_events.first_open, 2000.0);
    assert_eq!(resolution.raw_events.level_end, 400.0);
    assert_eq!(resolution.raw_events.session_start, 3000.0);
}

#[test]
fn overrides_apply_when_upload_has_no_event_counts() {
    let overrides = RawEventCounts {
        first_open: 10.0,
        level_end: 5.0,
        ..RawEventCounts::default()
    };
    let resolution = resolve_counts(&CountSource::manual(), &defaults(), overrides);

    assert_eq!(resolution.raw_events.first_open, 10.0);
    assert_eq!(resolution.raw_events.level_end, 5.0);
    assert_eq!(resolution.raw_events.app_remove, 0.0);
}

#[test]
fn resolve_upload_reports_format_error_for_unrecognized_text() {
    assert!(resolve_upload("just some text\nwithout tables\n").is_err());
}

#[test]
fn built_in_default_funnel_has_eight_stages() {
    let counts = default_stage_counts();

    assert_eq!(counts.len(), 8);
    assert_eq!(counts.get_index(0), Some((&"Install → Open".to_owned(), &10_000.0)));
    assert_eq!(
        counts.get_index(7),
        Some((&"Episode 1 Complete (D0)".to_owned(), &4_200.0))
    );
}

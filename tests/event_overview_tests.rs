use funnel_rs::FunnelError;
use funnel_rs::core::RawEventCounts;
use funnel_rs::ingest::{EVENT_FUNNEL_STAGES, parse_event_overview};

const FIREBASE_EXPORT: &str = "\
# ----------------------------------------
# Firebase Analytics overview
# 20240101-20240131
# ----------------------------------------

Nth day,Users
0000,812
0001,640

Event name,Event count
session_start,3000
first_open,1000
level_end,400
in_app_purchase,20
app_remove,150
screen_view,9000

# ----------------------------------------
Event name,Event count
first_open,99999
";

#[test]
fn projects_fixed_four_stage_funnel() {
    let overview = parse_event_overview(
        "Event name,Event count\nfirst_open,1000\nlevel_end,400\nin_app_purchase,20\napp_remove,150\n",
    )
    .expect("event table");
    let funnel = overview.funnel();

    let entries: Vec<(&str, f64)> = funnel.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(
        entries,
        vec![
            ("Installs", 1000.0),
            ("Level Completed", 400.0),
            ("In-App Purchase", 20.0),
            ("Uninstall", 150.0),
        ]
    );
}

#[test]
fn funnel_order_ignores_export_row_order() {
    let overview = parse_event_overview(FIREBASE_EXPORT).expect("event table");
    let funnel = overview.funnel();
    let stages: Vec<&str> = funnel.keys().map(String::as_str).collect();
    let expected: Vec<&str> = EVENT_FUNNEL_STAGES.iter().map(|(stage, _)| *stage).collect();
    assert_eq!(stages, expected);
}

#[test]
fn only_first_block_is_read_and_stops_at_blank_line() {
    let overview = parse_event_overview(FIREBASE_EXPORT).expect("event table");

    assert_eq!(overview.count("first_open"), 1000.0);
    assert_eq!(overview.count("screen_view"), 9000.0);
    assert_eq!(overview.events.len(), 6);
}

#[test]
fn session_start_feeds_raw_counts_but_not_funnel() {
    let overview = parse_event_overview(FIREBASE_EXPORT).expect("event table");

    assert_eq!(
        overview.raw_counts(),
        RawEventCounts {
            first_open: 1000.0,
            level_end: 400.0,
            in_app_purchase: 20.0,
            app_remove: 150.0,
            session_start: 3000.0,
        }
    );
    assert!(!overview.funnel().keys().any(|stage| stage.contains("session")));
}

#[test]
fn duplicate_event_names_are_summed() {
    let overview = parse_event_overview(
        "Event name,Event count\nfirst_open,500\nlevel_end,100\nLEVEL_END,50\n",
    )
    .expect("event table");

    assert_eq!(overview.count("level_end"), 150.0);
    assert_eq!(overview.funnel().get("Level Completed"), Some(&150.0));
}

#[test]
fn header_match_ignores_case_and_whitespace() {
    let overview = parse_event_overview("  EVENT NAME , event  count \nfirst_open,7\n")
        .expect("event table");
    assert_eq!(overview.count("first_open"), 7.0);
}

#[test]
fn comment_line_ends_the_block() {
    let overview = parse_event_overview(
        "Event name,Event count\nfirst_open,10\n# trailer\nlevel_end,5\n",
    )
    .expect("event table");

    assert_eq!(overview.count("first_open"), 10.0);
    assert_eq!(overview.count("level_end"), 0.0);
}

#[test]
fn malformed_rows_are_skipped() {
    let overview = parse_event_overview(
        "Event name,Event count\nfirst_open,abc\nlonely\n,,level_end,,40\napp_remove,\"12\"\n",
    )
    .expect("event table");

    assert_eq!(overview.count("first_open"), 0.0);
    assert_eq!(overview.count("level_end"), 40.0);
    assert_eq!(overview.count("app_remove"), 12.0);
    assert!(!overview.events.contains_key("lonely"));
}

#[test]
fn funnel_without_signal_is_empty() {
    let overview = parse_event_overview(
        "Event name,Event count\nsession_start,300\nfirst_open,0\nscreen_view,12\n",
    )
    .expect("event table");

    assert!(overview.funnel().is_empty());
    assert_eq!(overview.raw_counts().session_start, 300.0);
}

#[test]
fn missing_events_read_as_zero_stages() {
    let overview =
        parse_event_overview("Event name,Event count\nlevel_end,40\n").expect("event table");
    let funnel = overview.funnel();

    assert_eq!(funnel.len(), 4);
    assert_eq!(funnel.get("Installs"), Some(&0.0));
    assert_eq!(funnel.get("Level Completed"), Some(&40.0));
}

#[test]
fn missing_header_is_format_error() {
    let err = parse_event_overview("stage,count\nA,1\n").expect_err("no event table");
    assert!(matches!(err, FunnelError::Format(_)));
}

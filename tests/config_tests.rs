use funnel_rs::FunnelError;
use funnel_rs::api::DashboardConfig;
use funnel_rs::charts::{ChartSelection, ChartStyle, ConversionChartKind};
use funnel_rs::core::{Stage, Viewport};

#[test]
fn empty_json_yields_defaults() {
    let config = DashboardConfig::from_json_str("{}").expect("config");

    assert_eq!(config.title, "Safari City: Early Funnel Dashboard");
    assert_eq!(config.default_stages.len(), 8);
    assert_eq!(config.chart_viewport, Viewport::new(800, 450));
    assert_eq!(config.kpi_viewport, Viewport::new(1200, 260));
    assert_eq!(config.insight_limit, 3);
    assert_eq!(config.charts, ChartSelection::default());
}

#[test]
fn config_json_round_trips() {
    let config = DashboardConfig::default()
        .with_title("Puzzle Quest")
        .with_default_stages(vec![Stage::new("Open", 500.0), Stage::new("Win", 125.0)])
        .with_charts(ChartSelection::default().with_conversion(ConversionChartKind::FunnelArea))
        .with_chart_viewport(Viewport::new(640, 360))
        .with_insight_limit(5)
        .with_style(ChartStyle::default().with_title_prefix("Puzzle Quest"));

    let json = config.to_json_pretty().expect("serialize");
    let restored = DashboardConfig::from_json_str(&json).expect("parse");

    assert_eq!(restored.title, config.title);
    assert_eq!(restored.default_stages, config.default_stages);
    assert_eq!(restored.charts, config.charts);
    assert_eq!(restored.chart_viewport, config.chart_viewport);
    assert_eq!(restored.insight_limit, 5);
    assert_eq!(restored.style.title_prefix.as_deref(), Some("Puzzle Quest"));
    assert_eq!(restored.style.font_size_px, 12.0);
}

#[test]
fn partial_style_keeps_remaining_defaults() {
    let config =
        DashboardConfig::from_json_str(r#"{"style":{"font_size_px":14.0}}"#).expect("config");

    assert_eq!(config.style.font_size_px, 14.0);
    assert_eq!(config.style.margin_px, ChartStyle::default().margin_px);
}

#[test]
fn duplicate_stage_names_are_rejected() {
    let config = DashboardConfig::default()
        .with_default_stages(vec![Stage::new("Open", 10.0), Stage::new("Open", 5.0)]);
    let err = config.validate().expect_err("duplicate");
    assert!(matches!(err, FunnelError::Config(message) if message.contains("duplicate")));
}

#[test]
fn invalid_values_are_rejected() {
    assert!(
        DashboardConfig::default()
            .with_chart_viewport(Viewport::new(0, 450))
            .validate()
            .is_err()
    );
    assert!(
        DashboardConfig::default()
            .with_insight_limit(0)
            .validate()
            .is_err()
    );
    assert!(
        DashboardConfig::default()
            .with_default_stages(vec![Stage::new("  ", 1.0)])
            .validate()
            .is_err()
    );
    assert!(
        DashboardConfig::default()
            .with_default_stages(vec![Stage::new("Open", f64::INFINITY)])
            .validate()
            .is_err()
    );
}

#[test]
fn malformed_json_is_config_error() {
    let err = DashboardConfig::from_json_str("{ not json").expect_err("malformed");
    assert!(matches!(err, FunnelError::Config(_)));
}

#[test]
fn unknown_chart_kind_in_json_is_rejected() {
    assert!(DashboardConfig::from_json_str(r#"{"charts":{"counts":"Pie"}}"#).is_err());
}

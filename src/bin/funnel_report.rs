use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum, ValueHint};
use funnel_rs::api::{Dashboard, DashboardConfig, DashboardInput, DashboardSnapshot};
use funnel_rs::charts::{ChartSelection, ConversionChartKind, CountsChartKind};
use funnel_rs::core::{RawEventCounts, format_count_short, format_pct};
use funnel_rs::render::NullRenderer;
use funnel_rs::telemetry::init_default_tracing;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "funnel_report",
    about = "Compute funnel conversion metrics and KPIs from a CSV export"
)]
struct Cli {
    /// `stage,count` table or analytics event-overview export.
    #[arg(long, value_hint = ValueHint::FilePath)]
    csv: Option<PathBuf>,

    /// Dashboard config JSON (default stages, chart styles, viewports).
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Counts chart: Bar, Funnel, Lollipop or Waterfall.
    #[arg(long)]
    counts_chart: Option<CountsChartKind>,

    /// Conversion chart: Bar, "Funnel Area" or Slope.
    #[arg(long)]
    conversion_chart: Option<ConversionChartKind>,

    #[arg(long, default_value_t = 0.0)]
    first_open: f64,

    #[arg(long, default_value_t = 0.0)]
    level_end: f64,

    #[arg(long, default_value_t = 0.0)]
    in_app_purchase: f64,

    #[arg(long, default_value_t = 0.0)]
    app_remove: f64,

    #[arg(long, default_value_t = 0.0)]
    session_start: f64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let _ = init_default_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config `{}`", path.display()))?;
            DashboardConfig::from_json_str(&raw)?
        }
        None => DashboardConfig::default(),
    };

    let mut input = match &cli.csv {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read csv `{}`", path.display()))?;
            DashboardInput::upload(raw)
        }
        None => DashboardInput::manual(),
    };
    input = input.with_event_overrides(RawEventCounts {
        first_open: cli.first_open,
        level_end: cli.level_end,
        in_app_purchase: cli.in_app_purchase,
        app_remove: cli.app_remove,
        session_start: cli.session_start,
    });
    let mut charts = config.charts;
    if let Some(kind) = cli.counts_chart {
        charts = charts.with_counts(kind);
    }
    if let Some(kind) = cli.conversion_chart {
        charts = charts.with_conversion(kind);
    }
    input = input.with_charts(charts);

    let mut dashboard = Dashboard::new(NullRenderer::default(), config)?;
    let snapshot = dashboard.compute(&input);
    let frames = dashboard.render(&snapshot)?;
    info!(
        frames = dashboard.renderer().frames_rendered,
        "rendered dashboard frames"
    );

    match cli.format {
        OutputFormat::Json => println!("{}", snapshot.to_json_contract_v1_pretty()?),
        OutputFormat::Text => {
            print_text_report(&snapshot);
            println!();
            println!("Frames");
            for (name, frame) in ["counts", "conversion", "distribution", "kpis", "events"]
                .into_iter()
                .zip(frames.iter())
            {
                println!("  {name:<13} {:>4} primitives", frame.primitive_count());
            }
        }
    }

    Ok(())
}

fn print_text_report(snapshot: &DashboardSnapshot) {
    println!("{}", snapshot.title);
    println!("source: {:?}", snapshot.origin);
    if let Some(warning) = &snapshot.warning {
        println!("warning: {warning}");
    }

    println!();
    println!(
        "{:<28} {:>8} {:>10} {:>10} {:>10}",
        "Stage", "Count", "From prev", "From start", "Drop"
    );
    for row in &snapshot.rows {
        println!(
            "{:<28} {:>8} {:>10} {:>10} {:>10}",
            row.stage,
            format_count_short(row.count),
            format_pct(row.conv_from_prev),
            format_pct(row.conv_from_start),
            format_pct(row.drop_from_prev),
        );
    }

    let kpis = &snapshot.kpis;
    println!();
    println!("Level completion: {:.1}%", kpis.level_completion_pct);
    println!("Purchase rate:    {:.1}%", kpis.purchase_pct);
    println!("Uninstall rate:   {:.1}%", kpis.uninstall_pct);
    println!("Sessions/player:  {:.2}", kpis.avg_sessions_per_player);

    println!();
    println!("Key Insights");
    for message in snapshot.insights.messages() {
        println!("- {message}");
    }

    let ChartSelection {
        counts, conversion, ..
    } = snapshot.charts;
    println!();
    println!("Charts: counts={counts}, conversion={conversion}");
}

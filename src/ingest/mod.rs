//! Count source resolution: manual edits, generic `stage,count` CSV, and
//! analytics event-overview exports.

mod defaults;
mod event_overview;
mod generic_csv;
mod resolver;

pub use defaults::{default_stage_counts, default_stages, stages_to_counts};
pub use event_overview::{EVENT_FUNNEL_STAGES, EventOverview, parse_event_overview};
pub use generic_csv::parse_stage_count_csv;
pub use resolver::{CountOrigin, CountSource, Resolution, resolve_counts, resolve_upload};

/// Parses one count cell; rejects empty, non-numeric and non-finite values.
fn parse_count(raw: &str) -> Option<f64> {
    let value = raw.trim().trim_matches('"').trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

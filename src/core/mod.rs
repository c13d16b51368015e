pub mod format;
pub mod funnel;
pub(crate) mod json_float;
pub mod kpi;
pub mod scale;
pub mod types;

pub use format::{format_count_short, format_pct};
pub use funnel::{
    ConversionPoint, FunnelRow, compute_funnel, conversion_pcts, drop_counts, drop_shares,
};
pub use kpi::{KpiSummary, RawEventCounts, derive_kpis};
pub use scale::LinearScale;
pub use types::{Stage, StageCounts, Viewport, stage_counts};

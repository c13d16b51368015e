//! funnel-rs: funnel conversion metrics and backend-agnostic funnel charts.
//!
//! Stage counts are resolved from manual input or CSV uploads (`ingest`),
//! turned into conversion/drop tables and KPIs (`core`), and drawn into
//! deterministic render frames (`charts`, `render`). `api::Dashboard` ties
//! the pipeline together for hosts.

pub mod api;
pub mod charts;
pub mod core;
pub mod error;
pub mod ingest;
pub mod render;
pub mod telemetry;

pub use api::{Dashboard, DashboardConfig, DashboardInput, DashboardSnapshot};
pub use error::{FunnelError, FunnelResult};

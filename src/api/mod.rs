mod config;
mod dashboard;
mod input;
mod insights;
mod snapshot;

pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardFrames};
pub use input::DashboardInput;
pub use insights::{DropInsight, Insights, NOT_ENOUGH_STAGES_MESSAGE, largest_drops};
pub use snapshot::{
    DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1, DashboardSnapshot, DashboardSnapshotJsonContractV1,
    StageDrop,
};

use serde::{Deserialize, Serialize};

use crate::charts::ChartSelection;
use crate::core::{ConversionPoint, FunnelRow, KpiSummary, RawEventCounts};
use crate::error::{FunnelError, FunnelResult};
use crate::ingest::CountOrigin;

use super::Insights;

pub const DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Absolute and relative players lost entering a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDrop {
    pub stage: String,
    #[serde(with = "crate::core::json_float")]
    pub drop_count: f64,
    #[serde(with = "crate::core::json_float")]
    pub drop_share: f64,
}

/// Serializable result of one full recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub title: String,
    pub origin: CountOrigin,
    pub warning: Option<String>,
    pub rows: Vec<FunnelRow>,
    pub drops: Vec<StageDrop>,
    pub conversions: Vec<ConversionPoint>,
    pub raw_events: RawEventCounts,
    pub kpis: KpiSummary,
    pub insights: Insights,
    pub charts: ChartSelection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: DashboardSnapshot,
}

impl DashboardSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> FunnelResult<String> {
        let payload = DashboardSnapshotJsonContractV1 {
            schema_version: DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            FunnelError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or the versioned envelope.
    pub fn from_json_compat_str(input: &str) -> FunnelResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<DashboardSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: DashboardSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                FunnelError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(FunnelError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

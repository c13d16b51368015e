use crate::charts::ChartSelection;
use crate::core::RawEventCounts;
use crate::ingest::CountSource;

/// Immutable snapshot of everything a user has entered.
///
/// Hosts own their widget state and build one of these per recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardInput {
    pub source: CountSource,
    /// Manually entered event counters; nonzero values override parsed ones.
    pub event_overrides: RawEventCounts,
    /// Chart styles for this pass; `None` uses the configured selection.
    pub charts: Option<ChartSelection>,
}

impl DashboardInput {
    #[must_use]
    pub fn new(source: CountSource) -> Self {
        Self {
            source,
            event_overrides: RawEventCounts::default(),
            charts: None,
        }
    }

    /// Manual mode with the default counts.
    #[must_use]
    pub fn manual() -> Self {
        Self::new(CountSource::manual())
    }

    #[must_use]
    pub fn upload(contents: impl Into<String>) -> Self {
        Self::new(CountSource::upload(contents))
    }

    /// Replaces one stage's count in manual mode. No-op for uploads.
    #[must_use]
    pub fn with_stage_count(mut self, stage: impl Into<String>, count: f64) -> Self {
        if let CountSource::Manual { edits } = &mut self.source {
            edits.insert(stage.into(), count);
        }
        self
    }

    #[must_use]
    pub fn with_event_overrides(mut self, overrides: RawEventCounts) -> Self {
        self.event_overrides = overrides;
        self
    }

    #[must_use]
    pub fn with_charts(mut self, charts: ChartSelection) -> Self {
        self.charts = Some(charts);
        self
    }
}

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::charts::{ChartSelection, ChartStyle};
use crate::core::{Stage, Viewport};
use crate::error::{FunnelError, FunnelResult};
use crate::ingest::default_stages;

/// Dashboard bootstrap configuration.
///
/// Serializable so hosts can keep their funnel definition and chart setup in
/// a JSON file. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Stage names and counts used by manual mode and as the upload fallback.
    #[serde(default = "default_stages")]
    pub default_stages: Vec<Stage>,
    #[serde(default)]
    pub charts: ChartSelection,
    #[serde(default = "default_chart_viewport")]
    pub chart_viewport: Viewport,
    #[serde(default = "default_kpi_viewport")]
    pub kpi_viewport: Viewport,
    #[serde(default = "default_insight_limit")]
    pub insight_limit: usize,
    #[serde(default)]
    pub style: ChartStyle,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: default_title(),
            default_stages: default_stages(),
            charts: ChartSelection::default(),
            chart_viewport: default_chart_viewport(),
            kpi_viewport: default_kpi_viewport(),
            insight_limit: default_insight_limit(),
            style: ChartStyle::default(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces the fixed manual/fallback funnel.
    #[must_use]
    pub fn with_default_stages(mut self, stages: Vec<Stage>) -> Self {
        self.default_stages = stages;
        self
    }

    #[must_use]
    pub fn with_charts(mut self, charts: ChartSelection) -> Self {
        self.charts = charts;
        self
    }

    #[must_use]
    pub fn with_chart_viewport(mut self, viewport: Viewport) -> Self {
        self.chart_viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_kpi_viewport(mut self, viewport: Viewport) -> Self {
        self.kpi_viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_insight_limit(mut self, limit: usize) -> Self {
        self.insight_limit = limit;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> FunnelResult<()> {
        if self.default_stages.is_empty() {
            return Err(FunnelError::Config(
                "default funnel needs at least one stage".to_owned(),
            ));
        }
        let mut seen = HashSet::with_capacity(self.default_stages.len());
        for stage in &self.default_stages {
            if stage.name.trim().is_empty() {
                return Err(FunnelError::Config(
                    "stage names must not be empty".to_owned(),
                ));
            }
            if !seen.insert(stage.name.as_str()) {
                return Err(FunnelError::Config(format!(
                    "duplicate stage name `{}`",
                    stage.name
                )));
            }
            if !stage.count.is_finite() {
                return Err(FunnelError::Config(format!(
                    "default count for `{}` must be finite",
                    stage.name
                )));
            }
        }
        for (name, viewport) in [
            ("chart_viewport", self.chart_viewport),
            ("kpi_viewport", self.kpi_viewport),
        ] {
            if !viewport.is_valid() {
                return Err(FunnelError::Config(format!(
                    "`{name}` must be non-zero, got {}x{}",
                    viewport.width, viewport.height
                )));
            }
        }
        if self.insight_limit == 0 {
            return Err(FunnelError::Config(
                "insight_limit must be > 0".to_owned(),
            ));
        }
        self.style.validate()
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> FunnelResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FunnelError::Config(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> FunnelResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| FunnelError::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_title() -> String {
    "Safari City: Early Funnel Dashboard".to_owned()
}

fn default_chart_viewport() -> Viewport {
    Viewport::new(800, 450)
}

fn default_kpi_viewport() -> Viewport {
    Viewport::new(1200, 260)
}

fn default_insight_limit() -> usize {
    3
}

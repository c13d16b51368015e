//! Chart strategies turning funnel rows and KPIs into render frames.
//!
//! Each chart family is a tagged enum whose variants map to a frame builder
//! through a static strategy table, so hosts switch chart styles without
//! touching the metrics code.

pub mod conversion;
pub mod counts;
pub mod distribution;
pub mod events;
pub mod gauges;
mod layout;
mod style;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{FunnelRow, Viewport};
use crate::error::{FunnelError, FunnelResult};
use crate::render::RenderFrame;

pub use style::ChartStyle;

/// Builds one chart frame from the funnel table.
pub type FunnelFrameBuilder =
    fn(&[FunnelRow], &ChartStyle, Viewport) -> FunnelResult<RenderFrame>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountsChartKind {
    #[default]
    Bar,
    Funnel,
    Lollipop,
    Waterfall,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConversionChartKind {
    #[default]
    Bar,
    FunnelArea,
    Slope,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistributionChartKind {
    #[default]
    Donut,
}

static COUNTS_STRATEGIES: [(CountsChartKind, &str, FunnelFrameBuilder); 4] = [
    (CountsChartKind::Bar, "Bar", counts::build_bar),
    (CountsChartKind::Funnel, "Funnel", counts::build_funnel),
    (CountsChartKind::Lollipop, "Lollipop", counts::build_lollipop),
    (CountsChartKind::Waterfall, "Waterfall", counts::build_waterfall),
];

static CONVERSION_STRATEGIES: [(ConversionChartKind, &str, FunnelFrameBuilder); 3] = [
    (ConversionChartKind::Bar, "Bar", conversion::build_bar),
    (
        ConversionChartKind::FunnelArea,
        "Funnel Area",
        conversion::build_funnel_area,
    ),
    (ConversionChartKind::Slope, "Slope", conversion::build_slope),
];

static DISTRIBUTION_STRATEGIES: [(DistributionChartKind, &str, FunnelFrameBuilder); 1] = [(
    DistributionChartKind::Donut,
    "Donut",
    distribution::build_donut,
)];

/// Shared lookups over one strategy table.
trait ChartStrategy: Copy + PartialEq + 'static {
    const FAMILY: &'static str;

    fn table() -> &'static [(Self, &'static str, FunnelFrameBuilder)];

    fn entry(self) -> &'static (Self, &'static str, FunnelFrameBuilder) {
        let table = Self::table();
        table
            .iter()
            .find(|(kind, _, _)| *kind == self)
            .unwrap_or(&table[0])
    }

    fn parse_label(input: &str) -> FunnelResult<Self> {
        let wanted = normalize_label(input);
        Self::table()
            .iter()
            .find(|(_, label, _)| normalize_label(label) == wanted)
            .map(|(kind, _, _)| *kind)
            .ok_or_else(|| {
                FunnelError::InvalidData(format!("unknown {} chart `{input}`", Self::FAMILY))
            })
    }
}

impl ChartStrategy for CountsChartKind {
    const FAMILY: &'static str = "counts";

    fn table() -> &'static [(Self, &'static str, FunnelFrameBuilder)] {
        &COUNTS_STRATEGIES
    }
}

impl ChartStrategy for ConversionChartKind {
    const FAMILY: &'static str = "conversion";

    fn table() -> &'static [(Self, &'static str, FunnelFrameBuilder)] {
        &CONVERSION_STRATEGIES
    }
}

impl ChartStrategy for DistributionChartKind {
    const FAMILY: &'static str = "distribution";

    fn table() -> &'static [(Self, &'static str, FunnelFrameBuilder)] {
        &DISTRIBUTION_STRATEGIES
    }
}

/// Case-, space-, dash- and underscore-insensitive label key.
fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! chart_kind_api {
    ($kind:ty) => {
        impl $kind {
            /// Every variant, in selector order.
            #[must_use]
            pub fn all() -> impl Iterator<Item = $kind> {
                <$kind as ChartStrategy>::table().iter().map(|(kind, _, _)| *kind)
            }

            /// Label shown in chart selectors.
            #[must_use]
            pub fn label(self) -> &'static str {
                ChartStrategy::entry(self).1
            }

            #[must_use]
            pub fn builder(self) -> FunnelFrameBuilder {
                ChartStrategy::entry(self).2
            }

            pub fn build_frame(
                self,
                rows: &[FunnelRow],
                style: &ChartStyle,
                viewport: Viewport,
            ) -> FunnelResult<RenderFrame> {
                (self.builder())(rows, style, viewport)
            }
        }

        impl fmt::Display for $kind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $kind {
            type Err = FunnelError;

            fn from_str(input: &str) -> Result<Self, Self::Err> {
                <$kind as ChartStrategy>::parse_label(input)
            }
        }
    };
}

chart_kind_api!(CountsChartKind);
chart_kind_api!(ConversionChartKind);
chart_kind_api!(DistributionChartKind);

/// Chart styles picked for one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSelection {
    #[serde(default)]
    pub counts: CountsChartKind,
    #[serde(default)]
    pub conversion: ConversionChartKind,
    #[serde(default)]
    pub distribution: DistributionChartKind,
}

impl ChartSelection {
    #[must_use]
    pub fn with_counts(mut self, kind: CountsChartKind) -> Self {
        self.counts = kind;
        self
    }

    #[must_use]
    pub fn with_conversion(mut self, kind: ConversionChartKind) -> Self {
        self.conversion = kind;
        self
    }

    #[must_use]
    pub fn with_distribution(mut self, kind: DistributionChartKind) -> Self {
        self.distribution = kind;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartStrategy, CountsChartKind, normalize_label};

    #[test]
    fn label_key_ignores_case_and_separators() {
        assert_eq!(normalize_label("Funnel Area"), "funnelarea");
        assert_eq!(normalize_label("funnel_area"), "funnelarea");
        assert_eq!(normalize_label(" FUNNEL-area "), "funnelarea");
    }

    #[test]
    fn every_variant_has_a_table_entry() {
        for (kind, label, _) in CountsChartKind::table() {
            assert_eq!(kind.entry().1, *label);
        }
    }
}

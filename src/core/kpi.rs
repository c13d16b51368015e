use serde::{Deserialize, Serialize};

use crate::core::funnel::ratio_or_zero;

/// The five analytics event counters feeding the KPI deriver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEventCounts {
    #[serde(with = "crate::core::json_float")]
    pub first_open: f64,
    #[serde(with = "crate::core::json_float")]
    pub level_end: f64,
    #[serde(with = "crate::core::json_float")]
    pub in_app_purchase: f64,
    #[serde(with = "crate::core::json_float")]
    pub app_remove: f64,
    #[serde(with = "crate::core::json_float")]
    pub session_start: f64,
}

impl RawEventCounts {
    /// Merges manual overrides: any nonzero override wins over the parsed value.
    #[must_use]
    pub fn with_overrides(self, overrides: RawEventCounts) -> Self {
        let pick = |parsed: f64, manual: f64| if manual != 0.0 { manual } else { parsed };
        Self {
            first_open: pick(self.first_open, overrides.first_open),
            level_end: pick(self.level_end, overrides.level_end),
            in_app_purchase: pick(self.in_app_purchase, overrides.in_app_purchase),
            app_remove: pick(self.app_remove, overrides.app_remove),
            session_start: pick(self.session_start, overrides.session_start),
        }
    }

    /// `(event name, count)` pairs in display order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("first_open", self.first_open),
            ("level_end", self.level_end),
            ("in_app_purchase", self.in_app_purchase),
            ("app_remove", self.app_remove),
            ("session_start", self.session_start),
        ]
    }
}

/// Headline business ratios. Percentages are in `0..=100` scale and unrounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    #[serde(with = "crate::core::json_float")]
    pub level_completion_pct: f64,
    #[serde(with = "crate::core::json_float")]
    pub purchase_pct: f64,
    #[serde(with = "crate::core::json_float")]
    pub uninstall_pct: f64,
    #[serde(with = "crate::core::json_float")]
    pub avg_sessions_per_player: f64,
}

/// Derives KPIs relative to `first_open`; every output is `0` when it is zero.
#[must_use]
pub fn derive_kpis(events: &RawEventCounts) -> KpiSummary {
    let installs = events.first_open;
    KpiSummary {
        level_completion_pct: ratio_or_zero(events.level_end, installs) * 100.0,
        purchase_pct: ratio_or_zero(events.in_app_purchase, installs) * 100.0,
        uninstall_pct: ratio_or_zero(events.app_remove, installs) * 100.0,
        avg_sessions_per_player: ratio_or_zero(events.session_start, installs),
    }
}

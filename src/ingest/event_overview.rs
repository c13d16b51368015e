use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{RawEventCounts, StageCounts};
use crate::error::{FunnelError, FunnelResult};

use super::parse_count;

/// Header that opens the event table, compared after stripping all
/// whitespace and lowercasing.
const EVENT_TABLE_HEADER: &str = "eventname,eventcount";

/// Funnel stages projected from analytics events, in display order.
pub const EVENT_FUNNEL_STAGES: [(&str, &str); 4] = [
    ("Installs", "first_open"),
    ("Level Completed", "level_end"),
    ("In-App Purchase", "in_app_purchase"),
    ("Uninstall", "app_remove"),
];

/// Event table extracted from an analytics overview export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventOverview {
    /// Lowercased event name → summed count, in first-seen order.
    pub events: IndexMap<String, f64>,
}

impl EventOverview {
    /// Count for `event`, `0` when absent.
    #[must_use]
    pub fn count(&self, event: &str) -> f64 {
        self.events.get(event).copied().unwrap_or(0.0)
    }

    /// The five KPI counters; absent events read as zero.
    #[must_use]
    pub fn raw_counts(&self) -> RawEventCounts {
        RawEventCounts {
            first_open: self.count("first_open"),
            level_end: self.count("level_end"),
            in_app_purchase: self.count("in_app_purchase"),
            app_remove: self.count("app_remove"),
            session_start: self.count("session_start"),
        }
    }

    /// Fixed four-stage funnel, independent of the export's row order.
    ///
    /// Empty when none of the funnel events carries a nonzero count.
    #[must_use]
    pub fn funnel(&self) -> StageCounts {
        let has_signal = EVENT_FUNNEL_STAGES
            .iter()
            .any(|(_, event)| self.count(event) != 0.0);
        if !has_signal {
            return StageCounts::new();
        }

        EVENT_FUNNEL_STAGES
            .iter()
            .map(|(stage, event)| ((*stage).to_owned(), self.count(event)))
            .collect()
    }
}

/// Extracts the `Event name,Event count` block from a multi-section export.
///
/// Rows are read from the line after the header up to the first blank line
/// or `#` comment line. Only the first block is read.
pub fn parse_event_overview(input: &str) -> FunnelResult<EventOverview> {
    let mut lines = input.lines();
    if !lines.by_ref().any(is_event_table_header) {
        return Err(FunnelError::Format(
            "no `Event name,Event count` table found".to_owned(),
        ));
    }

    let mut overview = EventOverview::default();
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            break;
        }

        let mut tokens = trimmed
            .split(',')
            .map(|token| token.trim().trim_matches('"').trim())
            .filter(|token| !token.is_empty());
        let (Some(name), Some(raw_count)) = (tokens.next(), tokens.next()) else {
            trace!(line = trimmed, "skipping event row with fewer than two values");
            continue;
        };
        let Some(count) = parse_count(raw_count) else {
            trace!(line = trimmed, "skipping event row with non-numeric count");
            continue;
        };
        *overview.events.entry(name.to_lowercase()).or_insert(0.0) += count;
    }

    debug!(events = overview.events.len(), "parsed event overview table");
    Ok(overview)
}

fn is_event_table_header(line: &str) -> bool {
    let normalized: String = line
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    normalized.trim_start_matches('\u{feff}') == EVENT_TABLE_HEADER
}

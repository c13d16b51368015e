use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{RawEventCounts, StageCounts};
use crate::error::{FunnelError, FunnelResult};

use super::{parse_event_overview, parse_stage_count_csv};

/// Where stage counts for one recomputation come from.
#[derive(Debug, Clone, PartialEq)]
pub enum CountSource {
    /// Fixed default stages; `edits` replace individual counts by stage name.
    Manual { edits: StageCounts },
    /// Uploaded CSV text; `None` while no file has been provided.
    Upload { contents: Option<String> },
}

impl CountSource {
    #[must_use]
    pub fn manual() -> Self {
        Self::Manual {
            edits: StageCounts::new(),
        }
    }

    #[must_use]
    pub fn upload(contents: impl Into<String>) -> Self {
        Self::Upload {
            contents: Some(contents.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountOrigin {
    Manual,
    GenericCsv,
    EventOverview,
    Default,
}

/// Outcome of resolving a [`CountSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub counts: StageCounts,
    pub raw_events: RawEventCounts,
    pub origin: CountOrigin,
    /// Non-fatal message when an upload could not be used.
    pub warning: Option<String>,
}

/// Resolves stage counts and raw event counters for one input snapshot.
///
/// Uploads try the generic `stage,count` table first, then the event
/// overview export. When neither yields stages the default funnel is used
/// and the format error is reported through [`Resolution::warning`].
#[must_use]
pub fn resolve_counts(
    source: &CountSource,
    defaults: &StageCounts,
    event_overrides: RawEventCounts,
) -> Resolution {
    match source {
        CountSource::Manual { edits } => Resolution {
            counts: apply_manual_edits(defaults, edits),
            raw_events: RawEventCounts::default().with_overrides(event_overrides),
            origin: CountOrigin::Manual,
            warning: None,
        },
        CountSource::Upload { contents: None } => Resolution {
            counts: defaults.clone(),
            raw_events: RawEventCounts::default().with_overrides(event_overrides),
            origin: CountOrigin::Default,
            warning: None,
        },
        CountSource::Upload {
            contents: Some(contents),
        } => match resolve_upload(contents) {
            Ok((counts, raw_events, origin)) => {
                debug!(?origin, stages = counts.len(), "resolved uploaded counts");
                Resolution {
                    counts,
                    raw_events: raw_events.with_overrides(event_overrides),
                    origin,
                    warning: None,
                }
            }
            Err(err) => {
                warn!(error = %err, "falling back to default funnel");
                Resolution {
                    counts: defaults.clone(),
                    raw_events: RawEventCounts::default().with_overrides(event_overrides),
                    origin: CountOrigin::Default,
                    warning: Some(format!("Could not read CSV: {err}")),
                }
            }
        },
    }
}

/// Generic table first, event overview second.
pub fn resolve_upload(contents: &str) -> FunnelResult<(StageCounts, RawEventCounts, CountOrigin)> {
    let generic_err = match parse_stage_count_csv(contents) {
        Ok(counts) => {
            return Ok((counts, RawEventCounts::default(), CountOrigin::GenericCsv));
        }
        Err(err) => err,
    };
    debug!(error = %generic_err, "generic csv parse failed, trying event overview");

    let overview = parse_event_overview(contents)?;
    let counts = overview.funnel();
    if counts.is_empty() {
        return Err(FunnelError::Format(
            "event overview has no funnel events with nonzero counts".to_owned(),
        ));
    }
    Ok((counts, overview.raw_counts(), CountOrigin::EventOverview))
}

fn apply_manual_edits(defaults: &StageCounts, edits: &StageCounts) -> StageCounts {
    for stage in edits.keys() {
        if !defaults.contains_key(stage) {
            warn!(stage = %stage, "ignoring edit for unknown stage");
        }
    }

    defaults
        .iter()
        .map(|(stage, &default)| {
            let count = edits.get(stage).copied().unwrap_or(default);
            (stage.clone(), count)
        })
        .collect()
}

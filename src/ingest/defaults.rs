use crate::core::{Stage, StageCounts};

/// Built-in early player funnel used when no usable input is available.
#[must_use]
pub fn default_stages() -> Vec<Stage> {
    [
        ("Install → Open", 10_000.0),
        ("Play Tap (Title)", 9_200.0),
        ("Tutorial Complete", 8_500.0),
        ("L1 Win (First Key)", 8_000.0),
        ("Spend First Key (Payoff)", 7_600.0),
        ("Reach L3 (Loop Mastery)", 6_800.0),
        ("Milestone 1 Reached", 5_200.0),
        ("Episode 1 Complete (D0)", 4_200.0),
    ]
    .into_iter()
    .map(|(name, count)| Stage::new(name, count))
    .collect()
}

#[must_use]
pub fn default_stage_counts() -> StageCounts {
    stages_to_counts(&default_stages())
}

#[must_use]
pub fn stages_to_counts(stages: &[Stage]) -> StageCounts {
    stages
        .iter()
        .map(|stage| (stage.name.clone(), stage.count))
        .collect()
}

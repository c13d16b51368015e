use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered stage name → count mapping. Order defines "previous stage".
///
/// Inserting an existing name replaces its count and keeps its position.
pub type StageCounts = IndexMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One funnel step with its observed event count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub count: f64,
}

impl Stage {
    #[must_use]
    pub fn new(name: impl Into<String>, count: f64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Collects stages into an ordered count mapping.
#[must_use]
pub fn stage_counts<I, S>(stages: I) -> StageCounts
where
    I: IntoIterator<Item = (S, f64)>,
    S: Into<String>,
{
    stages
        .into_iter()
        .map(|(name, count)| (name.into(), count))
        .collect()
}

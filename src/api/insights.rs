use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::FunnelRow;

pub const NOT_ENOUGH_STAGES_MESSAGE: &str = "Add more stages to see insights.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropInsight {
    pub stage: String,
    #[serde(with = "crate::core::json_float")]
    pub drop_from_prev: f64,
}

impl DropInsight {
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Largest drop at '{}': {:.1}% from previous stage",
            self.stage,
            self.drop_from_prev * 100.0
        )
    }
}

/// Stages losing the largest fraction of their predecessor's players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Insights {
    NotEnoughData,
    LargestDrops(SmallVec<[DropInsight; 3]>),
}

impl Insights {
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::NotEnoughData => vec![NOT_ENOUGH_STAGES_MESSAGE.to_owned()],
            Self::LargestDrops(drops) => drops.iter().map(DropInsight::message).collect(),
        }
    }
}

/// Ranks every stage after the first by `drop_from_prev`, largest first.
///
/// Ties keep funnel order. Needs at least two rows.
#[must_use]
pub fn largest_drops(rows: &[FunnelRow], limit: usize) -> Insights {
    if rows.len() < 2 {
        return Insights::NotEnoughData;
    }

    let mut ranked: Vec<&FunnelRow> = rows.iter().skip(1).collect();
    ranked.sort_by_key(|row| std::cmp::Reverse(OrderedFloat(row.drop_from_prev)));

    Insights::LargestDrops(
        ranked
            .into_iter()
            .take(limit)
            .map(|row| DropInsight {
                stage: row.stage.clone(),
                drop_from_prev: row.drop_from_prev,
            })
            .collect(),
    )
}

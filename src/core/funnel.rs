use serde::{Deserialize, Serialize};

use crate::core::StageCounts;

/// Derived metrics for one funnel stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelRow {
    pub stage: String,
    #[serde(with = "crate::core::json_float")]
    pub count: f64,
    #[serde(with = "crate::core::json_float")]
    pub conv_from_prev: f64,
    #[serde(with = "crate::core::json_float")]
    pub conv_from_start: f64,
    #[serde(with = "crate::core::json_float")]
    pub drop_from_prev: f64,
}

/// Conversion-from-previous for one stage after the first, in percent
/// rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionPoint {
    pub stage: String,
    #[serde(with = "crate::core::json_float")]
    pub pct: f64,
}

/// Computes the funnel table in a single left-to-right pass.
///
/// Ratios with a zero denominator are defined as `0`. Negative counts are
/// passed through unchanged. The output has one row per input entry, in
/// input order; an empty mapping yields an empty table.
#[must_use]
pub fn compute_funnel(counts: &StageCounts) -> Vec<FunnelRow> {
    let start = counts.values().next().copied().unwrap_or(0.0);
    let mut rows = Vec::with_capacity(counts.len());
    let mut previous: Option<f64> = None;

    for (stage, &count) in counts {
        let conv_from_prev = match previous {
            None => 1.0,
            Some(prev) => ratio_or_zero(count, prev),
        };
        rows.push(FunnelRow {
            stage: stage.clone(),
            count,
            conv_from_prev,
            conv_from_start: ratio_or_zero(count, start),
            drop_from_prev: 1.0 - conv_from_prev,
        });
        previous = Some(count);
    }

    rows
}

/// Absolute drop `prev.count - count` per row; `0` for the first row.
#[must_use]
pub fn drop_counts(rows: &[FunnelRow]) -> Vec<f64> {
    let mut drops = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let drop = if index == 0 {
            0.0
        } else {
            rows[index - 1].count - row.count
        };
        drops.push(drop);
    }
    drops
}

/// Each row's share of the total absolute drop; all zeros when nothing drops.
#[must_use]
pub fn drop_shares(rows: &[FunnelRow]) -> Vec<f64> {
    let drops = drop_counts(rows);
    let total: f64 = drops.iter().sum();
    drops
        .into_iter()
        .map(|drop| ratio_or_zero(drop, total))
        .collect()
}

/// Conversion-from-previous percentages for every row after the first.
#[must_use]
pub fn conversion_pcts(rows: &[FunnelRow]) -> Vec<ConversionPoint> {
    rows.iter()
        .skip(1)
        .map(|row| ConversionPoint {
            stage: row.stage.clone(),
            pct: round_to_tenth(row.conv_from_prev * 100.0),
        })
        .collect()
}

pub(crate) fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

use approx::assert_relative_eq;
use funnel_rs::core::{
    StageCounts, compute_funnel, conversion_pcts, drop_counts, drop_shares, stage_counts,
};

#[test]
fn two_stage_funnel_matches_expected_rows() {
    let rows = compute_funnel(&stage_counts([("A", 100.0), ("B", 50.0)]));

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].stage, "A");
    assert_eq!(rows[0].count, 100.0);
    assert_eq!(rows[0].conv_from_prev, 1.0);
    assert_eq!(rows[0].conv_from_start, 1.0);
    assert_eq!(rows[0].drop_from_prev, 0.0);

    assert_eq!(rows[1].stage, "B");
    assert_eq!(rows[1].count, 50.0);
    assert_eq!(rows[1].conv_from_prev, 0.5);
    assert_eq!(rows[1].conv_from_start, 0.5);
    assert_eq!(rows[1].drop_from_prev, 0.5);
}

#[test]
fn output_preserves_input_order() {
    let counts = stage_counts([("z", 10.0), ("a", 8.0), ("m", 4.0)]);
    let rows = compute_funnel(&counts);
    let stages: Vec<&str> = rows.iter().map(|row| row.stage.as_str()).collect();
    assert_eq!(stages, ["z", "a", "m"]);
}

#[test]
fn zero_previous_count_yields_zero_conversion_and_full_drop() {
    let rows = compute_funnel(&stage_counts([("A", 100.0), ("B", 0.0), ("C", 20.0)]));

    assert_eq!(rows[1].conv_from_prev, 0.0);
    assert_eq!(rows[1].drop_from_prev, 1.0);
    assert_eq!(rows[2].conv_from_prev, 0.0, "denominator is zero");
    assert_eq!(rows[2].drop_from_prev, 1.0);
    assert_relative_eq!(rows[2].conv_from_start, 0.2);
}

#[test]
fn zero_first_stage_zeroes_conversion_from_start() {
    let rows = compute_funnel(&stage_counts([("A", 0.0), ("B", 10.0)]));

    assert_eq!(rows[0].conv_from_prev, 1.0);
    assert!(rows.iter().all(|row| row.conv_from_start == 0.0));
    assert_eq!(rows[1].conv_from_prev, 0.0);
}

#[test]
fn empty_mapping_produces_empty_table() {
    assert!(compute_funnel(&StageCounts::new()).is_empty());
}

#[test]
fn single_stage_has_identity_ratios() {
    let rows = compute_funnel(&stage_counts([("Only", 42.0)]));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].conv_from_prev, 1.0);
    assert_eq!(rows[0].conv_from_start, 1.0);
    assert_eq!(rows[0].drop_from_prev, 0.0);
}

#[test]
fn growth_between_stages_gives_negative_drop() {
    let rows = compute_funnel(&stage_counts([("A", 50.0), ("B", 100.0)]));
    assert_eq!(rows[1].conv_from_prev, 2.0);
    assert_eq!(rows[1].drop_from_prev, -1.0);
}

#[test]
fn negative_counts_pass_through_unvalidated() {
    let rows = compute_funnel(&stage_counts([("A", 100.0), ("B", -25.0)]));
    assert_eq!(rows[1].count, -25.0);
    assert_eq!(rows[1].conv_from_prev, -0.25);
    assert_eq!(rows[1].drop_from_prev, 1.25);
}

#[test]
fn computation_is_deterministic() {
    let counts = stage_counts([("A", 1000.0), ("B", 333.0), ("C", 17.0)]);
    assert_eq!(compute_funnel(&counts), compute_funnel(&counts));
}

#[test]
fn drop_counts_measure_players_lost_per_step() {
    let rows = compute_funnel(&stage_counts([("A", 100.0), ("B", 60.0), ("C", 45.0)]));
    assert_eq!(drop_counts(&rows), vec![0.0, 40.0, 15.0]);
}

#[test]
fn drop_shares_split_total_loss() {
    let rows = compute_funnel(&stage_counts([("A", 100.0), ("B", 60.0), ("C", 50.0)]));
    let shares = drop_shares(&rows);

    assert_eq!(shares[0], 0.0);
    assert_relative_eq!(shares[1], 0.8);
    assert_relative_eq!(shares[2], 0.2);
    assert_relative_eq!(shares.iter().sum::<f64>(), 1.0);
}

#[test]
fn drop_shares_are_zero_without_any_loss() {
    let rows = compute_funnel(&stage_counts([("A", 10.0), ("B", 10.0)]));
    assert_eq!(drop_shares(&rows), vec![0.0, 0.0]);
}

#[test]
fn conversion_pcts_skip_first_stage_and_round_to_tenth() {
    let rows = compute_funnel(&stage_counts([("A", 3.0), ("B", 2.0), ("C", 1.0)]));
    let points = conversion_pcts(&rows);

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].stage, "B");
    assert_eq!(points[0].pct, 66.7);
    assert_eq!(points[1].stage, "C");
    assert_eq!(points[1].pct, 50.0);
}

#[test]
fn duplicate_stage_insert_keeps_first_position_with_last_value() {
    let counts = stage_counts([("A", 100.0), ("B", 80.0), ("A", 90.0)]);
    let rows = compute_funnel(&counts);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].stage, "A");
    assert_eq!(rows[0].count, 90.0);
}

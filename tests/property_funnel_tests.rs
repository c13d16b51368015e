use funnel_rs::core::{
    RawEventCounts, StageCounts, compute_funnel, derive_kpis, drop_counts, drop_shares,
};
use proptest::prelude::*;

fn counts_from(values: &[f64]) -> StageCounts {
    values
        .iter()
        .enumerate()
        .map(|(index, count)| (format!("stage-{index}"), *count))
        .collect()
}

proptest! {
    #[test]
    fn funnel_has_one_row_per_stage_in_order(
        values in prop::collection::vec(0.0f64..1_000_000.0, 1..24)
    ) {
        let counts = counts_from(&values);
        let rows = compute_funnel(&counts);

        prop_assert_eq!(rows.len(), counts.len());
        for (row, (stage, count)) in rows.iter().zip(&counts) {
            prop_assert_eq!(&row.stage, stage);
            prop_assert_eq!(row.count, *count);
        }
        prop_assert_eq!(rows[0].conv_from_prev, 1.0);
        prop_assert_eq!(rows[0].drop_from_prev, 0.0);
    }

    #[test]
    fn ratios_follow_zero_guarded_definitions(
        values in prop::collection::vec(prop_oneof![Just(0.0f64), 0.0f64..1_000_000.0], 1..24)
    ) {
        let rows = compute_funnel(&counts_from(&values));

        for index in 0..rows.len() {
            let expected_start = if values[0] != 0.0 { values[index] / values[0] } else { 0.0 };
            prop_assert_eq!(rows[index].conv_from_start, expected_start);

            if index > 0 {
                let prev = values[index - 1];
                let expected_prev = if prev != 0.0 { values[index] / prev } else { 0.0 };
                prop_assert_eq!(rows[index].conv_from_prev, expected_prev);
            }
            prop_assert_eq!(rows[index].drop_from_prev, 1.0 - rows[index].conv_from_prev);
        }
    }

    #[test]
    fn drop_shares_sum_to_one_for_monotone_funnels(
        start in 1.0f64..1_000_000.0,
        ratios in prop::collection::vec(0.0f64..1.0, 1..16)
    ) {
        let mut values = vec![start];
        for ratio in ratios {
            let prev = values[values.len() - 1];
            values.push(prev * ratio);
        }
        let rows = compute_funnel(&counts_from(&values));
        let drops = drop_counts(&rows);
        let shares = drop_shares(&rows);

        prop_assert_eq!(drops[0], 0.0);
        prop_assert_eq!(shares[0], 0.0);
        let total: f64 = drops.iter().sum();
        if total > 0.0 {
            prop_assert!((shares.iter().sum::<f64>() - 1.0).abs() <= 1e-9);
        }
    }

    #[test]
    fn kpis_are_zero_whenever_first_open_is_zero(
        level_end in 0.0f64..1e7,
        in_app_purchase in 0.0f64..1e7,
        app_remove in 0.0f64..1e7,
        session_start in 0.0f64..1e7
    ) {
        let kpis = derive_kpis(&RawEventCounts {
            first_open: 0.0,
            level_end,
            in_app_purchase,
            app_remove,
            session_start,
        });

        prop_assert_eq!(kpis.level_completion_pct, 0.0);
        prop_assert_eq!(kpis.purchase_pct, 0.0);
        prop_assert_eq!(kpis.uninstall_pct, 0.0);
        prop_assert_eq!(kpis.avg_sessions_per_player, 0.0);
    }
}

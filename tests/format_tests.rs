use funnel_rs::core::{format_count_short, format_pct};

#[test]
fn short_counts_use_magnitude_suffixes() {
    assert_eq!(format_count_short(950.0), "950");
    assert_eq!(format_count_short(9_200.0), "9K");
    assert_eq!(format_count_short(10_000.0), "10K");
    assert_eq!(format_count_short(2_400_000.0), "2M");
    assert_eq!(format_count_short(3_700_000_000.0), "4B");
}

#[test]
fn short_counts_keep_sign() {
    assert_eq!(format_count_short(-12_000.0), "-12K");
    assert_eq!(format_count_short(0.0), "0");
}

#[test]
fn percentages_have_one_decimal() {
    assert_eq!(format_pct(0.5), "50.0%");
    assert_eq!(format_pct(0.0), "0.0%");
    assert_eq!(format_pct(0.123), "12.3%");
}

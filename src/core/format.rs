/// Formats a count with a `K`/`M`/`B` suffix and no decimals (`9200` → `"9K"`).
#[must_use]
pub fn format_count_short(n: f64) -> String {
    let abs_n = n.abs();
    if abs_n >= 1_000_000_000.0 {
        format!("{:.0}B", n / 1_000_000_000.0)
    } else if abs_n >= 1_000_000.0 {
        format!("{:.0}M", n / 1_000_000.0)
    } else if abs_n >= 1_000.0 {
        format!("{:.0}K", n / 1_000.0)
    } else {
        format!("{n:.0}")
    }
}

/// Formats a `0..=1` ratio as a one-decimal percentage (`0.5` → `"50.0%"`).
#[must_use]
pub fn format_pct(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

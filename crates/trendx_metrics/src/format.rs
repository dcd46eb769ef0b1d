/// Compact display form for large counters: 1.2B, 3.4M, 5.6K, or the
/// plain integer below one thousand.
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "0".to_string();
    }

    if value >= 1_000_000_000.0 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{}", value as u64)
    }
}

pub fn format_count(value: u64) -> String {
    format_compact(value as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_by_magnitude() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_500), "1.5K");
        assert_eq!(format_count(2_500_000), "2.5M");
        assert_eq!(format_count(1_200_000_000), "1.2B");
    }

    #[test]
    fn truncates_fractions_below_one_thousand() {
        assert_eq!(format_compact(123.7), "123");
    }
}

/// Compact human duration: `45s`, `4m 28s`, `1h 02m`.
pub fn format_duration(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    match (h, m) {
        (0, 0) => format!("{s}s"),
        (0, _) => format!("{m}m {s:02}s"),
        _ => format!("{h}h {m:02}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_only() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(45), "45s");
    }

    #[test]
    fn test_minutes() {
        assert_eq!(format_duration(60), "1m 00s");
        assert_eq!(format_duration(268), "4m 28s");
    }

    #[test]
    fn test_hours_drop_seconds() {
        assert_eq!(format_duration(3600 + 125), "1h 02m");
    }

    #[test]
    fn test_default_plan_length() {
        let plan = crate::plan::ExercisePlan::default();
        // 3 * 12 * 6 + 10 * 4 + 3 * 30
        assert_eq!(format_duration(plan.total_secs(30)), "5m 46s");
    }
}

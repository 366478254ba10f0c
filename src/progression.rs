//! Weekly duration progression: progressive overload with periodic
//! recovery weeks

/// Duration multiplier on recovery weeks
const RECOVERY_FACTOR: f64 = 0.7;

/// Next week's session duration from this week's.
///
/// Rules, in precedence order:
/// 1. every 4th week is a recovery week: `last × 0.7`
/// 2. the week right after a recovery week (but never week 1) gets a
///    boosted overload: `last + (factor / 2) × last`
/// 3. otherwise standard overload: `last × factor`
///
/// Week 1 always falls through to rule 3 with the seeded duration.
pub fn adjust_duration(week_number: u32, last_duration: f64, overload_factor: f64) -> f64 {
    if week_number % 4 == 0 {
        last_duration * RECOVERY_FACTOR
    } else if (week_number - 1) % 4 == 0 && week_number != 1 {
        last_duration + (overload_factor / 2.0) * last_duration
    } else {
        last_duration * overload_factor
    }
}

/// Apply a session type's configured duration cap
pub fn capped(duration: f64, max_duration: f64) -> f64 {
    duration.min(max_duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_week_1_uses_standard_overload() {
        let next = adjust_duration(1, 60.0, 1.1);
        assert!((next - 66.0).abs() < EPSILON);
    }

    #[test]
    fn test_standard_overload_weeks() {
        for week in [2, 3, 6, 7, 10, 11] {
            let next = adjust_duration(week, 50.0, 1.1);
            assert!((next - 55.0).abs() < EPSILON, "week {week}");
        }
    }

    #[test]
    fn test_every_fourth_week_is_recovery() {
        for week in [4, 8, 12, 16] {
            let next = adjust_duration(week, 80.0, 1.1);
            assert!((next - 56.0).abs() < EPSILON, "week {week}");
        }
    }

    #[test]
    fn test_week_after_recovery_gets_boosted_overload() {
        for week in [5, 9, 13] {
            let next = adjust_duration(week, 56.0, 1.1);
            // 56 + (1.1 / 2) * 56
            assert!((next - 86.8).abs() < EPSILON, "week {week}");
        }
    }

    #[test]
    fn test_cap_applies_only_above_maximum() {
        assert_eq!(capped(130.0, 120.0), 120.0);
        assert_eq!(capped(90.0, 120.0), 90.0);
    }

    proptest! {
        #[test]
        fn prop_recovery_week_is_30_percent_reduction(
            cycle in 1u32..25,
            last in 10.0f64..200.0,
            factor in 1.0f64..1.5,
        ) {
            let next = adjust_duration(cycle * 4, last, factor);
            prop_assert!((next - last * 0.7).abs() < 1e-9);
        }

        #[test]
        fn prop_capped_never_exceeds_maximum(
            duration in 0.0f64..500.0,
            max in 10.0f64..200.0,
        ) {
            prop_assert!(capped(duration, max) <= max);
        }
    }
}

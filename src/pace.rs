//! Pace projection from fitness state and session intensity
//!
//! A linear adjustment model: fitness (CTL) and power push the projected
//! pace faster, fatigue (ATL) and session load push it slower. Pace is
//! minutes per kilometer, so faster means a smaller number.

use crate::config::Tunables;
use crate::fitness::FitnessState;

const CTL_SENSITIVITY: f64 = 0.1;
const ATL_SENSITIVITY: f64 = 0.1;
const LOAD_SENSITIVITY: f64 = 0.05;
const POWER_SENSITIVITY: f64 = 0.02;
const HR_SENSITIVITY: f64 = 0.001;

/// Smallest allowed ratio of projected pace to the previous pace. Caps the
/// model at a 25% speed-up per step; slowdown is unbounded.
const MAX_STEP_IMPROVEMENT: f64 = 0.75;

/// Project the next pace from the previous pace, the current fitness
/// state, and the session's load, heart rate and power.
pub fn estimate_pace(
    last_pace: f64,
    state: &FitnessState,
    load: f64,
    avg_hr: f64,
    avg_power: f64,
    tunables: &Tunables,
) -> f64 {
    let estimated = last_pace - CTL_SENSITIVITY * (state.ctl / 50.0)
        + ATL_SENSITIVITY * (state.atl / 50.0)
        + LOAD_SENSITIVITY * (load / 100.0)
        - POWER_SENSITIVITY * (avg_power / 100.0)
        - HR_SENSITIVITY * (avg_hr - tunables.resting_heart_rate);

    estimated.max(last_pace * MAX_STEP_IMPROVEMENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_matches_linear_model_for_moderate_inputs() {
        let tunables = Tunables::default();
        let state = FitnessState::new(0.5, 1.0);

        let pace = estimate_pace(6.0, &state, 48.0, 140.0, 180.0, &tunables);
        let expected = 6.0 - 0.1 * (1.0 / 50.0) + 0.1 * (0.5 / 50.0) + 0.05 * (48.0 / 100.0)
            - 0.02 * (180.0 / 100.0)
            - 0.001 * (140.0 - 60.0);
        assert!((pace - expected).abs() < EPSILON);
    }

    #[test]
    fn test_higher_ctl_projects_faster_pace() {
        let tunables = Tunables::default();
        let low = estimate_pace(
            6.0,
            &FitnessState::new(0.5, 0.5),
            48.0,
            140.0,
            180.0,
            &tunables,
        );
        let high = estimate_pace(
            6.0,
            &FitnessState::new(0.5, 5.0),
            48.0,
            140.0,
            180.0,
            &tunables,
        );
        assert!(high < low);
    }

    #[test]
    fn test_higher_atl_projects_slower_pace() {
        let tunables = Tunables::default();
        let fresh = estimate_pace(
            6.0,
            &FitnessState::new(0.2, 1.0),
            48.0,
            140.0,
            180.0,
            &tunables,
        );
        let fatigued = estimate_pace(
            6.0,
            &FitnessState::new(5.0, 1.0),
            48.0,
            140.0,
            180.0,
            &tunables,
        );
        assert!(fatigued > fresh);
    }

    #[test]
    fn test_improvement_is_floored_at_75_percent_of_last_pace() {
        let tunables = Tunables::default();
        // Absurd fitness would project a huge speed-up; the floor holds it
        let state = FitnessState::new(0.0, 10_000.0);
        let pace = estimate_pace(6.0, &state, 0.0, 140.0, 180.0, &tunables);
        assert!((pace - 4.5).abs() < EPSILON);
    }

    #[test]
    fn test_slowdown_is_not_limited() {
        let tunables = Tunables::default();
        // Massive fatigue slows the projection well past any symmetric cap
        let state = FitnessState::new(10_000.0, 0.0);
        let pace = estimate_pace(6.0, &state, 0.0, 140.0, 180.0, &tunables);
        assert!(pace > 6.0 * 1.25);
    }

    proptest! {
        #[test]
        fn prop_pace_never_improves_more_than_25_percent(
            last_pace in 3.0f64..12.0,
            atl in 0.0f64..10.0,
            ctl in 0.0f64..10.0,
            load in 0.0f64..200.0,
            avg_hr in 80.0f64..200.0,
            avg_power in 0.0f64..400.0,
        ) {
            let tunables = Tunables::default();
            let state = FitnessState::new(atl, ctl);
            let pace = estimate_pace(last_pace, &state, load, avg_hr, avg_power, &tunables);
            prop_assert!(pace >= last_pace * 0.75 - 1e-9);
        }
    }
}

//! TRIMP-like training-load estimation from duration and heart rate

use crate::config::Tunables;

/// Estimate a session's training load from its duration and average heart
/// rate: `duration × (avg_hr − resting) / (max − resting)`.
///
/// The heart-rate fraction is not clamped, so an average heart rate below
/// resting yields a negative load. That is the documented behavior of the
/// model, not a defect to guard against.
pub fn estimate_load(duration_minutes: f64, avg_hr: f64, tunables: &Tunables) -> f64 {
    let hr_factor = (avg_hr - tunables.resting_heart_rate)
        / (tunables.max_heart_rate - tunables.resting_heart_rate);
    duration_minutes * hr_factor
}

//! Fitness-state accumulation from session training loads
//!
//! ATL and CTL are exponential moving averages of normalized load with
//! 7-day and 42-day time constants; TSB is their difference. The update is
//! pure and total, so a week of sessions is just a fold.

use serde::{Deserialize, Serialize};

/// Accumulated fatigue (ATL) and fitness (CTL)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessState {
    /// Acute training load, a 7-day proxy for fatigue
    pub atl: f64,

    /// Chronic training load, a 42-day proxy for fitness
    pub ctl: f64,
}

impl FitnessState {
    pub fn new(atl: f64, ctl: f64) -> Self {
        FitnessState { atl, ctl }
    }

    /// Training stress balance, always recomputed, never stored
    pub fn tsb(&self) -> f64 {
        self.ctl - self.atl
    }
}

/// Tracker configuration with customizable time constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessConfig {
    /// ATL time constant in days (default: 7)
    pub atl_time_constant: f64,

    /// CTL time constant in days (default: 42)
    pub ctl_time_constant: f64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        FitnessConfig {
            atl_time_constant: 7.0,
            ctl_time_constant: 42.0,
        }
    }
}

/// Applies session loads to a [`FitnessState`].
///
/// Each component moves toward `load / 100` with decay `1 - exp(-1/τ)`.
pub struct FitnessTracker {
    atl_decay: f64,
    ctl_decay: f64,
}

impl FitnessTracker {
    pub fn new() -> Self {
        Self::with_config(FitnessConfig::default())
    }

    pub fn with_config(config: FitnessConfig) -> Self {
        FitnessTracker {
            atl_decay: 1.0 - (-1.0 / config.atl_time_constant).exp(),
            ctl_decay: 1.0 - (-1.0 / config.ctl_time_constant).exp(),
        }
    }

    /// One state transition from a single session load
    pub fn apply(&self, state: FitnessState, load: f64) -> FitnessState {
        let normalized = load / 100.0;
        FitnessState {
            atl: state.atl * (1.0 - self.atl_decay) + normalized * self.atl_decay,
            ctl: state.ctl * (1.0 - self.ctl_decay) + normalized * self.ctl_decay,
        }
    }

    /// Fold an ordered sequence of loads, returning the final state and
    /// the summed load
    pub fn apply_sequence<I>(&self, state: FitnessState, loads: I) -> (FitnessState, f64)
    where
        I: IntoIterator<Item = f64>,
    {
        loads.into_iter().fold((state, 0.0), |(state, total), load| {
            (self.apply(state, load), total + load)
        })
    }
}

impl Default for FitnessTracker {
    fn default() -> Self {
        Self::new()
    }
}

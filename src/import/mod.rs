//! Historical run-log ingestion and seed-state derivation
//!
//! The log is replayed in file order (never re-sorted) through the
//! fitness tracker; the resulting state plus the most recent per-type
//! pace/duration observations seed the simulation in place of manually
//! configured initial values.

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::fitness::{FitnessState, FitnessTracker};
use crate::models::{HistoricalRun, RunType};

pub mod csv;

pub use csv::parse_history;

/// Fallback seed pace in minutes per kilometer when the log holds no runs.
/// Deliberately pessimistic.
const DEFAULT_SEED_PACE: f64 = 10.0;

/// Fallback seed duration in minutes when the log holds no run of the
/// needed type
const DEFAULT_SEED_DURATION: f64 = 10.0;

/// Simulation seed derived from a historical run log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedState {
    /// Acute training load after replaying the log
    pub initial_atl: f64,

    /// Chronic training load after replaying the log
    pub initial_ctl: f64,

    /// Most recent long-run duration in minutes
    pub long_run_duration: f64,

    /// Most recent tempo-run duration in minutes
    pub tempo_run_duration: f64,

    /// Most recent long-run pace in minutes per kilometer
    pub long_run_pace: f64,

    /// Most recent tempo-run pace in minutes per kilometer
    pub tempo_run_pace: f64,
}

impl SeedState {
    /// Overwrite a config's initial state and seed values, keeping its
    /// date range
    pub fn apply_to(&self, config: &mut SimulationConfig) {
        config.initial_atl = self.initial_atl;
        config.initial_ctl = self.initial_ctl;
        config.long_run_duration = self.long_run_duration;
        config.tempo_run_duration = self.tempo_run_duration;
        config.long_run_pace = self.long_run_pace;
        config.tempo_run_pace = self.tempo_run_pace;
    }
}

/// Replay the log through the tracker and capture seed values.
///
/// Every record advances the fitness state, whatever its run type. The
/// most recent `long_run` and `tempo_run_1` supply type-specific paces and
/// durations; when a type was never seen, its pace falls back to the most
/// recent pace across all runs, and its duration to a fixed default.
pub fn derive_seed(history: &[HistoricalRun], tracker: &FitnessTracker) -> SeedState {
    let mut state = FitnessState::new(0.0, 0.0);
    let mut last_pace = None;
    let mut last_long_run: Option<(f64, f64)> = None;
    let mut last_tempo_run: Option<(f64, f64)> = None;

    for run in history {
        state = tracker.apply(state, run.load);
        last_pace = Some(run.pace_min_per_km);

        match run.run_type {
            RunType::LongRun => {
                last_long_run = Some((run.pace_min_per_km, run.duration_minutes));
            }
            RunType::TempoRun1 => {
                last_tempo_run = Some((run.pace_min_per_km, run.duration_minutes));
            }
            _ => {}
        }
    }

    let default_pace = last_pace.unwrap_or(DEFAULT_SEED_PACE);

    SeedState {
        initial_atl: state.atl,
        initial_ctl: state.ctl,
        long_run_duration: last_long_run.map_or(DEFAULT_SEED_DURATION, |(_, d)| d),
        tempo_run_duration: last_tempo_run.map_or(DEFAULT_SEED_DURATION, |(_, d)| d),
        long_run_pace: last_long_run.map_or(default_pace, |(p, _)| p),
        tempo_run_pace: last_tempo_run.map_or(default_pace, |(p, _)| p),
    }
}

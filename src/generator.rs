//! Weekly session composition
//!
//! A projected week holds three sessions: one long run and two tempo runs.
//! Durations come from the progression policy, loads from the heart-rate
//! model, paces from the pace model. The second tempo run deliberately
//! mirrors the long run's effort profile (load, pace, power) on the tempo
//! duration, so its pace equals the long run's, not the first tempo run's.

use crate::config::Tunables;
use crate::load::estimate_load;
use crate::models::{RunType, Session};
use crate::pace::estimate_pace;
use crate::progression::{adjust_duration, capped};
use crate::simulation::SimulationState;

/// Assumed average heart rate for long runs, in beats per minute
const LONG_RUN_AVG_HR: f64 = 140.0;
/// Assumed average power for long runs, in watts
const LONG_RUN_AVG_POWER: f64 = 180.0;
/// Assumed average heart rate for tempo runs, in beats per minute
const TEMPO_RUN_AVG_HR: f64 = 160.0;
/// Assumed average power for tempo runs, in watts
const TEMPO_RUN_AVG_POWER: f64 = 220.0;

/// A generated week's sessions plus the post-cap durations the caller
/// carries forward as the next week's "last duration" values
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedWeek {
    /// Long run, tempo run 1, tempo run 2, in plan order
    pub sessions: Vec<Session>,

    /// Long-run duration after progression and capping, in minutes
    pub long_run_duration: f64,

    /// Tempo-run duration after progression and capping, in minutes
    pub tempo_run_duration: f64,
}

/// Compose one week of sessions from the running simulation state
pub fn generate_week(
    week_number: u32,
    state: &SimulationState,
    tunables: &Tunables,
) -> GeneratedWeek {
    let long_run_duration = capped(
        adjust_duration(
            week_number,
            state.last_long_run_duration,
            tunables.progressive_overload_factor,
        ),
        tunables.max_long_run_duration,
    );
    let tempo_run_duration = capped(
        adjust_duration(
            week_number,
            state.last_tempo_run_duration,
            tunables.progressive_overload_factor,
        ),
        tunables.max_tempo_run_duration,
    );

    let long_run_load = estimate_load(long_run_duration, LONG_RUN_AVG_HR, tunables);
    let tempo_run_load = estimate_load(tempo_run_duration, TEMPO_RUN_AVG_HR, tunables);

    let long_run_pace = estimate_pace(
        state.last_long_run_pace,
        &state.fitness,
        long_run_load,
        LONG_RUN_AVG_HR,
        LONG_RUN_AVG_POWER,
        tunables,
    );
    let tempo_run_pace = estimate_pace(
        state.last_tempo_run_pace,
        &state.fitness,
        tempo_run_load,
        TEMPO_RUN_AVG_HR,
        TEMPO_RUN_AVG_POWER,
        tunables,
    );

    let sessions = vec![
        Session {
            session_type: RunType::LongRun,
            duration_minutes: long_run_duration,
            avg_hr: LONG_RUN_AVG_HR,
            avg_power: LONG_RUN_AVG_POWER,
            load: long_run_load,
            pace_min_per_km: long_run_pace,
            distance_km: long_run_duration / long_run_pace,
        },
        Session {
            session_type: RunType::TempoRun1,
            duration_minutes: tempo_run_duration,
            avg_hr: TEMPO_RUN_AVG_HR,
            avg_power: TEMPO_RUN_AVG_POWER,
            load: tempo_run_load,
            pace_min_per_km: tempo_run_pace,
            distance_km: tempo_run_duration / tempo_run_pace,
        },
        // Second tempo session keeps the tempo duration but runs at the
        // long run's effort profile
        Session {
            session_type: RunType::TempoRun2,
            duration_minutes: tempo_run_duration,
            avg_hr: TEMPO_RUN_AVG_HR,
            avg_power: LONG_RUN_AVG_POWER,
            load: long_run_load,
            pace_min_per_km: long_run_pace,
            distance_km: tempo_run_duration / long_run_pace,
        },
    ];

    GeneratedWeek {
        sessions,
        long_run_duration,
        tempo_run_duration,
    }
}

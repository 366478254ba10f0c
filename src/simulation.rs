//! Week-by-week simulation of the training plan
//!
//! The loop threads one explicit [`SimulationState`] value: the fitness
//! state plus the four carried duration/pace values. Each step is a pure
//! transition `(state, week) -> (state', WeekPlan)`, so later weeks depend
//! strictly on earlier weeks and the loop cannot be parallelized.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::config::{SimulationConfig, Tunables};
use crate::error::{PlanError, Result};
use crate::fitness::{FitnessState, FitnessTracker};
use crate::generator::generate_week;
use crate::import::SeedState;
use crate::models::{HistoricalRun, Session, TrainingPlan, WeekPlan};

/// Number of weeks covered by the date range: `days / 7 + 1` (floored)
pub fn num_weeks(start_date: NaiveDate, end_date: NaiveDate) -> Result<u32> {
    if start_date > end_date {
        return Err(PlanError::InvalidRange(format!(
            "start_date {start_date} is after end_date {end_date}"
        )));
    }
    Ok(((end_date - start_date).num_days() / 7 + 1) as u32)
}

/// 1-based week number containing `today`, relative to `start_date`
pub fn current_week(start_date: NaiveDate, today: NaiveDate) -> Result<u32> {
    if start_date > today {
        return Err(PlanError::InvalidRange(format!(
            "start_date {start_date} is in the future"
        )));
    }
    Ok(((today - start_date).num_days() / 7 + 1) as u32)
}

/// Calendar window `[first day, Sunday]` of the given week.
///
/// One convention everywhere: the week starts `(week_number - 1) * 7` days
/// after the start date and its Sunday is six days later. The same window
/// attributes historical runs to week numbers.
pub fn week_window(start_date: NaiveDate, week_number: u32) -> (NaiveDate, NaiveDate) {
    let week_start = start_date + Duration::weeks(week_number as i64 - 1);
    (week_start, week_start + Duration::days(6))
}

/// The state carried across week iterations
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// Accumulated fatigue and fitness
    pub fitness: FitnessState,

    /// Previous week's long-run duration in minutes
    pub last_long_run_duration: f64,

    /// Previous week's tempo-run duration in minutes
    pub last_tempo_run_duration: f64,

    /// Previous week's long-run pace in minutes per kilometer
    pub last_long_run_pace: f64,

    /// Previous week's tempo-run pace in minutes per kilometer
    pub last_tempo_run_pace: f64,
}

impl SimulationState {
    pub fn from_config(config: &SimulationConfig) -> Self {
        SimulationState {
            fitness: FitnessState::new(config.initial_atl, config.initial_ctl),
            last_long_run_duration: config.long_run_duration,
            last_tempo_run_duration: config.tempo_run_duration,
            last_long_run_pace: config.long_run_pace,
            last_tempo_run_pace: config.tempo_run_pace,
        }
    }

    pub fn from_seed(seed: &SeedState) -> Self {
        SimulationState {
            fitness: FitnessState::new(seed.initial_atl, seed.initial_ctl),
            last_long_run_duration: seed.long_run_duration,
            last_tempo_run_duration: seed.tempo_run_duration,
            last_long_run_pace: seed.long_run_pace,
            last_tempo_run_pace: seed.tempo_run_pace,
        }
    }
}

/// One transition of the week loop.
///
/// Sessions are generated against the incoming fitness state; the tracker
/// then advances once per session. Carried paces come from the generated
/// long run and first tempo run.
pub fn step_week(
    state: &SimulationState,
    week_number: u32,
    sunday_date: NaiveDate,
    tracker: &FitnessTracker,
    tunables: &Tunables,
) -> (SimulationState, WeekPlan) {
    let generated = generate_week(week_number, state, tunables);

    let (fitness, total_load) =
        tracker.apply_sequence(state.fitness, generated.sessions.iter().map(|s| s.load));

    debug!(
        week = week_number,
        atl = fitness.atl,
        ctl = fitness.ctl,
        tsb = fitness.tsb(),
        total_load,
        "simulated week"
    );

    let next = SimulationState {
        fitness,
        last_long_run_duration: generated.long_run_duration,
        last_tempo_run_duration: generated.tempo_run_duration,
        last_long_run_pace: generated.sessions[0].pace_min_per_km,
        last_tempo_run_pace: generated.sessions[1].pace_min_per_km,
    };

    let week_plan = WeekPlan {
        week_number,
        sunday_date,
        sessions: generated.sessions,
    };

    (next, week_plan)
}

/// Drive the simulation from the current week to the horizon, then merge
/// in historical weeks when a run log was supplied.
///
/// `today` is injected by the caller so the computation stays
/// deterministic.
pub fn simulate(
    config: &SimulationConfig,
    tunables: &Tunables,
    history: Option<&[HistoricalRun]>,
    today: NaiveDate,
) -> Result<TrainingPlan> {
    let num_weeks = num_weeks(config.start_date, config.end_date)?;
    let current_week = current_week(config.start_date, today)?;

    let tracker = FitnessTracker::new();
    let mut state = SimulationState::from_config(config);
    let mut plan = TrainingPlan::default();

    for week in current_week..=num_weeks {
        let (_, sunday_date) = week_window(config.start_date, week);
        let (next, week_plan) = step_week(&state, week, sunday_date, &tracker, tunables);
        state = next;
        plan.weeks.push(week_plan);
    }

    if let Some(history) = history {
        plan.weeks
            .extend(historical_weeks(config.start_date, current_week, history));
        plan.sort_by_week();
    }

    Ok(plan)
}

/// Reconstruct a [`WeekPlan`] for every elapsed week (1 up to, but not
/// including, `current_week`) from the runs whose dates fall inside that
/// week's calendar window. Run fields are carried over verbatim.
pub fn historical_weeks(
    start_date: NaiveDate,
    current_week: u32,
    history: &[HistoricalRun],
) -> Vec<WeekPlan> {
    (1..current_week)
        .map(|week_number| {
            let (week_start, week_end) = week_window(start_date, week_number);
            let sessions = history
                .iter()
                .filter(|run| run.date >= week_start && run.date <= week_end)
                .map(|run| Session {
                    session_type: run.run_type.clone(),
                    duration_minutes: run.duration_minutes,
                    avg_hr: run.avg_hr,
                    avg_power: run.avg_power,
                    load: run.load,
                    pace_min_per_km: run.pace_min_per_km,
                    distance_km: run.distance_km,
                })
                .collect();
            WeekPlan {
                week_number,
                sunday_date: week_end,
                sessions,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_num_weeks_counts_partial_weeks() {
        assert_eq!(num_weeks(date(2024, 1, 1), date(2024, 1, 15)).unwrap(), 3);
        assert_eq!(num_weeks(date(2024, 1, 1), date(2024, 1, 1)).unwrap(), 1);
        assert_eq!(num_weeks(date(2024, 1, 1), date(2024, 1, 7)).unwrap(), 2);
    }

    #[test]
    fn test_num_weeks_rejects_inverted_range() {
        let err = num_weeks(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidRange(_)));
    }

    #[test]
    fn test_current_week_from_today() {
        let start = date(2023, 1, 1);
        assert_eq!(current_week(start, date(2023, 1, 1)).unwrap(), 1);
        assert_eq!(current_week(start, date(2023, 1, 7)).unwrap(), 1);
        assert_eq!(current_week(start, date(2023, 1, 8)).unwrap(), 2);
        assert_eq!(current_week(start, date(2023, 2, 5)).unwrap(), 6);
    }

    #[test]
    fn test_current_week_rejects_future_start() {
        let err = current_week(date(2023, 6, 1), date(2023, 1, 1)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidRange(_)));
    }

    #[test]
    fn test_week_window_is_seven_days_from_start_offset() {
        let (week_start, week_end) = week_window(date(2023, 1, 1), 1);
        assert_eq!(week_start, date(2023, 1, 1));
        assert_eq!(week_end, date(2023, 1, 7));

        let (week_start, week_end) = week_window(date(2023, 1, 1), 3);
        assert_eq!(week_start, date(2023, 1, 15));
        assert_eq!(week_end, date(2023, 1, 21));
    }

    #[test]
    fn test_step_week_carries_paces_from_generated_sessions() {
        let config = SimulationConfig::default();
        let tunables = Tunables::default();
        let tracker = FitnessTracker::new();
        let state = SimulationState::from_config(&config);

        let (next, week_plan) = step_week(&state, 1, date(2023, 1, 7), &tracker, &tunables);

        assert_eq!(
            next.last_long_run_pace,
            week_plan.sessions[0].pace_min_per_km
        );
        assert_eq!(
            next.last_tempo_run_pace,
            week_plan.sessions[1].pace_min_per_km
        );
        assert_eq!(next.last_long_run_duration, 66.0);
        assert_eq!(next.last_tempo_run_duration, 33.0);
        // Three positive-load sessions must raise both averages
        assert!(next.fitness.atl > state.fitness.atl);
        assert!(next.fitness.ctl > state.fitness.ctl);
    }

    #[test]
    fn test_simulate_covers_current_week_through_horizon() {
        let config = SimulationConfig {
            start_date: date(2023, 1, 1),
            end_date: date(2023, 1, 29),
            ..SimulationConfig::default()
        };
        let plan = simulate(&config, &Tunables::default(), None, date(2023, 1, 10)).unwrap();

        let weeks: Vec<u32> = plan.weeks.iter().map(|w| w.week_number).collect();
        assert_eq!(weeks, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_simulate_is_deterministic() {
        let config = SimulationConfig {
            start_date: date(2023, 1, 1),
            end_date: date(2023, 3, 1),
            ..SimulationConfig::default()
        };
        let tunables = Tunables::default();
        let today = date(2023, 1, 2);

        let first = simulate(&config, &tunables, None, today).unwrap();
        let second = simulate(&config, &tunables, None, today).unwrap();
        assert_eq!(first, second);
    }

    fn historical_run(on: NaiveDate, run_type: RunType) -> HistoricalRun {
        HistoricalRun {
            date: on,
            vo2max: 50.0,
            avg_power: 200.0,
            avg_hr: 150.0,
            duration_minutes: 45.0,
            pace_min_per_km: 5.5,
            distance_km: 45.0 / 5.5,
            load: 28.9286,
            run_type,
        }
    }

    #[test]
    fn test_historical_weeks_window_runs_by_date() {
        let start = date(2023, 1, 1);
        let history = vec![
            historical_run(date(2023, 1, 2), RunType::LongRun),
            historical_run(date(2023, 1, 7), RunType::TempoRun1),
            historical_run(date(2023, 1, 9), RunType::Other("recovery".into())),
        ];

        let weeks = historical_weeks(start, 3, &history);
        assert_eq!(weeks.len(), 2);

        assert_eq!(weeks[0].week_number, 1);
        assert_eq!(weeks[0].sunday_date, date(2023, 1, 7));
        assert_eq!(weeks[0].sessions.len(), 2);

        assert_eq!(weeks[1].week_number, 2);
        assert_eq!(weeks[1].sessions.len(), 1);
        assert_eq!(
            weeks[1].sessions[0].session_type,
            RunType::Other("recovery".into())
        );
    }

    #[test]
    fn test_merged_plan_has_unique_ascending_weeks() {
        let config = SimulationConfig {
            start_date: date(2023, 1, 1),
            end_date: date(2023, 1, 29),
            ..SimulationConfig::default()
        };
        let history = vec![historical_run(date(2023, 1, 3), RunType::LongRun)];

        let plan = simulate(
            &config,
            &Tunables::default(),
            Some(&history),
            date(2023, 1, 10),
        )
        .unwrap();

        let weeks: Vec<u32> = plan.weeks.iter().map(|w| w.week_number).collect();
        assert_eq!(weeks, vec![1, 2, 3, 4, 5]);

        // Week 1 is reconstruction, not generation
        assert_eq!(plan.weeks[0].sessions.len(), 1);
        assert_eq!(plan.weeks[0].sessions[0].duration_minutes, 45.0);
    }
}

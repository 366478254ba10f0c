use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{PlanError, Result};

/// Inputs for one simulation run: starting fitness state, the seed values
/// for the first projected week, and the date range to project over.
///
/// Read-only once constructed; the orchestrator never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Starting acute training load (fatigue)
    pub initial_atl: f64,

    /// Starting chronic training load (fitness)
    pub initial_ctl: f64,

    /// Seed long-run duration in minutes
    pub long_run_duration: f64,

    /// Seed tempo-run duration in minutes
    pub tempo_run_duration: f64,

    /// Seed long-run pace in minutes per kilometer
    pub long_run_pace: f64,

    /// Seed tempo-run pace in minutes per kilometer
    pub tempo_run_pace: f64,

    /// First day of week 1
    pub start_date: NaiveDate,

    /// Last day of the plan; the horizon in weeks is derived from it
    pub end_date: NaiveDate,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            initial_atl: 0.0,
            initial_ctl: 0.0,
            long_run_duration: 60.0,
            tempo_run_duration: 30.0,
            long_run_pace: 6.0,
            tempo_run_pace: 5.0,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }
}

/// Tuning constants for one simulation run.
///
/// Threaded by reference through every component and never stored as
/// process-wide state, so concurrent runs cannot corrupt each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Weekly duration multiplier on standard overload weeks
    pub progressive_overload_factor: f64,

    /// Cap for long-run duration in minutes
    pub max_long_run_duration: f64,

    /// Cap for tempo-run duration in minutes
    pub max_tempo_run_duration: f64,

    /// Maximum heart rate in beats per minute
    pub max_heart_rate: f64,

    /// Resting heart rate in beats per minute
    pub resting_heart_rate: f64,
}

impl Default for Tunables {
    fn default() -> Self {
        Tunables {
            progressive_overload_factor: 1.1,
            max_long_run_duration: 120.0,
            max_tempo_run_duration: 90.0,
            max_heart_rate: 200.0,
            resting_heart_rate: 60.0,
        }
    }
}

impl SimulationConfig {
    /// Load a simulation config from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path.as_ref())
    }

    /// Load from a JSON file, falling back to defaults when the file does
    /// not exist. Any other failure is surfaced.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json_or_default(path.as_ref())
    }

    /// Default config file location
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".planrs")
            .join("config.json")
    }
}

impl Tunables {
    /// Load tunables from a JSON file; absent keys take their defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path.as_ref())
    }

    /// Load from a JSON file, falling back to defaults when the file does
    /// not exist. Any other failure is surfaced.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json_or_default(path.as_ref())
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| PlanError::InputFormat {
        field: path.display().to_string(),
        value: e.to_string(),
    })
}

fn load_json_or_default<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    if !path.exists() {
        warn!(path = %path.display(), "config file not found, using defaults");
        return Ok(T::default());
    }
    load_json(path)
}

// Library interface for planrs modules
// This allows integration tests to access the core functionality

pub mod config;
pub mod error;
pub mod fitness;
pub mod generator;
pub mod import;
pub mod load;
pub mod logging;
pub mod models;
pub mod pace;
pub mod progression;
pub mod report;
pub mod simulation;

// Re-export commonly used types for convenience
pub use config::{SimulationConfig, Tunables};
pub use error::{PlanError, Result};
pub use fitness::{FitnessConfig, FitnessState, FitnessTracker};
pub use import::{derive_seed, parse_history, SeedState};
pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
pub use models::{HistoricalRun, RunType, Session, TrainingPlan, WeekPlan};
pub use report::{predict_race, render_plan, PlanReport, RacePlan};
pub use simulation::{simulate, SimulationState};

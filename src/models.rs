use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Session categories produced by the generator or recorded in a run log.
///
/// `Other` carries log entries (recovery jogs, intervals, ...) that are
/// replayed through fitness-state accumulation but never used for seeding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunType {
    LongRun,
    TempoRun1,
    TempoRun2,
    Other(String),
}

impl RunType {
    pub fn as_str(&self) -> &str {
        match self {
            RunType::LongRun => "long_run",
            RunType::TempoRun1 => "tempo_run_1",
            RunType::TempoRun2 => "tempo_run_2",
            RunType::Other(name) => name,
        }
    }
}

impl From<String> for RunType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "long_run" => RunType::LongRun,
            "tempo_run_1" => RunType::TempoRun1,
            "tempo_run_2" => RunType::TempoRun2,
            _ => RunType::Other(value),
        }
    }
}

impl From<&str> for RunType {
    fn from(value: &str) -> Self {
        RunType::from(value.to_string())
    }
}

impl From<RunType> for String {
    fn from(value: RunType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for RunType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single training session, projected or historical
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Session category
    pub session_type: RunType,

    /// Duration in minutes
    pub duration_minutes: f64,

    /// Average heart rate in beats per minute
    pub avg_hr: f64,

    /// Average power in watts
    pub avg_power: f64,

    /// TRIMP-like training load for the session
    pub load: f64,

    /// Pace in minutes per kilometer
    pub pace_min_per_km: f64,

    /// Distance in kilometers; always `duration_minutes / pace_min_per_km`
    pub distance_km: f64,
}

/// One week of the training plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    /// 1-based week number, relative to the configured start date
    pub week_number: u32,

    /// The Sunday closing this week's calendar window
    pub sunday_date: NaiveDate,

    /// Sessions in plan order
    pub sessions: Vec<Session>,
}

impl WeekPlan {
    /// Last session of the given type, if any.
    pub fn session(&self, session_type: &RunType) -> Option<&Session> {
        self.sessions
            .iter()
            .rev()
            .find(|s| &s.session_type == session_type)
    }
}

/// Ordered sequence of week plans with unique, ascending week numbers.
/// May mix generated future weeks with reconstructed historical weeks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub weeks: Vec<WeekPlan>,
}

impl TrainingPlan {
    pub fn last_week(&self) -> Option<&WeekPlan> {
        self.weeks.last()
    }

    pub fn sort_by_week(&mut self) {
        self.weeks.sort_by_key(|w| w.week_number);
    }
}

/// One record of a historical run log, immutable once parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRun {
    /// Date the run took place
    pub date: NaiveDate,

    /// Estimated VO2max reported by the logging device
    pub vo2max: f64,

    /// Average power in watts
    pub avg_power: f64,

    /// Average heart rate in beats per minute
    pub avg_hr: f64,

    /// Duration in minutes
    pub duration_minutes: f64,

    /// Pace in minutes per kilometer
    pub pace_min_per_km: f64,

    /// Distance in kilometers
    pub distance_km: f64,

    /// TRIMP-like training load
    pub load: f64,

    /// Run category as recorded in the log
    pub run_type: RunType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_type_string_round_trip() {
        assert_eq!(RunType::from("long_run"), RunType::LongRun);
        assert_eq!(RunType::from("tempo_run_1"), RunType::TempoRun1);
        assert_eq!(RunType::from("tempo_run_2"), RunType::TempoRun2);
        assert_eq!(
            RunType::from("recovery_run"),
            RunType::Other("recovery_run".to_string())
        );

        assert_eq!(RunType::LongRun.to_string(), "long_run");
        assert_eq!(
            RunType::Other("interval".to_string()).to_string(),
            "interval"
        );
    }

    #[test]
    fn test_run_type_serde_as_plain_string() {
        let json = serde_json::to_string(&RunType::TempoRun1).unwrap();
        assert_eq!(json, "\"tempo_run_1\"");

        let parsed: RunType = serde_json::from_str("\"fartlek\"").unwrap();
        assert_eq!(parsed, RunType::Other("fartlek".to_string()));
    }

    #[test]
    fn test_week_plan_session_returns_last_match() {
        let make = |session_type: RunType, pace: f64| Session {
            session_type,
            duration_minutes: 60.0,
            avg_hr: 140.0,
            avg_power: 180.0,
            load: 48.0,
            pace_min_per_km: pace,
            distance_km: 60.0 / pace,
        };

        let week = WeekPlan {
            week_number: 1,
            sunday_date: NaiveDate::from_ymd_opt(2023, 1, 7).unwrap(),
            sessions: vec![
                make(RunType::LongRun, 6.0),
                make(RunType::LongRun, 5.5),
                make(RunType::TempoRun1, 5.0),
            ],
        };

        let long_run = week.session(&RunType::LongRun).unwrap();
        assert_eq!(long_run.pace_min_per_km, 5.5);
        assert!(week.session(&RunType::TempoRun2).is_none());
    }
}

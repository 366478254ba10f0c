//! Human-readable rendering of a training plan and race-day prediction

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::{RunType, Session, TrainingPlan, WeekPlan};

/// Race distance in kilometers when the final week supports it
const HALF_MARATHON_KM: f64 = 21.1;
const TEN_K_KM: f64 = 10.0;

/// Combined long + tempo distance above which the target event is a half
/// marathon rather than a 10K
const HALF_MARATHON_THRESHOLD_KM: f64 = 18.0;

/// Share of the race run at the long-run (slow) pace; the rest is run at
/// the tempo (fast) pace
const SLOW_SEGMENT_SHARE: f64 = 2.0 / 3.0;

/// Format minutes as `H:MM h` for an hour or more, `M:SS min` below
pub fn format_duration(minutes: f64) -> String {
    let total_seconds = (minutes * 60.0) as i64;
    let mins = total_seconds / 60;
    let secs = total_seconds % 60;

    if minutes < 60.0 {
        format!("{}:{:02} min", mins, secs)
    } else {
        format!("{}:{:02} h", mins / 60, mins % 60)
    }
}

/// Format a pace as `M:SS min/km`
pub fn format_pace(pace_min_per_km: f64) -> String {
    let total_seconds = (pace_min_per_km * 60.0) as i64;
    format!("{}:{:02} min/km", total_seconds / 60, total_seconds % 60)
}

/// Format a distance as two-decimal kilometers
pub fn format_distance(distance_km: f64) -> String {
    format!("{:.2} km", distance_km)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One session with display-formatted fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedSession {
    #[serde(rename = "type")]
    pub session_type: String,
    pub duration: String,
    pub avg_hr: f64,
    pub avg_power: f64,
    pub load: f64,
    pub pace: String,
    pub distance: String,
}

/// One week with display-formatted sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedWeek {
    pub week: u32,
    pub sunday_date: String,
    pub sessions: Vec<FormattedSession>,
}

/// One segment of the predicted race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSegment {
    #[serde(rename = "type")]
    pub segment_type: String,
    pub distance: String,
    pub pace: String,
    pub time: String,
}

/// Predicted race split and total time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacePlan {
    pub segments: Vec<RaceSegment>,
    pub total_time: String,
}

/// The serializable output record: formatted weeks plus the race plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub weeks: Vec<FormattedWeek>,
    pub race_plan: Vec<RaceSegment>,
    pub total_time: String,
}

fn format_session(session: &Session) -> FormattedSession {
    FormattedSession {
        session_type: session.session_type.as_str().to_string(),
        duration: format_duration(session.duration_minutes),
        avg_hr: session.avg_hr,
        avg_power: session.avg_power,
        load: round2(session.load),
        pace: format_pace(session.pace_min_per_km),
        distance: format_distance(session.distance_km),
    }
}

fn format_week(week: &WeekPlan) -> FormattedWeek {
    FormattedWeek {
        week: week.week_number,
        sunday_date: week.sunday_date.format("%Y-%m-%d").to_string(),
        sessions: week.sessions.iter().map(format_session).collect(),
    }
}

/// Predict a race-day split from the final week's long run and first
/// tempo run
pub fn predict_race(plan: &TrainingPlan) -> Result<RacePlan> {
    let last_week = plan
        .last_week()
        .ok_or_else(|| PlanError::IncompletePlan("plan has no weeks".to_string()))?;

    let long_run = last_week.session(&RunType::LongRun).ok_or_else(|| {
        PlanError::IncompletePlan(format!(
            "week {} has no long_run session",
            last_week.week_number
        ))
    })?;
    let tempo_run = last_week.session(&RunType::TempoRun1).ok_or_else(|| {
        PlanError::IncompletePlan(format!(
            "week {} has no tempo_run_1 session",
            last_week.week_number
        ))
    })?;

    let race_distance = if long_run.distance_km + tempo_run.distance_km > HALF_MARATHON_THRESHOLD_KM
    {
        HALF_MARATHON_KM
    } else {
        TEN_K_KM
    };

    let slow_distance = race_distance * SLOW_SEGMENT_SHARE;
    let fast_distance = race_distance * (1.0 - SLOW_SEGMENT_SHARE);
    let slow_time = slow_distance * long_run.pace_min_per_km;
    let fast_time = fast_distance * tempo_run.pace_min_per_km;

    Ok(RacePlan {
        segments: vec![
            RaceSegment {
                segment_type: "Slow Run".to_string(),
                distance: format_distance(slow_distance),
                pace: format_pace(long_run.pace_min_per_km),
                time: format_duration(slow_time),
            },
            RaceSegment {
                segment_type: "Fast Run".to_string(),
                distance: format_distance(fast_distance),
                pace: format_pace(tempo_run.pace_min_per_km),
                time: format_duration(fast_time),
            },
        ],
        total_time: format_duration(slow_time + fast_time),
    })
}

/// Render the full output record for a plan
pub fn render_plan(plan: &TrainingPlan) -> Result<PlanReport> {
    let race = predict_race(plan)?;
    Ok(PlanReport {
        weeks: plan.weeks.iter().map(format_week).collect(),
        race_plan: race.segments,
        total_time: race.total_time,
    })
}

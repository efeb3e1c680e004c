//! Workout model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Workout entity, owned by a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: i64,
    pub workout_date: NaiveDate,
    pub duration_minutes: i32,
    pub calories_burned: f64,
    pub notes: String,
    pub member_id: i64,
}

/// Create workout payload (member is taken from the route)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutCreate {
    pub workout_date: NaiveDate,
    pub duration_minutes: i32,
    pub calories_burned: f64,
    #[validate(length(min = 1, max = 200))]
    pub notes: String,
}

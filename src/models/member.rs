//! Member model
//!
//! `fitness_number` is the externally meaningful business key (globally
//! unique); `id` is the internal surrogate key and never changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Member entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub fitness_number: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub height: f64,
    pub phone_number: String,
}

/// Create/replace member payload (surrogate id is system-generated)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MemberCreate {
    #[validate(length(min = 1, max = 10))]
    pub fitness_number: String,
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub height: f64,
    #[validate(length(min = 1, max = 15))]
    pub phone_number: String,
}

//! Subscription model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Subscription entity, owned by a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: i64,
    pub description: String,
    pub start_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub price: Decimal,
    pub member_id: i64,
}

/// Create subscription payload (member is taken from the route)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionCreate {
    #[validate(length(min = 1, max = 100))]
    pub description: String,
    pub start_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub price: Decimal,
}

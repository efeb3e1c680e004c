//! Persistence layer
//!
//! [`MemberStore`] is the contract the API surface depends on; the engine
//! behind it is interchangeable. [`postgres::PgMemberStore`] is the
//! production implementation, `memory::MemoryStore` backs the test suite.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::{AppError, ErrorCode};
use crate::models::{
    Member, MemberCreate, Subscription, SubscriptionCreate, Workout, WorkoutCreate,
};

/// Store-layer error
///
/// Business outcomes (`MemberNotFound`, `DuplicateFitnessNumber`) are
/// distinct variants; everything else is an infrastructure failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("member not found")]
    MemberNotFound,
    #[error("fitness number already registered")]
    DuplicateFitnessNumber,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::MemberNotFound => AppError::new(ErrorCode::MemberNotFound),
            StoreError::DuplicateFitnessNumber => AppError::new(ErrorCode::FitnessNumberExists),
            StoreError::Database(err) => {
                tracing::error!(error = %err, "store query failed");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

/// Convenience alias for store-layer results
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for the member aggregate
///
/// All mutating operations are atomic: a failed uniqueness or existence
/// check leaves the store unchanged. Listing order is insertion order
/// (ascending surrogate id).
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Page through members; offset is `(page - 1) * page_size`, saturating
    /// at zero. `page_size` is intentionally uncapped.
    async fn list_members(&self, page: u32, page_size: u32) -> StoreResult<Vec<Member>>;

    /// Exact lookup by business key.
    async fn find_by_fitness_number(&self, fitness_number: &str) -> StoreResult<Option<Member>>;

    /// All members whose fitness number contains `fragment`.
    async fn search_by_fitness_number(&self, fragment: &str) -> StoreResult<Vec<Member>>;

    /// Insert a new member. The uniqueness check and the insert are one
    /// atomic operation; concurrent creates with the same fitness number
    /// admit exactly one winner.
    async fn create_member(&self, data: &MemberCreate) -> StoreResult<Member>;

    /// Overwrite all mutable fields of the member matching `fitness_number`.
    /// `MemberNotFound` when no row matched.
    async fn replace_member(&self, fitness_number: &str, data: &MemberCreate)
    -> StoreResult<Member>;

    /// Remove a member and, by cascade, its subscriptions and workouts.
    async fn delete_member(&self, fitness_number: &str) -> StoreResult<()>;

    /// Subscriptions owned by the member; `MemberNotFound` if the member
    /// does not exist (distinct from an empty list).
    async fn subscriptions_for_member(&self, fitness_number: &str)
    -> StoreResult<Vec<Subscription>>;

    /// Attach a subscription to the member.
    async fn add_subscription(
        &self,
        fitness_number: &str,
        data: &SubscriptionCreate,
    ) -> StoreResult<Subscription>;

    /// Workouts logged by the member; `MemberNotFound` if the member does
    /// not exist.
    async fn workouts_for_member(&self, fitness_number: &str) -> StoreResult<Vec<Workout>>;

    /// Log a workout for the member.
    async fn add_workout(&self, fitness_number: &str, data: &WorkoutCreate)
    -> StoreResult<Workout>;
}

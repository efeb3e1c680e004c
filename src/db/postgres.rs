//! PostgreSQL member store
//!
//! The schema (unique index on `fitness_number`, cascade foreign keys) is
//! the backstop for the invariants checked here: a direct write that
//! violates uniqueness fails at the index even if it bypasses this module.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{MemberStore, StoreError, StoreResult};
use crate::models::{
    Member, MemberCreate, Subscription, SubscriptionCreate, Workout, WorkoutCreate,
};

/// Member store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgMemberStore {
    pool: PgPool,
}

impl PgMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn member_id(&self, fitness_number: &str) -> StoreResult<i64> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM members WHERE fitness_number = $1")
                .bind(fitness_number)
                .fetch_optional(&self.pool)
                .await?;
        row.map(|(id,)| id).ok_or(StoreError::MemberNotFound)
    }
}

#[async_trait]
impl MemberStore for PgMemberStore {
    async fn list_members(&self, page: u32, page_size: u32) -> StoreResult<Vec<Member>> {
        let offset = (i64::from(page) - 1).max(0) * i64::from(page_size);
        let members = sqlx::query_as(
            r#"
            SELECT id, fitness_number, first_name, last_name, birth_date, height, phone_number
            FROM members
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(page_size))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    async fn find_by_fitness_number(&self, fitness_number: &str) -> StoreResult<Option<Member>> {
        let member = sqlx::query_as(
            r#"
            SELECT id, fitness_number, first_name, last_name, birth_date, height, phone_number
            FROM members
            WHERE fitness_number = $1
            "#,
        )
        .bind(fitness_number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(member)
    }

    async fn search_by_fitness_number(&self, fragment: &str) -> StoreResult<Vec<Member>> {
        // strpos is a plain containment test; no LIKE wildcard escaping.
        let members = sqlx::query_as(
            r#"
            SELECT id, fitness_number, first_name, last_name, birth_date, height, phone_number
            FROM members
            WHERE strpos(fitness_number, $1) > 0
            ORDER BY id
            "#,
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    async fn create_member(&self, data: &MemberCreate) -> StoreResult<Member> {
        // Uniqueness check and insert in one statement: concurrent creates
        // with the same fitness number race at the unique index, not in
        // application code.
        let member: Option<Member> = sqlx::query_as(
            r#"
            INSERT INTO members (fitness_number, first_name, last_name, birth_date, height, phone_number)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (fitness_number) DO NOTHING
            RETURNING id, fitness_number, first_name, last_name, birth_date, height, phone_number
            "#,
        )
        .bind(&data.fitness_number)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.birth_date)
        .bind(data.height)
        .bind(&data.phone_number)
        .fetch_optional(&self.pool)
        .await?;
        member.ok_or(StoreError::DuplicateFitnessNumber)
    }

    async fn replace_member(
        &self,
        fitness_number: &str,
        data: &MemberCreate,
    ) -> StoreResult<Member> {
        let member: Option<Member> = sqlx::query_as(
            r#"
            UPDATE members SET
                first_name = $1, last_name = $2, birth_date = $3,
                height = $4, phone_number = $5
            WHERE fitness_number = $6
            RETURNING id, fitness_number, first_name, last_name, birth_date, height, phone_number
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.birth_date)
        .bind(data.height)
        .bind(&data.phone_number)
        .bind(fitness_number)
        .fetch_optional(&self.pool)
        .await?;
        member.ok_or(StoreError::MemberNotFound)
    }

    async fn delete_member(&self, fitness_number: &str) -> StoreResult<()> {
        // Subscriptions and workouts go with the row via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM members WHERE fitness_number = $1")
            .bind(fitness_number)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::MemberNotFound);
        }
        Ok(())
    }

    async fn subscriptions_for_member(
        &self,
        fitness_number: &str,
    ) -> StoreResult<Vec<Subscription>> {
        let member_id = self.member_id(fitness_number).await?;
        let subscriptions = sqlx::query_as(
            r#"
            SELECT id, description, start_date, expiry_date, price, member_id
            FROM subscriptions
            WHERE member_id = $1
            ORDER BY id
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(subscriptions)
    }

    async fn add_subscription(
        &self,
        fitness_number: &str,
        data: &SubscriptionCreate,
    ) -> StoreResult<Subscription> {
        // Member resolution and insert in one atomic statement; no row
        // comes back when the member is absent.
        let subscription: Option<Subscription> = sqlx::query_as(
            r#"
            INSERT INTO subscriptions (description, start_date, expiry_date, price, member_id)
            SELECT $1, $2, $3, $4, m.id FROM members m WHERE m.fitness_number = $5
            RETURNING id, description, start_date, expiry_date, price, member_id
            "#,
        )
        .bind(&data.description)
        .bind(data.start_date)
        .bind(data.expiry_date)
        .bind(data.price)
        .bind(fitness_number)
        .fetch_optional(&self.pool)
        .await?;
        subscription.ok_or(StoreError::MemberNotFound)
    }

    async fn workouts_for_member(&self, fitness_number: &str) -> StoreResult<Vec<Workout>> {
        let member_id = self.member_id(fitness_number).await?;
        let workouts = sqlx::query_as(
            r#"
            SELECT id, workout_date, duration_minutes, calories_burned, notes, member_id
            FROM workouts
            WHERE member_id = $1
            ORDER BY id
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(workouts)
    }

    async fn add_workout(
        &self,
        fitness_number: &str,
        data: &WorkoutCreate,
    ) -> StoreResult<Workout> {
        let workout: Option<Workout> = sqlx::query_as(
            r#"
            INSERT INTO workouts (workout_date, duration_minutes, calories_burned, notes, member_id)
            SELECT $1, $2, $3, $4, m.id FROM members m WHERE m.fitness_number = $5
            RETURNING id, workout_date, duration_minutes, calories_burned, notes, member_id
            "#,
        )
        .bind(data.workout_date)
        .bind(data.duration_minutes)
        .bind(data.calories_burned)
        .bind(&data.notes)
        .bind(fitness_number)
        .fetch_optional(&self.pool)
        .await?;
        workout.ok_or(StoreError::MemberNotFound)
    }
}

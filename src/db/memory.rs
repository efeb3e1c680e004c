//! In-memory member store backing the test suite
//!
//! Honors the same contract as the PostgreSQL store. A single mutex makes
//! every operation atomic, including the uniqueness check on create, and
//! insertion order doubles as the listing order.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{MemberStore, StoreError, StoreResult};
use crate::models::{
    Member, MemberCreate, Subscription, SubscriptionCreate, Workout, WorkoutCreate,
};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    members: Vec<Member>,
    subscriptions: Vec<Subscription>,
    workouts: Vec<Workout>,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn member_id(&self, fitness_number: &str) -> Option<i64> {
        self.members
            .iter()
            .find(|m| m.fitness_number == fitness_number)
            .map(|m| m.id)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberStore for MemoryStore {
    async fn list_members(&self, page: u32, page_size: u32) -> StoreResult<Vec<Member>> {
        let inner = self.inner.lock().unwrap();
        let offset = page.saturating_sub(1) as usize * page_size as usize;
        Ok(inner
            .members
            .iter()
            .skip(offset)
            .take(page_size as usize)
            .cloned()
            .collect())
    }

    async fn find_by_fitness_number(&self, fitness_number: &str) -> StoreResult<Option<Member>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .members
            .iter()
            .find(|m| m.fitness_number == fitness_number)
            .cloned())
    }

    async fn search_by_fitness_number(&self, fragment: &str) -> StoreResult<Vec<Member>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .members
            .iter()
            .filter(|m| m.fitness_number.contains(fragment))
            .cloned()
            .collect())
    }

    async fn create_member(&self, data: &MemberCreate) -> StoreResult<Member> {
        let mut inner = self.inner.lock().unwrap();
        if inner.member_id(&data.fitness_number).is_some() {
            return Err(StoreError::DuplicateFitnessNumber);
        }
        let member = Member {
            id: inner.next_id(),
            fitness_number: data.fitness_number.clone(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            birth_date: data.birth_date,
            height: data.height,
            phone_number: data.phone_number.clone(),
        };
        inner.members.push(member.clone());
        Ok(member)
    }

    async fn replace_member(
        &self,
        fitness_number: &str,
        data: &MemberCreate,
    ) -> StoreResult<Member> {
        let mut inner = self.inner.lock().unwrap();
        let member = inner
            .members
            .iter_mut()
            .find(|m| m.fitness_number == fitness_number)
            .ok_or(StoreError::MemberNotFound)?;
        member.first_name = data.first_name.clone();
        member.last_name = data.last_name.clone();
        member.birth_date = data.birth_date;
        member.height = data.height;
        member.phone_number = data.phone_number.clone();
        Ok(member.clone())
    }

    async fn delete_member(&self, fitness_number: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let member_id = inner
            .member_id(fitness_number)
            .ok_or(StoreError::MemberNotFound)?;
        inner.members.retain(|m| m.id != member_id);
        // Cascade, as the schema's foreign keys would.
        inner.subscriptions.retain(|s| s.member_id != member_id);
        inner.workouts.retain(|w| w.member_id != member_id);
        Ok(())
    }

    async fn subscriptions_for_member(
        &self,
        fitness_number: &str,
    ) -> StoreResult<Vec<Subscription>> {
        let inner = self.inner.lock().unwrap();
        let member_id = inner
            .member_id(fitness_number)
            .ok_or(StoreError::MemberNotFound)?;
        Ok(inner
            .subscriptions
            .iter()
            .filter(|s| s.member_id == member_id)
            .cloned()
            .collect())
    }

    async fn add_subscription(
        &self,
        fitness_number: &str,
        data: &SubscriptionCreate,
    ) -> StoreResult<Subscription> {
        let mut inner = self.inner.lock().unwrap();
        let member_id = inner
            .member_id(fitness_number)
            .ok_or(StoreError::MemberNotFound)?;
        let subscription = Subscription {
            id: inner.next_id(),
            description: data.description.clone(),
            start_date: data.start_date,
            expiry_date: data.expiry_date,
            price: data.price,
            member_id,
        };
        inner.subscriptions.push(subscription.clone());
        Ok(subscription)
    }

    async fn workouts_for_member(&self, fitness_number: &str) -> StoreResult<Vec<Workout>> {
        let inner = self.inner.lock().unwrap();
        let member_id = inner
            .member_id(fitness_number)
            .ok_or(StoreError::MemberNotFound)?;
        Ok(inner
            .workouts
            .iter()
            .filter(|w| w.member_id == member_id)
            .cloned()
            .collect())
    }

    async fn add_workout(
        &self,
        fitness_number: &str,
        data: &WorkoutCreate,
    ) -> StoreResult<Workout> {
        let mut inner = self.inner.lock().unwrap();
        let member_id = inner
            .member_id(fitness_number)
            .ok_or(StoreError::MemberNotFound)?;
        let workout = Workout {
            id: inner.next_id(),
            workout_date: data.workout_date,
            duration_minutes: data.duration_minutes,
            calories_burned: data.calories_burned,
            notes: data.notes.clone(),
            member_id,
        };
        inner.workouts.push(workout.clone());
        Ok(workout)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    fn member(fitness_number: &str) -> MemberCreate {
        MemberCreate {
            fitness_number: fitness_number.into(),
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
            height: 1.68,
            phone_number: "+34600111222".into(),
        }
    }

    #[tokio::test]
    async fn test_create_then_find_round_trip() {
        let store = MemoryStore::new();
        let created = store.create_member(&member("FN0001")).await.unwrap();
        let found = store.find_by_fitness_number("FN0001").await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_pagination_is_insertion_order() {
        let store = MemoryStore::new();
        for n in ["FN0001", "FN0002", "FN0003", "FN0004", "FN0005"] {
            store.create_member(&member(n)).await.unwrap();
        }
        let page = store.list_members(2, 2).await.unwrap();
        let numbers: Vec<&str> = page.iter().map(|m| m.fitness_number.as_str()).collect();
        assert_eq!(numbers, ["FN0003", "FN0004"]);
    }

    #[tokio::test]
    async fn test_page_zero_saturates() {
        let store = MemoryStore::new();
        store.create_member(&member("FN0001")).await.unwrap();
        let page = store.list_members(0, 10).await.unwrap();
        assert_eq!(page.len(), 1);
    }

    #[tokio::test]
    async fn test_search_is_substring_not_prefix() {
        let store = MemoryStore::new();
        for n in ["AN0012", "BN0034", "CX0099"] {
            store.create_member(&member(n)).await.unwrap();
        }
        let hits = store.search_by_fitness_number("N00").await.unwrap();
        let numbers: Vec<&str> = hits.iter().map(|m| m.fitness_number.as_str()).collect();
        assert_eq!(numbers, ["AN0012", "BN0034"]);
    }

    #[tokio::test]
    async fn test_concurrent_create_single_winner() {
        let store = Arc::new(MemoryStore::new());
        let attempts = (0..8).map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.create_member(&member("FN0001")).await })
        });
        let results = futures::future::join_all(attempts).await;

        let created = results
            .into_iter()
            .map(|r| r.unwrap())
            .filter(Result::is_ok)
            .count();
        assert_eq!(created, 1);
        assert_eq!(store.list_members(1, 100).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_replace_preserves_surrogate_id() {
        let store = MemoryStore::new();
        let created = store.create_member(&member("FN0001")).await.unwrap();

        let mut update = member("FN0001");
        update.first_name = "Beatriz".into();
        let replaced = store.replace_member("FN0001", &update).await.unwrap();

        assert_eq!(replaced.id, created.id);
        assert_eq!(replaced.first_name, "Beatriz");
    }

    #[tokio::test]
    async fn test_replace_missing_member() {
        let store = MemoryStore::new();
        let err = store.replace_member("FN0001", &member("FN0001")).await;
        assert!(matches!(err, Err(StoreError::MemberNotFound)));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_children() {
        let store = MemoryStore::new();
        store.create_member(&member("FN0001")).await.unwrap();
        store.create_member(&member("FN0002")).await.unwrap();

        let subscription = SubscriptionCreate {
            description: "Annual".into(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            price: Decimal::new(49999, 2),
        };
        let workout = WorkoutCreate {
            workout_date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            duration_minutes: 45,
            calories_burned: 320.0,
            notes: "Leg day".into(),
        };
        store.add_subscription("FN0001", &subscription).await.unwrap();
        store.add_workout("FN0001", &workout).await.unwrap();
        store.add_subscription("FN0002", &subscription).await.unwrap();

        store.delete_member("FN0001").await.unwrap();
        assert!(store.find_by_fitness_number("FN0001").await.unwrap().is_none());

        // Orphans are gone: recreating the same business key starts clean.
        store.create_member(&member("FN0001")).await.unwrap();
        assert!(store.subscriptions_for_member("FN0001").await.unwrap().is_empty());
        assert!(store.workouts_for_member("FN0001").await.unwrap().is_empty());

        // The other member's children are untouched.
        assert_eq!(store.subscriptions_for_member("FN0002").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_member_leaves_state_unchanged() {
        let store = MemoryStore::new();
        store.create_member(&member("FN0001")).await.unwrap();

        let err = store.delete_member("FN0002").await;
        assert!(matches!(err, Err(StoreError::MemberNotFound)));
        assert_eq!(store.list_members(1, 10).await.unwrap().len(), 1);
    }
}

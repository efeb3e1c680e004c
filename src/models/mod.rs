//! Entity models
//!
//! Members are the aggregate root; subscriptions and workouts belong to a
//! member and are removed with it. Wire names are camelCase, columns are
//! snake_case.

pub mod member;
pub mod subscription;
pub mod workout;

pub use member::{Member, MemberCreate};
pub use subscription::{Subscription, SubscriptionCreate};
pub use workout::{Workout, WorkoutCreate};

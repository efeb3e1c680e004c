//! fitness-manager — member records backend for a fitness facility
//!
//! Tracks members, their subscriptions, and their logged workouts behind a
//! REST API over PostgreSQL. Member is the aggregate root: children are
//! owned through it and removed with it.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod state;

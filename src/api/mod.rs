//! API routes for fitness-manager

pub mod health;
pub mod members;

use axum::routing::get;
use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::state::AppState;

/// Create the service router
pub fn create_router(state: AppState) -> Router {
    // Member aggregate (bearer-token capability check first)
    let members = Router::new()
        .route(
            "/members",
            get(members::list_members).post(members::create_member),
        )
        .route("/members/search", get(members::search_members))
        .route(
            "/members/{fitness_number}",
            get(members::get_member)
                .put(members::replace_member)
                .delete(members::delete_member),
        )
        .route(
            "/members/{fitness_number}/subscriptions",
            get(members::list_subscriptions).post(members::create_subscription),
        )
        .route(
            "/members/{fitness_number}/workouts",
            get(members::list_workouts).post(members::create_workout),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(members)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

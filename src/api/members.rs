//! Member API handlers
//!
//! Members are addressed by their fitness number (the business key), never
//! by surrogate id. Boundary validation covers shape and field constraints;
//! uniqueness and existence are the store's verdict.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{
    Member, MemberCreate, Subscription, SubscriptionCreate, Workout, WorkoutCreate,
};
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PAGE_SIZE: u32 = 10;

fn invalid(errors: validator::ValidationErrors) -> AppError {
    AppError::validation(errors.to_string())
}

/// GET /members?page=&pageSize=
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

pub async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Member>> {
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    let members = state.store.list_members(page, page_size).await?;
    Ok(Json(members))
}

/// GET /members/search?fitnessNumber=
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub fitness_number: Option<String>,
}

pub async fn search_members(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<Member>> {
    let fragment = query
        .fitness_number
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::validation("fitnessNumber is required"))?;
    let members = state.store.search_by_fitness_number(&fragment).await?;
    Ok(Json(members))
}

/// GET /members/{fitness_number}
pub async fn get_member(
    State(state): State<AppState>,
    Path(fitness_number): Path<String>,
) -> ApiResult<Member> {
    let member = state
        .store
        .find_by_fitness_number(&fitness_number)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MemberNotFound))?;
    Ok(Json(member))
}

/// POST /members
pub async fn create_member(
    State(state): State<AppState>,
    Json(data): Json<MemberCreate>,
) -> AppResult<Response> {
    data.validate().map_err(invalid)?;
    let member = state.store.create_member(&data).await?;
    let location = format!("/members/{}", member.fitness_number);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(member),
    )
        .into_response())
}

/// PUT /members/{fitness_number}
pub async fn replace_member(
    State(state): State<AppState>,
    Path(fitness_number): Path<String>,
    Json(data): Json<MemberCreate>,
) -> AppResult<StatusCode> {
    if data.fitness_number != fitness_number {
        return Err(AppError::validation(
            "path and body fitness numbers do not match",
        ));
    }
    data.validate().map_err(invalid)?;
    state.store.replace_member(&fitness_number, &data).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /members/{fitness_number}
pub async fn delete_member(
    State(state): State<AppState>,
    Path(fitness_number): Path<String>,
) -> AppResult<StatusCode> {
    state.store.delete_member(&fitness_number).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /members/{fitness_number}/subscriptions
pub async fn list_subscriptions(
    State(state): State<AppState>,
    Path(fitness_number): Path<String>,
) -> ApiResult<Vec<Subscription>> {
    let subscriptions = state.store.subscriptions_for_member(&fitness_number).await?;
    Ok(Json(subscriptions))
}

/// POST /members/{fitness_number}/subscriptions
pub async fn create_subscription(
    State(state): State<AppState>,
    Path(fitness_number): Path<String>,
    Json(data): Json<SubscriptionCreate>,
) -> AppResult<Response> {
    data.validate().map_err(invalid)?;
    let subscription = state.store.add_subscription(&fitness_number, &data).await?;
    Ok((StatusCode::CREATED, Json(subscription)).into_response())
}

/// GET /members/{fitness_number}/workouts
pub async fn list_workouts(
    State(state): State<AppState>,
    Path(fitness_number): Path<String>,
) -> ApiResult<Vec<Workout>> {
    let workouts = state.store.workouts_for_member(&fitness_number).await?;
    Ok(Json(workouts))
}

/// POST /members/{fitness_number}/workouts
pub async fn create_workout(
    State(state): State<AppState>,
    Path(fitness_number): Path<String>,
    Json(data): Json<WorkoutCreate>,
) -> AppResult<Response> {
    data.validate().map_err(invalid)?;
    let workout = state.store.add_workout(&fitness_number, &data).await?;
    Ok((StatusCode::CREATED, Json(workout)).into_response())
}

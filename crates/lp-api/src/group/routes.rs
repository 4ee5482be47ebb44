use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    routing::get,
};
use lp_db::{
    models::{GroupSessionReview, GroupSessionStats, NewGroup},
    repositories::{group, report, word},
};
use serde_json::{Value, json};
use sqlx::SqlitePool;

use crate::{
    ApiState,
    error::ApiError,
    pagination::{self, PageQuery, PageResponse},
    resource::{GROUP, Op, WORD},
    validation,
};

/// Create the group routes, including the per-group study reports
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/groups", get(list_groups).post(create_group))
        .route(
            "/groups/{id}",
            get(get_group).put(update_group).delete(delete_group),
        )
        .route("/groups/{id}/words", get(list_group_words))
        .route("/groups/{id}/study_sessions", get(group_study_sessions))
        .route(
            "/groups/{id}/study_sessions/raw",
            get(group_study_sessions_raw),
        )
}

fn validate_group(group: &NewGroup) -> Result<(), ApiError> {
    validation::validate_required_text("name", &group.name)?;
    validation::validate_optional_text("description", &group.description)
}

/// 404 unless the group exists.
async fn ensure_group_exists(pool: &SqlitePool, id: i64) -> Result<(), ApiError> {
    group::find_by_id(pool, id)
        .await
        .map_err(GROUP.db_error(Op::Fetch))?
        .map(|_| ())
        .ok_or_else(|| GROUP.not_found())
}

async fn list_groups(State(pool): State<SqlitePool>) -> Result<Json<Value>, ApiError> {
    let groups = group::list_all(&pool)
        .await
        .map_err(GROUP.db_error(Op::FetchAll))?;

    Ok(Json(json!({ "items": groups.items })))
}

async fn get_group(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, GROUP)?;

    let group = group::find_by_id(&pool, id)
        .await
        .map_err(GROUP.db_error(Op::Fetch))?
        .ok_or_else(|| GROUP.not_found())?;

    Ok(Json(json!({ "item": group })))
}

async fn create_group(
    State(pool): State<SqlitePool>,
    payload: Result<Json<NewGroup>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let new_group = validation::json_body(payload)?;
    validate_group(&new_group)?;

    let id = group::create(&pool, &new_group)
        .await
        .map_err(GROUP.db_error(Op::Create))?;

    tracing::info!(group_id = id, "Group created");

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn update_group(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    payload: Result<Json<NewGroup>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, GROUP)?;
    let changes = validation::json_body(payload)?;
    validate_group(&changes)?;

    let outcome = group::update(&pool, &changes.with_id(id))
        .await
        .map_err(GROUP.db_error(Op::Update))?;

    GROUP.updated(outcome)
}

async fn delete_group(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, GROUP)?;

    let outcome = group::delete(&pool, id)
        .await
        .map_err(GROUP.db_error(Op::Delete))?;

    GROUP.deleted(outcome)
}

/// Words linked to a group through `words_groups`
async fn list_group_words(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, GROUP)?;
    ensure_group_exists(&pool, id).await?;

    let words = word::list_by_group(&pool, id)
        .await
        .map_err(WORD.db_error(Op::FetchAll))?;

    Ok(Json(json!({ "items": words.items })))
}

/// Per-session aggregates for a group, most recent session first
async fn group_study_sessions(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PageResponse<GroupSessionStats>>, ApiError> {
    let id = validation::parse_id(&id, GROUP)?;
    let request = pagination::page_request(query)?;
    ensure_group_exists(&pool, id).await?;

    let page = report::group_session_stats(&pool, id, request)
        .await
        .map_err(ApiError::database(
            "Failed to fetch group study sessions from database",
        ))?;

    Ok(Json(PageResponse::new(page, request)))
}

/// Every review in every session of a group
async fn group_study_sessions_raw(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PageResponse<GroupSessionReview>>, ApiError> {
    let id = validation::parse_id(&id, GROUP)?;
    let request = pagination::page_request(query)?;
    ensure_group_exists(&pool, id).await?;

    let page = report::group_session_reviews(&pool, id, request)
        .await
        .map_err(ApiError::database(
            "Failed to fetch group study session reviews from database",
        ))?;

    Ok(Json(PageResponse::new(page, request)))
}

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use lp_db::{models::NewStudyActivity, repositories::study_activity};
use serde_json::{Value, json};
use sqlx::SqlitePool;

use crate::{
    ApiState,
    error::ApiError,
    resource::{Op, STUDY_ACTIVITY},
    validation,
};

/// Create the study activity routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route(
            "/study_activities",
            get(list_activities).post(create_activity),
        )
        .route(
            "/study_activities/{id}",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
}

async fn list_activities(State(pool): State<SqlitePool>) -> Result<Json<Value>, ApiError> {
    let activities = study_activity::list_all(&pool)
        .await
        .map_err(STUDY_ACTIVITY.db_error(Op::FetchAll))?;

    Ok(Json(json!({ "items": activities.items })))
}

async fn get_activity(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, STUDY_ACTIVITY)?;

    let activity = study_activity::find_by_id(&pool, id)
        .await
        .map_err(STUDY_ACTIVITY.db_error(Op::Fetch))?
        .ok_or_else(|| STUDY_ACTIVITY.not_found())?;

    Ok(Json(json!({ "item": activity })))
}

async fn create_activity(
    State(pool): State<SqlitePool>,
    payload: Result<Json<NewStudyActivity>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let activity = validation::json_body(payload)?;
    validation::validate_optional_text("name", &activity.name)?;

    let id = study_activity::create(&pool, &activity)
        .await
        .map_err(STUDY_ACTIVITY.db_error(Op::Create))?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn update_activity(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    payload: Result<Json<NewStudyActivity>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, STUDY_ACTIVITY)?;
    let activity = validation::json_body(payload)?;
    validation::validate_optional_text("name", &activity.name)?;

    let outcome = study_activity::update(&pool, id, &activity)
        .await
        .map_err(STUDY_ACTIVITY.db_error(Op::Update))?;

    STUDY_ACTIVITY.updated(outcome)
}

async fn delete_activity(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, STUDY_ACTIVITY)?;

    let outcome = study_activity::delete(&pool, id)
        .await
        .map_err(STUDY_ACTIVITY.db_error(Op::Delete))?;

    STUDY_ACTIVITY.deleted(outcome)
}

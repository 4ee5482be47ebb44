use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    routing::get,
};
use lp_db::{
    models::{NewStudySession, SessionReview, SessionWordStats},
    repositories::{report, study_session},
};
use serde_json::{Value, json};
use sqlx::SqlitePool;

use crate::{
    ApiState,
    error::ApiError,
    pagination::{self, PageQuery, PageResponse},
    resource::{Op, STUDY_SESSION},
    validation,
};

/// Create the study session routes, including the per-session word reports
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/study_sessions", get(list_sessions).post(create_session))
        .route(
            "/study_sessions/{id}",
            get(get_session).put(update_session).delete(delete_session),
        )
        .route("/study_sessions/{id}/words", get(session_words))
        .route("/study_sessions/{id}/words/raw", get(session_words_raw))
}

async fn ensure_session_exists(pool: &SqlitePool, id: i64) -> Result<(), ApiError> {
    study_session::find_by_id(pool, id)
        .await
        .map_err(STUDY_SESSION.db_error(Op::Fetch))?
        .map(|_| ())
        .ok_or_else(|| STUDY_SESSION.not_found())
}

async fn list_sessions(State(pool): State<SqlitePool>) -> Result<Json<Value>, ApiError> {
    let sessions = study_session::list_all(&pool)
        .await
        .map_err(STUDY_SESSION.db_error(Op::FetchAll))?;

    Ok(Json(json!({ "items": sessions.items })))
}

async fn get_session(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, STUDY_SESSION)?;

    let session = study_session::find_by_id(&pool, id)
        .await
        .map_err(STUDY_SESSION.db_error(Op::Fetch))?
        .ok_or_else(|| STUDY_SESSION.not_found())?;

    Ok(Json(json!({ "item": session })))
}

async fn create_session(
    State(pool): State<SqlitePool>,
    payload: Result<Json<NewStudySession>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let session = validation::json_body(payload)?;

    let id = study_session::create(&pool, &session)
        .await
        .map_err(STUDY_SESSION.db_error(Op::Create))?;

    tracing::info!(
        study_session_id = id,
        group_id = session.group_id,
        "Study session started"
    );

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn update_session(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    payload: Result<Json<NewStudySession>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, STUDY_SESSION)?;
    let session = validation::json_body(payload)?;

    let outcome = study_session::update(&pool, id, &session)
        .await
        .map_err(STUDY_SESSION.db_error(Op::Update))?;

    STUDY_SESSION.updated(outcome)
}

async fn delete_session(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, STUDY_SESSION)?;

    let outcome = study_session::delete(&pool, id)
        .await
        .map_err(STUDY_SESSION.db_error(Op::Delete))?;

    STUDY_SESSION.deleted(outcome)
}

/// Correct/incorrect counts per word reviewed in the session
async fn session_words(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PageResponse<SessionWordStats>>, ApiError> {
    let id = validation::parse_id(&id, STUDY_SESSION)?;
    let request = pagination::page_request(query)?;
    ensure_session_exists(&pool, id).await?;

    let page = report::session_word_stats(&pool, id, request)
        .await
        .map_err(ApiError::database(
            "Failed to fetch study session words from database",
        ))?;

    Ok(Json(PageResponse::new(page, request)))
}

/// Individual reviews of the session, newest first
async fn session_words_raw(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PageResponse<SessionReview>>, ApiError> {
    let id = validation::parse_id(&id, STUDY_SESSION)?;
    let request = pagination::page_request(query)?;
    ensure_session_exists(&pool, id).await?;

    let page = report::session_review_items(&pool, id, request)
        .await
        .map_err(ApiError::database(
            "Failed to fetch study session reviews from database",
        ))?;

    Ok(Json(PageResponse::new(page, request)))
}

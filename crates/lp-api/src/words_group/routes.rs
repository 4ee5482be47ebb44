use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use lp_db::{models::NewWordsGroup, repositories::words_group};
use serde_json::{Value, json};
use sqlx::SqlitePool;

use crate::{
    ApiState,
    error::ApiError,
    resource::{Op, WORDS_GROUP},
    validation,
};

/// Create the word/group link routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/words_groups", get(list_links).post(create_link))
        .route(
            "/words_groups/{id}",
            get(get_link).put(update_link).delete(delete_link),
        )
}

async fn list_links(State(pool): State<SqlitePool>) -> Result<Json<Value>, ApiError> {
    let links = words_group::list_all(&pool)
        .await
        .map_err(WORDS_GROUP.db_error(Op::FetchAll))?;

    Ok(Json(json!({ "items": links.items })))
}

async fn get_link(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, WORDS_GROUP)?;

    let link = words_group::find_by_id(&pool, id)
        .await
        .map_err(WORDS_GROUP.db_error(Op::Fetch))?
        .ok_or_else(|| WORDS_GROUP.not_found())?;

    Ok(Json(json!({ "item": link })))
}

async fn create_link(
    State(pool): State<SqlitePool>,
    payload: Result<Json<NewWordsGroup>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let link = validation::json_body(payload)?;

    let id = words_group::create(&pool, &link)
        .await
        .map_err(WORDS_GROUP.db_error(Op::Create))?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn update_link(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    payload: Result<Json<NewWordsGroup>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, WORDS_GROUP)?;
    let link = validation::json_body(payload)?;

    let outcome = words_group::update(&pool, &link.with_id(id))
        .await
        .map_err(WORDS_GROUP.db_error(Op::Update))?;

    WORDS_GROUP.updated(outcome)
}

async fn delete_link(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, WORDS_GROUP)?;

    let outcome = words_group::delete(&pool, id)
        .await
        .map_err(WORDS_GROUP.db_error(Op::Delete))?;

    WORDS_GROUP.deleted(outcome)
}

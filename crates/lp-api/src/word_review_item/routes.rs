use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use lp_db::{models::NewWordReviewItem, repositories::word_review_item};
use serde_json::{Value, json};
use sqlx::SqlitePool;

use crate::{
    ApiState,
    error::ApiError,
    resource::{Op, WORD_REVIEW_ITEM},
    validation,
};

/// Create the word review item routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route(
            "/word_review_items",
            get(list_review_items).post(create_review_item),
        )
        .route(
            "/word_review_items/{id}",
            get(get_review_item)
                .put(update_review_item)
                .delete(delete_review_item),
        )
}

async fn list_review_items(State(pool): State<SqlitePool>) -> Result<Json<Value>, ApiError> {
    let items = word_review_item::list_all(&pool)
        .await
        .map_err(WORD_REVIEW_ITEM.db_error(Op::FetchAll))?;

    Ok(Json(json!({ "items": items.items })))
}

async fn get_review_item(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, WORD_REVIEW_ITEM)?;

    let item = word_review_item::find_by_id(&pool, id)
        .await
        .map_err(WORD_REVIEW_ITEM.db_error(Op::Fetch))?
        .ok_or_else(|| WORD_REVIEW_ITEM.not_found())?;

    Ok(Json(json!({ "item": item })))
}

async fn create_review_item(
    State(pool): State<SqlitePool>,
    payload: Result<Json<NewWordReviewItem>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let item = validation::json_body(payload)?;

    let id = word_review_item::create(&pool, &item)
        .await
        .map_err(WORD_REVIEW_ITEM.db_error(Op::Create))?;

    tracing::debug!(
        word_review_item_id = id,
        study_session_id = item.study_session_id,
        is_correct = item.is_correct,
        "Review recorded"
    );

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn update_review_item(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    payload: Result<Json<NewWordReviewItem>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, WORD_REVIEW_ITEM)?;
    let item = validation::json_body(payload)?;

    let outcome = word_review_item::update(&pool, id, &item)
        .await
        .map_err(WORD_REVIEW_ITEM.db_error(Op::Update))?;

    WORD_REVIEW_ITEM.updated(outcome)
}

async fn delete_review_item(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, WORD_REVIEW_ITEM)?;

    let outcome = word_review_item::delete(&pool, id)
        .await
        .map_err(WORD_REVIEW_ITEM.db_error(Op::Delete))?;

    WORD_REVIEW_ITEM.deleted(outcome)
}

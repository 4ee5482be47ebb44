use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use lp_db::{models::NewWord, repositories::word};
use serde_json::{Value, json};
use sqlx::SqlitePool;

use crate::{
    ApiState,
    error::ApiError,
    resource::{Op, WORD},
    validation,
};

/// Create the word routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/words", get(list_words).post(create_word))
        .route(
            "/words/{id}",
            get(get_word).put(update_word).delete(delete_word),
        )
}

fn validate_word(word: &NewWord) -> Result<(), ApiError> {
    validation::validate_required_text("english", &word.english)?;
    validation::validate_required_text("portuguese", &word.portuguese)?;
    validation::validate_optional_text("parts", &word.parts)
}

async fn list_words(State(pool): State<SqlitePool>) -> Result<Json<Value>, ApiError> {
    let words = word::list_all(&pool)
        .await
        .map_err(WORD.db_error(Op::FetchAll))?;

    Ok(Json(json!({ "items": words.items })))
}

async fn get_word(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, WORD)?;

    let word = word::find_by_id(&pool, id)
        .await
        .map_err(WORD.db_error(Op::Fetch))?
        .ok_or_else(|| WORD.not_found())?;

    Ok(Json(json!({ "item": word })))
}

async fn create_word(
    State(pool): State<SqlitePool>,
    payload: Result<Json<NewWord>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let new_word = validation::json_body(payload)?;
    validate_word(&new_word)?;

    let id = word::create(&pool, &new_word)
        .await
        .map_err(WORD.db_error(Op::Create))?;

    tracing::info!(word_id = id, "Word created");

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn update_word(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    payload: Result<Json<NewWord>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, WORD)?;
    let changes = validation::json_body(payload)?;
    validate_word(&changes)?;

    let outcome = word::update(&pool, &changes.with_id(id))
        .await
        .map_err(WORD.db_error(Op::Update))?;

    WORD.updated(outcome)
}

async fn delete_word(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id, WORD)?;

    let outcome = word::delete(&pool, id)
        .await
        .map_err(WORD.db_error(Op::Delete))?;

    WORD.deleted(outcome)
}

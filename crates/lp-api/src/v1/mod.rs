use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::{
    group, state::ApiState, study_activity, study_session, word, word_review_item, words_group,
};

/// Routes mounted under `/api`
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/ping", get(ping))
        .merge(word::routes())
        .merge(group::routes())
        .merge(words_group::routes())
        .merge(study_activity::routes())
        .merge(study_session::routes())
        .merge(word_review_item::routes())
}

async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

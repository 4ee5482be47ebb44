//! Names and response messages for each exposed entity.

use axum::Json;
use lp_db::WriteOutcome;
use serde_json::{Value, json};

use crate::error::ApiError;

/// Store operation, used to pick the failure message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    FetchAll,
    Fetch,
    Create,
    Update,
    Delete,
}

/// How an entity is named in client-facing messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resource {
    /// Singular name, e.g. `study session`
    pub name: &'static str,
    /// Name of the collection, e.g. `study sessions`
    pub collection: &'static str,
    /// Capitalized name, e.g. `Study session`
    pub title: &'static str,
}

pub const WORD: Resource = Resource {
    name: "word",
    collection: "words",
    title: "Word",
};

pub const GROUP: Resource = Resource {
    name: "group",
    collection: "groups",
    title: "Group",
};

pub const WORDS_GROUP: Resource = Resource {
    name: "words_groups",
    collection: "words_groups",
    title: "WordsGroups",
};

pub const STUDY_ACTIVITY: Resource = Resource {
    name: "study activity",
    collection: "study activities",
    title: "Study activity",
};

pub const STUDY_SESSION: Resource = Resource {
    name: "study session",
    collection: "study sessions",
    title: "Study session",
};

pub const WORD_REVIEW_ITEM: Resource = Resource {
    name: "word review item",
    collection: "word review items",
    title: "Word review item",
};

impl Resource {
    pub fn invalid_id(self) -> ApiError {
        ApiError::Validation(format!("Invalid {} ID", self.name))
    }

    pub fn not_found(self) -> ApiError {
        ApiError::NotFound(format!("{} not found", self.title))
    }

    pub fn db_error(self, op: Op) -> impl FnOnce(sqlx::Error) -> ApiError {
        let message = match op {
            Op::FetchAll => format!("Failed to fetch {} from database", self.collection),
            Op::Fetch => format!("Failed to fetch {} from database", self.name),
            Op::Create => format!("Failed to create {} in database", self.name),
            Op::Update => format!("Failed to update {} in database", self.name),
            Op::Delete => format!("Failed to delete {} from database", self.name),
        };
        ApiError::database(message)
    }

    /// `{"message": "<Title> updated successfully"}`, or 404 when no row matched.
    pub fn updated(self, outcome: WriteOutcome) -> Result<Json<Value>, ApiError> {
        self.write_response(outcome, "updated")
    }

    /// `{"message": "<Title> deleted successfully"}`, or 404 when no row matched.
    pub fn deleted(self, outcome: WriteOutcome) -> Result<Json<Value>, ApiError> {
        self.write_response(outcome, "deleted")
    }

    fn write_response(self, outcome: WriteOutcome, verb: &str) -> Result<Json<Value>, ApiError> {
        match outcome {
            WriteOutcome::Applied => Ok(Json(json!({
                "message": format!("{} {verb} successfully", self.title)
            }))),
            WriteOutcome::NotFound => Err(self.not_found()),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Word model - a vocabulary entry in English and Portuguese
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Word {
    /// Unique word identifier
    pub id: i64,
    /// English text
    pub english: String,
    /// Portuguese text
    pub portuguese: String,
    /// Part-of-speech tag (e.g. "noun", "verb", "interjection")
    pub parts: String,
}

/// Insert payload for [`Word`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWord {
    pub english: String,
    pub portuguese: String,
    #[serde(default)]
    pub parts: String,
}

impl NewWord {
    pub fn with_id(self, id: i64) -> Word {
        Word {
            id,
            english: self.english,
            portuguese: self.portuguese,
            parts: self.parts,
        }
    }
}

/// Group model - a named collection of words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Group {
    /// Unique group identifier
    pub id: i64,
    /// Group name (required)
    pub name: String,
    /// Free-form description
    pub description: String,
}

/// Insert payload for [`Group`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGroup {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl NewGroup {
    pub fn with_id(self, id: i64) -> Group {
        Group {
            id,
            name: self.name,
            description: self.description,
        }
    }
}

/// Link between a word and a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct WordsGroup {
    pub id: i64,
    pub word_id: i64,
    pub group_id: i64,
}

/// Insert payload for [`WordsGroup`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWordsGroup {
    pub word_id: i64,
    pub group_id: i64,
}

impl NewWordsGroup {
    pub const fn with_id(self, id: i64) -> WordsGroup {
        WordsGroup {
            id,
            word_id: self.word_id,
            group_id: self.group_id,
        }
    }
}

/// Study activity model - the kind of exercise a session is run with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StudyActivity {
    pub id: i64,
    /// Session this activity was started from, if any
    pub study_session_id: Option<i64>,
    pub group_id: i64,
    /// Display name, projected as `activity_name` in session reports
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for [`StudyActivity`]
///
/// A missing `created_at` is filled in with the current time on insert and left
/// untouched on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudyActivity {
    #[serde(default)]
    pub study_session_id: Option<i64>,
    pub group_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Study session model - one timed run of an activity against a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StudySession {
    pub id: i64,
    pub group_id: i64,
    pub created_at: DateTime<Utc>,
    pub study_activity_id: i64,
}

/// Insert payload for [`StudySession`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudySession {
    pub group_id: i64,
    pub study_activity_id: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Word review item - a single correctness judgment for one word in one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct WordReviewItem {
    pub id: i64,
    pub word_id: i64,
    pub study_session_id: i64,
    pub is_correct: bool,
    /// Used for ordering and for session duration
    pub created_at: DateTime<Utc>,
}

/// Insert payload for [`WordReviewItem`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWordReviewItem {
    pub word_id: i64,
    pub study_session_id: i64,
    pub is_correct: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Per-word correctness totals within one study session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SessionWordStats {
    /// Word id
    pub id: i64,
    pub english: String,
    pub portuguese: String,
    pub correct_count: i64,
    pub incorrect_count: i64,
}

/// A review item joined with its word, as listed for one study session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SessionReview {
    /// Review item id
    pub id: i64,
    pub word_id: i64,
    pub english: String,
    pub portuguese: String,
    pub is_correct: bool,
    pub created_at: DateTime<Utc>,
}

/// Aggregated statistics for one study session of a group
///
/// Sessions without any review report zero for every aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GroupSessionStats {
    /// Study session id
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub activity_name: String,
    /// Distinct words reviewed
    pub total_words: i64,
    pub correct_count: i64,
    pub incorrect_count: i64,
    /// Percentage of correct reviews, rounded to one decimal
    pub success_rate: f64,
    /// Minutes between the first and last review, rounded
    pub duration_minutes: i64,
}

/// One review row across all sessions of a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GroupSessionReview {
    /// Study session id
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub activity_name: String,
    pub word_id: i64,
    pub english: String,
    pub portuguese: String,
    pub is_correct: bool,
    pub review_created_at: DateTime<Utc>,
}

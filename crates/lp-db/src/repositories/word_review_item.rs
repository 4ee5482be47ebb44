use chrono::Utc;
use sqlx::{Executor, Sqlite};

use crate::{
    Listing, WriteOutcome,
    models::{NewWordReviewItem, WordReviewItem},
};

pub async fn list_all<'e, E>(executor: E) -> Result<Listing<WordReviewItem>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        // language=SQLite
        r#"
            SELECT id, word_id, study_session_id, is_correct, created_at
            FROM word_review_items
            ORDER BY id
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(Listing::decode("word_review_item", &rows))
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<WordReviewItem>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as(
        // language=SQLite
        r#"
            SELECT id, word_id, study_session_id, is_correct, created_at
            FROM word_review_items
            WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn create<'e, E>(executor: E, item: &NewWordReviewItem) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar(
        // language=SQLite
        r#"
            INSERT INTO word_review_items (word_id, study_session_id, is_correct, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
        "#,
    )
    .bind(item.word_id)
    .bind(item.study_session_id)
    .bind(item.is_correct)
    .bind(item.created_at.unwrap_or_else(Utc::now))
    .fetch_one(executor)
    .await
}

/// Overwrite a review item. `created_at` is only replaced when one is supplied.
pub async fn update<'e, E>(
    executor: E,
    id: i64,
    item: &NewWordReviewItem,
) -> Result<WriteOutcome, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        // language=SQLite
        r#"
            UPDATE word_review_items
            SET word_id = ?,
                study_session_id = ?,
                is_correct = ?,
                created_at = COALESCE(?, created_at)
            WHERE id = ?
        "#,
    )
    .bind(item.word_id)
    .bind(item.study_session_id)
    .bind(item.is_correct)
    .bind(item.created_at)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(WriteOutcome::from_rows_affected(result.rows_affected()))
}

pub async fn delete<'e, E>(executor: E, id: i64) -> Result<WriteOutcome, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        // language=SQLite
        r#"
            DELETE FROM word_review_items
            WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(WriteOutcome::from_rows_affected(result.rows_affected()))
}

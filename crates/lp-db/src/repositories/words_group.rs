use sqlx::{Executor, Sqlite};

use crate::{
    Listing, WriteOutcome,
    models::{NewWordsGroup, WordsGroup},
};

pub async fn list_all<'e, E>(executor: E) -> Result<Listing<WordsGroup>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        // language=SQLite
        r#"
            SELECT id, word_id, group_id
            FROM words_groups
            ORDER BY id
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(Listing::decode("words_group", &rows))
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<WordsGroup>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as(
        // language=SQLite
        r#"
            SELECT id, word_id, group_id
            FROM words_groups
            WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Link a word to a group. A duplicate `(word_id, group_id)` pair is rejected by the
/// store's unique constraint.
pub async fn create<'e, E>(executor: E, link: &NewWordsGroup) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar(
        // language=SQLite
        r#"
            INSERT INTO words_groups (word_id, group_id)
            VALUES (?, ?)
            RETURNING id
        "#,
    )
    .bind(link.word_id)
    .bind(link.group_id)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E>(executor: E, link: &WordsGroup) -> Result<WriteOutcome, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        // language=SQLite
        r#"
            UPDATE words_groups
            SET word_id = ?, group_id = ?
            WHERE id = ?
        "#,
    )
    .bind(link.word_id)
    .bind(link.group_id)
    .bind(link.id)
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
            DELETE FROM words_groups
            WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(WriteOutcome::from_rows_affected(result.rows_affected()))
}

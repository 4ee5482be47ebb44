use chrono::Utc;
use sqlx::{Executor, Sqlite};

use crate::{
    Listing, WriteOutcome,
    models::{NewStudyActivity, StudyActivity},
};

pub async fn list_all<'e, E>(executor: E) -> Result<Listing<StudyActivity>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        // language=SQLite
        r#"
            SELECT id, study_session_id, group_id, name, created_at
            FROM study_activities
            ORDER BY id
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(Listing::decode("study_activity", &rows))
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<StudyActivity>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as(
        // language=SQLite
        r#"
            SELECT id, study_session_id, group_id, name, created_at
            FROM study_activities
            WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn create<'e, E>(executor: E, activity: &NewStudyActivity) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar(
        // language=SQLite
        r#"
            INSERT INTO study_activities (study_session_id, group_id, name, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
        "#,
    )
    .bind(activity.study_session_id)
    .bind(activity.group_id)
    .bind(&activity.name)
    .bind(activity.created_at.unwrap_or_else(Utc::now))
    .fetch_one(executor)
    .await
}

/// Overwrite an activity. `created_at` is only replaced when one is supplied.
pub async fn update<'e, E>(
    executor: E,
    id: i64,
    activity: &NewStudyActivity,
) -> Result<WriteOutcome, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        // language=SQLite
        r#"
            UPDATE study_activities
            SET study_session_id = ?,
                group_id = ?,
                name = ?,
                created_at = COALESCE(?, created_at)
            WHERE id = ?
        "#,
    )
    .bind(activity.study_session_id)
    .bind(activity.group_id)
    .bind(&activity.name)
    .bind(activity.created_at)
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
            DELETE FROM study_activities
            WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(WriteOutcome::from_rows_affected(result.rows_affected()))
}

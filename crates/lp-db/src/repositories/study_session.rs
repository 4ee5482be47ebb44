use chrono::Utc;
use sqlx::{Executor, Sqlite};

use crate::{
    Listing, WriteOutcome,
    models::{NewStudySession, StudySession},
};

pub async fn list_all<'e, E>(executor: E) -> Result<Listing<StudySession>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        // language=SQLite
        r#"
            SELECT id, group_id, created_at, study_activity_id
            FROM study_sessions
            ORDER BY id
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(Listing::decode("study_session", &rows))
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<StudySession>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as(
        // language=SQLite
        r#"
            SELECT id, group_id, created_at, study_activity_id
            FROM study_sessions
            WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn create<'e, E>(executor: E, session: &NewStudySession) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar(
        // language=SQLite
        r#"
            INSERT INTO study_sessions (group_id, created_at, study_activity_id)
            VALUES (?, ?, ?)
            RETURNING id
        "#,
    )
    .bind(session.group_id)
    .bind(session.created_at.unwrap_or_else(Utc::now))
    .bind(session.study_activity_id)
    .fetch_one(executor)
    .await
}

/// Overwrite a session. `created_at` is only replaced when one is supplied.
pub async fn update<'e, E>(
    executor: E,
    id: i64,
    session: &NewStudySession,
) -> Result<WriteOutcome, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        // language=SQLite
        r#"
            UPDATE study_sessions
            SET group_id = ?,
                created_at = COALESCE(?, created_at),
                study_activity_id = ?
            WHERE id = ?
        "#,
    )
    .bind(session.group_id)
    .bind(session.created_at)
    .bind(session.study_activity_id)
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
            DELETE FROM study_sessions
            WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(WriteOutcome::from_rows_affected(result.rows_affected()))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::{
        models::{NewGroup, NewStudyActivity},
        repositories::{group, study_activity},
        test_support,
    };

    async fn group_and_activity(pool: &sqlx::SqlitePool) -> (i64, i64) {
        let group_id = group::create(
            pool,
            &NewGroup {
                name: "Basics".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap();
        let activity_id = study_activity::create(
            pool,
            &NewStudyActivity {
                study_session_id: None,
                group_id,
                name: "Flashcards".to_string(),
                created_at: None,
            },
        )
        .await
        .unwrap();
        (group_id, activity_id)
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let pool = test_support::pool().await;
        let (group_id, study_activity_id) = group_and_activity(&pool).await;
        let created_at = Utc.with_ymd_and_hms(2025, 3, 4, 18, 0, 0).unwrap();

        let id = create(
            &pool,
            &NewStudySession {
                group_id,
                study_activity_id,
                created_at: Some(created_at),
            },
        )
        .await
        .unwrap();

        assert_eq!(
            find_by_id(&pool, id).await.unwrap(),
            Some(StudySession {
                id,
                group_id,
                created_at,
                study_activity_id,
            })
        );
    }

    #[tokio::test]
    async fn test_missing_created_at_defaults_to_now() {
        let pool = test_support::pool().await;
        let (group_id, study_activity_id) = group_and_activity(&pool).await;
        let before = Utc::now();

        let id = create(
            &pool,
            &NewStudySession {
                group_id,
                study_activity_id,
                created_at: None,
            },
        )
        .await
        .unwrap();

        let session = find_by_id(&pool, id).await.unwrap().unwrap();
        assert!(session.created_at >= before);
        assert!(session.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_list_skips_rows_with_bad_timestamps() {
        let pool = test_support::pool().await;
        let (group_id, study_activity_id) = group_and_activity(&pool).await;
        let session = NewStudySession {
            group_id,
            study_activity_id,
            created_at: None,
        };
        create(&pool, &session).await.unwrap();
        sqlx::query(
            "INSERT INTO study_sessions (group_id, created_at, study_activity_id) VALUES (?, 'yesterday-ish', ?)",
        )
        .bind(group_id)
        .bind(study_activity_id)
        .execute(&pool)
        .await
        .unwrap();

        let listing = list_all(&pool).await.unwrap();
        assert_eq!(listing.items.len(), 1);
        assert_eq!(listing.skipped, 1);
    }

    #[tokio::test]
    async fn test_delete_missing_session() {
        let pool = test_support::pool().await;
        assert_eq!(delete(&pool, 7).await.unwrap(), WriteOutcome::NotFound);
    }
}

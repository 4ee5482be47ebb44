//! Paginated study-session reports.
//!
//! Every report first counts the rows matching its filter so the caller can compute the
//! number of pages, then fetches the requested window.

use sqlx::SqlitePool;

use crate::{
    PageRequest, Paginated,
    models::{GroupSessionReview, GroupSessionStats, SessionReview, SessionWordStats},
};

/// Words reviewed in a session with their correct/incorrect totals, by word id.
pub async fn session_word_stats(
    pool: &SqlitePool,
    session_id: i64,
    page: PageRequest,
) -> Result<Paginated<SessionWordStats>, sqlx::Error> {
    let total_items: i64 = sqlx::query_scalar(
        // language=SQLite
        r#"
            SELECT COUNT(DISTINCT wri.word_id)
            FROM word_review_items wri
            JOIN words w ON w.id = wri.word_id
            WHERE wri.study_session_id = ?
        "#,
    )
    .bind(session_id)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as(
        // language=SQLite
        r#"
            SELECT
                w.id,
                w.english,
                w.portuguese,
                SUM(CASE WHEN wri.is_correct = 1 THEN 1 ELSE 0 END) AS correct_count,
                SUM(CASE WHEN wri.is_correct = 0 THEN 1 ELSE 0 END) AS incorrect_count
            FROM word_review_items wri
            JOIN words w ON w.id = wri.word_id
            WHERE wri.study_session_id = ?
            GROUP BY w.id, w.english, w.portuguese
            ORDER BY w.id
            LIMIT ? OFFSET ?
        "#,
    )
    .bind(session_id)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    Ok(Paginated { items, total_items })
}

/// Individual reviews of a session joined with their word, newest first.
pub async fn session_review_items(
    pool: &SqlitePool,
    session_id: i64,
    page: PageRequest,
) -> Result<Paginated<SessionReview>, sqlx::Error> {
    let total_items: i64 = sqlx::query_scalar(
        // language=SQLite
        r#"
            SELECT COUNT(*)
            FROM word_review_items wri
            JOIN words w ON w.id = wri.word_id
            WHERE wri.study_session_id = ?
        "#,
    )
    .bind(session_id)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as(
        // language=SQLite
        r#"
            SELECT
                wri.id,
                w.id AS word_id,
                w.english,
                w.portuguese,
                wri.is_correct,
                wri.created_at
            FROM word_review_items wri
            JOIN words w ON w.id = wri.word_id
            WHERE wri.study_session_id = ?
            ORDER BY wri.created_at DESC, wri.id DESC
            LIMIT ? OFFSET ?
        "#,
    )
    .bind(session_id)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    Ok(Paginated { items, total_items })
}

/// Per-session statistics for every session of a group, most recent session first.
///
/// A session without reviews still appears, with zero for every aggregate.
pub async fn group_session_stats(
    pool: &SqlitePool,
    group_id: i64,
    page: PageRequest,
) -> Result<Paginated<GroupSessionStats>, sqlx::Error> {
    let total_items: i64 = sqlx::query_scalar(
        // language=SQLite
        r#"
            SELECT COUNT(*)
            FROM study_sessions
            WHERE group_id = ?
        "#,
    )
    .bind(group_id)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as(
        // language=SQLite
        r#"
            SELECT
                ss.id,
                ss.created_at,
                COALESCE(sa.name, '') AS activity_name,
                COUNT(DISTINCT wri.word_id) AS total_words,
                COALESCE(SUM(CASE WHEN wri.is_correct = 1 THEN 1 ELSE 0 END), 0) AS correct_count,
                COALESCE(SUM(CASE WHEN wri.is_correct = 0 THEN 1 ELSE 0 END), 0) AS incorrect_count,
                COALESCE(
                    ROUND(AVG(CASE WHEN wri.is_correct = 1 THEN 100.0 WHEN wri.is_correct = 0 THEN 0.0 END), 1),
                    0.0
                ) AS success_rate,
                COALESCE(
                    CAST(ROUND((julianday(MAX(wri.created_at)) - julianday(MIN(wri.created_at))) * 24 * 60) AS INTEGER),
                    0
                ) AS duration_minutes
            FROM study_sessions ss
            LEFT JOIN study_activities sa ON sa.id = ss.study_activity_id
            LEFT JOIN word_review_items wri ON wri.study_session_id = ss.id
            WHERE ss.group_id = ?
            GROUP BY ss.id, ss.created_at, sa.name
            ORDER BY ss.created_at DESC, ss.id DESC
            LIMIT ? OFFSET ?
        "#,
    )
    .bind(group_id)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    Ok(Paginated { items, total_items })
}

/// Every review of every session of a group: sessions newest first, reviews in the
/// order they happened.
pub async fn group_session_reviews(
    pool: &SqlitePool,
    group_id: i64,
    page: PageRequest,
) -> Result<Paginated<GroupSessionReview>, sqlx::Error> {
    let total_items: i64 = sqlx::query_scalar(
        // language=SQLite
        r#"
            SELECT COUNT(*)
            FROM study_sessions ss
            JOIN word_review_items wri ON wri.study_session_id = ss.id
            JOIN words w ON w.id = wri.word_id
            WHERE ss.group_id = ?
        "#,
    )
    .bind(group_id)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as(
        // language=SQLite
        r#"
            SELECT
                ss.id,
                ss.created_at,
                COALESCE(sa.name, '') AS activity_name,
                w.id AS word_id,
                w.english,
                w.portuguese,
                wri.is_correct,
                wri.created_at AS review_created_at
            FROM study_sessions ss
            LEFT JOIN study_activities sa ON sa.id = ss.study_activity_id
            JOIN word_review_items wri ON wri.study_session_id = ss.id
            JOIN words w ON w.id = wri.word_id
            WHERE ss.group_id = ?
            ORDER BY ss.created_at DESC, ss.id DESC, wri.created_at ASC, wri.id ASC
            LIMIT ? OFFSET ?
        "#,
    )
    .bind(group_id)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    Ok(Paginated { items, total_items })
}

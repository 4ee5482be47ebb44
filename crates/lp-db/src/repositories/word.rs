use sqlx::{Executor, Sqlite};

use crate::{
    Listing, WriteOutcome,
    models::{NewWord, Word},
};

pub async fn list_all<'e, E>(executor: E) -> Result<Listing<Word>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        // language=SQLite
        r#"
            SELECT id, english, portuguese, parts
            FROM words
            ORDER BY id
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(Listing::decode("word", &rows))
}

/// Words linked to a group through `words_groups`.
pub async fn list_by_group<'e, E>(executor: E, group_id: i64) -> Result<Listing<Word>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        // language=SQLite
        r#"
            SELECT w.id, w.english, w.portuguese, w.parts
            FROM words w
            JOIN words_groups wg ON wg.word_id = w.id
            WHERE wg.group_id = ?
            ORDER BY w.id
        "#,
    )
    .bind(group_id)
    .fetch_all(executor)
    .await?;

    Ok(Listing::decode("word", &rows))
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Word>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as(
        // language=SQLite
        r#"
            SELECT id, english, portuguese, parts
            FROM words
            WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn create<'e, E>(executor: E, word: &NewWord) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar(
        // language=SQLite
        r#"
            INSERT INTO words (english, portuguese, parts)
            VALUES (?, ?, ?)
            RETURNING id
        "#,
    )
    .bind(&word.english)
    .bind(&word.portuguese)
    .bind(&word.parts)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E>(executor: E, word: &Word) -> Result<WriteOutcome, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        // language=SQLite
        r#"
            UPDATE words
            SET english = ?, portuguese = ?, parts = ?
            WHERE id = ?
        "#,
    )
    .bind(&word.english)
    .bind(&word.portuguese)
    .bind(&word.parts)
    .bind(word.id)
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
            DELETE FROM words
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
    use super::*;
    use crate::test_support;

    fn hello() -> NewWord {
        NewWord {
            english: "hello".to_string(),
            portuguese: "olá".to_string(),
            parts: "interjection".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_find_round_trips() {
        let pool = test_support::pool().await;

        let id = create(&pool, &hello()).await.unwrap();
        assert!(id > 0);

        let word = find_by_id(&pool, id).await.unwrap();
        assert_eq!(word, Some(hello().with_id(id)));
    }

    #[tokio::test]
    async fn test_find_missing_word_is_none() {
        let pool = test_support::pool().await;
        assert_eq!(find_by_id(&pool, 999_999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_missing_word_reports_not_found() {
        let pool = test_support::pool().await;
        let id = create(&pool, &hello()).await.unwrap();

        let ghost = hello().with_id(id + 100);
        assert_eq!(update(&pool, &ghost).await.unwrap(), WriteOutcome::NotFound);

        // The existing row is untouched
        let listing = list_all(&pool).await.unwrap();
        assert_eq!(listing.items, vec![hello().with_id(id)]);
    }

    #[tokio::test]
    async fn test_update_existing_word() {
        let pool = test_support::pool().await;
        let id = create(&pool, &hello()).await.unwrap();

        let changed = Word {
            id,
            english: "hi".to_string(),
            portuguese: "oi".to_string(),
            parts: "interjection".to_string(),
        };
        assert_eq!(update(&pool, &changed).await.unwrap(), WriteOutcome::Applied);
        assert_eq!(find_by_id(&pool, id).await.unwrap(), Some(changed));
    }

    #[tokio::test]
    async fn test_delete_then_find_is_none() {
        let pool = test_support::pool().await;
        let id = create(&pool, &hello()).await.unwrap();

        assert_eq!(delete(&pool, id).await.unwrap(), WriteOutcome::Applied);
        assert_eq!(find_by_id(&pool, id).await.unwrap(), None);
        assert_eq!(delete(&pool, id).await.unwrap(), WriteOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_list_all_in_id_order() {
        let pool = test_support::pool().await;
        let first = create(&pool, &hello()).await.unwrap();
        let second = create(
            &pool,
            &NewWord {
                english: "water".to_string(),
                portuguese: "água".to_string(),
                parts: "noun".to_string(),
            },
        )
        .await
        .unwrap();

        let listing = list_all(&pool).await.unwrap();
        let ids: Vec<i64> = listing.items.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(listing.skipped, 0);
    }

    #[tokio::test]
    async fn test_list_skips_undecodable_rows() {
        let pool = test_support::pool().await;
        create(&pool, &hello()).await.unwrap();
        // A blob can be stored in a TEXT column but does not decode as a string
        sqlx::query("INSERT INTO words (english, portuguese, parts) VALUES (X'FF00', 'x', 'noun')")
            .execute(&pool)
            .await
            .unwrap();

        let listing = list_all(&pool).await.unwrap();
        assert_eq!(listing.items.len(), 1);
        assert_eq!(listing.skipped, 1);
    }
}

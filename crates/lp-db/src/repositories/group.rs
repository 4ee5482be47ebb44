use sqlx::{Executor, Sqlite};

use crate::{
    Listing, WriteOutcome,
    models::{Group, NewGroup},
};

pub async fn list_all<'e, E>(executor: E) -> Result<Listing<Group>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        // language=SQLite
        r#"
            SELECT id, name, description
            FROM groups
            ORDER BY id
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(Listing::decode("group", &rows))
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Group>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as(
        // language=SQLite
        r#"
            SELECT id, name, description
            FROM groups
            WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn create<'e, E>(executor: E, group: &NewGroup) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar(
        // language=SQLite
        r#"
            INSERT INTO groups (name, description)
            VALUES (?, ?)
            RETURNING id
        "#,
    )
    .bind(&group.name)
    .bind(&group.description)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E>(executor: E, group: &Group) -> Result<WriteOutcome, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        // language=SQLite
        r#"
            UPDATE groups
            SET name = ?, description = ?
            WHERE id = ?
        "#,
    )
    .bind(&group.name)
    .bind(&group.description)
    .bind(group.id)
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
            DELETE FROM groups
            WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(WriteOutcome::from_rows_affected(result.rows_affected()))
}

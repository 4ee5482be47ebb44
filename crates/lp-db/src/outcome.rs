//! Result shapes shared by every repository.

use serde::Serialize;
use sqlx::{FromRow, sqlite::SqliteRow};

/// Rows returned by a list query.
///
/// Listing is best-effort: a row that cannot be decoded is logged and counted in
/// `skipped` instead of failing the whole request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<T> {
    /// Successfully decoded rows, in query order
    pub items: Vec<T>,
    /// Number of rows that failed to decode
    pub skipped: usize,
}

impl<T> Listing<T>
where
    T: for<'r> FromRow<'r, SqliteRow>,
{
    pub(crate) fn decode(entity: &'static str, rows: &[SqliteRow]) -> Self {
        let mut items = Vec::with_capacity(rows.len());
        let mut skipped = 0;

        for row in rows {
            match T::from_row(row) {
                Ok(item) => items.push(item),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(entity, error = %e, "Skipping {entity} row that failed to decode");
                }
            }
        }

        Self { items, skipped }
    }
}

/// Outcome of an update or delete addressed by primary key.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// At least one row changed
    Applied,
    /// No row had the requested id
    NotFound,
}

impl WriteOutcome {
    pub(crate) const fn from_rows_affected(rows: u64) -> Self {
        if rows == 0 { Self::NotFound } else { Self::Applied }
    }

    /// Whether the write touched an existing row.
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_outcome_from_rows_affected() {
        assert_eq!(WriteOutcome::from_rows_affected(0), WriteOutcome::NotFound);
        assert_eq!(WriteOutcome::from_rows_affected(1), WriteOutcome::Applied);
        assert!(WriteOutcome::from_rows_affected(3).is_applied());
        assert!(!WriteOutcome::NotFound.is_applied());
    }
}

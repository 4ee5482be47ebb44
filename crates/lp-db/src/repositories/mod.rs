// All repository functions are generic over `E: Executor<'e, Database = Sqlite>`
// so they accept both a `&SqlitePool` and a connection borrowed from a transaction (`&mut *tx`).
// The paginated reports issue two statements and take the pool directly.

pub mod group;
pub mod report;
pub mod study_activity;
pub mod study_session;
pub mod word;
pub mod word_review_item;
pub mod words_group;

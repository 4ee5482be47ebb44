use axum::extract::FromRef;
use sqlx::SqlitePool;

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct ApiState {
    pub pool: SqlitePool,
}

impl ApiState {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl FromRef<ApiState> for SqlitePool {
    fn from_ref(state: &ApiState) -> Self {
        state.pool.clone()
    }
}

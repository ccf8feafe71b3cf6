//! Shared application state for all routes.

use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    /// Connection pool opened once at startup and shared by every request.
    pub pool: PgPool,
}

//! Database bootstrap: target database creation and products table DDL.

use crate::config::Config;
use crate::error::AppError;
use sqlx::{ConnectOptions, PgPool};

/// Connect to the maintenance database and create the target database if it
/// does not exist yet (PostgreSQL has no CREATE DATABASE IF NOT EXISTS).
/// Call before opening the main pool.
pub async fn ensure_database_exists(config: &Config) -> Result<(), AppError> {
    let mut conn = config.pg_admin_options().connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&config.db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&config.db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Create the products table if missing. Column constraints mirror the
/// validation rules so rows cannot bypass them.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            price DOUBLE PRECISION NOT NULL CHECK (price > 0),
            description TEXT,
            category TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_doubles_embedded_quotes() {
        assert_eq!(quote_ident("catalog"), "\"catalog\"");
        assert_eq!(quote_ident("cat\"alog"), "\"cat\"\"alog\"");
    }
}

//! Startup configuration from environment variables, read once at boot.

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::env;

/// Database and listener settings. No hot reload.
#[derive(Clone, Debug)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    /// HTTP listen port.
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            db_host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            db_port: port_var("DB_PORT", 5432)?,
            db_user: required_var("DB_USER")?,
            db_password: required_var("DB_PASSWORD")?,
            db_name: required_var("DB_NAME")?,
            port: port_var("PORT", 3000)?,
        })
    }

    /// Connect options for the application pool.
    pub fn pg_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
    }

    /// Connect options for the maintenance connection used to create the
    /// target database. Uses the default `postgres` database.
    pub fn pg_admin_options(&self) -> PgConnectOptions {
        self.pg_options().database("postgres")
    }
}

fn required_var(var: &'static str) -> Result<String, ConfigError> {
    env::var(var).map_err(|_| ConfigError::MissingVar(var))
}

fn port_var(var: &'static str, default: u16) -> Result<u16, ConfigError> {
    match env::var(var) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidVar { var, value: raw }),
    }
}

use std::env;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::result::ConnectionError;
use diesel_migrations::{embed_migrations, EmbeddedMigrations};
use dotenvy::dotenv;

pub mod error;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod store;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub const DEFAULT_DATABASE_URL: &str = "pizzeria.db";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        Self { database_url }
    }

    /// Opens a fresh connection. SQLite leaves foreign keys off unless the
    /// pragma is set on every connection.
    pub fn connect(&self) -> Result<SqliteConnection, ConnectionError> {
        let mut conn = SqliteConnection::establish(&self.database_url)?;
        conn.batch_execute("PRAGMA foreign_keys = ON;")
            .map_err(ConnectionError::CouldntSetupConfiguration)?;
        Ok(conn)
    }
}

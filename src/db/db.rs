use crate::db::migrations::init_with_migrations;
use crate::libs::config::{Config, DatabaseConfig};
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DB_FILE_NAME: &str = "buildplan.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the configured database and applies pending migrations.
    pub fn new() -> Result<Db> {
        let config = Config::read()?.database_or_default();
        let mut conn = Self::connect(&Self::resolve_path(&config)?, &config)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Opens the configured database without touching its schema.
    pub fn new_without_migrations() -> Result<Connection> {
        let config = Config::read()?.database_or_default();
        Self::connect(&Self::resolve_path(&config)?, &config)
    }

    /// Opens a database file at an explicit location and migrates it.
    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        let mut conn = Self::connect(path.as_ref(), &DatabaseConfig::default())?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    pub fn open_without_migrations(path: impl AsRef<Path>) -> Result<Connection> {
        Self::connect(path.as_ref(), &DatabaseConfig::default())
    }

    fn resolve_path(config: &DatabaseConfig) -> Result<PathBuf> {
        match &config.path {
            Some(path) => Ok(path.clone()),
            None => Ok(DataStorage::new().get_path(DB_FILE_NAME)?),
        }
    }

    fn connect(path: &Path, config: &DatabaseConfig) -> Result<Connection> {
        let conn = Connection::open(path)?;
        // Category cascades rely on foreign keys, which SQLite leaves off by default
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        tracing::debug!(path = %path.display(), "opened database");

        Ok(conn)
    }
}

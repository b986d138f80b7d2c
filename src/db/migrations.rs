//! Database schema migration management and versioning.
//!
//! Each migration has a version, a name and an `up` function. Pending
//! migrations run in version order inside one transaction and are recorded in
//! the `migrations` table, so opening a database twice never re-applies a
//! change.
//!
//! ```rust,no_run
//! use buildplan::db::migrations::{get_db_version, init_with_migrations};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("buildplan.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info, msg_success};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// Tracking table holding one row per applied migration.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of every schema change in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: projects and tasks as the first releases stored them.
        // Tasks carried their categories only as free-text labels.
        self.add_migration(1, "create_projects_and_tasks", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS projects (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    start_date DATE NOT NULL,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;

            // project_id is deliberately not a foreign key: rows written before
            // projects could be deleted safely may point at nothing.
            tx.execute(
                "CREATE TABLE IF NOT EXISTS tasks (
                    id INTEGER PRIMARY KEY,
                    project_id INTEGER NOT NULL,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL DEFAULT '',
                    status TEXT NOT NULL DEFAULT 'not_started',
                    start_date DATE,
                    end_date DATE,
                    tier1_category TEXT,
                    tier2_category TEXT,
                    category TEXT,
                    template_id TEXT,
                    completed BOOLEAN NOT NULL DEFAULT FALSE,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;

            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_project_id ON tasks(project_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_template_id ON tasks(template_id)", [])?;
            Ok(())
        });

        // Version 2: structured category tree per project
        self.add_migration(2, "add_categories", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS categories (
                    id INTEGER PRIMARY KEY,
                    project_id INTEGER NOT NULL,
                    name TEXT NOT NULL,
                    tier TEXT NOT NULL CHECK (tier IN ('tier1', 'tier2')),
                    parent_id INTEGER,
                    color TEXT NOT NULL DEFAULT '#6B7280',
                    sort_order INTEGER NOT NULL DEFAULT 0,
                    is_from_template BOOLEAN NOT NULL DEFAULT FALSE,
                    template_source TEXT,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                    CHECK ((tier = 'tier1' AND parent_id IS NULL) OR (tier = 'tier2' AND parent_id IS NOT NULL)),
                    FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE,
                    FOREIGN KEY (parent_id) REFERENCES categories(id) ON DELETE CASCADE
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_categories_project_id ON categories(project_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_categories_parent_id ON categories(parent_id)", [])?;

            tx.execute(
                "ALTER TABLE tasks ADD COLUMN category_id INTEGER REFERENCES categories(id) ON DELETE SET NULL",
                [],
            )?;
            Ok(())
        });

        // Version 3: uniqueness enforced by the store instead of by lookups
        // before insert. Rows duplicated by the old lookup-then-insert path
        // are folded into the oldest row first.
        self.add_migration(3, "enforce_uniqueness", |tx| {
            tx.execute(
                "DELETE FROM tasks
                 WHERE template_id IS NOT NULL
                   AND id NOT IN (
                       SELECT MIN(id) FROM tasks
                       WHERE template_id IS NOT NULL
                       GROUP BY project_id, template_id
                   )",
                [],
            )?;

            // Survivor for every category row: the lowest id sharing its key
            const SURVIVOR_OF: &str = "SELECT MIN(s.id) FROM categories s
                 JOIN categories d
                   ON s.project_id = d.project_id AND s.tier = d.tier AND lower(s.name) = lower(d.name)
                 WHERE d.id = ";
            tx.execute(
                &format!("UPDATE categories SET parent_id = ({}categories.parent_id) WHERE parent_id IS NOT NULL", SURVIVOR_OF),
                [],
            )?;
            tx.execute(
                &format!("UPDATE tasks SET category_id = ({}tasks.category_id) WHERE category_id IS NOT NULL", SURVIVOR_OF),
                [],
            )?;
            tx.execute(
                "DELETE FROM categories
                 WHERE id NOT IN (SELECT MIN(id) FROM categories GROUP BY project_id, tier, lower(name))",
                [],
            )?;

            tx.execute(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_tasks_project_template
                 ON tasks(project_id, template_id) WHERE template_id IS NOT NULL",
                [],
            )?;
            tx.execute(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_categories_project_tier_name
                 ON categories(project_id, tier, name COLLATE NOCASE)",
                [],
            )?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    /// Applies every pending migration.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        self.run_migrations_up_to(conn, self.latest_version())
    }

    /// Applies pending migrations with a version up to and including `target`.
    pub fn run_migrations_up_to(&self, conn: &mut Connection, target: u32) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self
            .migrations
            .iter()
            .filter(|m| m.version > current_version && m.version <= target)
            .collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_info!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_debug!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }
        tx.commit()?;
        msg_success!(Message::AllMigrationsCompleted);

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn
            .query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))
            .unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;

        Ok(count > 0)
    }

    /// Registered migrations newer than the database, as `(version, name)`.
    pub fn pending_migrations(&self, conn: &Connection) -> Result<Vec<(u32, &'static str)>> {
        let current_version = self.get_current_version(conn)?;
        Ok(self
            .migrations
            .iter()
            .filter(|m| m.version > current_version)
            .map(|m| (m.version, m.name))
            .collect())
    }

    /// Applied migrations as `(version, name, applied_at)`, oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    Ok(manager.get_current_version(conn)? < manager.latest_version())
}

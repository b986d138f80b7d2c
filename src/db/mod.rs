//! Persistence layer on SQLite.
//!
//! `Db` owns the connection and applies migrations on open. The table stores
//! borrow a `&Connection`, so callers can run several of them inside one
//! transaction:
//!
//! ```rust,no_run
//! use buildplan::db::{categories::Categories, db::Db, projects::Projects};
//! use chrono::NaiveDate;
//!
//! let mut db = Db::new()?;
//! let tx = db.conn.transaction()?;
//! let project = Projects::new(&tx).create("Lakeside cabin", NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())?;
//! let categories = Categories::new(&tx).list(project.id)?;
//! tx.commit()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection setup.
pub mod db;

/// Versioned schema changes.
pub mod migrations;

/// Per-project category tree.
pub mod categories;

/// Projects: the owners of categories and tasks.
pub mod projects;

/// Concrete tasks, manual or materialized from templates.
pub mod tasks;

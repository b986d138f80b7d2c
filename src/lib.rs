//! # Buildplan
//!
//! Project planning for construction and other phased work. Each project
//! carries a two-level category tree (bootstrapped from presets) and tasks
//! that are either entered by hand or materialized from a fixed catalog of
//! task templates.
//!
//! Provisioning is idempotent: applying a preset or materializing templates
//! twice, or from two processes at once, never produces duplicates.
//!
//! ```rust,no_run
//! use buildplan::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;

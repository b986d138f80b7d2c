//! Domain logic: category trees, presets, the template catalog and the
//! provisioning and reconciliation passes built on them.
//!
//! ```rust,no_run
//! use buildplan::db::db::Db;
//! use buildplan::libs::provisioning::Provisioner;
//!
//! let mut db = Db::new()?;
//! let mut provisioner = Provisioner::new(&mut db.conn);
//! provisioner.apply_preset(1, "home-builder")?;
//! provisioner.materialize_templates(1)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod catalog;
pub mod category;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod maintenance;
pub mod messages;
pub mod presets;
pub mod project;
pub mod provisioning;
pub mod reconcile;
pub mod task;
pub mod view;

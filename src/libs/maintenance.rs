//! Maintenance passes that are not part of serving requests.

use crate::db::projects::Projects;
use crate::db::tasks::Tasks;
use crate::libs::error::Result;
use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrphanCleanup {
    pub removed: usize,
    /// Ids of the deleted tasks, ascending, for audit or undo.
    pub task_ids: Vec<i64>,
}

/// Deletes tasks whose project no longer exists.
///
/// With no projects left at all, every task is an orphan. The pass only
/// touches rows whose project is already gone, so it cannot collide with
/// tasks being created for a live project.
pub fn cleanup_orphaned_tasks(conn: &mut Connection) -> Result<OrphanCleanup> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let tasks = Tasks::new(&tx);

    let task_ids = if Projects::new(&tx).count()? == 0 {
        tracing::info!("no projects exist, every task is orphaned");
        tasks.all_ids()?
    } else {
        tasks.orphaned_ids()?
    };
    let removed = tasks.delete_by_ids(&task_ids)?;
    tx.commit()?;

    if removed > 0 {
        tracing::info!(removed, ids = ?task_ids, "orphaned tasks removed");
    } else {
        tracing::debug!("no orphaned tasks");
    }
    Ok(OrphanCleanup { removed, task_ids })
}

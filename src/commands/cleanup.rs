use crate::{
    db::db::Db,
    libs::{maintenance::cleanup_orphaned_tasks, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let mut db = Db::new()?;
    let cleanup = cleanup_orphaned_tasks(&mut db.conn)?;

    if cleanup.removed == 0 {
        msg_info!(Message::NoOrphans);
    } else {
        msg_success!(Message::OrphansRemoved {
            removed: cleanup.removed,
            ids: cleanup.task_ids,
        });
    }
    Ok(())
}

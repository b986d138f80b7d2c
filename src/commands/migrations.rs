//! Inspection of the schema version. Only compiled into debug builds.

use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, MigrationManager},
    },
    libs::{messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: MigrationsCommand,
}

#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    Status,
    History,
}

pub fn cmd(args: MigrationsArgs) -> Result<()> {
    let conn = Db::new_without_migrations()?;
    let manager = MigrationManager::new();
    let pending = manager.pending_migrations(&conn)?;

    match args.command {
        MigrationsCommand::Status => {
            msg_print!(Message::DatabaseVersion(get_db_version(&conn)?));
            if pending.is_empty() {
                msg_info!(Message::DatabaseUpToDate);
                return Ok(());
            }
            msg_info!(Message::DatabaseNeedsUpdate);
            msg_print!(Message::MigrationsFound(pending.len()), true);
            View::migrations(&[], &pending)?;
        }
        MigrationsCommand::History => {
            msg_print!(Message::MigrationHistory, true);
            View::migrations(&manager.get_migration_history(&conn)?, &pending)?;
        }
    }

    Ok(())
}

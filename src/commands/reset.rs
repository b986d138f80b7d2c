use crate::{
    db::{db::Db, projects::Projects},
    libs::{messages::Message, provisioning::Provisioner},
    msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Only reset this project; all projects otherwise
    #[arg(short, long)]
    project: Option<i64>,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn cmd(args: ResetArgs) -> Result<()> {
    let mut db = Db::new()?;

    let scope = match args.project {
        Some(id) => format!("project '{}'", Projects::new(&db.conn).require(id)?.name),
        None => "all projects".to_string(),
    };
    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmReset(scope).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    let reset = Provisioner::new(&mut db.conn).reset_templates(args.project)?;

    msg_success!(Message::ResetCompleted {
        deleted: reset.deleted_count,
        created: reset.created_count,
    });
    for (name, created) in reset.per_project {
        msg_print!(Message::ResetProjectLine { name, created });
    }
    for failure in reset.failures {
        msg_warning!(Message::RowFailed {
            key: failure.key,
            reason: failure.reason,
        });
    }
    Ok(())
}

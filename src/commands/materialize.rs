use crate::{
    db::db::Db,
    libs::{messages::Message, provisioning::Provisioner},
    msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct MaterializeArgs {
    project: i64,
}

pub fn cmd(args: MaterializeArgs) -> Result<()> {
    let mut db = Db::new()?;
    let result = Provisioner::new(&mut db.conn).materialize_templates(args.project)?;

    msg_success!(Message::TemplatesMaterialized {
        created: result.created.len(),
        skipped: result.skipped,
    });
    for failure in result.failures {
        msg_warning!(Message::RowFailed {
            key: failure.key,
            reason: failure.reason,
        });
    }
    Ok(())
}

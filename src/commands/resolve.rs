use crate::{
    db::db::Db,
    libs::{
        category::{CategoryRef, Tier},
        messages::Message,
        provisioning::Provisioner,
        reconcile::resolve_ref,
    },
    msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ResolveArgs {
    project: i64,
    /// tier1 or tier2
    tier: Tier,
    /// Label as stored on an older record
    name: String,
}

pub fn cmd(args: ResolveArgs) -> Result<()> {
    let mut db = Db::new()?;
    let categories = Provisioner::new(&mut db.conn).list_categories(args.project)?;

    let reference = CategoryRef::ByLegacyName {
        tier: args.tier,
        name: args.name.clone(),
    };
    if let Some(resolved) = resolve_ref(&reference, &categories) {
        msg_print!(Message::ResolvedName {
            stored: args.name,
            resolved: resolved.name,
            matched_by: resolved.matched_by.to_string(),
        });
    }
    Ok(())
}

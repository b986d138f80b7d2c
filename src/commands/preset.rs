use crate::{
    db::db::Db,
    libs::{
        error::Error,
        messages::Message,
        presets::{get_preset_by_id, list_presets},
        provisioning::Provisioner,
        view::View,
    },
    msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct PresetArgs {
    #[command(subcommand)]
    command: PresetCommand,
}

#[derive(Debug, Subcommand)]
enum PresetCommand {
    List,
    Show {
        id: String,
    },
    /// Add the preset's categories to a project; existing ones are kept
    Apply {
        project: i64,
        preset: String,
    },
}

pub fn cmd(args: PresetArgs) -> Result<()> {
    match args.command {
        PresetCommand::List => {
            msg_print!(Message::PresetsHeader, true);
            View::presets(list_presets())
        }
        PresetCommand::Show { id } => {
            let preset = get_preset_by_id(&id).ok_or(Error::UnknownPreset(id))?;
            msg_print!(Message::PresetHeader(preset.name.to_string()), true);
            View::preset(preset)?;
            for orphan in preset.orphaned_tier2() {
                msg_warning!(Message::PresetWarning(format!(
                    "tier2 '{}' names missing parent '{}'",
                    orphan.name, orphan.parent_tier1_name
                )));
            }
            Ok(())
        }
        PresetCommand::Apply { project, preset } => {
            let mut db = Db::new()?;
            let application = Provisioner::new(&mut db.conn).apply_preset(project, &preset)?;

            msg_success!(Message::PresetApplied {
                preset,
                created: application.created.len(),
                reused: application.reused.len(),
            });
            for warning in application.warnings {
                msg_warning!(Message::PresetWarning(warning));
            }
            Ok(())
        }
    }
}

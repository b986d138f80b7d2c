use crate::{
    db::{db::Db, projects::Projects},
    libs::{config::Config, messages::Message, provisioning::Provisioner, view::View},
    msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    command: ProjectCommand,
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    /// Create a project, applying the configured default preset
    Create {
        name: String,
        /// Start date (YYYY-MM-DD), today when omitted
        #[arg(short, long)]
        start: Option<NaiveDate>,
        /// Preset to apply instead of the configured default
        #[arg(short, long)]
        preset: Option<String>,
        /// Materialize the template catalog right away
        #[arg(short, long)]
        materialize: bool,
    },
    List,
    /// Delete a project with its categories; tasks stay until `cleanup`
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: ProjectArgs) -> Result<()> {
    match args.command {
        ProjectCommand::Create {
            name,
            start,
            preset,
            materialize,
        } => handle_create(&name, start, preset, materialize),
        ProjectCommand::List => handle_list(),
        ProjectCommand::Delete { id, yes } => handle_delete(id, yes),
    }
}

fn handle_create(name: &str, start: Option<NaiveDate>, preset: Option<String>, materialize: bool) -> Result<()> {
    let mut provisioning = Config::read()?.provisioning_or_default();
    if preset.is_some() {
        provisioning.default_preset = preset;
    }
    provisioning.materialize_on_create |= materialize;

    let mut db = Db::new()?;
    let start_date = start.unwrap_or_else(|| Local::now().date_naive());
    let setup = Provisioner::new(&mut db.conn).create_project(name, start_date, &provisioning)?;

    msg_success!(Message::ProjectCreated {
        name: setup.project.name.clone(),
        id: setup.project.id,
    });
    if let (Some(application), Some(preset_id)) = (&setup.preset, &provisioning.default_preset) {
        msg_info!(Message::PresetApplied {
            preset: preset_id.clone(),
            created: application.created.len(),
            reused: application.reused.len(),
        });
        for warning in &application.warnings {
            msg_warning!(Message::PresetWarning(warning.clone()));
        }
    }
    if let Some(materialization) = &setup.materialization {
        msg_info!(Message::TemplatesMaterialized {
            created: materialization.created.len(),
            skipped: materialization.skipped,
        });
    }
    Ok(())
}

fn handle_list() -> Result<()> {
    let db = Db::new()?;
    let projects = Projects::new(&db.conn).list()?;

    if projects.is_empty() {
        msg_info!(Message::NoProjects);
        return Ok(());
    }

    msg_print!(Message::ProjectsHeader, true);
    View::projects(&projects)
}

fn handle_delete(id: i64, yes: bool) -> Result<()> {
    let db = Db::new()?;
    let project = Projects::new(&db.conn).require(id)?;

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteProject(project.name.clone()).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    Projects::new(&db.conn).delete(id)?;
    msg_success!(Message::ProjectDeleted(id));
    Ok(())
}

//! Command-line interface.
//!
//! Each subcommand lives in its own module with an `Args` struct and a
//! `cmd` entry point; [`Cli::menu`] parses the arguments and dispatches.

pub mod category;
pub mod cleanup;
pub mod init;
pub mod materialize;
#[cfg(debug_assertions)]
pub mod migrations;
pub mod preset;
pub mod project;
pub mod reset;
pub mod resolve;
pub mod task;
pub mod template;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Create, list and delete projects")]
    Project(project::ProjectArgs),
    #[command(about = "Inspect category presets and apply them to a project")]
    Preset(preset::PresetArgs),
    #[command(about = "Browse the task template catalog")]
    Template(template::TemplateArgs),
    #[command(about = "Create tasks for catalog templates a project does not have yet")]
    Materialize(materialize::MaterializeArgs),
    #[command(about = "Delete template tasks and materialize the catalog again")]
    Reset(reset::ResetArgs),
    #[command(about = "Manage a project's category tree")]
    Category(category::CategoryArgs),
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Show which category a stored label refers to")]
    Resolve(resolve::ResolveArgs),
    #[command(about = "Delete tasks whose project no longer exists")]
    Cleanup,
    #[cfg(debug_assertions)]
    #[command(about = "Database migration management (debug builds only)")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Project(args) => project::cmd(args),
            Commands::Preset(args) => preset::cmd(args),
            Commands::Template(args) => template::cmd(args),
            Commands::Materialize(args) => materialize::cmd(args),
            Commands::Reset(args) => reset::cmd(args),
            Commands::Category(args) => category::cmd(args),
            Commands::Task(args) => task::cmd(args),
            Commands::Resolve(args) => resolve::cmd(args),
            Commands::Cleanup => cleanup::cmd(),
            #[cfg(debug_assertions)]
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}

use crate::{
    libs::{
        catalog::{get_all_templates, get_templates_by_tier1, get_templates_by_tier2, TaskTemplate},
        messages::Message,
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TemplateArgs {
    #[command(subcommand)]
    command: TemplateCommand,
}

#[derive(Debug, Subcommand)]
enum TemplateCommand {
    List {
        #[arg(long)]
        tier1: Option<String>,
        /// Requires --tier1
        #[arg(long, requires = "tier1")]
        tier2: Option<String>,
    },
}

pub fn cmd(args: TemplateArgs) -> Result<()> {
    match args.command {
        TemplateCommand::List { tier1, tier2 } => handle_list(tier1.as_deref(), tier2.as_deref()),
    }
}

fn handle_list(tier1: Option<&str>, tier2: Option<&str>) -> Result<()> {
    let templates: Vec<&TaskTemplate> = match (tier1, tier2) {
        (Some(tier1), Some(tier2)) => get_templates_by_tier2(tier1, tier2),
        (Some(tier1), None) => get_templates_by_tier1(tier1),
        _ => get_all_templates().iter().collect(),
    };

    if templates.is_empty() {
        msg_info!(Message::NoTemplatesFound);
        return Ok(());
    }

    msg_print!(Message::TemplatesHeader, true);
    View::templates(&templates)
}

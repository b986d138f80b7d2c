use crate::{
    db::{categories::Categories, db::Db, projects::Projects},
    libs::{
        category::NewCategory,
        error::Error,
        messages::Message,
        provisioning::Provisioner,
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

const DEFAULT_COLOR: &str = "#6b7280";

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    List {
        project: i64,
    },
    Tree {
        project: i64,
    },
    /// Add a tier1 category, or a tier2 category when --parent is given
    Add {
        project: i64,
        name: String,
        #[arg(short, long)]
        parent: Option<i64>,
        #[arg(short, long, default_value = DEFAULT_COLOR)]
        color: String,
        /// Position among siblings, appended last when omitted
        #[arg(short, long)]
        order: Option<i64>,
    },
    Rename {
        id: i64,
        name: String,
    },
    Recolor {
        id: i64,
        color: String,
    },
    Reorder {
        id: i64,
        order: i64,
    },
    /// Delete a category; tier1 deletes take their tier2 children along
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: CategoryArgs) -> Result<()> {
    match args.command {
        CategoryCommand::List { project } => handle_list(project),
        CategoryCommand::Tree { project } => handle_tree(project),
        CategoryCommand::Add {
            project,
            name,
            parent,
            color,
            order,
        } => handle_add(project, &name, parent, &color, order),
        CategoryCommand::Rename { id, name } => {
            let db = Db::new()?;
            let categories = Categories::new(&db.conn);
            let before = categories.get(id)?.ok_or(Error::UnknownCategory(id))?;
            let after = categories.rename(id, &name)?;
            msg_success!(Message::CategoryRenamed {
                from: before.name,
                to: after.name,
            });
            Ok(())
        }
        CategoryCommand::Recolor { id, color } => {
            let db = Db::new()?;
            let categories = Categories::new(&db.conn);
            categories.recolor(id, &color)?;
            let name = categories.get(id)?.map(|c| c.name).unwrap_or_default();
            msg_success!(Message::CategoryRecolored(name));
            Ok(())
        }
        CategoryCommand::Reorder { id, order } => {
            let db = Db::new()?;
            let categories = Categories::new(&db.conn);
            categories.reorder(id, order)?;
            let name = categories.get(id)?.map(|c| c.name).unwrap_or_default();
            msg_success!(Message::CategoryReordered(name));
            Ok(())
        }
        CategoryCommand::Delete { id, yes } => handle_delete(id, yes),
    }
}

fn handle_list(project: i64) -> Result<()> {
    let mut db = Db::new()?;
    let categories = Provisioner::new(&mut db.conn).list_categories(project)?;

    if categories.is_empty() {
        msg_info!(Message::NoCategories);
        return Ok(());
    }

    msg_print!(Message::CategoriesHeader, true);
    View::categories(&categories)
}

fn handle_tree(project: i64) -> Result<()> {
    let mut db = Db::new()?;
    let tree = Provisioner::new(&mut db.conn).list_category_tree(project)?;

    if tree.is_empty() {
        msg_info!(Message::NoCategories);
        return Ok(());
    }

    msg_print!(Message::CategoriesHeader, true);
    View::category_tree(&tree)
}

fn handle_add(project: i64, name: &str, parent: Option<i64>, color: &str, order: Option<i64>) -> Result<()> {
    let db = Db::new()?;
    Projects::new(&db.conn).require(project)?;
    let categories = Categories::new(&db.conn);

    let sort_order = match order {
        Some(order) => order,
        None => categories.next_sort_order(project, parent)?,
    };

    let new = match parent {
        Some(parent_id) => NewCategory::tier2(project, parent_id, name, color, sort_order),
        None => NewCategory::tier1(project, name, color, sort_order),
    };
    let category = categories.insert(&new)?;

    msg_success!(Message::CategoryCreated(category.name));
    Ok(())
}

fn handle_delete(id: i64, yes: bool) -> Result<()> {
    let db = Db::new()?;
    let categories = Categories::new(&db.conn);
    let category = categories.get(id)?.ok_or(Error::UnknownCategory(id))?;
    let children = categories.children(id)?.len();

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(
                Message::ConfirmDeleteCategory {
                    name: category.name,
                    children,
                }
                .to_string(),
            )
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    let removed = categories.delete(id)?;
    msg_success!(Message::CategoriesDeleted(removed));
    Ok(())
}

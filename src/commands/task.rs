use crate::{
    db::{categories::Categories, db::Db, projects::Projects, tasks::Tasks},
    libs::{
        category::Tier,
        messages::Message,
        reconcile::link_category,
        task::{NewTask, TaskStatus},
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    List {
        project: i64,
    },
    Add {
        project: i64,
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(long)]
        tier1: Option<String>,
        #[arg(long)]
        tier2: Option<String>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Set status: not_started, in_progress, completed or blocked
    Status {
        id: i64,
        status: TaskStatus,
    },
    /// Replace the start and end dates; an omitted date is cleared
    Dates {
        id: i64,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    Delete {
        id: i64,
    },
}

pub fn cmd(args: TaskArgs) -> Result<()> {
    match args.command {
        TaskCommand::List { project } => handle_list(project),
        TaskCommand::Add {
            project,
            title,
            description,
            tier1,
            tier2,
            start,
            end,
        } => {
            let mut task = NewTask::new(project, &title);
            task.description = description;
            task.tier1_category = tier1;
            task.tier2_category = tier2;
            task.start_date = start;
            task.end_date = end;
            handle_add(task)
        }
        TaskCommand::Status { id, status } => {
            let db = Db::new()?;
            if Tasks::new(&db.conn).update_status(id, status)? {
                msg_success!(Message::TaskStatusUpdated {
                    id,
                    status: status.to_string(),
                });
            } else {
                msg_error!(Message::TaskNotFound(id));
            }
            Ok(())
        }
        TaskCommand::Dates { id, start, end } => {
            let db = Db::new()?;
            if Tasks::new(&db.conn).update_dates(id, start, end)? {
                msg_success!(Message::TaskDatesUpdated(id));
            } else {
                msg_error!(Message::TaskNotFound(id));
            }
            Ok(())
        }
        TaskCommand::Delete { id } => {
            let db = Db::new()?;
            if Tasks::new(&db.conn).delete(id)? > 0 {
                msg_success!(Message::TaskDeleted(id));
            } else {
                msg_error!(Message::TaskNotFound(id));
            }
            Ok(())
        }
    }
}

fn handle_list(project_id: i64) -> Result<()> {
    let db = Db::new()?;
    let project = Projects::new(&db.conn).require(project_id)?;
    let tasks = Tasks::new(&db.conn).list(project_id)?;

    if tasks.is_empty() {
        msg_info!(Message::NoTasks);
        return Ok(());
    }

    let categories = Categories::new(&db.conn).list(project_id)?;
    msg_print!(Message::TasksHeader(project.name), true);
    View::tasks(&tasks, &categories)
}

fn handle_add(mut task: NewTask) -> Result<()> {
    let db = Db::new()?;
    Projects::new(&db.conn).require(task.project_id)?;

    // Link to the tree when a label matches a current category, tier2 first
    let categories = Categories::new(&db.conn).list(task.project_id)?;
    task.category_id = [(Tier::Tier2, &task.tier2_category), (Tier::Tier1, &task.tier1_category)]
        .into_iter()
        .filter_map(|(tier, name)| name.as_deref().map(|name| (tier, name)))
        .find_map(|(tier, name)| link_category(name, tier, &categories))
        .map(|category| category.id);

    let task = Tasks::new(&db.conn).insert(&task)?;
    msg_success!(Message::TaskCreated(task.title));
    Ok(())
}

use crate::libs::error::{is_unique_violation, Result};
use crate::libs::task::{NewTask, Task, TaskStatus};
use chrono::NaiveDate;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::collections::HashSet;

const INSERT_TASK: &str = "INSERT INTO tasks
    (project_id, title, description, status, start_date, end_date, tier1_category, tier2_category, category, category_id, template_id, completed)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const SELECT_TASKS: &str = "SELECT id, project_id, title, description, status, start_date, end_date,
    tier1_category, tier2_category, category, category_id, template_id, completed FROM tasks";
const SELECT_TEMPLATE_IDS: &str = "SELECT template_id FROM tasks WHERE project_id = ?1 AND template_id IS NOT NULL";
const UPDATE_STATUS: &str = "UPDATE tasks SET status = ?2, completed = ?3 WHERE id = ?1";
const UPDATE_DATES: &str = "UPDATE tasks SET start_date = ?2, end_date = ?3 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const DELETE_TEMPLATE_TASKS: &str = "DELETE FROM tasks WHERE project_id = ?1 AND template_id IS NOT NULL";
const SELECT_ORPHAN_IDS: &str = "SELECT id FROM tasks WHERE project_id NOT IN (SELECT id FROM projects) ORDER BY id";
const SELECT_ALL_IDS: &str = "SELECT id FROM tasks ORDER BY id";

/// Outcome of inserting a task produced from a template.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterializedInsert {
    Inserted(Task),
    /// The `(project_id, template_id)` pair is already taken.
    AlreadyMaterialized,
}

pub struct Tasks<'a> {
    conn: &'a Connection,
}

impl<'a> Tasks<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn map_row(row: &Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get(0)?,
            project_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            status: row.get(4)?,
            start_date: row.get(5)?,
            end_date: row.get(6)?,
            tier1_category: row.get(7)?,
            tier2_category: row.get(8)?,
            category: row.get(9)?,
            category_id: row.get(10)?,
            template_id: row.get(11)?,
            completed: row.get(12)?,
        })
    }

    fn execute_insert(&self, task: &NewTask) -> rusqlite::Result<i64> {
        self.conn.execute(
            INSERT_TASK,
            params![
                task.project_id,
                task.title,
                task.description,
                task.status,
                task.start_date,
                task.end_date,
                task.tier1_category,
                task.tier2_category,
                task.category,
                task.category_id,
                task.template_id,
                task.status == TaskStatus::Completed,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn fetch_inserted(&self, id: i64) -> Result<Task> {
        Ok(self
            .conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_TASKS), params![id], Self::map_row)?)
    }

    /// Stores a manually entered task.
    pub fn insert(&self, task: &NewTask) -> Result<Task> {
        let id = self.execute_insert(task)?;
        self.fetch_inserted(id)
    }

    /// Stores a task produced from a template. A unique-index rejection
    /// means another run got there first and is not an error.
    pub fn insert_materialized(&self, task: &NewTask) -> Result<MaterializedInsert> {
        match self.execute_insert(task) {
            Ok(id) => Ok(MaterializedInsert::Inserted(self.fetch_inserted(id)?)),
            Err(e) if task.template_id.is_some() && is_unique_violation(&e) => {
                tracing::debug!(template_id = ?task.template_id, project_id = task.project_id, "template already materialized");
                Ok(MaterializedInsert::AlreadyMaterialized)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn get(&self, id: i64) -> Result<Option<Task>> {
        self.conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_TASKS), params![id], Self::map_row)
            .optional()
            .map_err(Into::into)
    }

    pub fn list(&self, project_id: i64) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE project_id = ?1 ORDER BY start_date IS NULL, start_date, id",
            SELECT_TASKS
        ))?;
        let tasks = stmt.query_map(params![project_id], Self::map_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    pub fn list_all(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!("{} ORDER BY id", SELECT_TASKS))?;
        let tasks = stmt.query_map([], Self::map_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    pub fn template_ids(&self, project_id: i64) -> Result<HashSet<String>> {
        let mut stmt = self.conn.prepare(SELECT_TEMPLATE_IDS)?;
        let ids = stmt
            .query_map(params![project_id], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<HashSet<_>>>()?;
        Ok(ids)
    }

    /// Sets the status; the `completed` flag follows it. Returns false when
    /// no such task exists.
    pub fn update_status(&self, id: i64, status: TaskStatus) -> Result<bool> {
        let affected = self
            .conn
            .execute(UPDATE_STATUS, params![id, status, status == TaskStatus::Completed])?;
        Ok(affected > 0)
    }

    pub fn update_dates(&self, id: i64, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Result<bool> {
        let affected = self.conn.execute(UPDATE_DATES, params![id, start_date, end_date])?;
        Ok(affected > 0)
    }

    pub fn delete(&self, id: i64) -> Result<usize> {
        Ok(self.conn.execute(DELETE_TASK, params![id])?)
    }

    /// Removes every template-sourced task of a project; manual tasks stay.
    pub fn delete_template_tasks(&self, project_id: i64) -> Result<usize> {
        Ok(self.conn.execute(DELETE_TEMPLATE_TASKS, params![project_id])?)
    }

    /// Ids of tasks whose project no longer exists.
    pub fn orphaned_ids(&self) -> Result<Vec<i64>> {
        self.collect_ids(SELECT_ORPHAN_IDS)
    }

    pub fn all_ids(&self) -> Result<Vec<i64>> {
        self.collect_ids(SELECT_ALL_IDS)
    }

    fn collect_ids(&self, sql: &str) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare(sql)?;
        let ids = stmt.query_map([], |row| row.get(0))?.collect::<rusqlite::Result<Vec<i64>>>()?;
        Ok(ids)
    }

    pub fn delete_by_ids(&self, ids: &[i64]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let mut deleted = 0;
        // Stay well under SQLite's bound-parameter limit
        for chunk in ids.chunks(500) {
            let sql = format!("DELETE FROM tasks WHERE id IN ({})", vec!["?"; chunk.len()].join(", "));
            deleted += self.conn.execute(&sql, params_from_iter(chunk.iter()))?;
        }
        Ok(deleted)
    }
}

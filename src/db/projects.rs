use crate::libs::error::{Error, Result};
use crate::libs::project::Project;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_PROJECT: &str = "INSERT INTO projects (name, start_date) VALUES (?1, ?2)";
const SELECT_PROJECTS: &str = "SELECT id, name, start_date, created_at FROM projects";
const DELETE_PROJECT: &str = "DELETE FROM projects WHERE id = ?1";
const COUNT_PROJECTS: &str = "SELECT COUNT(*) FROM projects";

pub struct Projects<'a> {
    conn: &'a Connection,
}

impl<'a> Projects<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn map_row(row: &Row) -> rusqlite::Result<Project> {
        Ok(Project {
            id: row.get(0)?,
            name: row.get(1)?,
            start_date: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    pub fn create(&self, name: &str, start_date: NaiveDate) -> Result<Project> {
        self.conn.execute(INSERT_PROJECT, params![name.trim(), start_date])?;
        let id = self.conn.last_insert_rowid();
        self.get(id)?.ok_or(Error::UnknownProject(id))
    }

    pub fn get(&self, id: i64) -> Result<Option<Project>> {
        self.conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_PROJECTS), params![id], Self::map_row)
            .optional()
            .map_err(Into::into)
    }

    /// Like [`Projects::get`] but an absent project is an error.
    pub fn require(&self, id: i64) -> Result<Project> {
        self.get(id)?.ok_or(Error::UnknownProject(id))
    }

    pub fn list(&self) -> Result<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!("{} ORDER BY id", SELECT_PROJECTS))?;
        let projects = stmt.query_map([], Self::map_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }

    pub fn count(&self) -> Result<i64> {
        Ok(self.conn.query_row(COUNT_PROJECTS, [], |row| row.get(0))?)
    }

    /// Deletes a project and, through the foreign key, its categories.
    ///
    /// Tasks are left in place; they become orphans for the cleanup pass.
    pub fn delete(&self, id: i64) -> Result<()> {
        let affected = self.conn.execute(DELETE_PROJECT, params![id])?;
        if affected == 0 {
            return Err(Error::UnknownProject(id));
        }
        Ok(())
    }
}

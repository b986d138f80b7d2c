//! Per-project category tree storage.
//!
//! The tree invariants are enforced here and backed by the schema:
//!
//! - a `tier1` row has no parent, a `tier2` row has a `tier1` parent in the
//!   same project (CHECK constraint plus validation on insert),
//! - `(project_id, tier, name)` is unique ignoring case (UNIQUE index),
//! - deleting a `tier1` row removes its `tier2` children (FK cascade).

use crate::libs::category::{Category, NewCategory, Tier};
use crate::libs::error::{is_unique_violation, Error, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_CATEGORY: &str = "INSERT INTO categories
    (project_id, name, tier, parent_id, color, sort_order, is_from_template, template_source)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_CATEGORIES: &str = "SELECT id, project_id, name, tier, parent_id, color, sort_order, is_from_template, template_source FROM categories";
const ORDER_CATEGORIES: &str = "ORDER BY tier, sort_order, name COLLATE NOCASE";
const UPDATE_NAME: &str = "UPDATE categories SET name = ?2 WHERE id = ?1";
const UPDATE_COLOR: &str = "UPDATE categories SET color = ?2 WHERE id = ?1";
const UPDATE_SORT_ORDER: &str = "UPDATE categories SET sort_order = ?2 WHERE id = ?1";
const NEXT_SORT_ORDER: &str = "SELECT COALESCE(MAX(sort_order), 0) + 1 FROM categories WHERE project_id = ?1 AND parent_id IS ?2";
const COUNT_CHILDREN: &str = "SELECT COUNT(*) FROM categories WHERE parent_id = ?1";
const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = ?1";

pub struct Categories<'a> {
    conn: &'a Connection,
}

impl<'a> Categories<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn map_row(row: &Row) -> rusqlite::Result<Category> {
        Ok(Category {
            id: row.get(0)?,
            project_id: row.get(1)?,
            name: row.get(2)?,
            tier: row.get(3)?,
            parent_id: row.get(4)?,
            color: row.get(5)?,
            sort_order: row.get(6)?,
            is_from_template: row.get(7)?,
            template_source: row.get(8)?,
        })
    }

    fn validate(&self, category: &NewCategory) -> Result<()> {
        if category.name.trim().is_empty() {
            return Err(Error::InvalidCategory("name must not be empty".to_string()));
        }
        match (category.tier, category.parent_id) {
            (Tier::Tier1, None) => Ok(()),
            (Tier::Tier1, Some(_)) => Err(Error::InvalidCategory(format!("tier1 category '{}' cannot have a parent", category.name))),
            (Tier::Tier2, None) => Err(Error::InvalidCategory(format!("tier2 category '{}' needs a tier1 parent", category.name))),
            (Tier::Tier2, Some(parent_id)) => match self.get(parent_id)? {
                Some(parent) if parent.tier == Tier::Tier1 && parent.project_id == category.project_id => Ok(()),
                Some(parent) if parent.tier != Tier::Tier1 => Err(Error::InvalidCategory(format!(
                    "parent of '{}' must be a tier1 category, '{}' is tier2",
                    category.name, parent.name
                ))),
                Some(_) => Err(Error::InvalidCategory(format!("parent of '{}' belongs to another project", category.name))),
                None => Err(Error::UnknownCategory(parent_id)),
            },
        }
    }

    fn execute_insert(&self, category: &NewCategory) -> rusqlite::Result<i64> {
        self.conn.execute(
            INSERT_CATEGORY,
            params![
                category.project_id,
                category.name.trim(),
                category.tier,
                category.parent_id,
                category.color,
                category.sort_order,
                category.is_from_template,
                category.template_source,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Stores a new category; a name clash within the tier is an error.
    pub fn insert(&self, category: &NewCategory) -> Result<Category> {
        self.validate(category)?;
        match self.execute_insert(category) {
            Ok(id) => self.get(id)?.ok_or(Error::UnknownCategory(id)),
            Err(e) if is_unique_violation(&e) => Err(Error::DuplicateCategory {
                tier: category.tier,
                name: category.name.trim().to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Inserts the category or, when the unique index already holds a row
    /// with the same name, returns that row untouched.
    ///
    /// The boolean is `true` when a row was created.
    pub fn upsert(&self, category: &NewCategory) -> Result<(Category, bool)> {
        self.validate(category)?;
        match self.execute_insert(category) {
            Ok(id) => Ok((self.get(id)?.ok_or(Error::UnknownCategory(id))?, true)),
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!(name = %category.name, tier = %category.tier, "category exists, reusing");
                let existing = self.find_by_name(category.project_id, category.tier, &category.name)?;
                existing.map(|c| (c, false)).ok_or_else(|| Error::DuplicateCategory {
                    tier: category.tier,
                    name: category.name.trim().to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn get(&self, id: i64) -> Result<Option<Category>> {
        self.conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_CATEGORIES), params![id], Self::map_row)
            .optional()
            .map_err(Into::into)
    }

    pub fn find_by_name(&self, project_id: i64, tier: Tier, name: &str) -> Result<Option<Category>> {
        self.conn
            .query_row(
                &format!("{} WHERE project_id = ?1 AND tier = ?2 AND name = ?3 COLLATE NOCASE", SELECT_CATEGORIES),
                params![project_id, tier, name.trim()],
                Self::map_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Flat list: tier1 rows first, each tier in `(sort_order, name)` order.
    pub fn list(&self, project_id: i64) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE project_id = ?1 {}", SELECT_CATEGORIES, ORDER_CATEGORIES))?;
        let categories = stmt.query_map(params![project_id], Self::map_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }

    pub fn children(&self, parent_id: i64) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE parent_id = ?1 {}", SELECT_CATEGORIES, ORDER_CATEGORIES))?;
        let categories = stmt.query_map(params![parent_id], Self::map_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }

    /// Sort order that places a new row after its siblings: tier1 rows when
    /// `parent_id` is `None`, the parent's children otherwise.
    pub fn next_sort_order(&self, project_id: i64, parent_id: Option<i64>) -> Result<i64> {
        let next = self.conn.query_row(NEXT_SORT_ORDER, params![project_id, parent_id], |row| row.get(0))?;
        Ok(next)
    }

    pub fn rename(&self, id: i64, name: &str) -> Result<Category> {
        let current = self.get(id)?.ok_or(Error::UnknownCategory(id))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidCategory("name must not be empty".to_string()));
        }
        match self.conn.execute(UPDATE_NAME, params![id, name]) {
            Ok(_) => self.get(id)?.ok_or(Error::UnknownCategory(id)),
            Err(e) if is_unique_violation(&e) => Err(Error::DuplicateCategory {
                tier: current.tier,
                name: name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub fn recolor(&self, id: i64, color: &str) -> Result<()> {
        self.update_one(UPDATE_COLOR, id, color.trim())
    }

    pub fn reorder(&self, id: i64, sort_order: i64) -> Result<()> {
        self.update_one(UPDATE_SORT_ORDER, id, sort_order)
    }

    fn update_one(&self, sql: &str, id: i64, value: impl rusqlite::ToSql) -> Result<()> {
        let affected = self.conn.execute(sql, params![id, value])?;
        if affected == 0 {
            return Err(Error::UnknownCategory(id));
        }
        Ok(())
    }

    /// Deletes a category. For a tier1 row its tier2 children go with it.
    ///
    /// Returns the number of rows removed, children included. Tasks pointing
    /// at removed rows keep their legacy labels and lose the structured id.
    pub fn delete(&self, id: i64) -> Result<usize> {
        let children: usize = self.conn.query_row(COUNT_CHILDREN, params![id], |row| row.get(0))?;
        let affected = self.conn.execute(DELETE_CATEGORY, params![id])?;
        if affected == 0 {
            return Err(Error::UnknownCategory(id));
        }
        Ok(affected + children)
    }
}

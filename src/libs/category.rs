//! Category tree types.
//!
//! A project's work breakdown is a two-level tree: `tier1` nodes are roots,
//! `tier2` nodes hang off exactly one `tier1` node of the same project.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Tier1,
    Tier2,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Tier1 => "tier1",
            Tier::Tier2 => "tier2",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tier1" | "1" => Ok(Tier::Tier1),
            "tier2" | "2" => Ok(Tier::Tier2),
            other => Err(format!("unknown category tier '{}', expected tier1 or tier2", other)),
        }
    }
}

impl ToSql for Tier {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Tier {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// A persisted category node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub tier: Tier,
    pub parent_id: Option<i64>,
    pub color: String,
    pub sort_order: i64,
    pub is_from_template: bool,
    pub template_source: Option<String>,
}

/// Values for a category that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub project_id: i64,
    pub name: String,
    pub tier: Tier,
    pub parent_id: Option<i64>,
    pub color: String,
    pub sort_order: i64,
    pub is_from_template: bool,
    pub template_source: Option<String>,
}

impl NewCategory {
    pub fn tier1(project_id: i64, name: &str, color: &str, sort_order: i64) -> Self {
        Self {
            project_id,
            name: name.trim().to_string(),
            tier: Tier::Tier1,
            parent_id: None,
            color: color.to_string(),
            sort_order,
            is_from_template: false,
            template_source: None,
        }
    }

    pub fn tier2(project_id: i64, parent_id: i64, name: &str, color: &str, sort_order: i64) -> Self {
        Self {
            project_id,
            name: name.trim().to_string(),
            tier: Tier::Tier2,
            parent_id: Some(parent_id),
            color: color.to_string(),
            sort_order,
            is_from_template: false,
            template_source: None,
        }
    }

    /// Marks the category as created by a preset.
    pub fn from_preset(mut self, preset_id: &str) -> Self {
        self.is_from_template = true;
        self.template_source = Some(preset_id.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWithChildren {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<Category>,
}

/// How a record points at its category.
///
/// Older task, material and labor rows only carry free-text tier labels;
/// newer rows carry the category id. Only the reconciliation layer turns a
/// `ByLegacyName` into something displayable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRef {
    ByStructuredId(i64),
    ByLegacyName { tier: Tier, name: String },
}

/// Groups a flat category list into tier1 roots with their tier2 children.
///
/// Both levels keep the `(sort_order, name)` order. Tier2 rows whose parent is
/// not in the list are dropped.
pub fn build_tree(categories: &[Category]) -> Vec<CategoryWithChildren> {
    let mut roots: Vec<CategoryWithChildren> = categories
        .iter()
        .filter(|c| c.tier == Tier::Tier1)
        .map(|c| CategoryWithChildren {
            category: c.clone(),
            children: Vec::new(),
        })
        .collect();
    roots.sort_by(|a, b| sort_key(&a.category).cmp(&sort_key(&b.category)));

    for child in categories.iter().filter(|c| c.tier == Tier::Tier2) {
        if let Some(root) = roots.iter_mut().find(|r| Some(r.category.id) == child.parent_id) {
            root.children.push(child.clone());
        }
    }
    for root in &mut roots {
        root.children.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    }

    roots
}

fn sort_key(category: &Category) -> (i64, String) {
    (category.sort_order, category.name.to_lowercase())
}

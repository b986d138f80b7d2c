use crate::libs::category::{CategoryRef, Tier};
use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
    Blocked,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "not_started",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "not_started" => Ok(TaskStatus::NotStarted),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            "blocked" => Ok(TaskStatus::Blocked),
            other => Err(format!("unknown task status '{}'", other)),
        }
    }
}

impl ToSql for TaskStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TaskStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub tier1_category: Option<String>,
    pub tier2_category: Option<String>,
    pub category: Option<String>,
    pub category_id: Option<i64>,
    pub template_id: Option<String>,
    pub completed: bool,
}

impl Task {
    /// The most specific category reference this row carries.
    ///
    /// Prefers the structured id; otherwise the tier2 label, then the tier1
    /// label. Rows with neither have no category.
    pub fn category_ref(&self) -> Option<CategoryRef> {
        if let Some(id) = self.category_id {
            return Some(CategoryRef::ByStructuredId(id));
        }
        let legacy = |tier: Tier, name: &Option<String>| {
            name.as_deref()
                .filter(|n| !n.trim().is_empty())
                .map(|n| CategoryRef::ByLegacyName { tier, name: n.to_string() })
        };
        legacy(Tier::Tier2, &self.tier2_category).or_else(|| legacy(Tier::Tier1, &self.tier1_category))
    }
}

/// Values for a task that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub project_id: i64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub tier1_category: Option<String>,
    pub tier2_category: Option<String>,
    pub category: Option<String>,
    pub category_id: Option<i64>,
    pub template_id: Option<String>,
}

impl NewTask {
    pub fn new(project_id: i64, title: &str) -> Self {
        Self {
            project_id,
            title: title.to_string(),
            description: String::new(),
            status: TaskStatus::NotStarted,
            start_date: None,
            end_date: None,
            tier1_category: None,
            tier2_category: None,
            category: None,
            category_id: None,
            template_id: None,
        }
    }

    pub fn with_categories(mut self, tier1: &str, tier2: &str) -> Self {
        self.tier1_category = Some(tier1.to_string());
        self.tier2_category = Some(tier2.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        assert_eq!("in-progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!(TaskStatus::NotStarted.to_string(), "not_started");
        assert!("paused".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn category_ref_prefers_structured_id() {
        let mut task = Task {
            id: 1,
            project_id: 1,
            title: "Pour footings".to_string(),
            description: String::new(),
            status: TaskStatus::NotStarted,
            start_date: None,
            end_date: None,
            tier1_category: Some("Structural".to_string()),
            tier2_category: Some(" ".to_string()),
            category: None,
            category_id: None,
            template_id: None,
            completed: false,
        };
        assert_eq!(
            task.category_ref(),
            Some(CategoryRef::ByLegacyName {
                tier: Tier::Tier1,
                name: "Structural".to_string()
            })
        );

        task.category_id = Some(7);
        assert_eq!(task.category_ref(), Some(CategoryRef::ByStructuredId(7)));
    }
}

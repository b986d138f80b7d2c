//! Provisioning: bootstrapping category trees from presets and turning the
//! template catalog into concrete tasks.
//!
//! Every operation here is safe to repeat. Category rows are upserted through
//! the unique `(project, tier, name)` index and template tasks through the
//! unique `(project, template_id)` index, so a second run, or a concurrent
//! run from another connection, creates nothing new. Each operation runs in
//! one `IMMEDIATE` transaction, which serializes writers per database.
//!
//! Problems with single rows (a tier2 entry without a parent, a failed insert)
//! are reported in the result and never abort the rest of the batch. Only an
//! unknown project or preset fails the whole call.

use crate::db::categories::Categories;
use crate::db::projects::Projects;
use crate::db::tasks::{MaterializedInsert, Tasks};
use crate::libs::catalog::{get_all_templates, TaskTemplate};
use crate::libs::category::{build_tree, Category, CategoryWithChildren, NewCategory, Tier};
use crate::libs::config::ProvisioningConfig;
use crate::libs::error::{Error, Result};
use crate::libs::presets::{get_preset_by_id, Preset};
use crate::libs::project::Project;
use crate::libs::reconcile::{link_category, resolve_category_name};
use crate::libs::task::{NewTask, Task, TaskStatus};
use chrono::{Days, NaiveDate};
use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, Default, Serialize)]
pub struct PresetApplication {
    pub created: Vec<Category>,
    pub reused: Vec<Category>,
    pub warnings: Vec<String>,
}

/// A row of a batch that could not be written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFailure {
    pub key: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Materialization {
    pub created: Vec<Task>,
    /// Templates that already had a task in the project.
    pub skipped: usize,
    pub failures: Vec<RowFailure>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateReset {
    pub deleted_count: usize,
    pub created_count: usize,
    /// Tasks created per project name.
    pub per_project: BTreeMap<String, usize>,
    pub failures: Vec<RowFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectSetup {
    pub project: Project,
    pub preset: Option<PresetApplication>,
    pub materialization: Option<Materialization>,
}

pub struct Provisioner<'a> {
    conn: &'a mut Connection,
}

impl<'a> Provisioner<'a> {
    pub fn new(conn: &'a mut Connection) -> Self {
        Self { conn }
    }

    /// Creates a project and runs the provisioning configured for new projects.
    pub fn create_project(&mut self, name: &str, start_date: NaiveDate, config: &ProvisioningConfig) -> Result<ProjectSetup> {
        let preset = match config.default_preset.as_deref() {
            Some(id) => Some(get_preset_by_id(id).ok_or_else(|| Error::UnknownPreset(id.to_string()))?),
            None => None,
        };

        let project = Projects::new(self.conn).create(name, start_date)?;
        tracing::info!(project_id = project.id, name = %project.name, "project created");

        let preset = match preset {
            Some(preset) => Some(self.apply_preset_definition(project.id, preset)?),
            None => None,
        };
        let materialization = if config.materialize_on_create {
            Some(self.materialize_templates(project.id)?)
        } else {
            None
        };

        Ok(ProjectSetup {
            project,
            preset,
            materialization,
        })
    }

    /// Applies a shipped preset to a project.
    pub fn apply_preset(&mut self, project_id: i64, preset_id: &str) -> Result<PresetApplication> {
        let preset = get_preset_by_id(preset_id).ok_or_else(|| Error::UnknownPreset(preset_id.to_string()))?;
        self.apply_preset_definition(project_id, preset)
    }

    /// Upserts the preset's tier1 and tier2 categories into the project.
    ///
    /// Existing rows with the same name are reused as they are, so colors and
    /// ordering edited after a previous run survive.
    pub fn apply_preset_definition(&mut self, project_id: i64, preset: &Preset) -> Result<PresetApplication> {
        let tx = self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        Projects::new(&tx).require(project_id)?;
        let categories = Categories::new(&tx);
        let mut result = PresetApplication::default();
        let mut parents: HashMap<String, i64> = HashMap::new();

        for entry in preset.tier1 {
            let new = NewCategory::tier1(project_id, entry.name, entry.color, entry.sort_order).from_preset(preset.id);
            match categories.upsert(&new) {
                Ok((category, created)) => {
                    parents.insert(category.name.to_lowercase(), category.id);
                    parents.insert(entry.name.to_lowercase(), category.id);
                    if created {
                        result.created.push(category);
                    } else {
                        result.reused.push(category);
                    }
                }
                Err(e) => {
                    tracing::warn!(name = entry.name, error = %e, "tier1 category not applied");
                    result.warnings.push(format!("tier1 '{}' not applied: {}", entry.name, e));
                }
            }
        }

        let mut positions: HashMap<i64, i64> = HashMap::new();
        for entry in preset.tier2 {
            let Some(&parent_id) = parents.get(&entry.parent_tier1_name.to_lowercase()) else {
                tracing::warn!(name = entry.name, parent = entry.parent_tier1_name, "tier2 category has no parent");
                result.warnings.push(format!(
                    "tier2 '{}' skipped: parent tier1 '{}' is not part of preset '{}'",
                    entry.name, entry.parent_tier1_name, preset.id
                ));
                continue;
            };
            let position = positions.entry(parent_id).or_insert(0);
            *position += 1;

            let new = NewCategory::tier2(project_id, parent_id, entry.name, entry.color, *position).from_preset(preset.id);
            match categories.upsert(&new) {
                Ok((category, true)) => result.created.push(category),
                Ok((category, false)) => {
                    if category.parent_id != Some(parent_id) {
                        result.warnings.push(format!(
                            "tier2 '{}' already exists under a different tier1 category and was left there",
                            category.name
                        ));
                    }
                    result.reused.push(category);
                }
                Err(e) => {
                    tracing::warn!(name = entry.name, error = %e, "tier2 category not applied");
                    result.warnings.push(format!("tier2 '{}' not applied: {}", entry.name, e));
                }
            }
        }

        tx.commit()?;
        tracing::info!(
            project_id,
            preset = preset.id,
            created = result.created.len(),
            reused = result.reused.len(),
            warnings = result.warnings.len(),
            "preset applied"
        );
        Ok(result)
    }

    /// Materializes the whole shipped catalog for a project.
    pub fn materialize_templates(&mut self, project_id: i64) -> Result<Materialization> {
        self.materialize_template_set(project_id, get_all_templates())
    }

    /// Creates one task per template that the project does not have yet.
    ///
    /// Tasks whose template left the catalog are never touched.
    pub fn materialize_template_set(&mut self, project_id: i64, templates: &[TaskTemplate]) -> Result<Materialization> {
        let tx = self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let project = Projects::new(&tx).require(project_id)?;
        let result = materialize_into(&tx, &project, templates)?;
        tx.commit()?;

        tracing::info!(
            project_id,
            created = result.created.len(),
            skipped = result.skipped,
            failed = result.failures.len(),
            "templates materialized"
        );
        Ok(result)
    }

    /// Deletes template-sourced tasks and materializes the catalog again.
    ///
    /// Scoped to one project, or every project when `project_id` is `None`.
    /// Manually entered tasks are kept. Each project is reset in its own
    /// transaction.
    pub fn reset_templates(&mut self, project_id: Option<i64>) -> Result<TemplateReset> {
        self.reset_template_set(project_id, get_all_templates())
    }

    pub fn reset_template_set(&mut self, project_id: Option<i64>, templates: &[TaskTemplate]) -> Result<TemplateReset> {
        let projects = match project_id {
            Some(id) => vec![Projects::new(self.conn).require(id)?],
            None => Projects::new(self.conn).list()?,
        };

        let mut reset = TemplateReset::default();
        for project in projects {
            let tx = self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let deleted = Tasks::new(&tx).delete_template_tasks(project.id)?;
            let materialized = materialize_into(&tx, &project, templates)?;
            tx.commit()?;

            tracing::info!(project_id = project.id, deleted, created = materialized.created.len(), "templates reset");
            reset.deleted_count += deleted;
            reset.created_count += materialized.created.len();
            *reset.per_project.entry(project.name.clone()).or_insert(0) += materialized.created.len();
            reset.failures.extend(materialized.failures);
        }

        Ok(reset)
    }

    pub fn list_categories(&self, project_id: i64) -> Result<Vec<Category>> {
        Projects::new(self.conn).require(project_id)?;
        Categories::new(self.conn).list(project_id)
    }

    pub fn list_category_tree(&self, project_id: i64) -> Result<Vec<CategoryWithChildren>> {
        Ok(build_tree(&self.list_categories(project_id)?))
    }

    /// Current display name for a stored label within a project.
    pub fn resolve_category_name(&self, stored_name: &str, tier: Tier, project_id: i64) -> Result<String> {
        let categories = self.list_categories(project_id)?;
        Ok(resolve_category_name(stored_name, tier, &categories))
    }
}

/// End date of a template task: calendar days after the start.
pub fn template_end_date(start_date: NaiveDate, template: &TaskTemplate) -> Option<NaiveDate> {
    start_date.checked_add_days(Days::new(u64::from(template.estimated_duration_days)))
}

fn materialize_into(conn: &Connection, project: &Project, templates: &[TaskTemplate]) -> Result<Materialization> {
    let tasks = Tasks::new(conn);
    let categories = Categories::new(conn).list(project.id)?;
    let mut seen: HashSet<String> = tasks.template_ids(project.id)?;
    let mut result = Materialization::default();

    for template in templates {
        if !seen.insert(template.id.to_string()) {
            result.skipped += 1;
            continue;
        }

        let Some(end_date) = template_end_date(project.start_date, template) else {
            result.failures.push(RowFailure {
                key: template.id.to_string(),
                reason: format!("end date overflows {} + {} days", project.start_date, template.estimated_duration_days),
            });
            continue;
        };

        let category_id = link_category(template.tier2_category, Tier::Tier2, &categories)
            .or_else(|| link_category(template.tier1_category, Tier::Tier1, &categories))
            .map(|category| category.id);

        let task = NewTask {
            project_id: project.id,
            title: template.title.to_string(),
            description: template.description.to_string(),
            status: TaskStatus::NotStarted,
            start_date: Some(project.start_date),
            end_date: Some(end_date),
            tier1_category: Some(template.tier1_category.to_string()),
            tier2_category: Some(template.tier2_category.to_string()),
            category: Some(template.category.to_string()),
            category_id,
            template_id: Some(template.id.to_string()),
        };

        match tasks.insert_materialized(&task) {
            Ok(MaterializedInsert::Inserted(task)) => result.created.push(task),
            Ok(MaterializedInsert::AlreadyMaterialized) => result.skipped += 1,
            Err(e) => {
                tracing::warn!(template_id = template.id, project_id = project.id, error = %e, "template task not created");
                result.failures.push(RowFailure {
                    key: template.id.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(result)
}

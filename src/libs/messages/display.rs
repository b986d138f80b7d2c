//! Text for every [`Message`].
//!
//! Keeping all wording in one match makes the CLI output consistent and
//! easy to review.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleDatabase => "Database settings".to_string(),
            Message::ConfigModuleProvisioning => "Provisioning defaults for new projects".to_string(),
            Message::NoDefaultPreset => "No default preset".to_string(),

            // === PROJECT MESSAGES ===
            Message::ProjectCreated { name, id } => format!("Project '{}' created with id {}", name, id),
            Message::ProjectDeleted(id) => format!("Project {} deleted. Its tasks are left for `cleanup`.", id),
            Message::ProjectsHeader => "Projects:".to_string(),
            Message::NoProjects => "No projects found.".to_string(),
            Message::ConfirmDeleteProject(name) => format!("Delete project '{}' and its category tree?", name),

            // === PRESET MESSAGES ===
            Message::PresetsHeader => "Available presets:".to_string(),
            Message::PresetHeader(name) => format!("Preset: {}", name),
            Message::PresetApplied { preset, created, reused } => {
                format!("Preset '{}' applied: {} categories created, {} reused", preset, created, reused)
            }
            Message::PresetWarning(warning) => warning.clone(),

            // === TEMPLATE MESSAGES ===
            Message::TemplatesHeader => "Task templates:".to_string(),
            Message::NoTemplatesFound => "No templates match.".to_string(),
            Message::TemplatesMaterialized { created, skipped } => {
                format!("{} task(s) created from templates, {} already present", created, skipped)
            }
            Message::RowFailed { key, reason } => format!("'{}' failed: {}", key, reason),
            Message::ConfirmReset(scope) => format!("Delete every template task in {} and create them again?", scope),
            Message::ResetCompleted { deleted, created } => format!("Reset finished: {} task(s) deleted, {} created", deleted, created),
            Message::ResetProjectLine { name, created } => format!("  {}: {} task(s)", name, created),

            // === CATEGORY MESSAGES ===
            Message::CategoriesHeader => "Categories:".to_string(),
            Message::NoCategories => "This project has no categories yet. Try `preset apply`.".to_string(),
            Message::CategoryCreated(name) => format!("Category '{}' created", name),
            Message::CategoryRenamed { from, to } => format!("Category '{}' renamed to '{}'", from, to),
            Message::CategoryRecolored(name) => format!("Category '{}' recolored", name),
            Message::CategoryReordered(name) => format!("Category '{}' moved", name),
            Message::CategoriesDeleted(count) => format!("Deleted {} categor{}", count, if *count == 1 { "y" } else { "ies" }),
            Message::ConfirmDeleteCategory { name, children } => {
                if *children > 0 {
                    format!("Delete '{}' and its {} subcategories?", name, children)
                } else {
                    format!("Delete '{}'?", name)
                }
            }

            // === TASK MESSAGES ===
            Message::TasksHeader(project) => format!("Tasks for {}:", project),
            Message::NoTasks => "No tasks found.".to_string(),
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TaskStatusUpdated { id, status } => format!("Task {} is now {}", id, status),
            Message::TaskNotFound(id) => format!("Task {} not found", id),
            Message::TaskDatesUpdated(id) => format!("Dates of task {} updated", id),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),

            // === RECONCILIATION MESSAGES ===
            Message::ResolvedName { stored, resolved, matched_by } => format!("'{}' -> '{}' ({})", stored, resolved, matched_by),

            // === MAINTENANCE MESSAGES ===
            Message::OrphansRemoved { removed, ids } => format!("Removed {} orphaned task(s): {:?}", removed, ids),
            Message::NoOrphans => "No orphaned tasks found.".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select settings to configure".to_string(),
            Message::PromptDatabasePath => "Database file (empty for the default location)".to_string(),
            Message::PromptBusyTimeout => "Busy timeout in milliseconds".to_string(),
            Message::PromptDefaultPreset => "Preset applied to new projects".to_string(),
            Message::PromptMaterializeOnCreate => "Create template tasks for new projects?".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database needs migration".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
        };
        write!(f, "{}", text)
    }
}

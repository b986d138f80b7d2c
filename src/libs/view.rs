//! Table rendering for the CLI.

use super::catalog::TaskTemplate;
use super::category::{Category, CategoryWithChildren};
use super::presets::Preset;
use super::project::Project;
use super::reconcile::resolve_task;
use super::task::Task;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn projects(projects: &[Project]) -> Result<()> {
        let mut table = Table::new();
        table.set_titles(row!["ID", "NAME", "START", "CREATED"]);
        for project in projects {
            table.add_row(row![
                project.id,
                project.name,
                project.start_date.format("%Y-%m-%d"),
                project.created_at.as_deref().unwrap_or("-")
            ]);
        }
        table.printstd();
        Ok(())
    }

    pub fn categories(categories: &[Category]) -> Result<()> {
        let parent_name = |id: Option<i64>| {
            id.and_then(|id| categories.iter().find(|c| c.id == id))
                .map(|c| c.name.clone())
                .unwrap_or_default()
        };

        let mut table = Table::new();
        table.set_titles(row!["ID", "TIER", "NAME", "PARENT", "COLOR", "ORDER", "SOURCE"]);
        for category in categories {
            table.add_row(row![
                category.id,
                category.tier,
                category.name,
                parent_name(category.parent_id),
                category.color,
                category.sort_order,
                category.template_source.as_deref().unwrap_or("manual")
            ]);
        }
        table.printstd();
        Ok(())
    }

    /// Indented tree: tier1 rows followed by their tier2 children.
    pub fn category_tree(tree: &[CategoryWithChildren]) -> Result<()> {
        let mut table = Table::new();
        table.set_titles(row!["ID", "CATEGORY", "COLOR"]);
        for node in tree {
            table.add_row(row![node.category.id, b->node.category.name, node.category.color]);
            for child in &node.children {
                table.add_row(row![child.id, format!("  └ {}", child.name), child.color]);
            }
        }
        table.printstd();
        Ok(())
    }

    /// Tasks with the category each one resolves to in the current tree.
    pub fn tasks(tasks: &[Task], categories: &[Category]) -> Result<()> {
        let mut table = Table::new();
        table.set_titles(row!["ID", "TITLE", "STATUS", "START", "END", "CATEGORY", "TEMPLATE"]);
        for task in tasks {
            let category = resolve_task(task, categories).map(|r| r.name).unwrap_or_default();
            let date = |d: Option<chrono::NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
            table.add_row(row![
                task.id,
                task.title,
                task.status,
                date(task.start_date),
                date(task.end_date),
                category,
                task.template_id.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();
        Ok(())
    }

    pub fn templates(templates: &[&TaskTemplate]) -> Result<()> {
        let mut table = Table::new();
        table.set_titles(row!["ID", "TITLE", "TIER1", "TIER2", "DAYS"]);
        for template in templates {
            table.add_row(row![
                template.id,
                template.title,
                template.tier1_category,
                template.tier2_category,
                r->template.estimated_duration_days
            ]);
        }
        table.printstd();
        Ok(())
    }

    pub fn presets(presets: &[Preset]) -> Result<()> {
        let mut table = Table::new();
        table.set_titles(row!["ID", "NAME", "TIER1", "TIER2", "DESCRIPTION"]);
        for preset in presets {
            table.add_row(row![
                preset.id,
                preset.name,
                preset.tier1.len(),
                preset.tier2.len(),
                preset.description
            ]);
        }
        table.printstd();
        Ok(())
    }

    /// Layout of one preset as it would be applied.
    pub fn preset(preset: &Preset) -> Result<()> {
        let mut table = Table::new();
        table.set_titles(row!["CATEGORY", "COLOR", "ORDER"]);
        let mut tier1 = preset.tier1.to_vec();
        tier1.sort_by_key(|t| t.sort_order);
        for root in tier1 {
            table.add_row(row![b->root.name, root.color, root.sort_order]);
            for (position, child) in preset.tier2_of(root.name).enumerate() {
                table.add_row(row![format!("  └ {}", child.name), child.color, position]);
            }
        }
        table.printstd();
        Ok(())
    }

    /// Applied migrations followed by the pending ones.
    pub fn migrations(applied: &[(u32, String, String)], pending: &[(u32, &str)]) -> Result<()> {
        let mut table = Table::new();
        table.set_titles(row!["VERSION", "NAME", "APPLIED"]);
        for (version, name, applied_at) in applied {
            table.add_row(row![version, name, applied_at]);
        }
        for (version, name) in pending {
            table.add_row(row![version, name, i->"pending"]);
        }
        table.printstd();
        Ok(())
    }
}

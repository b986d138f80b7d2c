#[cfg(test)]
mod tests {
    use buildplan::db::categories::Categories;
    use buildplan::db::db::Db;
    use buildplan::db::projects::Projects;
    use buildplan::db::tasks::{MaterializedInsert, Tasks};
    use buildplan::libs::catalog::{get_all_templates, get_template_by_id};
    use buildplan::libs::category::{NewCategory, Tier};
    use buildplan::libs::error::Error;
    use buildplan::libs::provisioning::Provisioner;
    use buildplan::libs::task::{NewTask, TaskStatus};
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use std::thread;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MaterializeTestContext {
        temp_dir: TempDir,
        db: Db,
        project_id: i64,
    }

    impl MaterializeTestContext {
        fn db_path(&self) -> PathBuf {
            self.temp_dir.path().join("test.db")
        }
    }

    impl TestContext for MaterializeTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("test.db")).unwrap();
            let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
            let project_id = Projects::new(&db.conn).create("Lakeside cabin", start).unwrap().id;
            MaterializeTestContext {
                temp_dir,
                db,
                project_id,
            }
        }
    }

    #[test_context(MaterializeTestContext)]
    #[test]
    fn test_materialize_creates_one_task_per_template(ctx: &mut MaterializeTestContext) {
        let result = Provisioner::new(&mut ctx.db.conn)
            .materialize_templates(ctx.project_id)
            .unwrap();

        assert_eq!(result.created.len(), get_all_templates().len());
        assert_eq!(result.skipped, 0);
        assert!(result.failures.is_empty());

        let tasks = Tasks::new(&ctx.db.conn).list(ctx.project_id).unwrap();
        assert_eq!(tasks.len(), get_all_templates().len());
        assert!(tasks.iter().all(|t| t.status == TaskStatus::NotStarted && !t.completed));
        assert!(tasks.iter().all(|t| t.template_id.is_some()));
    }

    #[test_context(MaterializeTestContext)]
    #[test]
    fn test_second_run_creates_nothing(ctx: &mut MaterializeTestContext) {
        let mut provisioner = Provisioner::new(&mut ctx.db.conn);
        let templates: Vec<_> = ["FR1", "FR2"].iter().filter_map(|id| get_template_by_id(id)).copied().collect();

        let first = provisioner.materialize_template_set(ctx.project_id, &templates).unwrap();
        assert_eq!(first.created.len(), 2);

        let second = provisioner.materialize_template_set(ctx.project_id, &templates).unwrap();
        assert!(second.created.is_empty());
        assert_eq!(second.skipped, 2);

        assert_eq!(Tasks::new(&ctx.db.conn).list(ctx.project_id).unwrap().len(), 2);
    }

    #[test_context(MaterializeTestContext)]
    #[test]
    fn test_dates_follow_project_start(ctx: &mut MaterializeTestContext) {
        let framing = *get_template_by_id("FR1").unwrap();
        assert_eq!(framing.estimated_duration_days, 5);

        let result = Provisioner::new(&mut ctx.db.conn)
            .materialize_template_set(ctx.project_id, &[framing])
            .unwrap();

        let task = &result.created[0];
        assert_eq!(task.start_date, NaiveDate::from_ymd_opt(2025, 1, 15));
        assert_eq!(task.end_date, NaiveDate::from_ymd_opt(2025, 1, 20));
        assert_eq!(task.tier1_category.as_deref(), Some("Structural"));
        assert_eq!(task.tier2_category.as_deref(), Some("Framing"));
        assert_eq!(task.template_id.as_deref(), Some("FR1"));
    }

    #[test_context(MaterializeTestContext)]
    #[test]
    fn test_catalog_changes_only_add(ctx: &mut MaterializeTestContext) {
        let catalog = get_all_templates();
        let mut provisioner = Provisioner::new(&mut ctx.db.conn);

        provisioner.materialize_template_set(ctx.project_id, &catalog[..3]).unwrap();

        // Two templates added, the first one retired
        let next = provisioner.materialize_template_set(ctx.project_id, &catalog[1..5]).unwrap();
        let created: Vec<&str> = next.created.iter().filter_map(|t| t.template_id.as_deref()).collect();
        assert_eq!(created, vec![catalog[3].id, catalog[4].id]);
        assert_eq!(next.skipped, 2);

        let ids = Tasks::new(&ctx.db.conn).template_ids(ctx.project_id).unwrap();
        assert_eq!(ids.len(), 5);
        assert!(ids.contains(catalog[0].id));
    }

    #[test_context(MaterializeTestContext)]
    #[test]
    fn test_duplicate_insert_is_absorbed(ctx: &mut MaterializeTestContext) {
        Provisioner::new(&mut ctx.db.conn)
            .materialize_templates(ctx.project_id)
            .unwrap();

        let mut task = NewTask::new(ctx.project_id, "Floor framing again");
        task.template_id = Some("FR1".to_string());
        let tasks = Tasks::new(&ctx.db.conn);
        assert_eq!(tasks.insert_materialized(&task).unwrap(), MaterializedInsert::AlreadyMaterialized);

        // Manual tasks carry no template id and never collide
        tasks.insert(&NewTask::new(ctx.project_id, "Order dumpster")).unwrap();
        tasks.insert(&NewTask::new(ctx.project_id, "Order dumpster")).unwrap();
        assert_eq!(tasks.list(ctx.project_id).unwrap().len(), get_all_templates().len() + 2);
    }

    #[test_context(MaterializeTestContext)]
    #[test]
    fn test_tasks_link_to_the_category_tree(ctx: &mut MaterializeTestContext) {
        let mut provisioner = Provisioner::new(&mut ctx.db.conn);
        provisioner.apply_preset(ctx.project_id, "home-builder").unwrap();
        provisioner.materialize_templates(ctx.project_id).unwrap();

        let framing = Categories::new(&ctx.db.conn)
            .find_by_name(ctx.project_id, Tier::Tier2, "Framing")
            .unwrap()
            .unwrap();
        let tasks = Tasks::new(&ctx.db.conn).list(ctx.project_id).unwrap();
        assert!(tasks.iter().all(|t| t.category_id.is_some()));

        let framing_tasks = tasks.iter().filter(|t| t.category_id == Some(framing.id)).count();
        assert_eq!(framing_tasks, 3);
    }

    #[test_context(MaterializeTestContext)]
    #[test]
    fn test_missing_tier2_links_to_tier1_not_a_sibling(ctx: &mut MaterializeTestContext) {
        Provisioner::new(&mut ctx.db.conn)
            .apply_preset(ctx.project_id, "home-builder")
            .unwrap();
        let categories = Categories::new(&ctx.db.conn);
        let foundation = categories
            .find_by_name(ctx.project_id, Tier::Tier2, "Foundation")
            .unwrap()
            .unwrap();
        let structural = categories
            .find_by_name(ctx.project_id, Tier::Tier1, "Structural")
            .unwrap()
            .unwrap();
        categories.delete(foundation.id).unwrap();

        let excavation = *get_template_by_id("FN1").unwrap();
        let result = Provisioner::new(&mut ctx.db.conn)
            .materialize_template_set(ctx.project_id, &[excavation])
            .unwrap();

        let task = &result.created[0];
        assert_eq!(task.tier2_category.as_deref(), Some("Foundation"));
        assert_eq!(task.category_id, Some(structural.id));
    }

    #[test_context(MaterializeTestContext)]
    #[test]
    fn test_unlinked_when_no_category_matches(ctx: &mut MaterializeTestContext) {
        let categories = Categories::new(&ctx.db.conn);
        let tier1 = categories
            .insert(&NewCategory::tier1(ctx.project_id, "Structures", "#111111", 1))
            .unwrap();
        categories
            .insert(&NewCategory::tier2(ctx.project_id, tier1.id, "Framing", "#222222", 1))
            .unwrap();

        // "Structures" and "Structural" are synonyms only; "Framing" is a sibling
        let excavation = *get_template_by_id("FN1").unwrap();
        let result = Provisioner::new(&mut ctx.db.conn)
            .materialize_template_set(ctx.project_id, &[excavation])
            .unwrap();
        assert_eq!(result.created[0].category_id, None);
    }

    #[test_context(MaterializeTestContext)]
    #[test]
    fn test_unknown_project_fails(ctx: &mut MaterializeTestContext) {
        let result = Provisioner::new(&mut ctx.db.conn).materialize_templates(9999);
        assert!(matches!(result, Err(Error::UnknownProject(9999))));
        assert!(Tasks::new(&ctx.db.conn).list_all().unwrap().is_empty());
    }

    #[test_context(MaterializeTestContext)]
    #[test]
    fn test_concurrent_runs_do_not_duplicate(ctx: &mut MaterializeTestContext) {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let path = ctx.db_path();
                let project_id = ctx.project_id;
                thread::spawn(move || {
                    let mut db = Db::open(path).unwrap();
                    Provisioner::new(&mut db.conn).materialize_templates(project_id).unwrap()
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let created: usize = results.iter().map(|r| r.created.len()).sum();
        assert_eq!(created, get_all_templates().len());
        assert!(results.iter().all(|r| r.failures.is_empty()));

        let ids = Tasks::new(&ctx.db.conn).template_ids(ctx.project_id).unwrap();
        let count = Tasks::new(&ctx.db.conn).list(ctx.project_id).unwrap().len();
        assert_eq!(ids.len(), get_all_templates().len());
        assert_eq!(count, ids.len());
    }
}

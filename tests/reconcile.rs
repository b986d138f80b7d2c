#[cfg(test)]
mod tests {
    use buildplan::db::categories::Categories;
    use buildplan::db::db::Db;
    use buildplan::db::projects::Projects;
    use buildplan::db::tasks::Tasks;
    use buildplan::libs::category::Tier;
    use buildplan::libs::error::Error;
    use buildplan::libs::provisioning::Provisioner;
    use buildplan::libs::reconcile::{resolve_task, MatchKind};
    use buildplan::libs::task::NewTask;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ReconcileTestContext {
        _temp_dir: TempDir,
        db: Db,
        project_id: i64,
    }

    impl TestContext for ReconcileTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let mut db = Db::open(temp_dir.path().join("test.db")).unwrap();
            let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
            let project_id = Projects::new(&db.conn).create("Lakeside cabin", start).unwrap().id;
            Provisioner::new(&mut db.conn).apply_preset(project_id, "home-builder").unwrap();
            ReconcileTestContext {
                _temp_dir: temp_dir,
                db,
                project_id,
            }
        }
    }

    #[test_context(ReconcileTestContext)]
    #[test]
    fn test_stored_labels_map_to_current_names(ctx: &mut ReconcileTestContext) {
        let project_id = ctx.project_id;
        let provisioner = Provisioner::new(&mut ctx.db.conn);
        let resolve = |name: &str, tier: Tier| provisioner.resolve_category_name(name, tier, project_id).unwrap();

        assert_eq!(resolve("structural", Tier::Tier1), "Structural");
        assert_eq!(resolve("Seathing", Tier::Tier1), "Sheathing");
        assert_eq!(resolve("H.V.A.C.", Tier::Tier2), "HVAC");
        assert_eq!(resolve("Sheetrock", Tier::Tier2), "Drywall");
        assert_eq!(resolve("Quantum Flux", Tier::Tier1), "Quantum Flux");
    }

    #[test_context(ReconcileTestContext)]
    #[test]
    fn test_unknown_project_is_an_error(ctx: &mut ReconcileTestContext) {
        let provisioner = Provisioner::new(&mut ctx.db.conn);
        assert!(matches!(
            provisioner.resolve_category_name("Framing", Tier::Tier2, 9999),
            Err(Error::UnknownProject(9999))
        ));
    }

    #[test_context(ReconcileTestContext)]
    #[test]
    fn test_renamed_category_is_found_by_id(ctx: &mut ReconcileTestContext) {
        let categories = Categories::new(&ctx.db.conn);
        let drywall = categories.find_by_name(ctx.project_id, Tier::Tier2, "Drywall").unwrap().unwrap();

        let tasks = Tasks::new(&ctx.db.conn);
        let mut linked = NewTask::new(ctx.project_id, "Hang board").with_categories("Sheathing", "Drywall");
        linked.category_id = Some(drywall.id);
        let linked = tasks.insert(&linked).unwrap();
        let legacy = tasks
            .insert(&NewTask::new(ctx.project_id, "Tape seams").with_categories("Sheathing", "Drywall"))
            .unwrap();

        categories.rename(drywall.id, "Wallboard").unwrap();
        let current = categories.list(ctx.project_id).unwrap();

        let resolved = resolve_task(&linked, &current).unwrap();
        assert_eq!(resolved.name, "Wallboard");
        assert_eq!(resolved.matched_by, MatchKind::StructuredId);

        // No synonym links the old label to the new name
        let resolved = resolve_task(&legacy, &current).unwrap();
        assert_eq!(resolved.name, "Drywall");
        assert_eq!(resolved.matched_by, MatchKind::Unresolved);
    }

    #[test_context(ReconcileTestContext)]
    #[test]
    fn test_deleted_category_falls_back_to_labels(ctx: &mut ReconcileTestContext) {
        let categories = Categories::new(&ctx.db.conn);
        let plumbing = categories.find_by_name(ctx.project_id, Tier::Tier2, "Plumbing").unwrap().unwrap();

        let tasks = Tasks::new(&ctx.db.conn);
        let mut task = NewTask::new(ctx.project_id, "Set water heater").with_categories("systems", "plumbing");
        task.category_id = Some(plumbing.id);
        let task = tasks.insert(&task).unwrap();

        categories.delete(plumbing.id).unwrap();
        let task = tasks.get(task.id).unwrap().unwrap();
        assert_eq!(task.category_id, None);

        let resolved = resolve_task(&task, &categories.list(ctx.project_id).unwrap()).unwrap();
        assert_eq!(resolved.name, "plumbing");
        assert_eq!(resolved.matched_by, MatchKind::Unresolved);
    }
}

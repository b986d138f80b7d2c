#[cfg(test)]
mod tests {
    use buildplan::db::db::Db;
    use buildplan::db::projects::Projects;
    use buildplan::db::tasks::Tasks;
    use buildplan::libs::catalog::get_all_templates;
    use buildplan::libs::error::Error;
    use buildplan::libs::provisioning::Provisioner;
    use buildplan::libs::task::{NewTask, TaskStatus};
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ResetTestContext {
        _temp_dir: TempDir,
        db: Db,
        first: i64,
        second: i64,
    }

    impl TestContext for ResetTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let mut db = Db::open(temp_dir.path().join("test.db")).unwrap();
            let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
            let first = Projects::new(&db.conn).create("Lakeside cabin", start).unwrap().id;
            let second = Projects::new(&db.conn).create("Hillside duplex", start).unwrap().id;

            let mut provisioner = Provisioner::new(&mut db.conn);
            provisioner.materialize_templates(first).unwrap();
            provisioner.materialize_templates(second).unwrap();
            ResetTestContext {
                _temp_dir: temp_dir,
                db,
                first,
                second,
            }
        }
    }

    #[test_context(ResetTestContext)]
    #[test]
    fn test_reset_one_project_keeps_manual_tasks(ctx: &mut ResetTestContext) {
        let tasks = Tasks::new(&ctx.db.conn);
        let manual = tasks.insert(&NewTask::new(ctx.first, "Walkthrough with owner")).unwrap();
        let progressed = tasks.list(ctx.first).unwrap()[0].id;
        tasks.update_status(progressed, TaskStatus::Completed).unwrap();

        let reset = Provisioner::new(&mut ctx.db.conn).reset_templates(Some(ctx.first)).unwrap();
        let catalog = get_all_templates().len();
        assert_eq!(reset.deleted_count, catalog);
        assert_eq!(reset.created_count, catalog);
        assert_eq!(reset.per_project.get("Lakeside cabin"), Some(&catalog));
        assert_eq!(reset.per_project.len(), 1);

        let tasks = Tasks::new(&ctx.db.conn);
        let after = tasks.list(ctx.first).unwrap();
        assert_eq!(after.len(), catalog + 1);
        assert!(after.iter().any(|t| t.id == manual.id));
        // Progress on template tasks is discarded
        assert!(after.iter().filter(|t| t.template_id.is_some()).all(|t| !t.completed));

        // The other project is untouched
        assert_eq!(tasks.list(ctx.second).unwrap().len(), catalog);
    }

    #[test_context(ResetTestContext)]
    #[test]
    fn test_reset_all_projects(ctx: &mut ResetTestContext) {
        let reset = Provisioner::new(&mut ctx.db.conn).reset_templates(None).unwrap();
        let catalog = get_all_templates().len();

        assert_eq!(reset.deleted_count, catalog * 2);
        assert_eq!(reset.created_count, catalog * 2);
        assert_eq!(reset.per_project.len(), 2);
        assert!(reset.failures.is_empty());

        // Uniqueness still holds after the rebuild
        let tasks = Tasks::new(&ctx.db.conn);
        assert_eq!(tasks.template_ids(ctx.first).unwrap().len(), catalog);
        assert_eq!(tasks.template_ids(ctx.second).unwrap().len(), catalog);
    }

    #[test_context(ResetTestContext)]
    #[test]
    fn test_reset_unknown_project(ctx: &mut ResetTestContext) {
        let result = Provisioner::new(&mut ctx.db.conn).reset_templates(Some(9999));
        assert!(matches!(result, Err(Error::UnknownProject(9999))));
        assert_eq!(Tasks::new(&ctx.db.conn).list_all().unwrap().len(), get_all_templates().len() * 2);
    }
}

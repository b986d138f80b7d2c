#[cfg(test)]
mod tests {
    use buildplan::db::categories::Categories;
    use buildplan::db::db::Db;
    use buildplan::db::projects::Projects;
    use buildplan::db::tasks::Tasks;
    use buildplan::libs::category::{NewCategory, Tier};
    use buildplan::libs::error::Error;
    use buildplan::libs::provisioning::Provisioner;
    use buildplan::libs::task::NewTask;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct CategoryTestContext {
        _temp_dir: TempDir,
        db: Db,
        project_id: i64,
    }

    impl TestContext for CategoryTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("test.db")).unwrap();
            let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
            let project_id = Projects::new(&db.conn).create("Lakeside cabin", start).unwrap().id;
            CategoryTestContext {
                _temp_dir: temp_dir,
                db,
                project_id,
            }
        }
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_tier2_hangs_off_tier1(ctx: &mut CategoryTestContext) {
        let categories = Categories::new(&ctx.db.conn);

        let structural = categories.insert(&NewCategory::tier1(ctx.project_id, "Structural", "#8B5A2B", 1)).unwrap();
        let framing = categories
            .insert(&NewCategory::tier2(ctx.project_id, structural.id, "Framing", "#CD853F", 1))
            .unwrap();

        assert_eq!(structural.tier, Tier::Tier1);
        assert_eq!(structural.parent_id, None);
        assert_eq!(framing.tier, Tier::Tier2);
        assert_eq!(framing.parent_id, Some(structural.id));
        assert_eq!(categories.children(structural.id).unwrap(), vec![framing]);
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_tree_shape_is_enforced(ctx: &mut CategoryTestContext) {
        let categories = Categories::new(&ctx.db.conn);
        let structural = categories.insert(&NewCategory::tier1(ctx.project_id, "Structural", "#000", 1)).unwrap();
        let framing = categories
            .insert(&NewCategory::tier2(ctx.project_id, structural.id, "Framing", "#000", 1))
            .unwrap();

        // A tier2 row cannot parent another tier2 row
        let nested = categories.insert(&NewCategory::tier2(ctx.project_id, framing.id, "Studs", "#000", 1));
        assert!(matches!(nested, Err(Error::InvalidCategory(_))));

        // A tier1 row cannot have a parent
        let mut rooted = NewCategory::tier1(ctx.project_id, "Systems", "#000", 2);
        rooted.parent_id = Some(structural.id);
        assert!(matches!(categories.insert(&rooted), Err(Error::InvalidCategory(_))));

        // A tier2 row cannot point into another project
        let other = Projects::new(&ctx.db.conn)
            .create("Other", NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
            .unwrap();
        let foreign = categories.insert(&NewCategory::tier2(other.id, structural.id, "Framing", "#000", 1));
        assert!(matches!(foreign, Err(Error::InvalidCategory(_))));

        let missing = categories.insert(&NewCategory::tier2(ctx.project_id, 9999, "Ghost", "#000", 1));
        assert!(matches!(missing, Err(Error::UnknownCategory(9999))));

        let blank = categories.insert(&NewCategory::tier1(ctx.project_id, "   ", "#000", 3));
        assert!(matches!(blank, Err(Error::InvalidCategory(_))));
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_names_are_unique_per_tier_ignoring_case(ctx: &mut CategoryTestContext) {
        let categories = Categories::new(&ctx.db.conn);
        let structural = categories.insert(&NewCategory::tier1(ctx.project_id, "Structural", "#000", 1)).unwrap();

        let duplicate = categories.insert(&NewCategory::tier1(ctx.project_id, "STRUCTURAL", "#fff", 2));
        assert!(matches!(
            duplicate,
            Err(Error::DuplicateCategory { tier: Tier::Tier1, .. })
        ));

        // Same name on the other tier is fine
        categories
            .insert(&NewCategory::tier2(ctx.project_id, structural.id, "Structural", "#000", 1))
            .unwrap();

        // So is the same name in another project
        let other = Projects::new(&ctx.db.conn)
            .create("Other", NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
            .unwrap();
        categories.insert(&NewCategory::tier1(other.id, "Structural", "#000", 1)).unwrap();

        assert_eq!(categories.list(ctx.project_id).unwrap().len(), 2);
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_upsert_returns_existing_row_untouched(ctx: &mut CategoryTestContext) {
        let categories = Categories::new(&ctx.db.conn);
        let (first, created) = categories
            .upsert(&NewCategory::tier1(ctx.project_id, "Systems", "#2563EB", 2))
            .unwrap();
        assert!(created);

        let (second, created) = categories
            .upsert(&NewCategory::tier1(ctx.project_id, "systems", "#FF0000", 9))
            .unwrap();
        assert!(!created);
        assert_eq!(second, first);
        assert_eq!(second.color, "#2563EB");
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_rename_recolor_reorder(ctx: &mut CategoryTestContext) {
        let categories = Categories::new(&ctx.db.conn);
        let drywall = categories.insert(&NewCategory::tier1(ctx.project_id, "Drywall", "#000", 1)).unwrap();
        categories.insert(&NewCategory::tier1(ctx.project_id, "Paint", "#000", 2)).unwrap();

        let renamed = categories.rename(drywall.id, "  Wallboard ").unwrap();
        assert_eq!(renamed.name, "Wallboard");

        let clash = categories.rename(drywall.id, "paint");
        assert!(matches!(clash, Err(Error::DuplicateCategory { .. })));

        categories.recolor(drywall.id, "#123456").unwrap();
        categories.reorder(drywall.id, 5).unwrap();
        let updated = categories.get(drywall.id).unwrap().unwrap();
        assert_eq!(updated.color, "#123456");
        assert_eq!(updated.sort_order, 5);

        // Paint now sorts first
        let names: Vec<String> = categories.list(ctx.project_id).unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Paint", "Wallboard"]);

        assert!(matches!(categories.recolor(4242, "#000"), Err(Error::UnknownCategory(4242))));
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_tier1_delete_cascades_and_detaches_tasks(ctx: &mut CategoryTestContext) {
        let categories = Categories::new(&ctx.db.conn);
        let sheathing = categories.insert(&NewCategory::tier1(ctx.project_id, "Sheathing", "#000", 1)).unwrap();
        let drywall = categories
            .insert(&NewCategory::tier2(ctx.project_id, sheathing.id, "Drywall", "#000", 1))
            .unwrap();
        categories
            .insert(&NewCategory::tier2(ctx.project_id, sheathing.id, "Barriers", "#000", 2))
            .unwrap();

        let tasks = Tasks::new(&ctx.db.conn);
        let mut new_task = NewTask::new(ctx.project_id, "Hang board").with_categories("Sheathing", "Drywall");
        new_task.category_id = Some(drywall.id);
        let task = tasks.insert(&new_task).unwrap();

        assert_eq!(categories.delete(sheathing.id).unwrap(), 3);
        assert!(categories.list(ctx.project_id).unwrap().is_empty());

        // The task keeps its labels and loses the structured link
        let task = tasks.get(task.id).unwrap().unwrap();
        assert_eq!(task.category_id, None);
        assert_eq!(task.tier2_category.as_deref(), Some("Drywall"));
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_project_delete_removes_its_tree(ctx: &mut CategoryTestContext) {
        let categories = Categories::new(&ctx.db.conn);
        let root = categories.insert(&NewCategory::tier1(ctx.project_id, "Systems", "#000", 1)).unwrap();
        categories
            .insert(&NewCategory::tier2(ctx.project_id, root.id, "Plumbing", "#000", 1))
            .unwrap();

        Projects::new(&ctx.db.conn).delete(ctx.project_id).unwrap();

        assert!(categories.list(ctx.project_id).unwrap().is_empty());
        assert!(matches!(
            Projects::new(&ctx.db.conn).delete(ctx.project_id),
            Err(Error::UnknownProject(_))
        ));
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_new_rows_sort_after_siblings(ctx: &mut CategoryTestContext) {
        assert_eq!(Categories::new(&ctx.db.conn).next_sort_order(ctx.project_id, None).unwrap(), 1);

        Provisioner::new(&mut ctx.db.conn)
            .apply_preset(ctx.project_id, "home-builder")
            .unwrap();

        let categories = Categories::new(&ctx.db.conn);
        let structural = categories.find_by_name(ctx.project_id, Tier::Tier1, "Structural").unwrap().unwrap();
        let systems = categories.find_by_name(ctx.project_id, Tier::Tier1, "Systems").unwrap().unwrap();

        // Four tier1 rows numbered 1..4, three children under Structural
        assert_eq!(categories.next_sort_order(ctx.project_id, None).unwrap(), 5);
        assert_eq!(categories.next_sort_order(ctx.project_id, Some(structural.id)).unwrap(), 4);

        categories.reorder(systems.id, 10).unwrap();
        assert_eq!(categories.next_sort_order(ctx.project_id, None).unwrap(), 11);

        let sort_order = categories.next_sort_order(ctx.project_id, None).unwrap();
        let custom = categories
            .insert(&NewCategory::tier1(ctx.project_id, "Permits", "#000", sort_order))
            .unwrap();
        let tier1: Vec<_> = categories
            .list(ctx.project_id)
            .unwrap()
            .into_iter()
            .filter(|c| c.tier == Tier::Tier1)
            .collect();
        assert_eq!(tier1.last().map(|c| c.id), Some(custom.id));
    }
}

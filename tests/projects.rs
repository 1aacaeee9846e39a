#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
    use taskdesk::controllers::{ProjectController, TaskController};
    use taskdesk::db::db::Db;
    use taskdesk::libs::error::StoreError;
    use taskdesk::libs::id::ProjectId;
    use taskdesk::libs::project::{ProjectStatus, ProjectUpdate};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ProjectTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for ProjectTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open_with_schema(temp_dir.path().join("projects.db")).unwrap();
            ProjectTestContext { _temp_dir: temp_dir, db }
        }

        fn teardown(self) {
            self.db.close().unwrap();
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(9, 30, 0).unwrap()
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_project_crud(ctx: &mut ProjectTestContext) {
        let projects = ProjectController::new(&ctx.db).unwrap();

        let id = projects
            .add_project("Website", Some("Relaunch"), date(2024, 3, 1), date(2024, 6, 1))
            .unwrap();

        let project = projects.get_project(id).unwrap().unwrap();
        assert_eq!(project.name, "Website");
        assert_eq!(project.description.as_deref(), Some("Relaunch"));
        assert_eq!(project.start_date, date(2024, 3, 1));
        assert_eq!(project.end_date, date(2024, 6, 1));
        assert_eq!(project.status, ProjectStatus::Active);

        let mut update = ProjectUpdate::default();
        update.set("name", "Website v2").unwrap();
        update.set("description", "").unwrap();
        assert!(projects.update_project(id, &update));

        let project = projects.get_project(id).unwrap().unwrap();
        assert_eq!(project.name, "Website v2");
        assert_eq!(project.description, None);
        assert_eq!(project.end_date, date(2024, 6, 1));

        assert!(projects.delete_project(id));
        assert!(projects.get_project(id).unwrap().is_none());
        assert!(!projects.delete_project(id));
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_status_changes_are_unrestricted(ctx: &mut ProjectTestContext) {
        let projects = ProjectController::new(&ctx.db).unwrap();
        let id = projects.add_project("Ops", None, date(2024, 1, 1), date(2024, 2, 1)).unwrap();

        for status in [ProjectStatus::Completed, ProjectStatus::OnHold, ProjectStatus::Active] {
            assert!(projects.update_project_status(id, status));
            assert_eq!(projects.get_project(id).unwrap().unwrap().status, status);
        }
        assert!(!projects.update_project_status(ProjectId(404), ProjectStatus::Completed));
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_unknown_status_is_a_validation_error(_ctx: &mut ProjectTestContext) {
        let mut update = ProjectUpdate::default();
        let err = update.set("status", "archived").unwrap_err();
        assert_eq!(err.field(), "status");
        assert!(update.is_empty());
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_progress(ctx: &mut ProjectTestContext) {
        let projects = ProjectController::new(&ctx.db).unwrap();
        let now = Local::now().naive_local();

        let halfway = projects
            .add_project("Halfway", None, now - Duration::days(5), now + Duration::days(5))
            .unwrap();
        let finished = projects
            .add_project("Finished", None, now - Duration::days(10), now - Duration::days(1))
            .unwrap();
        let upcoming = projects
            .add_project("Upcoming", None, now + Duration::days(1), now + Duration::days(10))
            .unwrap();

        let progress = projects.get_project_progress(halfway).unwrap().unwrap();
        assert!((49.0..=51.0).contains(&progress), "{progress}");
        assert_eq!(projects.get_project_progress(finished).unwrap(), Some(100.0));
        assert_eq!(projects.get_project_progress(upcoming).unwrap(), Some(0.0));
        assert_eq!(projects.get_project_progress(ProjectId(404)).unwrap(), None);
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_deleting_project_keeps_its_tasks(ctx: &mut ProjectTestContext) {
        let projects = ProjectController::new(&ctx.db).unwrap();
        let tasks = TaskController::new(&ctx.db).unwrap();

        let id = projects.add_project("Temp", None, date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        tasks.add_task("Leftover", None, 2, date(2024, 1, 15), Some(id), None).unwrap().unwrap();

        assert!(projects.delete_project(id));
        let remaining = tasks.get_tasks_by_project(id).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].project_id, Some(id));
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_malformed_timestamp_fails_the_read(ctx: &mut ProjectTestContext) {
        let projects = ProjectController::new(&ctx.db).unwrap();
        ctx.db
            .conn
            .execute(
                "INSERT INTO projects (name, start_date, end_date, status) VALUES ('Broken', 'soon', '2024-01-01 00:00:00', 'active')",
                [],
            )
            .unwrap();
        let id = ProjectId(ctx.db.conn.last_insert_rowid());

        let err = projects.get_project(id).unwrap_err();
        assert!(matches!(
            err,
            StoreError::MalformedTimestamp {
                table: "projects",
                column: "start_date",
                ..
            }
        ));
        assert!(projects.get_all_projects().is_err());
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_unknown_stored_status_fails_the_read(ctx: &mut ProjectTestContext) {
        let projects = ProjectController::new(&ctx.db).unwrap();
        ctx.db
            .conn
            .execute(
                "INSERT INTO projects (name, start_date, end_date, status) VALUES ('Odd', '2024-01-01 00:00:00', '2024-02-01 00:00:00', 'paused')",
                [],
            )
            .unwrap();
        let id = ProjectId(ctx.db.conn.last_insert_rowid());

        assert!(matches!(projects.get_project(id), Err(StoreError::InvalidData { column: "status", .. })));
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_storage_failures_are_contained(ctx: &mut ProjectTestContext) {
        let projects = ProjectController::new(&ctx.db).unwrap();
        let id = projects.add_project("Gone", None, date(2024, 1, 1), date(2024, 2, 1)).unwrap();
        ctx.db.conn.execute("DROP TABLE projects", []).unwrap();

        assert_eq!(projects.add_project("New", None, date(2024, 1, 1), date(2024, 2, 1)), None);
        assert!(!projects.update_project(id, &ProjectUpdate::status(ProjectStatus::Completed)));
        assert!(!projects.update_project_status(id, ProjectStatus::OnHold));
        assert!(!projects.delete_project(id));
        assert!(projects.get_project_progress(id).is_err());
    }
}

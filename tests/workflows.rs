#[cfg(test)]
mod tests {
    use chrono::{Duration, Local};
    use clap::Parser;
    use taskdesk::commands::Cli;
    use taskdesk::controllers::{ProjectController, TaskController, UserController};
    use taskdesk::db::db::Db;
    use taskdesk::libs::task::TaskStatus;
    use taskdesk::libs::user::Role;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct WorkflowTestContext {
        temp_dir: TempDir,
        db: Db,
    }

    impl WorkflowTestContext {
        fn db_arg(&self) -> String {
            self.temp_dir.path().join("cli.db").display().to_string()
        }
    }

    impl TestContext for WorkflowTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open_with_schema(temp_dir.path().join("workflow.db")).unwrap();
            WorkflowTestContext { temp_dir, db }
        }

        fn teardown(self) {
            self.db.close().unwrap();
        }
    }

    #[test_context(WorkflowTestContext)]
    #[test]
    fn test_project_progress_and_overdue(ctx: &mut WorkflowTestContext) {
        let projects = ProjectController::new(&ctx.db).unwrap();
        let tasks = TaskController::new(&ctx.db).unwrap();
        let t0 = Local::now().naive_local() - Duration::days(3);

        let project = projects.add_project("Launch", None, t0, t0 + Duration::days(10)).unwrap();
        let done = tasks
            .add_task("Book venue", None, 1, t0 + Duration::days(1), Some(project), None)
            .unwrap()
            .unwrap();
        let open = tasks
            .add_task("Print flyers", None, 2, t0 + Duration::days(2), Some(project), None)
            .unwrap()
            .unwrap();
        assert!(tasks.update_task_status(done.id.unwrap(), TaskStatus::Completed));

        let progress = projects.get_project_progress(project).unwrap().unwrap();
        assert!((0.0..=100.0).contains(&progress));
        assert!((29.0..=31.0).contains(&progress), "{progress}");

        let overdue = tasks.get_overdue_tasks().unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, open.id);
        assert_eq!(tasks.get_tasks_by_project(project).unwrap().len(), 2);
    }

    #[test_context(WorkflowTestContext)]
    #[test]
    fn test_tasks_by_assignee(ctx: &mut WorkflowTestContext) {
        let users = UserController::new(&ctx.db).unwrap();
        let tasks = TaskController::new(&ctx.db).unwrap();
        let due = Local::now().naive_local() + Duration::days(5);

        let dev = users.add_user("ula", "ula@example.com", Role::Developer).unwrap().unwrap();
        let other = users.add_user("vic", "vic@example.com", Role::Manager).unwrap().unwrap();
        let mine = tasks.add_task("Refactor", None, 2, due, None, Some(dev)).unwrap().unwrap();
        tasks.add_task("Budget", None, 1, due, None, Some(other)).unwrap();
        tasks.add_task("Unassigned", None, 3, due, None, None).unwrap();

        let assigned = tasks.get_tasks_by_user(dev).unwrap();
        assert_eq!(assigned, vec![mine]);
        assert_eq!(users.get_user_tasks(dev).unwrap(), assigned);
    }

    #[test_context(WorkflowTestContext)]
    #[test]
    fn test_cli_round_trip(ctx: &mut WorkflowTestContext) {
        let db = ctx.db_arg();
        let run = |args: &[&str]| {
            let mut argv = vec!["taskdesk", "--db", db.as_str()];
            argv.extend_from_slice(args);
            Cli::try_parse_from(argv).unwrap().run()
        };

        run(&["user", "add", "wes", "wes@example.com", "--role", "manager"]).unwrap();
        run(&["project", "add", "Docs", "--start", "2024-01-01", "--end", "2024-12-31"]).unwrap();
        run(&["task", "add", "Outline", "--project", "1", "--assignee", "1", "--due", "2024-02-01"]).unwrap();
        run(&["task", "status", "1", "in_progress"]).unwrap();
        run(&["task", "update", "1", "--set", "priority=3", "--set", "description=first pass"]).unwrap();

        assert!(run(&["user", "add", "bad", "not-an-email"]).is_err());
        assert!(run(&["task", "status", "1", "finished"]).is_err());
        assert!(run(&["task", "update", "1", "--set", "colour=red"]).is_err());
        assert!(run(&["task", "delete", "99", "--yes"]).is_err());

        let db = Db::open(ctx.temp_dir.path().join("cli.db")).unwrap();
        let tasks = TaskController::new(&db).unwrap();
        let task = &tasks.get_all_tasks().unwrap()[0];
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority.get(), 3);
        assert_eq!(task.description.as_deref(), Some("first pass"));
        assert_eq!(UserController::new(&db).unwrap().get_all_users().unwrap().len(), 1);

        let json = serde_json::to_value(task).unwrap();
        assert_eq!(json["due_date"], "2024-02-01T00:00:00");
        assert_eq!(json["status"], "in_progress");
        assert_eq!(json["priority"], 3);
        run(&["task", "list", "--json"]).unwrap();

        run(&["project", "progress", "1"]).unwrap();
        assert!(run(&["project", "progress", "9"]).is_err());

        run(&["task", "delete", "1", "--yes"]).unwrap();
        assert!(tasks.get_all_tasks().unwrap().is_empty());
    }
}

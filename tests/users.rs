#[cfg(test)]
mod tests {
    use chrono::{Duration, Local};
    use taskdesk::controllers::{TaskController, UserController};
    use taskdesk::db::db::Db;
    use taskdesk::db::users::Users;
    use taskdesk::libs::error::ValidationError;
    use taskdesk::libs::id::UserId;
    use taskdesk::libs::user::{Role, User, UserUpdate};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct UserTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for UserTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open_with_schema(temp_dir.path().join("users.db")).unwrap();
            UserTestContext { _temp_dir: temp_dir, db }
        }

        fn teardown(self) {
            self.db.close().unwrap();
        }
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_user_crud(ctx: &mut UserTestContext) {
        let users = UserController::new(&ctx.db).unwrap();

        // Create
        let id = users.add_user("alice", "alice@example.com", Role::Admin).unwrap().unwrap();

        // Read
        let user = users.get_user(id).unwrap().unwrap();
        assert_eq!(user.id, Some(id));
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.role, Role::Admin);

        // Update
        let update = UserUpdate {
            role: Some(Role::Manager),
            ..UserUpdate::default()
        };
        assert!(users.update_user(id, &update).unwrap());
        assert_eq!(users.get_user(id).unwrap().unwrap().role, Role::Manager);

        // Delete
        assert!(users.delete_user(id));
        assert!(users.get_user(id).unwrap().is_none());
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_registration_date_survives_storage(ctx: &mut UserTestContext) {
        let repo = Users::new(&ctx.db);
        let user = User::new("bob", "bob@example.com", Role::Developer).unwrap();

        let id = repo.insert(&user).unwrap();
        let stored = repo.get(id).unwrap().unwrap();

        assert_eq!(stored.registration_date, user.registration_date);
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_invalid_email_is_rejected_before_storage(ctx: &mut UserTestContext) {
        let users = UserController::new(&ctx.db).unwrap();

        let err = users.add_user("carol", "not-an-email", Role::Developer).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEmail(_)));
        assert!(users.get_all_users().unwrap().is_empty());
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_invalid_email_update_keeps_row(ctx: &mut UserTestContext) {
        let users = UserController::new(&ctx.db).unwrap();
        let id = users.add_user("dave", "dave@example.com", Role::Developer).unwrap().unwrap();

        let update = UserUpdate {
            email: Some("dave@".to_string()),
            ..UserUpdate::default()
        };
        assert!(users.update_user(id, &update).is_err());
        assert_eq!(users.get_user(id).unwrap().unwrap().email, "dave@example.com");
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_partial_update_leaves_other_fields(ctx: &mut UserTestContext) {
        let users = UserController::new(&ctx.db).unwrap();
        let id = users.add_user("erin", "erin@example.com", Role::Manager).unwrap().unwrap();
        let before = users.get_user(id).unwrap().unwrap();

        let mut update = UserUpdate::default();
        update.set("username", "erin2").unwrap();
        assert!(users.update_user(id, &update).unwrap());

        let after = users.get_user(id).unwrap().unwrap();
        assert_eq!(after.username, "erin2");
        assert_eq!(after.email, before.email);
        assert_eq!(after.role, before.role);
        assert_eq!(after.registration_date, before.registration_date);
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_missing_user(ctx: &mut UserTestContext) {
        let users = UserController::new(&ctx.db).unwrap();
        let missing = UserId(999);

        assert!(users.get_user(missing).unwrap().is_none());
        assert!(!users.delete_user(missing));
        assert!(!users.update_user(missing, &UserUpdate::default()).unwrap());

        let update = UserUpdate {
            username: Some("ghost".to_string()),
            ..UserUpdate::default()
        };
        assert!(!users.update_user(missing, &update).unwrap());
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_empty_update_reports_existence(ctx: &mut UserTestContext) {
        let users = UserController::new(&ctx.db).unwrap();
        let id = users.add_user("fay", "fay@example.com", Role::Admin).unwrap().unwrap();

        assert!(users.update_user(id, &UserUpdate::default()).unwrap());
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_users_listed_in_insertion_order(ctx: &mut UserTestContext) {
        let users = UserController::new(&ctx.db).unwrap();
        for name in ["a", "b", "c"] {
            users.add_user(name, &format!("{name}@example.com"), Role::Developer).unwrap();
        }

        let names: Vec<_> = users.get_all_users().unwrap().into_iter().map(|u| u.username).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_user_tasks(ctx: &mut UserTestContext) {
        let users = UserController::new(&ctx.db).unwrap();
        let tasks = TaskController::new(&ctx.db).unwrap();
        let due = Local::now().naive_local() + Duration::days(3);

        let alice = users.add_user("alice", "alice@example.com", Role::Developer).unwrap().unwrap();
        let bob = users.add_user("bob", "bob@example.com", Role::Developer).unwrap().unwrap();
        tasks.add_task("Review", None, 1, due, None, Some(alice)).unwrap().unwrap();
        tasks.add_task("Deploy", None, 2, due, None, Some(alice)).unwrap().unwrap();
        tasks.add_task("Write docs", None, 3, due, None, Some(bob)).unwrap().unwrap();

        let titles: Vec<_> = users.get_user_tasks(alice).unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["Review", "Deploy"]);
        assert!(users.get_user_tasks(UserId(42)).unwrap().is_empty());
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_deleting_user_leaves_assignment_dangling(ctx: &mut UserTestContext) {
        let users = UserController::new(&ctx.db).unwrap();
        let tasks = TaskController::new(&ctx.db).unwrap();
        let due = Local::now().naive_local() + Duration::days(3);

        let id = users.add_user("gus", "gus@example.com", Role::Developer).unwrap().unwrap();
        let task = tasks.add_task("Orphan", None, 1, due, None, Some(id)).unwrap().unwrap();

        assert!(users.delete_user(id));
        let stored = tasks.get_task(task.id.unwrap()).unwrap().unwrap();
        assert_eq!(stored.assignee_id, Some(id));
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_storage_failures_are_contained(ctx: &mut UserTestContext) {
        let users = UserController::new(&ctx.db).unwrap();
        let id = users.add_user("hal", "hal@example.com", Role::Developer).unwrap().unwrap();
        ctx.db.conn.execute("DROP TABLE users", []).unwrap();

        assert_eq!(users.add_user("ida", "ida@example.com", Role::Admin).unwrap(), None);
        let update = UserUpdate {
            role: Some(Role::Manager),
            ..UserUpdate::default()
        };
        assert!(!users.update_user(id, &update).unwrap());
        assert!(!users.delete_user(id));

        // Validation still runs before storage is touched
        assert!(users.add_user("ida", "broken", Role::Admin).is_err());
        assert!(users.get_all_users().is_err());
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    // === USER MESSAGES ===
    UserCreated(String, i64), // username, id
    UserUpdated(i64),
    UserDeleted(i64),
    UserNotFound(i64),
    UserCreateFailed,
    UserUpdateFailed(i64),
    UsersNotFound,
    UsersHeader,
    ConfirmDeleteUser(String),

    // === PROJECT MESSAGES ===
    ProjectCreated(String, i64), // name, id
    ProjectUpdated(i64),
    ProjectDeleted(i64),
    ProjectNotFound(i64),
    ProjectCreateFailed,
    ProjectUpdateFailed(i64),
    ProjectStatusChanged(i64, String),
    ProjectProgress(String, String), // name, percent
    ProjectsNotFound,
    ProjectsHeader,
    ConfirmDeleteProject(String),

    // === TASK MESSAGES ===
    TaskCreated(String, i64), // title, id
    TaskUpdated(i64),
    TaskDeleted(i64),
    TaskNotFound(i64),
    TaskCreateFailed,
    TaskUpdateFailed(i64),
    TaskStatusChanged(i64, String),
    TasksNotFound,
    TasksHeader,
    OverdueTasksHeader,
    NoOverdueTasks,
    SearchResultsHeader(String),
    ConfirmDeleteTask(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDbPath(String),

    // === GENERIC MESSAGES ===
    InvalidAssignment(String),
    OperationCancelled,
}

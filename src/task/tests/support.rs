//! Shared fixtures and helpers for task unit tests.

use crate::task::domain::{
    GroupId, NewTaskData, Task, TaskId, TaskPriority, TaskTitle, UserId,
};
use crate::task::ports::{
    Notification, Notifier, NotifierResult, TaskRepository, TaskRepositoryResult,
};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::collections::BTreeSet;

mockall::mock! {
    /// Mock task repository for failure injection.
    pub Repo {}

    #[async_trait::async_trait]
    impl TaskRepository for Repo {
        async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn update(&self, task: &Task) -> TaskRepositoryResult<Task>;
        async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
        async fn find_overdue_candidates(
            &self,
            now: DateTime<Utc>,
        ) -> TaskRepositoryResult<Vec<Task>>;
    }
}

mockall::mock! {
    /// Mock notifier for failure injection.
    pub Sink {}

    #[async_trait::async_trait]
    impl Notifier for Sink {
        async fn notify(&self, notification: &Notification) -> NotifierResult<()>;
    }
}

/// Clock frozen at a fixed instant.
pub struct FrozenClock(pub DateTime<Utc>);

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Fixed reference instant shared by deterministic tests.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0)
        .single()
        .expect("valid reference timestamp")
}

/// One hour, the unit step the deterministic tests advance time by.
pub fn one_hour() -> Duration {
    Duration::hours(1)
}

pub fn user(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}

pub fn group(id: &str) -> GroupId {
    GroupId::new(id).expect("valid group id")
}

pub fn title(value: &str) -> TaskTitle {
    TaskTitle::new(value).expect("valid title")
}

/// Creates a task at [`base_time`] for the given assignees.
pub fn task_for(assignees: &[&str], due_at: Option<DateTime<Utc>>) -> Task {
    let data = NewTaskData {
        title: title("Quarterly compliance review"),
        description: None,
        priority: TaskPriority::default(),
        due_at,
        created_by: user("hr-lead"),
        assignees: assignees.iter().map(|id| user(id)).collect(),
        assigned_groups: BTreeSet::new(),
    };
    Task::new(data, &FrozenClock(base_time())).expect("valid task")
}

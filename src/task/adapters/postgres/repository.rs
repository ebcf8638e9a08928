//! `PostgreSQL` repository implementation for task document storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Aggregate statuses excluded from overdue-candidate scans.
const CLOSED_AGGREGATE_STATUSES: [&str; 4] = [
    TaskStatus::Completed.as_str(),
    TaskStatus::Approved.as_str(),
    TaskStatus::Rejected.as_str(),
    TaskStatus::Cancelled.as_str(),
];

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
///
/// The complete aggregate is persisted as a JSONB document; the scalar
/// columns are projections maintained on every write so that scan
/// queries never inspect the document body.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let task_id = task.id();
        let expected_version =
            i64::try_from(task.version()).map_err(TaskRepositoryError::persistence)?;
        let persisted = task.clone().with_version(task.version() + 1);
        let next_version =
            i64::try_from(persisted.version()).map_err(TaskRepositoryError::persistence)?;
        let document =
            serde_json::to_value(&persisted).map_err(TaskRepositoryError::persistence)?;
        let overall_status = persisted.overall_status().as_str().to_owned();
        let due_at = persisted.due_at();
        let is_active = persisted.is_active();
        let updated_at = persisted.updated_at();

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::version.eq(expected_version)),
            )
            .set((
                tasks::document.eq(document),
                tasks::overall_status.eq(overall_status),
                tasks::due_at.eq(due_at),
                tasks::is_active.eq(is_active),
                tasks::version.eq(next_version),
                tasks::updated_at.eq(updated_at),
            ))
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if affected == 0 {
                // The version predicate hides whether the row is missing
                // or stale; a second lookup distinguishes the two. The
                // window between the statements only affects which error
                // is reported, not write integrity.
                let exists = diesel::select(diesel::dsl::exists(
                    tasks::table.filter(tasks::id.eq(task_id.into_inner())),
                ))
                .get_result::<bool>(connection)
                .map_err(TaskRepositoryError::persistence)?;
                if exists {
                    return Err(TaskRepositoryError::Conflict(task_id));
                }
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(persisted)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_overdue_candidates(&self, now: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::is_active.eq(true))
                .filter(tasks::due_at.is_not_null())
                .filter(tasks::due_at.lt(now))
                .filter(tasks::overall_status.ne_all(CLOSED_AGGREGATE_STATUSES))
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let document = serde_json::to_value(task).map_err(TaskRepositoryError::persistence)?;
    let version = i64::try_from(task.version()).map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        document,
        overall_status: task.overall_status().as_str().to_owned(),
        due_at: task.due_at(),
        is_active: task.is_active(),
        version,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let task =
        serde_json::from_value::<Task>(row.document).map_err(TaskRepositoryError::persistence)?;
    let row_version = u64::try_from(row.version).map_err(TaskRepositoryError::persistence)?;
    debug_assert_eq!(
        task.version(),
        row_version,
        "document and row version projections should agree"
    );
    Ok(task)
}

//! Periodic batch scan marking expired tasks overdue.

use crate::task::{
    domain::{Task, UserId},
    ports::{Notification, NotificationKind, Notifier, TaskRepository, TaskRepositoryResult},
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;

/// Aggregate counts reported by one overdue scan run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverdueScanReport {
    /// Candidates fetched and examined.
    pub total_checked: usize,
    /// Tasks that had at least one assignee newly marked overdue.
    pub updated: usize,
    /// Candidates that needed no change.
    pub already_overdue: usize,
    /// Candidates whose persistence failed; retried on the next run.
    pub skipped: usize,
}

/// Batch process re-evaluating active tasks past their due date.
///
/// The scanner owns no timer; an external periodic trigger (the overdue
/// worker binary, or an operator) invokes the single idempotent batch
/// entry point. Failures on one task are logged and never abort the
/// batch.
#[derive(Clone)]
pub struct OverdueScanner<R, N, C>
where
    R: TaskRepository,
    N: Notifier,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    notifier: Arc<N>,
    clock: Arc<C>,
}

impl<R, N, C> OverdueScanner<R, N, C>
where
    R: TaskRepository,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates a new scanner.
    #[must_use]
    pub const fn new(repository: Arc<R>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            repository,
            notifier,
            clock,
        }
    }

    /// Runs one scan over the current overdue candidates.
    ///
    /// Each modified task is persisted and, once per overdue episode,
    /// its newly transitioned assignees are notified. Per-task
    /// persistence failures are counted as skipped and picked up by the
    /// next run; notification failures only affect the dispatch guard.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the candidate query itself
    /// fails; individual task failures never surface here.
    pub async fn scan_and_mark_overdue(&self) -> TaskRepositoryResult<OverdueScanReport> {
        let now = self.clock.utc();
        let candidates = self.repository.find_overdue_candidates(now).await?;

        let mut report = OverdueScanReport::default();
        for candidate in candidates {
            report.total_checked += 1;
            let mut task = candidate;
            let newly_marked = task.check_and_mark_overdue(now);
            if newly_marked.is_empty() {
                report.already_overdue += 1;
                continue;
            }

            match self.repository.update(&task).await {
                Ok(saved) => {
                    report.updated += 1;
                    if !saved.overdue_notified() {
                        self.dispatch_overdue_notifications(saved, &newly_marked).await;
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        task_id = %task.id(),
                        error = %err,
                        "failed to persist overdue marking"
                    );
                    report.skipped += 1;
                }
            }
        }

        tracing::info!(
            total_checked = report.total_checked,
            updated = report.updated,
            already_overdue = report.already_overdue,
            skipped = report.skipped,
            "overdue scan complete"
        );
        Ok(report)
    }

    /// Notifies the newly transitioned assignees and records the
    /// episode's dispatch guard after the first success.
    async fn dispatch_overdue_notifications(&self, task: Task, newly_marked: &[UserId]) {
        let mut any_dispatched = false;
        for user in newly_marked {
            let notification = Notification::new(
                user.clone(),
                NotificationKind::TaskOverdue,
                "Task overdue",
                format!("Task '{}' is past its due date", task.title()),
            )
            .with_related_task(task.id());
            match self.notifier.notify(&notification).await {
                Ok(()) => any_dispatched = true,
                Err(err) => tracing::warn!(
                    task_id = %task.id(),
                    user_id = %user,
                    error = %err,
                    "failed to dispatch overdue notification"
                ),
            }
        }

        if any_dispatched {
            let mut notified = task;
            notified.mark_overdue_notified();
            if let Err(err) = self.repository.update(&notified).await {
                tracing::warn!(
                    task_id = %notified.id(),
                    error = %err,
                    "failed to record overdue notification dispatch"
                );
            }
        }
    }
}

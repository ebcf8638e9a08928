//! Shared world state for overdue scanning BDD scenarios.

use chrono::{DateTime, Duration, Local, Utc};
use fayol::task::{
    adapters::memory::{InMemoryGroupDirectory, InMemoryTaskRepository, RecordingNotifier},
    domain::Task,
    services::{OverdueScanReport, OverdueScanner, TaskLifecycleService},
};
use mockable::Clock;
use rstest::fixture;
use std::sync::Arc;

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

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryGroupDirectory,
    RecordingNotifier,
    FrozenClock,
>;

/// Scanner type used by the BDD world.
pub type TestScanner = OverdueScanner<InMemoryTaskRepository, RecordingNotifier, FrozenClock>;

/// Scenario world for overdue detection behaviour tests.
pub struct TaskOverdueWorld {
    pub base: DateTime<Utc>,
    pub repository: Arc<InMemoryTaskRepository>,
    pub notifier: Arc<RecordingNotifier>,
    pub service: TestTaskService,
    pub scanner: TestScanner,
    pub task: Option<Task>,
    pub last_report: Option<OverdueScanReport>,
}

impl TaskOverdueWorld {
    /// Creates a world whose service clock sits at a fixed base instant
    /// and whose scanner clock sits two hours later, past every due
    /// date the scenarios create.
    #[must_use]
    pub fn new() -> Self {
        let base = DateTime::<Utc>::default();
        let repository = Arc::new(InMemoryTaskRepository::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let service = TaskLifecycleService::new(
            Arc::clone(&repository),
            Arc::new(InMemoryGroupDirectory::new()),
            Arc::clone(&notifier),
            Arc::new(FrozenClock(base)),
        );
        let scanner = OverdueScanner::new(
            Arc::clone(&repository),
            Arc::clone(&notifier),
            Arc::new(FrozenClock(base + Duration::hours(2))),
        );

        Self {
            base,
            repository,
            notifier,
            service,
            scanner,
            task: None,
            last_report: None,
        }
    }
}

impl Default for TaskOverdueWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskOverdueWorld {
    TaskOverdueWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

//! Behaviour tests for automatic overdue detection.

#[path = "task_overdue_steps/mod.rs"]
mod task_overdue_steps_defs;

use rstest_bdd_macros::scenario;
use task_overdue_steps_defs::world::{TaskOverdueWorld, world};

#[scenario(
    path = "tests/features/task_overdue.feature",
    name = "Open assignees are marked overdue after the due date passes"
)]
#[tokio::test(flavor = "multi_thread")]
async fn marks_open_assignees_past_due(world: TaskOverdueWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_overdue.feature",
    name = "A repeated scan changes nothing"
)]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_scan_is_a_no_op(world: TaskOverdueWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_overdue.feature",
    name = "Completed work is never downgraded"
)]
#[tokio::test(flavor = "multi_thread")]
async fn completed_work_is_preserved(world: TaskOverdueWorld) {
    let _ = world;
}

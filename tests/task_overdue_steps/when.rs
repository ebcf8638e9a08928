//! When steps for overdue scanning BDD scenarios.

use super::world::{TaskOverdueWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

fn run_scan(world: &mut TaskOverdueWorld) -> Result<(), eyre::Report> {
    let report =
        run_async(world.scanner.scan_and_mark_overdue()).wrap_err("run overdue scan")?;
    world.last_report = Some(report);
    Ok(())
}

#[when("the due date passes and the overdue scan runs")]
fn overdue_scan_runs(world: &mut TaskOverdueWorld) -> Result<(), eyre::Report> {
    run_scan(world)
}

#[when("the overdue scan runs again")]
fn overdue_scan_runs_again(world: &mut TaskOverdueWorld) -> Result<(), eyre::Report> {
    run_scan(world)
}

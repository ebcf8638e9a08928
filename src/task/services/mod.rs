//! Application services for task lifecycle orchestration.

mod lifecycle;
mod scanner;

pub use lifecycle::{
    AddAssigneesRequest, CreateTaskRequest, ReportStatusRequest, TaskLifecycleError,
    TaskLifecycleResult, TaskLifecycleService, UpdateTaskDetailsRequest,
};
pub use scanner::{OverdueScanReport, OverdueScanner};

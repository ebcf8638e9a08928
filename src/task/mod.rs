//! Task lifecycle management for Fayol.
//!
//! This module implements shared-task assignment and tracking: creating a
//! task for direct assignees and expanded group members, recording each
//! assignee's independent status, deriving the single aggregate status,
//! and marking expired tasks overdue from a periodic batch scan. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

//! Step definitions for overdue scanning BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;

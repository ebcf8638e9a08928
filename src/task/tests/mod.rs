//! Unit tests for the task lifecycle domain, services, and scanner.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

mod aggregate_tests;
mod support;

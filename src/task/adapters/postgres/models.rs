//! Diesel row models for task document persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task documents.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Serialized task aggregate.
    pub document: Value,
    /// Aggregate status projection.
    pub overall_status: String,
    /// Due date projection.
    pub due_at: Option<DateTime<Utc>>,
    /// Soft-delete projection.
    pub is_active: bool,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task documents.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Serialized task aggregate.
    pub document: Value,
    /// Aggregate status projection.
    pub overall_status: String,
    /// Due date projection.
    pub due_at: Option<DateTime<Utc>>,
    /// Soft-delete projection.
    pub is_active: bool,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

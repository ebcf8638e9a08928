//! Diesel schema for task document persistence.

diesel::table! {
    /// Task documents with scalar projections for scan queries.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Complete task aggregate serialized as a JSON document.
        document -> Jsonb,
        /// Aggregate status projection.
        #[max_length = 50]
        overall_status -> Varchar,
        /// Due date projection.
        due_at -> Nullable<Timestamptz>,
        /// Soft-delete projection.
        is_active -> Bool,
        /// Optimistic-concurrency version.
        version -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

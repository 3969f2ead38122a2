//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with soft-deletion support.
    tasks (id) {
        /// Storage-assigned task identifier.
        id -> Int8,
        /// Task title.
        #[max_length = 100]
        title -> Varchar,
        /// Task description.
        #[max_length = 500]
        description -> Varchar,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Due date.
        due_date -> Timestamptz,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-deletion timestamp; null for live rows.
        deleted_at -> Nullable<Timestamptz>,
    }
}

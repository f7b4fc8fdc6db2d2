//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Uuid,
        /// Task title.
        title -> Text,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Priority rank constrained to `1..=10`.
        priority -> SmallInt,
        /// Optional due instant.
        due_date -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

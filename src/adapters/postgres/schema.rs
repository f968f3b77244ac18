//! Diesel schema for task management persistence.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Unique email address.
        #[max_length = 255]
        email -> Varchar,
        /// Unique username.
        #[max_length = 50]
        username -> Varchar,
        /// Display name.
        #[max_length = 100]
        full_name -> Varchar,
        /// Hashed login credential.
        #[max_length = 255]
        password_hash -> Varchar,
        /// Whether the account may log in.
        is_active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Task lists, each owned by one user.
    task_lists (id) {
        /// List identifier.
        id -> Uuid,
        /// List title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Owning user. Rows are removed with the owner.
        owner_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Tasks grouped into lists.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Urgency level.
        #[max_length = 20]
        priority -> Varchar,
        /// Parent list. Rows are removed with the list.
        task_list_id -> Uuid,
        /// Optional assignee. Cleared when the user is removed.
        assigned_to -> Nullable<Uuid>,
        /// Optional deadline.
        due_date -> Nullable<Timestamptz>,
        /// Completion timestamp, set while the task is completed.
        completed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(task_lists -> users (owner_id));
diesel::joinable!(tasks -> task_lists (task_list_id));

diesel::allow_tables_to_appear_in_same_query!(users, task_lists, tasks);

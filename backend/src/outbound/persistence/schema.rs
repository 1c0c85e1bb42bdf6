//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Int4,
        /// Unique login key, compared case-sensitively.
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        surname -> Varchar,
        name -> Varchar,
        age -> Int4,
    }
}

diesel::table! {
    /// Published recipes. Multi-line fields are stored joined with `\n`.
    recipes (id) {
        id -> Int4,
        /// Unique across all recipes.
        title -> Varchar,
        ingredients -> Text,
        steps -> Text,
        /// Stored photo path, if any.
        photo -> Nullable<Text>,
        about -> Nullable<Text>,
        /// Owning user.
        user_id -> Int4,
    }
}

diesel::joinable!(recipes -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(recipes, users);

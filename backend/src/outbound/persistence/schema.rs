//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly.

diesel::table! {
    /// Registered accounts.
    users (user_id) {
        /// Caller-chosen login id.
        user_id -> Varchar,
        /// Display name; empty when none was given at signup.
        user_name -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Varchar,
    }
}

diesel::table! {
    /// Pantry inventory, one row per item.
    pantry_items (id) {
        id -> Varchar,
        /// Owning user; foreign key to `users.user_id`.
        user_id -> Varchar,
        item_name -> Varchar,
        quantity -> Float8,
        unit -> Varchar,
        category -> Varchar,
        expiry_date -> Nullable<Date>,
        added_date -> Nullable<Date>,
        notes -> Nullable<Text>,
    }
}

diesel::joinable!(pantry_items -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, pantry_items);

//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! The `diesel print-schema` command can regenerate them from a live database.

diesel::table! {
    /// User records. `email` carries a unique constraint.
    users (id) {
        /// Primary key assigned by the `SERIAL` sequence.
        id -> Int4,
        /// User name.
        name -> Text,
        /// Unique email address.
        email -> Text,
    }
}

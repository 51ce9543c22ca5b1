//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **crypto**: Argon2id password hashing
//! - **model**: the JSON lookup shelf-life model
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod crypto;
pub mod model;
pub mod persistence;

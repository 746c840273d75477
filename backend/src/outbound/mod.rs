//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **openlibrary**: reqwest client for the OpenLibrary books API
//! - **jwt**: bearer token verification with a shared HS256 secret
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod jwt;
pub mod openlibrary;
pub mod persistence;

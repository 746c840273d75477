//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` and a `bb8` pool.
//!
//! - Repositories only translate between row structs and domain types.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Database failures are mapped onto each port's error enum.
//!
//! # Example
//!
//! ```ignore
//! use book_reviews::outbound::persistence::{DbPool, DieselBookRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/reviews")).await?;
//! let books = DieselBookRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_book_repository;
mod diesel_review_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_book_repository::DieselBookRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};

//! # News Infrastructure
//!
//! Concrete implementations of the ports defined in `news-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL document storage via SeaORM
//! - `minimal` - No external dependencies, in-memory store only

pub mod database;
pub mod memory;

pub use memory::{InMemoryArticleRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{PostgresArticleRepository, PostgresUserRepository};

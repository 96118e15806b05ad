//! In-memory document store - used when no database is configured, and in tests.
//!
//! Data is lost on process restart.

mod articles;
mod users;

pub use articles::InMemoryArticleRepository;
pub use users::InMemoryUserRepository;

#[cfg(test)]
mod tests;

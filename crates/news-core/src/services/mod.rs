//! Application services - orchestrate ports to carry out the use cases.

mod articles;
mod users;

pub use articles::{ArticleService, DEFAULT_WRITE_RETRIES};
pub use users::{SeedOutcome, UserService};

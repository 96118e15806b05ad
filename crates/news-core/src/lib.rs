//! # News Core
//!
//! The domain layer of the news portal.
//! Users, articles and their embedded comments, the rules for mutating a
//! comment sequence, and the repository ports the infrastructure implements.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};

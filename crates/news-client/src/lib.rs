//! # News Client
//!
//! Typed access to the News Portal API and the client-local session that
//! records which user the client is acting as.

pub mod client;
pub mod error;
pub mod forms;
pub mod session;

pub use client::{NewsClient, NewsPage};
pub use error::{ClientError, SessionError};
pub use session::{SESSION_KEY, Session, SessionStore};

//! SeaORM entities.

pub mod article;
pub mod user;

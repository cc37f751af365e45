//! # kportal-core
//!
//! Core types, traits, and abstractions for the K-portal API.
//!
//! This crate provides the domain models for members and news, the shared
//! error type, and the repository traits that the database and HTTP crates
//! depend on.

pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;

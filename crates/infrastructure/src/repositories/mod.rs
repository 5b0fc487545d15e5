//! Repository implementations for data persistence.
//!
//! This module provides PostgreSQL-backed implementations of the repository
//! ports declared in the application layer.

mod directory_repository;
mod evaluation_repository;
mod settings_repository;

pub use directory_repository::*;
pub use evaluation_repository::*;
pub use settings_repository::*;

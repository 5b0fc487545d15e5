//! Testing utilities for the peer grading workspace
//!
//! This crate provides:
//! - Test fixtures for teams, students, instructors and presentations
//! - Builder patterns for evaluations and submission requests
//! - In-memory implementations of every application port
//! - Test database setup for repository integration tests
//! - Property-based testing strategies for scores and weights
//!
//! # Examples
//!
//! ```
//! use peer_grading_testing::{builders::*, fixtures::*};
//!
//! let scenario = GradingScenario::new();
//! let evaluation = EvaluationBuilder::new(scenario.presentation.id)
//!     .by_peer(scenario.outsiders[0].id)
//!     .with_uniform_score(80.0)
//!     .build();
//! assert!(evaluation.evaluator.is_peer());
//! ```

pub mod builders;
pub mod database;
pub mod fixtures;
pub mod mocks;
pub mod strategies;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;

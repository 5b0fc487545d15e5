//! Peer Grading Domain Types
//!
//! This crate provides the core domain model for grading team presentations.
//! Instructors and peer students score a presentation on six weighted criteria,
//! and the resulting sub-scores are blended into a single final grade.
//!
//! ## Architecture
//!
//! The domain layer is organized into the following modules:
//!
//! - **identifiers**: Strongly-typed UUID-based identifiers for all entities
//! - **criteria**: The six scoring criteria and the active weighting configuration
//! - **evaluation**: Evaluators, raw criterion scores and submitted evaluations
//! - **directory**: Teams, students, instructors and presentations
//! - **grading**: Final grade and eligibility result types
//! - **errors**: Error taxonomy with error codes and HTTP status codes
//!
//! ## Usage
//!
//! ```rust
//! use peer_grading_domain::{
//!     criteria::{CriteriaConfig, Criterion},
//!     identifiers::StudentId,
//!     evaluation::Evaluator,
//! };
//!
//! let config = CriteriaConfig::default_active();
//! assert_eq!(config.weight(Criterion::Visuals), 35.0);
//! assert!(config.validate().is_ok());
//!
//! let evaluator = Evaluator::Peer(StudentId::new());
//! assert!(evaluator.is_peer());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod criteria;
pub mod directory;
pub mod errors;
pub mod evaluation;
pub mod grading;
pub mod identifiers;

// Re-export commonly used types
pub use identifiers::*;
pub use errors::{DirectoryError, EvaluationError, SettingsError, ValidationError};

pub use criteria::{CriteriaConfig, Criterion, CriterionSetting, WEIGHT_SUM_TOLERANCE};
pub use directory::{Instructor, Presentation, Student, Team};
pub use evaluation::{CriterionScores, Evaluation, Evaluator, EvaluatorRole};
pub use grading::{EligibilityDecision, EligibilityReason, FinalGradeInfo};

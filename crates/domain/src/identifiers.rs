//! Strongly-typed identifier types for the grading domain.
//!
//! Every entity gets its own id type so a student id can never be passed where
//! an instructor id is expected. All IDs use UUID v7 for time-ordering.
//!
//! Ids are `Ord` so candidate pools can be kept in a `BTreeSet<StudentId>` and
//! evaluations created in the same instant can be ordered by `(created_at, id)`.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new ID with a time-ordered UUID v7
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Create an ID from an existing UUID
            #[inline]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get a reference to the underlying UUID
            #[inline]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Convert to the underlying UUID
            #[inline]
            pub fn into_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

// Define all ID types
define_id!(
    PresentationId,
    "Unique identifier for presentations (UUID v7 for time-ordering)"
);

define_id!(TeamId, "Unique identifier for teams");

define_id!(StudentId, "Unique identifier for students (peer evaluators)");

define_id!(InstructorId, "Unique identifier for instructors");

define_id!(
    EvaluationId,
    "Unique identifier for submitted evaluations"
);

define_id!(SettingsId, "Unique identifier for grading settings rows");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = PresentationId::new();
        assert_ne!(id.to_string(), "");
    }

    #[test]
    fn test_id_equality() {
        let uuid = Uuid::now_v7();
        let id1 = PresentationId::from_uuid(uuid);
        let id2 = PresentationId::from_uuid(uuid);
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_id_from_string() {
        let id1 = PresentationId::new();
        let s = id1.to_string();
        let id2: PresentationId = s.parse().unwrap();
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_id_serialization() {
        let id = StudentId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: StudentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_ids_order_by_uuid() {
        let first = EvaluationId::from_uuid(Uuid::from_u128(1));
        let second = EvaluationId::from_uuid(Uuid::from_u128(2));
        assert!(first < second);

        let pool: std::collections::BTreeSet<StudentId> = [3u128, 1, 2]
            .into_iter()
            .map(|n| StudentId::from_uuid(Uuid::from_u128(n)))
            .collect();
        let ordered: Vec<u128> = pool.iter().map(|id| id.as_uuid().as_u128()).collect();
        assert_eq!(ordered, vec![1, 2, 3]);
    }

    #[test]
    fn test_different_id_types() {
        let uuid = Uuid::now_v7();
        let student_id = StudentId::from_uuid(uuid);
        let instructor_id = InstructorId::from_uuid(uuid);

        // Comparing the ids directly does not compile; only the raw UUIDs match.
        assert_eq!(student_id.as_uuid(), instructor_id.as_uuid());
    }
}

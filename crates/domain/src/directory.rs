//! Teams, students, instructors and the presentations they give.
//!
//! These records are owned by the surrounding record store; this workspace only
//! reads them to resolve identities and team membership.

use crate::identifiers::{InstructorId, PresentationId, StudentId, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A presenting team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A student who may present with a team and evaluate other teams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    /// Institution-assigned number, unique across students
    pub student_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_member_of(&self, team_id: TeamId) -> bool {
        self.team_id == Some(team_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: InstructorId,
    pub first_name: String,
    pub last_name: String,
    /// Academic title, e.g. "Dr."
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Instructor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Name prefixed with the title when one is set
    pub fn display_name(&self) -> String {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => format!("{} {}", title, self.full_name()),
            _ => self.full_name(),
        }
    }
}

/// A scheduled presentation owned by one team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    pub id: PresentationId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub team_id: TeamId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_full_name_and_membership() {
        let team = TeamId::new();
        let student = Student {
            id: StudentId::new(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            student_number: "2024001".to_string(),
            team_id: Some(team),
        };

        assert_eq!(student.full_name(), "Ada Lovelace");
        assert!(student.is_member_of(team));
        assert!(!student.is_member_of(TeamId::new()));
    }

    #[test]
    fn test_instructor_display_name() {
        let mut instructor = Instructor {
            id: InstructorId::new(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            title: Some("Dr.".to_string()),
        };
        assert_eq!(instructor.display_name(), "Dr. Grace Hopper");

        instructor.title = None;
        assert_eq!(instructor.display_name(), "Grace Hopper");
    }
}

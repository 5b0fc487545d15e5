//! Test fixtures for generating domain entities with realistic data.
//!
//! This module provides functions to create test instances of the directory
//! records with randomized names, plus a ready-made grading scenario.

use crate::builders::{PresentationBuilder, StudentBuilder};
use crate::mocks::InMemoryDirectory;
use chrono::{Duration, Utc};
use fake::{
    faker::{
        company::en::CompanyName,
        lorem::en::{Paragraph, Sentence},
        name::en::{FirstName, LastName},
    },
    Fake,
};
use peer_grading_domain::{
    criteria::Criterion,
    directory::{Instructor, Presentation, Student, Team},
    evaluation::CriterionScores,
    identifiers::*,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_STUDENT_NUMBER: AtomicU64 = AtomicU64::new(1);

/// A student number not yet handed out in this process
pub fn next_student_number() -> String {
    format!("S{:07}", NEXT_STUDENT_NUMBER.fetch_add(1, Ordering::Relaxed))
}

/// Create a test team with a random name
pub fn create_test_team() -> Team {
    Team {
        id: TeamId::new(),
        name: CompanyName().fake(),
        description: Some(Sentence(4..8).fake()),
    }
}

/// Create a test student, optionally on a team
pub fn create_test_student(team_id: Option<TeamId>) -> Student {
    let builder = StudentBuilder::new().with_name(
        FirstName().fake::<String>(),
        LastName().fake::<String>(),
    );
    match team_id {
        Some(team_id) => builder.on_team(team_id).build(),
        None => builder.build(),
    }
}

/// Create a test instructor
pub fn create_test_instructor() -> Instructor {
    Instructor {
        id: InstructorId::new(),
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        title: Some("Dr.".to_string()),
    }
}

/// Create a test presentation for a team, scheduled a week ago
pub fn create_test_presentation(team_id: TeamId) -> Presentation {
    PresentationBuilder::new(team_id)
        .with_title(Sentence(2..5).fake::<String>())
        .with_description(Paragraph(1..2).fake::<String>())
        .scheduled_at(Utc::now() - Duration::days(7))
        .build()
}

/// Random whole-number scores within 0..=100
pub fn create_random_scores() -> CriterionScores {
    let mut scores = CriterionScores::uniform(0.0);
    for criterion in Criterion::all() {
        scores.set(*criterion, (0..101u32).fake::<u32>() as f64);
    }
    scores
}

/// A presenting team, students of another team and an instructor, all
/// registered in an in-memory directory
pub struct GradingScenario {
    pub team: Team,
    pub presentation: Presentation,
    /// Students on the presenting team
    pub members: Vec<Student>,
    /// Students on other teams
    pub outsiders: Vec<Student>,
    /// A student on no team
    pub unassigned: Student,
    pub instructor: Instructor,
    pub directory: Arc<InMemoryDirectory>,
}

impl GradingScenario {
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryDirectory::new());

        let team = create_test_team();
        let other_team = create_test_team();
        let presentation = create_test_presentation(team.id);

        let members: Vec<Student> = (0..3).map(|_| create_test_student(Some(team.id))).collect();
        let outsiders: Vec<Student> = (0..3)
            .map(|_| create_test_student(Some(other_team.id)))
            .collect();
        let unassigned = create_test_student(None);
        let instructor = create_test_instructor();

        directory.add_team(team.clone());
        directory.add_team(other_team);
        directory.add_presentation(presentation.clone());
        for student in members.iter().chain(outsiders.iter()) {
            directory.add_student(student.clone());
        }
        directory.add_student(unassigned.clone());
        directory.add_instructor(instructor.clone());

        Self {
            team,
            presentation,
            members,
            outsiders,
            unassigned,
            instructor,
            directory,
        }
    }
}

impl Default for GradingScenario {
    fn default() -> Self {
        Self::new()
    }
}

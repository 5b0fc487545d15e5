//! Directory repository implementation.
//!
//! Read-only access to teams, students, instructors and presentations.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use peer_grading_application::{ApplicationError, DirectoryPort};
use peer_grading_domain::{
    directory::{Instructor, Presentation, Student, Team},
    identifiers::{InstructorId, PresentationId, StudentId, TeamId},
};

use crate::{query_all, query_optional};

/// PostgreSQL implementation of DirectoryPort.
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    /// Create a new PostgreSQL directory.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type PortResult<T> = std::result::Result<T, ApplicationError>;

#[async_trait]
impl DirectoryPort for PgDirectory {
    #[instrument(skip(self))]
    async fn get_presentation(&self, id: PresentationId) -> PortResult<Option<Presentation>> {
        let row = query_optional!(
            &self.pool,
            "SELECT id, title, description, scheduled_at, team_id FROM presentations WHERE id = $1",
            id.as_uuid(),
        )?;
        Ok(row.map(row_to_presentation))
    }

    #[instrument(skip(self))]
    async fn list_presentations(&self) -> PortResult<Vec<Presentation>> {
        let rows = query_all!(
            &self.pool,
            r#"
            SELECT id, title, description, scheduled_at, team_id
            FROM presentations
            ORDER BY scheduled_at DESC
            "#,
        )?;
        Ok(rows.into_iter().map(row_to_presentation).collect())
    }

    #[instrument(skip(self))]
    async fn get_student(&self, id: StudentId) -> PortResult<Option<Student>> {
        let row = query_optional!(
            &self.pool,
            r#"
            SELECT id, first_name, last_name, student_number, team_id
            FROM students
            WHERE id = $1
            "#,
            id.as_uuid(),
        )?;
        Ok(row.map(row_to_student))
    }

    #[instrument(skip(self))]
    async fn list_students(&self) -> PortResult<Vec<Student>> {
        let rows = query_all!(
            &self.pool,
            r#"
            SELECT id, first_name, last_name, student_number, team_id
            FROM students
            ORDER BY last_name, first_name
            "#,
        )?;
        Ok(rows.into_iter().map(row_to_student).collect())
    }

    #[instrument(skip(self))]
    async fn get_instructor(&self, id: InstructorId) -> PortResult<Option<Instructor>> {
        let row = query_optional!(
            &self.pool,
            "SELECT id, first_name, last_name, title FROM instructors WHERE id = $1",
            id.as_uuid(),
        )?;
        Ok(row.map(row_to_instructor))
    }

    #[instrument(skip(self))]
    async fn list_instructors(&self) -> PortResult<Vec<Instructor>> {
        let rows = query_all!(
            &self.pool,
            "SELECT id, first_name, last_name, title FROM instructors ORDER BY last_name, first_name",
        )?;
        Ok(rows.into_iter().map(row_to_instructor).collect())
    }

    #[instrument(skip(self))]
    async fn get_team(&self, id: TeamId) -> PortResult<Option<Team>> {
        let row = query_optional!(
            &self.pool,
            "SELECT id, name, description FROM teams WHERE id = $1",
            id.as_uuid(),
        )?;
        Ok(row.map(|row| Team {
            id: TeamId::from(row.get::<Uuid, _>("id")),
            name: row.get("name"),
            description: row.get("description"),
        }))
    }
}

fn row_to_presentation(row: PgRow) -> Presentation {
    Presentation {
        id: PresentationId::from(row.get::<Uuid, _>("id")),
        title: row.get("title"),
        description: row.get("description"),
        scheduled_at: row.get("scheduled_at"),
        team_id: TeamId::from(row.get::<Uuid, _>("team_id")),
    }
}

fn row_to_student(row: PgRow) -> Student {
    Student {
        id: StudentId::from(row.get::<Uuid, _>("id")),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        student_number: row.get("student_number"),
        team_id: row.get::<Option<Uuid>, _>("team_id").map(TeamId::from),
    }
}

fn row_to_instructor(row: PgRow) -> Instructor {
    Instructor {
        id: InstructorId::from(row.get::<Uuid, _>("id")),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        title: row.get("title"),
    }
}

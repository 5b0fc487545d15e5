//! Test database setup.
//!
//! Provides PostgreSQL connections for repository integration tests. Tests
//! using it are `#[ignore]`d and read the connection string from
//! `DATABASE_URL`.

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;

/// Tables owned by the grading schema, children first
const TABLES: &[&str] = &[
    "evaluations",
    "presentations",
    "students",
    "instructors",
    "teams",
    "grading_settings",
];

/// Test database wrapper with table cleanup
pub struct TestDatabase {
    pool: Arc<PgPool>,
}

impl TestDatabase {
    /// Connect to an existing database
    pub async fn new_with_url(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Connect using `DATABASE_URL`
    pub async fn from_env() -> anyhow::Result<Self> {
        let url = std::env::var("DATABASE_URL")?;
        Self::new_with_url(&url).await
    }

    /// Get a reference to the database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get an Arc clone of the pool for sharing
    pub fn pool_arc(&self) -> Arc<PgPool> {
        Arc::clone(&self.pool)
    }

    /// Empty every grading table for test isolation.
    ///
    /// Missing tables are skipped so this can run before the schema exists.
    pub async fn clean(&self) -> anyhow::Result<()> {
        for table in TABLES {
            sqlx::query(&format!("TRUNCATE TABLE {} CASCADE", table))
                .execute(self.pool())
                .await
                .ok();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires PostgreSQL to be running
    async fn test_database_clean() {
        let db = TestDatabase::from_env().await.unwrap();
        db.clean().await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM evaluations")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}

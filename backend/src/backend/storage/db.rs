use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;

use shared::SignatureData;

use crate::backend::domain::models::submission::Submission;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:submissions.db";

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS submissions (
                id TEXT PRIMARY KEY,
                child_full_name TEXT NOT NULL,
                child_date_of_birth TEXT NOT NULL,
                parent_full_name TEXT NOT NULL,
                parent_phone_number TEXT NOT NULL,
                emergency_contact_info TEXT NOT NULL,
                allergies_medical_conditions TEXT NOT NULL DEFAULT '',
                permission_to_participate INTEGER NOT NULL DEFAULT 0,
                emergency_medical_auth INTEGER NOT NULL DEFAULT 0,
                photo_video_release INTEGER NOT NULL DEFAULT 0,
                signature TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Index for ordering by creation time (newest first)
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_submissions_created_at
            ON submissions(created_at DESC);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Store a submission in the database
    pub async fn store_submission(&self, submission: &Submission) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO submissions (
                id, child_full_name, child_date_of_birth, parent_full_name,
                parent_phone_number, emergency_contact_info,
                allergies_medical_conditions, permission_to_participate,
                emergency_medical_auth, photo_video_release, signature, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&submission.id)
        .bind(&submission.child_full_name)
        .bind(&submission.child_date_of_birth)
        .bind(&submission.parent_full_name)
        .bind(&submission.parent_phone_number)
        .bind(&submission.emergency_contact_info)
        .bind(&submission.allergies_medical_conditions)
        .bind(submission.permission_to_participate)
        .bind(submission.emergency_medical_auth)
        .bind(submission.photo_video_release)
        .bind(submission.signature.as_str())
        .bind(&submission.created_at)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    /// Retrieve a submission by its id
    pub async fn get_submission(&self, id: &str) -> Result<Option<Submission>> {
        let row = sqlx::query("SELECT * FROM submissions WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;

        Ok(row.map(|r| Self::row_to_submission(&r)))
    }

    /// List all submissions, newest first
    pub async fn list_submissions(&self) -> Result<Vec<Submission>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM submissions
            ORDER BY created_at DESC, ROWID DESC
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_submission).collect())
    }

    /// Delete a submission by its id. Returns false when no row matched.
    pub async fn delete_submission(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = ?")
            .bind(id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all submissions
    pub async fn count_submissions(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM submissions")
            .fetch_one(&*self.pool)
            .await?;
        Ok(count as u64)
    }

    /// Count submissions with permission to participate granted
    pub async fn count_with_permission(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM submissions WHERE permission_to_participate = 1",
        )
        .fetch_one(&*self.pool)
        .await?;
        Ok(count as u64)
    }

    /// Count submissions with photo/video release granted
    pub async fn count_with_photo_release(&self) -> Result<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM submissions WHERE photo_video_release = 1")
                .fetch_one(&*self.pool)
                .await?;
        Ok(count as u64)
    }

    fn row_to_submission(row: &sqlx::sqlite::SqliteRow) -> Submission {
        Submission {
            id: row.get("id"),
            child_full_name: row.get("child_full_name"),
            child_date_of_birth: row.get("child_date_of_birth"),
            parent_full_name: row.get("parent_full_name"),
            parent_phone_number: row.get("parent_phone_number"),
            emergency_contact_info: row.get("emergency_contact_info"),
            allergies_medical_conditions: row.get("allergies_medical_conditions"),
            permission_to_participate: row.get("permission_to_participate"),
            emergency_medical_auth: row.get("emergency_medical_auth"),
            photo_video_release: row.get("photo_video_release"),
            signature: SignatureData::new(row.get::<String, _>("signature")),
            created_at: row.get("created_at"),
        }
    }
}

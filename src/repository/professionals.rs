//! Professionals repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::professional::{CreateProfessional, Professional},
};

#[derive(Clone)]
pub struct ProfessionalsRepository {
    pool: Pool<Postgres>,
}

impl ProfessionalsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all professionals ordered by name
    pub async fn list(&self) -> AppResult<Vec<Professional>> {
        let professionals = sqlx::query_as::<_, Professional>(
            "SELECT * FROM professionals ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(professionals)
    }

    /// Get professional by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Professional> {
        sqlx::query_as::<_, Professional>("SELECT * FROM professionals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Professional with id {} not found", id)))
    }

    /// Get professional by username (case-insensitive)
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<Professional>> {
        let professional = sqlx::query_as::<_, Professional>(
            "SELECT * FROM professionals WHERE LOWER(username) = LOWER($1)",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(professional)
    }

    /// Create a new professional with an already hashed password
    pub async fn create(
        &self,
        professional: &CreateProfessional,
        password_hash: &str,
    ) -> AppResult<Professional> {
        let created = sqlx::query_as::<_, Professional>(
            r#"
            INSERT INTO professionals (username, first_name, last_name, phone_number, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&professional.username)
        .bind(&professional.first_name)
        .bind(&professional.last_name)
        .bind(&professional.phone_number)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Bind a chat to a professional
    pub async fn update_chat_id(&self, id: Uuid, chat_id: i64) -> AppResult<Professional> {
        sqlx::query_as::<_, Professional>(
            r#"
            UPDATE professionals SET chat_id = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Professional with id {} not found", id)))
    }
}

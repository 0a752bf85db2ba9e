//! Clients repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::client::{Client, RegisterClient},
};

#[derive(Clone)]
pub struct ClientsRepository {
    pool: Pool<Postgres>,
}

impl ClientsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get client by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Client> {
        sqlx::query_as::<_, Client>(
            r#"
            SELECT id, first_name, last_name, phone_number, chat_id, created_at, updated_at
            FROM clients WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client with id {} not found", id)))
    }

    /// Check if a chat is already bound to a client
    pub async fn chat_id_exists(&self, chat_id: i64) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clients WHERE chat_id = $1)")
                .bind(chat_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create a new client
    pub async fn create(&self, client: &RegisterClient) -> AppResult<Client> {
        let created = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (first_name, last_name, phone_number, chat_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, phone_number, chat_id, created_at, updated_at
            "#,
        )
        .bind(&client.first_name)
        .bind(&client.last_name)
        .bind(&client.phone_number)
        .bind(client.chat_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}

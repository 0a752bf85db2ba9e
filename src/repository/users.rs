//! Chat user lookup across clients and professionals

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::ChatUser,
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Find the client or professional bound to a chat.
    ///
    /// A chat bound to both resolves to the client.
    pub async fn get_by_chat_id(&self, chat_id: i64) -> AppResult<ChatUser> {
        sqlx::query_as::<_, ChatUser>(
            r#"
            SELECT * FROM (
                SELECT id, chat_id, first_name, last_name, phone_number,
                       'client'::text AS role, created_at, updated_at, 0 AS rank
                FROM clients WHERE chat_id = $1
                UNION ALL
                SELECT id, chat_id, first_name, last_name, phone_number,
                       'professional'::text AS role, created_at, updated_at, 1 AS rank
                FROM professionals WHERE chat_id = $1
            ) u
            ORDER BY rank
            LIMIT 1
            "#,
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user bound to chat {}", chat_id)))
    }
}

//! Client registration service

use crate::{
    error::{AppError, AppResult},
    models::client::{Client, RegisterClient},
    repository::Repository,
};

#[derive(Clone)]
pub struct ClientsService {
    repository: Repository,
}

impl ClientsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a client bound to a chat
    pub async fn register(&self, request: RegisterClient) -> AppResult<Client> {
        if self.repository.clients.chat_id_exists(request.chat_id).await? {
            return Err(AppError::Conflict(format!(
                "A client is already registered for chat {}",
                request.chat_id
            )));
        }

        let client = self.repository.clients.create(&request).await?;
        tracing::info!(client_id = %client.id, "Client registered");
        Ok(client)
    }
}

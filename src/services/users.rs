//! Chat user lookup

use crate::{error::AppResult, models::user::ChatUser, repository::Repository};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_by_chat_id(&self, chat_id: i64) -> AppResult<ChatUser> {
        self.repository.users.get_by_chat_id(chat_id).await
    }
}

//! Chat user lookup endpoint

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::user::ChatUser, AppState};

use super::AuthenticatedService;

/// Find the client or professional bound to a chat
#[utoipa::path(
    get,
    path = "/users/{chat_id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("chat_id" = i64, Path, description = "Chat ID")
    ),
    responses(
        (status = 200, description = "User bound to the chat", body = ChatUser),
        (status = 404, description = "No user bound to the chat")
    )
)]
pub async fn get_by_chat_id(
    State(state): State<AppState>,
    AuthenticatedService(_claims): AuthenticatedService,
    Path(chat_id): Path<i64>,
) -> AppResult<Json<ChatUser>> {
    let user = state.services.users.get_by_chat_id(chat_id).await?;
    Ok(Json(user))
}

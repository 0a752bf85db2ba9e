//! Administration endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::professional::{CreateProfessional, Professional},
    AppState,
};

use super::AuthenticatedService;

/// Create a professional account
#[utoipa::path(
    post,
    path = "/admin/professionals",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = CreateProfessional,
    responses(
        (status = 201, description = "Professional created", body = Professional),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn create_professional(
    State(state): State<AppState>,
    AuthenticatedService(_claims): AuthenticatedService,
    Json(request): Json<CreateProfessional>,
) -> AppResult<(StatusCode, Json<Professional>)> {
    request.validate()?;

    let professional = state.services.professionals.create(request).await?;
    Ok((StatusCode::CREATED, Json(professional)))
}

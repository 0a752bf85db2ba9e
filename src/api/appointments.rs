//! Booking creation endpoint

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::appointment::{AppointmentResponse, CreateAppointment},
    AppState,
};

use super::AuthenticatedService;

/// Book an appointment for a client
#[utoipa::path(
    post,
    path = "/appointments",
    tag = "appointments",
    security(("bearer_auth" = [])),
    request_body = CreateAppointment,
    responses(
        (status = 201, description = "Appointment created as pending", body = AppointmentResponse),
        (status = 400, description = "Invalid time range or start in the past"),
        (status = 404, description = "Client or professional not found"),
        (status = 409, description = "Interval overlaps an existing appointment")
    )
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    AuthenticatedService(_claims): AuthenticatedService,
    Json(request): Json<CreateAppointment>,
) -> AppResult<(StatusCode, Json<AppointmentResponse>)> {
    request.validate()?;

    let appointment = state.services.appointments.create_appointment(request).await?;
    Ok((StatusCode::CREATED, Json(appointment.into())))
}

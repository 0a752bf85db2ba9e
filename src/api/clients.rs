//! Client endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        appointment::{Actor, AppointmentDetails, AppointmentResponse, CancelAppointment},
        client::{Client, ClientAppointmentQuery, RegisterClient},
    },
    AppState,
};

use super::{parse_status, AuthenticatedService};

/// Register a client bound to a chat
#[utoipa::path(
    post,
    path = "/clients/register",
    tag = "clients",
    security(("bearer_auth" = [])),
    request_body = RegisterClient,
    responses(
        (status = 201, description = "Client registered", body = Client),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Chat already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    AuthenticatedService(_claims): AuthenticatedService,
    Json(request): Json<RegisterClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    request.validate()?;

    let client = state.services.clients.register(request).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// List a client's appointments
#[utoipa::path(
    get,
    path = "/clients/{id}/appointments",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Client ID"),
        ClientAppointmentQuery
    ),
    responses(
        (status = 200, description = "Client's appointments", body = Vec<AppointmentDetails>),
        (status = 400, description = "Invalid status filter"),
        (status = 404, description = "Client not found")
    )
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    AuthenticatedService(_claims): AuthenticatedService,
    Path(client_id): Path<Uuid>,
    Query(query): Query<ClientAppointmentQuery>,
) -> AppResult<Json<Vec<AppointmentDetails>>> {
    let status = parse_status(query.status.as_deref())?;

    let appointments = state
        .services
        .calendar
        .client_appointments(client_id, status)
        .await?;
    Ok(Json(appointments))
}

/// Cancel one of the client's appointments
#[utoipa::path(
    patch,
    path = "/clients/{id}/appointments/{appointment_id}/cancel",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Client ID"),
        ("appointment_id" = Uuid, Path, description = "Appointment ID")
    ),
    request_body = CancelAppointment,
    responses(
        (status = 200, description = "Appointment cancelled", body = AppointmentResponse),
        (status = 403, description = "Appointment belongs to another client"),
        (status = 404, description = "Appointment not found"),
        (status = 422, description = "Appointment is not pending or confirmed")
    )
)]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    AuthenticatedService(_claims): AuthenticatedService,
    Path((client_id, appointment_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<CancelAppointment>,
) -> AppResult<Json<AppointmentResponse>> {
    request.validate()?;

    let appointment = state
        .services
        .appointments
        .cancel(
            Actor::client(client_id),
            appointment_id,
            request.cancellation_reason,
        )
        .await?;
    Ok(Json(appointment.into()))
}

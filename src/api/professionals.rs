//! Professional endpoints: accounts, calendar management and availability

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
        appointment::{
            Actor, AppointmentDetails, AppointmentQuery, AppointmentResponse, CancelAppointment,
            CreateUnavailableBlock,
        },
        professional::{Professional, SignIn},
        slot::{AppointmentDatesResponse, AvailabilityResponse, DateQuery, MonthQuery},
    },
    AppState,
};

use super::{parse_date, parse_month, parse_status, AuthenticatedService};

/// List all professionals
#[utoipa::path(
    get,
    path = "/professionals",
    tag = "professionals",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All professionals", body = Vec<Professional>)
    )
)]
pub async fn list_professionals(
    State(state): State<AppState>,
    AuthenticatedService(_claims): AuthenticatedService,
) -> AppResult<Json<Vec<Professional>>> {
    let professionals = state.services.professionals.list().await?;
    Ok(Json(professionals))
}

/// Sign a professional in and bind their chat
#[utoipa::path(
    post,
    path = "/professionals/sign_in",
    tag = "professionals",
    security(("bearer_auth" = [])),
    request_body = SignIn,
    responses(
        (status = 200, description = "Signed in", body = Professional),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    AuthenticatedService(_claims): AuthenticatedService,
    Json(request): Json<SignIn>,
) -> AppResult<Json<Professional>> {
    request.validate()?;

    let professional = state.services.professionals.sign_in(request).await?;
    Ok(Json(professional))
}

/// List a professional's appointments
#[utoipa::path(
    get,
    path = "/professionals/{id}/appointments",
    tag = "professionals",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Professional ID"),
        AppointmentQuery
    ),
    responses(
        (status = 200, description = "Professional's appointments", body = Vec<AppointmentDetails>),
        (status = 400, description = "Invalid filter"),
        (status = 404, description = "Professional not found")
    )
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    AuthenticatedService(_claims): AuthenticatedService,
    Path(professional_id): Path<Uuid>,
    Query(query): Query<AppointmentQuery>,
) -> AppResult<Json<Vec<AppointmentDetails>>> {
    let status = parse_status(query.status.as_deref())?;
    let date = query.date.as_deref().map(parse_date).transpose()?;

    let appointments = state
        .services
        .calendar
        .professional_appointments(professional_id, status, date)
        .await?;
    Ok(Json(appointments))
}

/// Confirm a pending appointment
#[utoipa::path(
    patch,
    path = "/professionals/{id}/appointments/{appointment_id}/confirm",
    tag = "professionals",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Professional ID"),
        ("appointment_id" = Uuid, Path, description = "Appointment ID")
    ),
    responses(
        (status = 200, description = "Appointment confirmed", body = AppointmentResponse),
        (status = 403, description = "Appointment belongs to another professional"),
        (status = 404, description = "Appointment not found"),
        (status = 409, description = "Appointment changed concurrently"),
        (status = 422, description = "Appointment is not pending")
    )
)]
pub async fn confirm_appointment(
    State(state): State<AppState>,
    AuthenticatedService(_claims): AuthenticatedService,
    Path((professional_id, appointment_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<AppointmentResponse>> {
    let appointment = state
        .services
        .appointments
        .confirm(professional_id, appointment_id)
        .await?;
    Ok(Json(appointment.into()))
}

/// Cancel one of the professional's appointments
#[utoipa::path(
    patch,
    path = "/professionals/{id}/appointments/{appointment_id}/cancel",
    tag = "professionals",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Professional ID"),
        ("appointment_id" = Uuid, Path, description = "Appointment ID")
    ),
    request_body = CancelAppointment,
    responses(
        (status = 200, description = "Appointment cancelled", body = AppointmentResponse),
        (status = 403, description = "Appointment belongs to another professional"),
        (status = 404, description = "Appointment not found"),
        (status = 422, description = "Appointment is not pending or confirmed")
    )
)]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    AuthenticatedService(_claims): AuthenticatedService,
    Path((professional_id, appointment_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<CancelAppointment>,
) -> AppResult<Json<AppointmentResponse>> {
    request.validate()?;

    let appointment = state
        .services
        .appointments
        .cancel(
            Actor::professional(professional_id),
            appointment_id,
            request.cancellation_reason,
        )
        .await?;
    Ok(Json(appointment.into()))
}

/// Block a period on the professional's calendar
#[utoipa::path(
    post,
    path = "/professionals/{id}/unavailable_appointments",
    tag = "professionals",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Professional ID")
    ),
    request_body = CreateUnavailableBlock,
    responses(
        (status = 201, description = "Unavailability block created", body = AppointmentResponse),
        (status = 400, description = "Invalid time range or start in the past"),
        (status = 404, description = "Professional not found"),
        (status = 409, description = "Interval overlaps an existing appointment")
    )
)]
pub async fn create_unavailable_block(
    State(state): State<AppState>,
    AuthenticatedService(_claims): AuthenticatedService,
    Path(professional_id): Path<Uuid>,
    Json(request): Json<CreateUnavailableBlock>,
) -> AppResult<(StatusCode, Json<AppointmentResponse>)> {
    request.validate()?;

    let block = state
        .services
        .appointments
        .create_unavailable_block(professional_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(block.into())))
}

/// Bookable one-hour slots for a day
#[utoipa::path(
    get,
    path = "/professionals/{id}/availability",
    tag = "professionals",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Professional ID"),
        DateQuery
    ),
    responses(
        (status = 200, description = "Slots of the day", body = AvailabilityResponse),
        (status = 400, description = "Invalid date")
    )
)]
pub async fn availability(
    State(state): State<AppState>,
    AuthenticatedService(_claims): AuthenticatedService,
    Path(professional_id): Path<Uuid>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let date = parse_date(&query.date)?;

    let slots = state
        .services
        .appointments
        .availability(professional_id, date)
        .await?;
    Ok(Json(AvailabilityResponse { date, slots }))
}

/// Everything on the professional's calendar for a day
#[utoipa::path(
    get,
    path = "/professionals/{id}/timetable",
    tag = "professionals",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Professional ID"),
        DateQuery
    ),
    responses(
        (status = 200, description = "Appointments and blocks of the day", body = Vec<AppointmentDetails>),
        (status = 400, description = "Invalid date"),
        (status = 404, description = "Professional not found")
    )
)]
pub async fn timetable(
    State(state): State<AppState>,
    AuthenticatedService(_claims): AuthenticatedService,
    Path(professional_id): Path<Uuid>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<Vec<AppointmentDetails>>> {
    let date = parse_date(&query.date)?;

    let entries = state.services.calendar.timetable(professional_id, date).await?;
    Ok(Json(entries))
}

/// Days of a month carrying appointments
#[utoipa::path(
    get,
    path = "/professionals/{id}/appointment_dates",
    tag = "professionals",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Professional ID"),
        MonthQuery
    ),
    responses(
        (status = 200, description = "Dates with appointments", body = AppointmentDatesResponse),
        (status = 400, description = "Invalid month"),
        (status = 404, description = "Professional not found")
    )
)]
pub async fn appointment_dates(
    State(state): State<AppState>,
    AuthenticatedService(_claims): AuthenticatedService,
    Path(professional_id): Path<Uuid>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<AppointmentDatesResponse>> {
    let month = parse_month(&query.month)?;

    let dates = state
        .services
        .calendar
        .appointment_dates(professional_id, month)
        .await?;
    Ok(Json(AppointmentDatesResponse {
        month: query.month,
        dates,
    }))
}

//! API handlers for booking REST endpoints

pub mod admin;
pub mod appointments;
pub mod clients;
pub mod health;
pub mod openapi;
pub mod professionals;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, patch, post},
    Router,
};
use chrono::NaiveDate;

use crate::{
    error::AppError,
    models::{appointment::AppointmentStatus, user::ServiceClaims},
    AppState,
};

/// Extractor for the calling service, authenticated by a bearer JWT
pub struct AuthenticatedService(pub ServiceClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedService {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = ServiceClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedService(claims))
    }
}

/// Parse a `YYYY-MM-DD` calendar day
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", value)))
}

/// Parse a `YYYY-MM` month into its first day
pub(crate) fn parse_month(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid month '{}', expected YYYY-MM", value)))
}

/// Parse an optional status filter
pub(crate) fn parse_status(value: Option<&str>) -> Result<Option<AppointmentStatus>, AppError> {
    value
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<AppointmentStatus>().map_err(AppError::BadRequest))
        .transpose()
}

/// Routes served under `/api/v1`
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Clients
        .route("/clients/register", post(clients::register))
        .route("/clients/:id/appointments", get(clients::list_appointments))
        .route(
            "/clients/:id/appointments/:appointment_id/cancel",
            patch(clients::cancel_appointment),
        )
        // Appointments
        .route("/appointments", post(appointments::create_appointment))
        // Professionals
        .route("/professionals", get(professionals::list_professionals))
        .route("/professionals/sign_in", post(professionals::sign_in))
        .route(
            "/professionals/:id/appointments",
            get(professionals::list_appointments),
        )
        .route(
            "/professionals/:id/appointments/:appointment_id/confirm",
            patch(professionals::confirm_appointment),
        )
        .route(
            "/professionals/:id/appointments/:appointment_id/cancel",
            patch(professionals::cancel_appointment),
        )
        .route(
            "/professionals/:id/unavailable_appointments",
            post(professionals::create_unavailable_block),
        )
        .route("/professionals/:id/availability", get(professionals::availability))
        .route("/professionals/:id/timetable", get(professionals::timetable))
        .route(
            "/professionals/:id/appointment_dates",
            get(professionals::appointment_dates),
        )
        // Administration
        .route("/admin/professionals", post(admin::create_professional))
        // Users
        .route("/users/:chat_id", get(users::get_by_chat_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-06-01").unwrap(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert!(matches!(parse_date("01.06.2024"), Err(AppError::BadRequest(_))));
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-02").unwrap(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("2024").is_err());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status(None).unwrap(), None);
        assert_eq!(parse_status(Some("")).unwrap(), None);
        assert_eq!(
            parse_status(Some("confirmed")).unwrap(),
            Some(AppointmentStatus::Confirmed)
        );
        assert!(matches!(parse_status(Some("done")), Err(AppError::BadRequest(_))));
    }
}

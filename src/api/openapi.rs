//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, appointments, clients, health, professionals, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Booking API",
        version = "1.0.0",
        description = "Appointment scheduling REST API for clients and professionals"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Clients
        clients::register,
        clients::list_appointments,
        clients::cancel_appointment,
        // Appointments
        appointments::create_appointment,
        // Professionals
        professionals::list_professionals,
        professionals::sign_in,
        professionals::list_appointments,
        professionals::confirm_appointment,
        professionals::cancel_appointment,
        professionals::create_unavailable_block,
        professionals::availability,
        professionals::timetable,
        professionals::appointment_dates,
        // Administration
        admin::create_professional,
        // Users
        users::get_by_chat_id,
    ),
    components(
        schemas(
            // Appointments
            crate::models::appointment::AppointmentType,
            crate::models::appointment::AppointmentStatus,
            crate::models::appointment::ActorRole,
            crate::models::appointment::AppointmentResponse,
            crate::models::appointment::AppointmentDetails,
            crate::models::appointment::PartySummary,
            crate::models::appointment::CreateAppointment,
            crate::models::appointment::CreateUnavailableBlock,
            crate::models::appointment::CancelAppointment,
            // Slots
            crate::models::slot::TimeSlot,
            crate::models::slot::AvailabilityResponse,
            crate::models::slot::AppointmentDatesResponse,
            // Clients
            crate::models::client::Client,
            crate::models::client::RegisterClient,
            // Professionals
            crate::models::professional::Professional,
            crate::models::professional::CreateProfessional,
            crate::models::professional::SignIn,
            // Users
            crate::models::user::ChatUser,
            crate::models::user::UserRole,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "clients", description = "Client registration and bookings"),
        (name = "appointments", description = "Appointment booking"),
        (name = "professionals", description = "Professional calendars and availability"),
        (name = "admin", description = "Administration"),
        (name = "users", description = "Chat user lookup")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/clients/register",
            "/appointments",
            "/professionals/{id}/availability",
            "/professionals/{id}/appointments/{appointment_id}/confirm",
            "/users/{chat_id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}

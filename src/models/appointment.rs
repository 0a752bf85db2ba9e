//! Appointment model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Stored discriminator of an appointment row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "appointment_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AppointmentType {
    /// Client booking
    Appointment,
    /// Professional-declared unavailability
    Unavailable,
}

impl AppointmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::Appointment => "appointment",
            AppointmentType::Unavailable => "unavailable",
        }
    }
}

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "appointment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }

    /// Whether a booking in this status occupies its interval
    pub fn is_blocking(&self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "completed" => Ok(AppointmentStatus::Completed),
            _ => Err(
                "Invalid status. Must be one of: pending, confirmed, cancelled, completed"
                    .to_string(),
            ),
        }
    }
}

/// What an appointment interval is: a client booking or a blocked period
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentKind {
    Booking {
        client_id: Uuid,
        status: AppointmentStatus,
    },
    Blocked,
}

impl AppointmentKind {
    pub fn appointment_type(&self) -> AppointmentType {
        match self {
            AppointmentKind::Booking { .. } => AppointmentType::Appointment,
            AppointmentKind::Blocked => AppointmentType::Unavailable,
        }
    }
}

/// Role of the party acting on an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Client,
    Professional,
}

/// Party acting on an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: ActorRole,
}

impl Actor {
    pub fn client(id: Uuid) -> Self {
        Self { id, role: ActorRole::Client }
    }

    pub fn professional(id: Uuid) -> Self {
        Self { id, role: ActorRole::Professional }
    }
}

/// Appointment interval owned by a professional
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub kind: AppointmentKind,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_by: Option<Actor>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn status(&self) -> Option<AppointmentStatus> {
        match self.kind {
            AppointmentKind::Booking { status, .. } => Some(status),
            AppointmentKind::Blocked => None,
        }
    }

    pub fn client_id(&self) -> Option<Uuid> {
        match self.kind {
            AppointmentKind::Booking { client_id, .. } => Some(client_id),
            AppointmentKind::Blocked => None,
        }
    }

    /// Whether this interval makes overlapping slots unavailable
    pub fn is_blocking(&self) -> bool {
        match self.kind {
            AppointmentKind::Booking { status, .. } => status.is_blocking(),
            AppointmentKind::Blocked => true,
        }
    }

    /// Half-open interval overlap: touching endpoints do not overlap
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end_time && self.start_time < end
    }
}

/// Raw `appointments` row
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentRow {
    pub id: Uuid,
    #[sqlx(rename = "type")]
    pub appointment_type: AppointmentType,
    pub professional_id: Uuid,
    pub client_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_by_client_id: Option<Uuid>,
    pub cancelled_by_professional_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = AppError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        let kind = match (row.appointment_type, row.client_id, row.status) {
            (AppointmentType::Appointment, Some(client_id), Some(status)) => {
                AppointmentKind::Booking { client_id, status }
            }
            (AppointmentType::Unavailable, _, _) => AppointmentKind::Blocked,
            (AppointmentType::Appointment, _, _) => {
                return Err(AppError::Internal(format!(
                    "Appointment {} has no client or status",
                    row.id
                )))
            }
        };

        let cancelled_by = match (row.cancelled_by_client_id, row.cancelled_by_professional_id) {
            (Some(id), _) => Some(Actor::client(id)),
            (None, Some(id)) => Some(Actor::professional(id)),
            (None, None) => None,
        };

        Ok(Appointment {
            id: row.id,
            professional_id: row.professional_id,
            kind,
            start_time: row.start_time,
            end_time: row.end_time,
            description: row.description,
            cancellation_reason: row.cancellation_reason,
            cancelled_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// First and last name of the client holding a booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientName {
    pub first_name: String,
    pub last_name: String,
}

/// Appointment as seen on a professional's calendar for one day
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub appointment: Appointment,
    pub client: Option<ClientName>,
}

/// Appointment row joined with the client's name
#[derive(Debug, Clone, FromRow)]
pub struct CalendarEntryRow {
    #[sqlx(flatten)]
    pub appointment: AppointmentRow,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
}

impl TryFrom<CalendarEntryRow> for CalendarEntry {
    type Error = AppError;

    fn try_from(row: CalendarEntryRow) -> Result<Self, Self::Error> {
        let client = match (row.client_first_name, row.client_last_name) {
            (Some(first_name), Some(last_name)) => Some(ClientName { first_name, last_name }),
            _ => None,
        };
        Ok(CalendarEntry {
            appointment: row.appointment.try_into()?,
            client,
        })
    }
}

/// Insert parameters for a new interval
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub professional_id: Uuid,
    pub kind: AppointmentKind,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: Option<String>,
}

/// Approved status change, applied only if the row still has `from`
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub appointment_id: Uuid,
    pub from: AppointmentStatus,
    pub to: AppointmentStatus,
    pub actor: Actor,
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// API payloads
// ---------------------------------------------------------------------------

/// Appointment as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppointmentResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub professional_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    /// Role of the party who cancelled, if cancelled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_by: Option<ActorRole>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Appointment> for AppointmentResponse {
    fn from(a: Appointment) -> Self {
        AppointmentResponse {
            id: a.id,
            appointment_type: a.kind.appointment_type(),
            professional_id: a.professional_id,
            client_id: a.client_id(),
            status: a.status(),
            start_time: a.start_time,
            end_time: a.end_time,
            description: a.description,
            cancellation_reason: a.cancellation_reason,
            cancelled_by: a.cancelled_by.map(|actor| actor.role),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// Counterpart shown next to an appointment in listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PartySummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
}

/// Appointment listing entry with client and/or professional details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppointmentDetails {
    pub appointment: AppointmentResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<PartySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional: Option<PartySummary>,
}

/// Appointment row joined with both parties
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentDetailsRow {
    #[sqlx(flatten)]
    pub appointment: AppointmentRow,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
    pub client_phone_number: Option<String>,
    pub client_chat_id: Option<i64>,
    pub professional_username: String,
    pub professional_first_name: String,
    pub professional_last_name: String,
    pub professional_phone_number: Option<String>,
    pub professional_chat_id: Option<i64>,
}

impl TryFrom<AppointmentDetailsRow> for AppointmentDetails {
    type Error = AppError;

    fn try_from(row: AppointmentDetailsRow) -> Result<Self, Self::Error> {
        let client = match (row.appointment.client_id, row.client_first_name, row.client_last_name) {
            (Some(id), Some(first_name), Some(last_name)) => Some(PartySummary {
                id,
                first_name,
                last_name,
                username: None,
                phone_number: row.client_phone_number,
                chat_id: row.client_chat_id,
            }),
            _ => None,
        };
        let professional = PartySummary {
            id: row.appointment.professional_id,
            first_name: row.professional_first_name,
            last_name: row.professional_last_name,
            username: Some(row.professional_username),
            phone_number: row.professional_phone_number,
            chat_id: row.professional_chat_id,
        };
        let appointment = Appointment::try_from(row.appointment)?;

        Ok(AppointmentDetails {
            appointment: appointment.into(),
            client,
            professional: Some(professional),
        })
    }
}

/// Create booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAppointment {
    pub client_id: Uuid,
    pub professional_id: Uuid,
    /// Start instant (RFC 3339, any offset)
    pub start_time: DateTime<Utc>,
    /// End instant (RFC 3339, any offset)
    pub end_time: DateTime<Utc>,
    #[validate(length(max = 1000, message = "Description is too long"))]
    pub description: Option<String>,
}

/// Create unavailability block request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUnavailableBlock {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[validate(length(max = 1000, message = "Description is too long"))]
    pub description: Option<String>,
}

/// Cancel appointment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CancelAppointment {
    #[validate(length(min = 1, max = 1000, message = "Cancellation reason must be 1-1000 characters"))]
    pub cancellation_reason: String,
}

/// Query parameters for appointment listings
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AppointmentQuery {
    /// Filter by status (pending, confirmed, cancelled, completed)
    pub status: Option<String>,
    /// Filter by calendar day in the application zone (YYYY-MM-DD)
    pub date: Option<String>,
}

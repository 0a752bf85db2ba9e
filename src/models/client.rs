//! Client model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Client from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Client {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub chat_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Self-registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterClient {
    #[validate(length(min = 1, max = 255, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "Last name is required"))]
    pub last_name: String,
    #[validate(range(min = 1, message = "Chat ID must be positive"))]
    pub chat_id: i64,
    #[validate(length(min = 3, max = 32, message = "Invalid phone number format"))]
    pub phone_number: Option<String>,
}

/// Query parameters for a client's appointments
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ClientAppointmentQuery {
    /// Filter by status (pending, confirmed, cancelled, completed)
    pub status: Option<String>,
}

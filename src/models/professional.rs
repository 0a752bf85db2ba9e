//! Professional model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Professional from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Professional {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub chat_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create professional request (admin)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProfessional {
    #[validate(length(min = 3, max = 255, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 255, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 3, max = 32, message = "Invalid phone number format"))]
    pub phone_number: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Sign-in request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignIn {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Chat to bind to the professional after a successful sign-in
    #[validate(range(min = 1, message = "Chat ID must be positive"))]
    pub chat_id: Option<i64>,
}

//! Availability slot projection

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::appointment::AppointmentType;

/// One-hour candidate booking window, recomputed on every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TimeSlot {
    /// Slot start in the application zone (RFC 3339)
    #[schema(value_type = String, format = DateTime)]
    pub start_time: DateTime<Tz>,
    /// Slot end, exactly one hour after start
    #[schema(value_type = String, format = DateTime)]
    pub end_time: DateTime<Tz>,
    pub available: bool,
    /// Kind of the interval occupying the slot
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub slot_type: Option<AppointmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Availability for one professional and day
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

/// Query parameters carrying a calendar day
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DateQuery {
    /// Calendar day (YYYY-MM-DD)
    pub date: String,
}

/// Query parameters carrying a month
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct MonthQuery {
    /// Month (YYYY-MM)
    pub month: String,
}

/// Dates of a month that carry appointments
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AppointmentDatesResponse {
    pub month: String,
    pub dates: Vec<NaiveDate>,
}

//! Read-only appointment listings: per client, per professional, per day
//! and per month

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    clock::AppTime,
    error::AppResult,
    models::appointment::{AppointmentDetails, AppointmentStatus},
    repository::Repository,
};

#[derive(Clone)]
pub struct CalendarService {
    repository: Repository,
    time: AppTime,
}

impl CalendarService {
    pub fn new(repository: Repository, time: AppTime) -> Self {
        Self { repository, time }
    }

    /// Appointments of a professional, optionally filtered by status and day
    pub async fn professional_appointments(
        &self,
        professional_id: Uuid,
        status: Option<AppointmentStatus>,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<AppointmentDetails>> {
        // Verify professional exists
        self.repository.professionals.get_by_id(professional_id).await?;
        self.repository
            .appointments
            .list_for_professional(professional_id, status, date)
            .await
    }

    /// Bookings of a client, optionally filtered by status
    pub async fn client_appointments(
        &self,
        client_id: Uuid,
        status: Option<AppointmentStatus>,
    ) -> AppResult<Vec<AppointmentDetails>> {
        // Verify client exists
        self.repository.clients.get_by_id(client_id).await?;
        self.repository.appointments.list_for_client(client_id, status).await
    }

    /// Everything on a professional's calendar for one day
    pub async fn timetable(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<AppointmentDetails>> {
        self.repository.professionals.get_by_id(professional_id).await?;
        self.repository.appointments.timetable(professional_id, date).await
    }

    /// Days of the month containing `month` that carry appointments
    pub async fn appointment_dates(
        &self,
        professional_id: Uuid,
        month: NaiveDate,
    ) -> AppResult<Vec<NaiveDate>> {
        self.repository.professionals.get_by_id(professional_id).await?;
        let (start, end) = self.time.month_bounds(month);
        self.repository
            .appointments
            .appointment_dates(
                professional_id,
                start.with_timezone(&Utc),
                end.with_timezone(&Utc),
            )
            .await
    }
}

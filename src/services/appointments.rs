//! Appointment command handlers
//!
//! Each command validates against the lifecycle rules first and only then
//! touches the store, so a rejected request performs no write.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    clock::AppTime,
    error::AppResult,
    models::{
        appointment::{
            Actor, Appointment, AppointmentKind, AppointmentStatus, CreateAppointment,
            CreateUnavailableBlock, NewAppointment, StatusChange,
        },
        slot::TimeSlot,
    },
    repository::AppointmentStore,
    services::{
        availability::{self, AvailabilityConfig},
        lifecycle::{self, Transition},
    },
};

#[derive(Clone)]
pub struct AppointmentsService {
    store: Arc<dyn AppointmentStore>,
    time: AppTime,
    availability: AvailabilityConfig,
}

impl AppointmentsService {
    pub fn new(store: Arc<dyn AppointmentStore>, time: AppTime, availability: AvailabilityConfig) -> Self {
        Self { store, time, availability }
    }

    /// Book a pending appointment for a client
    pub async fn create_appointment(&self, request: CreateAppointment) -> AppResult<Appointment> {
        lifecycle::validate_new_interval(request.start_time, request.end_time, self.time.now().with_timezone(&Utc))?;

        let appointment = self
            .store
            .insert(NewAppointment {
                professional_id: request.professional_id,
                kind: AppointmentKind::Booking {
                    client_id: request.client_id,
                    status: AppointmentStatus::Pending,
                },
                start_time: request.start_time,
                end_time: request.end_time,
                description: request.description,
            })
            .await?;

        tracing::info!(
            appointment_id = %appointment.id,
            professional_id = %appointment.professional_id,
            start = %self.time.to_app_zone(&appointment.start_time),
            "Appointment booked"
        );
        Ok(appointment)
    }

    /// Block a period on a professional's calendar
    pub async fn create_unavailable_block(
        &self,
        professional_id: Uuid,
        request: CreateUnavailableBlock,
    ) -> AppResult<Appointment> {
        lifecycle::validate_new_interval(request.start_time, request.end_time, self.time.now().with_timezone(&Utc))?;

        let block = self
            .store
            .insert(NewAppointment {
                professional_id,
                kind: AppointmentKind::Blocked,
                start_time: request.start_time,
                end_time: request.end_time,
                description: request.description,
            })
            .await?;

        tracing::info!(
            appointment_id = %block.id,
            %professional_id,
            start = %self.time.to_app_zone(&block.start_time),
            end = %self.time.to_app_zone(&block.end_time),
            "Unavailability block created"
        );
        Ok(block)
    }

    /// Professional confirms one of their pending bookings
    pub async fn confirm(&self, professional_id: Uuid, appointment_id: Uuid) -> AppResult<Appointment> {
        let actor = Actor::professional(professional_id);
        self.apply(actor, appointment_id, Transition::Confirm, None).await
    }

    /// Client or professional cancels a pending or confirmed booking
    pub async fn cancel(&self, actor: Actor, appointment_id: Uuid, reason: String) -> AppResult<Appointment> {
        self.apply(actor, appointment_id, Transition::Cancel, Some(reason)).await
    }

    async fn apply(
        &self,
        actor: Actor,
        appointment_id: Uuid,
        transition: Transition,
        reason: Option<String>,
    ) -> AppResult<Appointment> {
        let current = self.store.fetch_by_id(appointment_id).await?;
        let (from, to) = lifecycle::authorize_transition(&actor, &current, transition)?;

        let updated = self
            .store
            .update_status(StatusChange {
                appointment_id,
                from,
                to,
                actor,
                reason,
            })
            .await?;

        tracing::info!(%appointment_id, %from, %to, "Appointment status changed");
        Ok(updated)
    }

    /// Bookable slots of a professional for one day
    pub async fn availability(&self, professional_id: Uuid, date: NaiveDate) -> AppResult<Vec<TimeSlot>> {
        let existing = self.store.fetch_for_professional_on_date(professional_id, date).await?;
        let now = self.time.now().with_timezone(&Utc);
        Ok(availability::generate_slots(date, &existing, &self.availability, now))
    }
}

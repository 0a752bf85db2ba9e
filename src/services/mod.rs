//! Business logic services

pub mod appointments;
pub mod availability;
pub mod calendar;
pub mod clients;
pub mod lifecycle;
pub mod professionals;
pub mod users;

use std::sync::Arc;

use crate::{clock::AppTime, repository::Repository};

use availability::AvailabilityConfig;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub appointments: appointments::AppointmentsService,
    pub calendar: calendar::CalendarService,
    pub clients: clients::ClientsService,
    pub professionals: professionals::ProfessionalsService,
    pub users: users::UsersService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, time: AppTime, availability: AvailabilityConfig) -> Self {
        let store = Arc::new(repository.appointments.clone());
        Self {
            appointments: appointments::AppointmentsService::new(store, time.clone(), availability),
            calendar: calendar::CalendarService::new(repository.clone(), time),
            clients: clients::ClientsService::new(repository.clone()),
            professionals: professionals::ProfessionalsService::new(repository.clone()),
            users: users::UsersService::new(repository.clone()),
            repository,
        }
    }
}

//! Data models for the booking server

pub mod appointment;
pub mod client;
pub mod professional;
pub mod slot;
pub mod user;

// Re-export commonly used types
pub use appointment::{
    Actor, ActorRole, Appointment, AppointmentKind, AppointmentStatus, AppointmentType,
    CalendarEntry, ClientName,
};
pub use client::Client;
pub use professional::Professional;
pub use slot::TimeSlot;
pub use user::{ChatUser, ServiceClaims, UserRole};

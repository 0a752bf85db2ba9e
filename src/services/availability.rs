//! Availability slot generation
//!
//! Slots are one-hour windows starting on the hour (wall clock, application
//! zone) inside the working window `[start_hour, end_hour)`. They are
//! recomputed from the day's blocking appointments on every request.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use config::ConfigError;

use crate::{
    clock::AppTime,
    config::SchedulingConfig,
    models::{
        appointment::{AppointmentKind, CalendarEntry},
        slot::TimeSlot,
    },
};

/// Working window and zone the generator runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    pub zone: Tz,
}

impl TryFrom<&SchedulingConfig> for AvailabilityConfig {
    type Error = ConfigError;

    fn try_from(config: &SchedulingConfig) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(Self {
            start_hour: config.working_hours_start,
            end_hour: config.working_hours_end,
            zone: config.zone()?,
        })
    }
}

/// First hour that can still be offered on `date`
fn effective_start_hour(date: NaiveDate, config: &AvailabilityConfig, local_now: DateTime<Tz>) -> u32 {
    if date != local_now.date_naive() {
        return config.start_hour;
    }
    let mut current = local_now.hour();
    if local_now.minute() > 0 || local_now.second() > 0 || local_now.nanosecond() > 0 {
        current += 1;
    }
    config.start_hour.max(current)
}

/// Description shown on a slot occupied by `entry`.
///
/// Nothing is shown when the appointment has no description.
fn describe(entry: &CalendarEntry) -> Option<String> {
    let description = entry.appointment.description.as_ref()?;
    match (&entry.appointment.kind, &entry.client) {
        (AppointmentKind::Booking { .. }, Some(client)) => Some(format!(
            "{} {} - {}",
            client.first_name, client.last_name, description
        )),
        _ => Some(description.clone()),
    }
}

/// Compute the slots of `date` given the day's appointments.
///
/// Non-blocking entries (cancelled or completed bookings) are ignored.
/// Hours whose wall-clock start does not exist on that day are skipped.
/// Pure: identical inputs give identical output.
pub fn generate_slots(
    date: NaiveDate,
    existing: &[CalendarEntry],
    config: &AvailabilityConfig,
    now: DateTime<Utc>,
) -> Vec<TimeSlot> {
    let time = AppTime::fixed(config.zone, now);
    let local_now = time.now();
    let first_hour = effective_start_hour(date, config, local_now);

    let mut slots = Vec::with_capacity(config.end_hour.saturating_sub(first_hour) as usize);

    for hour in first_hour..config.end_hour {
        let Some(start) = time.at_hour(date, hour) else {
            continue;
        };
        let end = start + Duration::hours(1);
        if start < local_now {
            continue;
        }

        let (start_utc, end_utc) = (start.with_timezone(&Utc), end.with_timezone(&Utc));
        let occupant = existing
            .iter()
            .filter(|entry| entry.appointment.is_blocking())
            .find(|entry| entry.appointment.overlaps(start_utc, end_utc));

        slots.push(match occupant {
            Some(entry) => TimeSlot {
                start_time: start,
                end_time: end,
                available: false,
                slot_type: Some(entry.appointment.kind.appointment_type()),
                description: describe(entry),
            },
            None => TimeSlot {
                start_time: start,
                end_time: end,
                available: true,
                slot_type: None,
                description: None,
            },
        });
    }

    slots
}

//! Appointment lifecycle rules
//!
//! Pure functions: every decision about whether an actor may move an
//! appointment to another status, and whether a new interval is acceptable,
//! is taken here before anything is written.

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult, TransitionError},
    models::appointment::{Actor, ActorRole, Appointment, AppointmentKind, AppointmentStatus},
};

/// Status change requested on an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Confirm,
    Cancel,
}

impl Transition {
    fn rejection(self) -> TransitionError {
        match self {
            Transition::Confirm => TransitionError::NotPending,
            Transition::Cancel => TransitionError::NotPendingOrConfirmed,
        }
    }
}

/// Allowed `(current, transition) -> next` moves. Anything absent is rejected.
const TRANSITIONS: &[(AppointmentStatus, Transition, AppointmentStatus)] = &[
    (AppointmentStatus::Pending, Transition::Confirm, AppointmentStatus::Confirmed),
    (AppointmentStatus::Pending, Transition::Cancel, AppointmentStatus::Cancelled),
    (AppointmentStatus::Confirmed, Transition::Cancel, AppointmentStatus::Cancelled),
];

/// Status reached by applying `transition` to `current`
pub fn next_status(
    current: AppointmentStatus,
    transition: Transition,
) -> Result<AppointmentStatus, TransitionError> {
    TRANSITIONS
        .iter()
        .find(|(from, t, _)| *from == current && *t == transition)
        .map(|(_, _, to)| *to)
        .ok_or(transition.rejection())
}

/// Whether `actor` may act on `appointment` at all
fn is_owner(actor: &Actor, appointment: &Appointment) -> bool {
    match actor.role {
        ActorRole::Professional => appointment.professional_id == actor.id,
        ActorRole::Client => appointment.client_id() == Some(actor.id),
    }
}

/// Decide a status change for `actor`.
///
/// Ownership is checked before the current status, so a stranger never
/// learns anything about someone else's appointment. Confirmation is
/// reserved to the owning professional. Blocks carry no status and accept
/// no transition.
///
/// Returns `(from, to)` on success.
pub fn authorize_transition(
    actor: &Actor,
    appointment: &Appointment,
    transition: Transition,
) -> AppResult<(AppointmentStatus, AppointmentStatus)> {
    if !is_owner(actor, appointment) {
        return Err(AppError::Forbidden(
            "Appointment does not belong to this user".to_string(),
        ));
    }
    if transition == Transition::Confirm && actor.role != ActorRole::Professional {
        return Err(AppError::Forbidden(
            "Only the professional can confirm an appointment".to_string(),
        ));
    }

    let current = match appointment.kind {
        AppointmentKind::Booking { status, .. } => status,
        AppointmentKind::Blocked => return Err(transition.rejection().into()),
    };

    let next = next_status(current, transition)?;
    Ok((current, next))
}

/// Validate the interval of a new booking or block.
///
/// The range check comes first: an inverted interval in the past reports
/// `InvalidTimeRange`.
pub fn validate_new_interval(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> AppResult<()> {
    if end <= start {
        return Err(AppError::InvalidTimeRange);
    }
    if start <= now {
        return Err(AppError::PastTime);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn booking(professional_id: Uuid, client_id: Uuid, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            professional_id,
            kind: AppointmentKind::Booking { client_id, status },
            start_time: utc("2030-01-10T10:00:00Z"),
            end_time: utc("2030-01-10T11:00:00Z"),
            description: None,
            cancellation_reason: None,
            cancelled_by: None,
            created_at: utc("2030-01-01T00:00:00Z"),
            updated_at: utc("2030-01-01T00:00:00Z"),
        }
    }

    #[test]
    fn test_transition_table() {
        use AppointmentStatus::*;
        assert_eq!(next_status(Pending, Transition::Confirm), Ok(Confirmed));
        assert_eq!(next_status(Pending, Transition::Cancel), Ok(Cancelled));
        assert_eq!(next_status(Confirmed, Transition::Cancel), Ok(Cancelled));
        assert_eq!(
            next_status(Confirmed, Transition::Confirm),
            Err(TransitionError::NotPending)
        );
        for terminal in [Cancelled, Completed] {
            assert_eq!(
                next_status(terminal, Transition::Confirm),
                Err(TransitionError::NotPending)
            );
            assert_eq!(
                next_status(terminal, Transition::Cancel),
                Err(TransitionError::NotPendingOrConfirmed)
            );
        }
    }

    #[test]
    fn test_professional_confirms_own_pending() {
        let pro = Uuid::new_v4();
        let appt = booking(pro, Uuid::new_v4(), AppointmentStatus::Pending);
        let result = authorize_transition(&Actor::professional(pro), &appt, Transition::Confirm);
        assert_eq!(
            result.unwrap(),
            (AppointmentStatus::Pending, AppointmentStatus::Confirmed)
        );
    }

    #[test]
    fn test_ownership_checked_before_status() {
        let appt = booking(Uuid::new_v4(), Uuid::new_v4(), AppointmentStatus::Cancelled);
        let stranger = Actor::professional(Uuid::new_v4());
        let err = authorize_transition(&stranger, &appt, Transition::Confirm).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_client_cannot_confirm() {
        let client = Uuid::new_v4();
        let appt = booking(Uuid::new_v4(), client, AppointmentStatus::Pending);
        let err =
            authorize_transition(&Actor::client(client), &appt, Transition::Confirm).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_client_cancels_own_confirmed() {
        let client = Uuid::new_v4();
        let appt = booking(Uuid::new_v4(), client, AppointmentStatus::Confirmed);
        let (from, to) =
            authorize_transition(&Actor::client(client), &appt, Transition::Cancel).unwrap();
        assert_eq!(from, AppointmentStatus::Confirmed);
        assert_eq!(to, AppointmentStatus::Cancelled);
    }

    #[test]
    fn test_other_client_cannot_cancel() {
        let appt = booking(Uuid::new_v4(), Uuid::new_v4(), AppointmentStatus::Pending);
        let err = authorize_transition(&Actor::client(Uuid::new_v4()), &appt, Transition::Cancel)
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_cancel_cancelled_is_rejected() {
        let pro = Uuid::new_v4();
        let appt = booking(pro, Uuid::new_v4(), AppointmentStatus::Cancelled);
        let err =
            authorize_transition(&Actor::professional(pro), &appt, Transition::Cancel).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidStateTransition(TransitionError::NotPendingOrConfirmed)
        ));
    }

    #[test]
    fn test_block_accepts_no_transition() {
        let pro = Uuid::new_v4();
        let mut block = booking(pro, Uuid::new_v4(), AppointmentStatus::Pending);
        block.kind = AppointmentKind::Blocked;

        let err =
            authorize_transition(&Actor::professional(pro), &block, Transition::Cancel).unwrap_err();
        assert!(matches!(err, AppError::InvalidStateTransition(_)));

        // No client owns a block
        let err = authorize_transition(&Actor::client(Uuid::new_v4()), &block, Transition::Cancel)
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_validate_new_interval() {
        let now = utc("2030-01-10T09:00:00Z");
        let start = utc("2030-01-10T10:00:00Z");
        let end = utc("2030-01-10T11:00:00Z");

        assert!(validate_new_interval(start, end, now).is_ok());
        assert!(matches!(
            validate_new_interval(end, start, now),
            Err(AppError::InvalidTimeRange)
        ));
        assert!(matches!(
            validate_new_interval(start, start, now),
            Err(AppError::InvalidTimeRange)
        ));
        assert!(matches!(
            validate_new_interval(now, end, now),
            Err(AppError::PastTime)
        ));
    }

    #[test]
    fn test_inverted_past_interval_reports_range_first() {
        let now = utc("2030-01-10T09:00:00Z");
        let err = validate_new_interval(utc("2030-01-09T10:00:00Z"), utc("2030-01-09T09:00:00Z"), now)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTimeRange));
    }
}

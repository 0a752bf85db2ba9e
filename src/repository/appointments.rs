//! Appointments repository: the appointment store contract and its
//! PostgreSQL implementation

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    clock,
    error::{AppError, AppResult},
    models::appointment::{
        ActorRole, Appointment, AppointmentDetails, AppointmentDetailsRow, AppointmentKind,
        AppointmentRow, AppointmentStatus, CalendarEntry, CalendarEntryRow, NewAppointment,
        StatusChange,
    },
};

/// Persistence contract the scheduling core relies on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Blocking bookings and blocks of a professional intersecting `date`
    /// (calendar day in the application zone), with client names
    async fn fetch_for_professional_on_date(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<CalendarEntry>>;

    /// Fails with `NotFound` if absent
    async fn fetch_by_id(&self, id: Uuid) -> AppResult<Appointment>;

    /// Atomic insert; fails with `Conflict` if the interval overlaps a
    /// blocking interval of the same professional
    async fn insert(&self, appointment: NewAppointment) -> AppResult<Appointment>;

    /// Atomic status update of an already approved transition
    async fn update_status(&self, change: StatusChange) -> AppResult<Appointment>;
}

const DETAILS_SELECT: &str = r#"
    SELECT a.*,
           c.first_name AS client_first_name,
           c.last_name AS client_last_name,
           c.phone_number AS client_phone_number,
           c.chat_id AS client_chat_id,
           p.username AS professional_username,
           p.first_name AS professional_first_name,
           p.last_name AS professional_last_name,
           p.phone_number AS professional_phone_number,
           p.chat_id AS professional_chat_id
    FROM appointments a
    JOIN professionals p ON p.id = a.professional_id
    LEFT JOIN clients c ON c.id = a.client_id
"#;

#[derive(Clone)]
pub struct AppointmentsRepository {
    pool: Pool<Postgres>,
    zone: Tz,
}

impl AppointmentsRepository {
    pub fn new(pool: Pool<Postgres>, zone: Tz) -> Self {
        Self { pool, zone }
    }

    fn day_bounds(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let (start, end) = clock::day_bounds(date, self.zone);
        (start.with_timezone(&Utc), end.with_timezone(&Utc))
    }

    /// Appointments of a professional, optionally filtered by status and day
    pub async fn list_for_professional(
        &self,
        professional_id: Uuid,
        status: Option<AppointmentStatus>,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<AppointmentDetails>> {
        let mut conditions = vec!["a.professional_id = $1".to_string()];
        let mut idx = 2;

        if status.is_some() {
            conditions.push(format!("a.status = ${}", idx));
            idx += 1;
        }
        if date.is_some() {
            conditions.push(format!("a.start_time < ${} AND a.end_time > ${}", idx + 1, idx));
        }

        let query = format!(
            "{} WHERE {} ORDER BY a.start_time",
            DETAILS_SELECT,
            conditions.join(" AND ")
        );

        let mut builder = sqlx::query_as::<_, AppointmentDetailsRow>(&query).bind(professional_id);
        if let Some(status) = status {
            builder = builder.bind(status);
        }
        if let Some(date) = date {
            let (start, end) = self.day_bounds(date);
            builder = builder.bind(start).bind(end);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        rows.into_iter().map(AppointmentDetails::try_from).collect()
    }

    /// Bookings of a client, optionally filtered by status
    pub async fn list_for_client(
        &self,
        client_id: Uuid,
        status: Option<AppointmentStatus>,
    ) -> AppResult<Vec<AppointmentDetails>> {
        let query = format!(
            "{} WHERE a.client_id = $1 AND ($2::appointment_status IS NULL OR a.status = $2) ORDER BY a.start_time",
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, AppointmentDetailsRow>(&query)
            .bind(client_id)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(AppointmentDetails::try_from).collect()
    }

    /// Everything intersecting a day, cancelled entries included
    pub async fn timetable(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<AppointmentDetails>> {
        self.list_for_professional(professional_id, None, Some(date)).await
    }

    /// Distinct application-zone dates in `[start, end)` carrying a
    /// non-cancelled appointment or block
    pub async fn appointment_dates(
        &self,
        professional_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<NaiveDate>> {
        let dates = sqlx::query_scalar::<_, NaiveDate>(
            r#"
            SELECT DISTINCT (start_time AT TIME ZONE $4)::date AS day
            FROM appointments
            WHERE professional_id = $1
              AND start_time >= $2
              AND start_time < $3
              AND (status IS NULL OR status <> 'cancelled')
            ORDER BY day
            "#,
        )
        .bind(professional_id)
        .bind(start)
        .bind(end)
        .bind(self.zone.name())
        .fetch_all(&self.pool)
        .await?;
        Ok(dates)
    }
}

#[async_trait]
impl AppointmentStore for AppointmentsRepository {
    async fn fetch_for_professional_on_date(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<CalendarEntry>> {
        let (start, end) = self.day_bounds(date);

        let rows = sqlx::query_as::<_, CalendarEntryRow>(
            r#"
            SELECT a.*,
                   c.first_name AS client_first_name,
                   c.last_name AS client_last_name
            FROM appointments a
            LEFT JOIN clients c ON c.id = a.client_id
            WHERE a.professional_id = $1
              AND a.start_time < $3
              AND a.end_time > $2
              AND (a.type = 'unavailable' OR a.status IN ('pending', 'confirmed'))
            ORDER BY a.start_time
            "#,
        )
        .bind(professional_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CalendarEntry::try_from).collect()
    }

    async fn fetch_by_id(&self, id: Uuid) -> AppResult<Appointment> {
        sqlx::query_as::<_, AppointmentRow>("SELECT * FROM appointments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?
            .try_into()
    }

    async fn insert(&self, appointment: NewAppointment) -> AppResult<Appointment> {
        let mut tx = self.pool.begin().await?;

        // Row lock on the owner serializes concurrent inserts per professional
        let owner: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM professionals WHERE id = $1 FOR UPDATE")
                .bind(appointment.professional_id)
                .fetch_optional(&mut *tx)
                .await?;
        if owner.is_none() {
            return Err(AppError::NotFound("Professional not found".to_string()));
        }

        let overlapping: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM appointments
                WHERE professional_id = $1
                  AND start_time < $3
                  AND end_time > $2
                  AND (type = 'unavailable' OR status IN ('pending', 'confirmed'))
            )
            "#,
        )
        .bind(appointment.professional_id)
        .bind(appointment.start_time)
        .bind(appointment.end_time)
        .fetch_one(&mut *tx)
        .await?;
        if overlapping {
            return Err(AppError::Conflict(
                "Appointment time conflicts with existing appointment".to_string(),
            ));
        }

        let (client_id, status) = match appointment.kind {
            AppointmentKind::Booking { client_id, status } => (Some(client_id), Some(status)),
            AppointmentKind::Blocked => (None, None),
        };

        let row = sqlx::query_as::<_, AppointmentRow>(
            r#"
            INSERT INTO appointments
                (type, professional_id, client_id, status, start_time, end_time, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(appointment.kind.appointment_type())
        .bind(appointment.professional_id)
        .bind(client_id)
        .bind(status)
        .bind(appointment.start_time)
        .bind(appointment.end_time)
        .bind(&appointment.description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        row.try_into()
    }

    async fn update_status(&self, change: StatusChange) -> AppResult<Appointment> {
        let (cancelled_by_client, cancelled_by_professional) =
            if change.to == AppointmentStatus::Cancelled {
                match change.actor.role {
                    ActorRole::Client => (Some(change.actor.id), None),
                    ActorRole::Professional => (None, Some(change.actor.id)),
                }
            } else {
                (None, None)
            };

        // Guarded on the status the transition was approved from
        sqlx::query_as::<_, AppointmentRow>(
            r#"
            UPDATE appointments
            SET status = $2,
                cancellation_reason = COALESCE($3, cancellation_reason),
                cancelled_by_client_id = COALESCE($4, cancelled_by_client_id),
                cancelled_by_professional_id = COALESCE($5, cancelled_by_professional_id),
                updated_at = NOW()
            WHERE id = $1 AND status = $6
            RETURNING *
            "#,
        )
        .bind(change.appointment_id)
        .bind(change.to)
        .bind(&change.reason)
        .bind(cancelled_by_client)
        .bind(cancelled_by_professional)
        .bind(change.from)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::Conflict("Appointment was modified concurrently, please retry".to_string())
        })?
        .try_into()
    }
}

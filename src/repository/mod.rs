//! Repository layer for database operations

pub mod appointments;
pub mod clients;
pub mod professionals;
pub mod users;

use chrono_tz::Tz;
use sqlx::{Pool, Postgres};

pub use appointments::AppointmentStore;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub appointments: appointments::AppointmentsRepository,
    pub clients: clients::ClientsRepository,
    pub professionals: professionals::ProfessionalsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool.
    ///
    /// `zone` decides where calendar days start for date-based queries.
    pub fn new(pool: Pool<Postgres>, zone: Tz) -> Self {
        Self {
            appointments: appointments::AppointmentsRepository::new(pool.clone(), zone),
            clients: clients::ClientsRepository::new(pool.clone()),
            professionals: professionals::ProfessionalsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

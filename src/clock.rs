//! Application-zone time handling
//!
//! Every business-time comparison (is this slot in the past, which calendar
//! day does an appointment fall on, where does a day start) goes through
//! [`AppTime`], which pins a single configured zone and a clock source.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Days, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock of the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Time normalizer bound to the application zone
#[derive(Clone)]
pub struct AppTime {
    zone: Tz,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AppTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppTime").field("zone", &self.zone).finish()
    }
}

impl AppTime {
    pub fn new(zone: Tz, clock: Arc<dyn Clock>) -> Self {
        Self { zone, clock }
    }

    /// Normalizer reading the host clock
    pub fn system(zone: Tz) -> Self {
        Self::new(zone, Arc::new(SystemClock))
    }

    /// Normalizer frozen at `now`
    pub fn fixed(zone: Tz, now: DateTime<Utc>) -> Self {
        Self::new(zone, Arc::new(FixedClock(now)))
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Current instant expressed in the application zone
    pub fn now(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&self.zone)
    }

    /// Current calendar date in the application zone
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Re-express an instant in the application zone (same point in time)
    pub fn to_app_zone<Z: TimeZone>(&self, t: &DateTime<Z>) -> DateTime<Tz> {
        t.with_timezone(&self.zone)
    }

    /// Half-open bounds of the month containing `month`
    pub fn month_bounds(&self, month: NaiveDate) -> (DateTime<Tz>, DateTime<Tz>) {
        let first = month.with_day(1).unwrap_or(month);
        let next = first
            .checked_add_months(chrono::Months::new(1))
            .unwrap_or(first);
        (start_of_day(first, self.zone), start_of_day(next, self.zone))
    }

    /// Wall-clock `hour:00` of `date` in the application zone.
    ///
    /// Returns `None` when that local time does not exist (DST gap).
    /// Ambiguous local times (DST fold) resolve to the earlier instant.
    pub fn at_hour(&self, date: NaiveDate, hour: u32) -> Option<DateTime<Tz>> {
        let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
        self.zone
            .from_local_datetime(&date.and_time(time))
            .earliest()
    }
}

/// First instant of `date` in `zone`.
///
/// Midnight can be skipped by a DST jump in some zones; the day then starts
/// at the first instant after the gap.
pub fn start_of_day(date: NaiveDate, zone: Tz) -> DateTime<Tz> {
    match zone.from_local_datetime(&date.and_time(NaiveTime::MIN)) {
        LocalResult::Single(t) => t,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            // Walk forward to the end of the gap; gaps never exceed a few hours.
            (1..=4)
                .filter_map(|h| NaiveTime::from_hms_opt(h, 0, 0))
                .find_map(|time| zone.from_local_datetime(&date.and_time(time)).earliest())
                .unwrap_or_else(|| zone.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
        }
    }
}

/// Half-open `[start, end)` bounds of `date` as a calendar day in `zone`
pub fn day_bounds(date: NaiveDate, zone: Tz) -> (DateTime<Tz>, DateTime<Tz>) {
    let next = date.checked_add_days(Days::new(1)).unwrap_or(date);
    (start_of_day(date, zone), start_of_day(next, zone))
}

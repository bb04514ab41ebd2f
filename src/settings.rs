//! The calendar conventions a session runs under.
//!
//! There is no ambient configuration in this crate: the reference frame that
//! buckets timestamps into calendar days, and the weekday a week starts on,
//! are both carried in a [`CalendarSettings`] value that callers pass in
//! explicitly. Every "same day" comparison funnels through
//! [`DayReference::day_key`], so day identity cannot drift between call sites.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{self, DayRange};
use crate::weekday::Weekday;

/// The reference frame that decides which calendar day a timestamp belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayReference {
    /// Bucket timestamps by their UTC date
    Utc,
    /// Bucket timestamps by their date in the machine's local timezone
    Local,
}

impl DayReference {
    /// The calendar day `instant` belongs to
    pub fn day_key(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            DayReference::Utc => instant.date_naive(),
            DayReference::Local => instant.with_timezone(&Local).date_naive(),
        }
    }

    /// The current calendar day
    pub fn today(&self) -> NaiveDate {
        self.day_key(Utc::now())
    }

    /// The instant `date` starts at, as a UTC timestamp
    pub fn day_start(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        match self {
            DayReference::Utc => Utc.from_utc_datetime(&midnight),
            DayReference::Local => match Local.from_local_datetime(&midnight).earliest() {
                Some(instant) => instant.with_timezone(&Utc),
                None => {
                    // Midnight was skipped by a DST transition on this date
                    log::warn!("No local midnight on {}, using the UTC one", date);
                    Utc.from_utc_datetime(&midnight)
                }
            },
        }
    }
}

/// The conventions a [`Session`](crate::Session) applies throughout: which
/// reference frame buckets timestamps into days, and which weekday opens a
/// week.
///
/// The defaults (local days, Sunday-start weeks) match what the dashboard and
/// report views expect; tests usually prefer [`CalendarSettings::utc`], whose
/// day keys do not depend on the machine's timezone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalendarSettings {
    day_reference: DayReference,
    week_start: Weekday,
}

impl CalendarSettings {
    /// Local day keys, weeks starting on Sunday
    pub fn new() -> Self {
        Self::new_with_parameters(DayReference::Local, Weekday::Sunday)
    }

    /// UTC day keys, weeks starting on Sunday
    pub fn utc() -> Self {
        Self::new_with_parameters(DayReference::Utc, Weekday::Sunday)
    }

    pub fn new_with_parameters(day_reference: DayReference, week_start: Weekday) -> Self {
        Self { day_reference, week_start }
    }

    pub fn day_reference(&self) -> DayReference {
        self.day_reference
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// The current calendar day under these settings
    pub fn today(&self) -> NaiveDate {
        self.day_reference.today()
    }

    /// The week that contains `date`, as an inclusive day range
    pub fn week_of(&self, date: NaiveDate) -> DayRange {
        calendar::week_of(date, self.week_start)
    }
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self::new()
    }
}

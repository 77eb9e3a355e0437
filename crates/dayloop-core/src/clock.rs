//! Injectable time source.
//!
//! Streak transitions depend on "today", which is untestable when read
//! straight from the system clock. Everything that needs a calendar date
//! or an event timestamp takes a [`Clock`] so tests can simulate day
//! transitions deterministically.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Days, Local, NaiveDate, Utc};

/// Represents an entity responsible for providing the current time.
/// Streak transitions only look at `today()`; `now()` timestamps the
/// events those transitions emit.
pub trait Clock {
    fn today(&self) -> NaiveDate;
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock> Clock for Rc<C> {
    fn today(&self) -> NaiveDate {
        self.as_ref().today()
    }

    fn now(&self) -> DateTime<Utc> {
        self.as_ref().now()
    }
}

/// Wall-clock implementation. The calendar date is taken in the local
/// time zone; event timestamps are UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a settable date. Share it via `Rc` to move the date
/// forward while a tracker holds the other handle.
#[derive(Debug)]
pub struct FixedClock {
    today: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Cell::new(today),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        self.today.set(date);
    }

    pub fn advance_days(&self, days: u64) {
        if let Some(next) = self.today.get().checked_add_days(Days::new(days)) {
            self.today.set(next);
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }

    fn now(&self) -> DateTime<Utc> {
        // Midnight of the pinned date.
        self.today.get().and_time(chrono::NaiveTime::MIN).and_utc()
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// A bookable time on a mentor's calendar. Display only, nothing reserves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub time: String,
    pub available: bool,
}

impl TimeSlot {
    pub fn new(date: NaiveDate, time: impl Into<String>, available: bool) -> Self {
        Self {
            date,
            time: time.into(),
            available,
        }
    }
}

/// Parses a `YYYY-MM-DD` date key.
pub fn parse_date_key(value: &str) -> Result<NaiveDate, CatalogError> {
    NaiveDate::parse_from_str(value, DATE_KEY_FORMAT)
        .map_err(|_| CatalogError::InvalidDate(value.to_owned()))
}

/// The slots of `date` in their original order, unavailable ones included.
#[must_use]
pub fn select_slots(date: NaiveDate, slots: &[TimeSlot]) -> SlotSelection<'_> {
    SlotSelection {
        date,
        slots: slots.iter().filter(|slot| slot.date == date).collect(),
    }
}

#[derive(Debug, Serialize)]
pub struct SlotSelection<'a> {
    pub date: NaiveDate,
    pub slots: Vec<&'a TimeSlot>,
}

impl<'a> SlotSelection<'a> {
    pub fn available(&self) -> impl Iterator<Item = &'a TimeSlot> + '_ {
        self.slots.iter().copied().filter(|slot| slot.available)
    }

    pub fn unavailable(&self) -> impl Iterator<Item = &'a TimeSlot> + '_ {
        self.slots.iter().copied().filter(|slot| !slot.available)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

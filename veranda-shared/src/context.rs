use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The reservation a guest is in the middle of making.
///
/// Supplied by the caller when the offer surface mounts; everything in the
/// engine that needs a stay length or a head count derives it from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationContext {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub person_count: u32,
}

impl ReservationContext {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate, person_count: u32) -> Self {
        Self {
            check_in,
            check_out,
            person_count,
        }
    }

    /// Length of the stay in nights, floored at 1.
    ///
    /// Same-day and inverted date pairs count as a single night so that
    /// per-night defaults never start at zero.
    pub fn nights(&self) -> u32 {
        let days = (self.check_out - self.check_in).num_days();
        if days < 1 {
            1
        } else {
            days as u32
        }
    }
}

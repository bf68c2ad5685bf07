// ── Booking domain type ──

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::status::BookingStatus;
use crate::pricing::DateRange;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub room_id: String,
    pub user_id: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub special_requests: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// The stay as a validated range. `None` if the stored dates are inverted.
    pub fn stay(&self) -> Option<DateRange> {
        DateRange::new(self.check_in, self.check_out).ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }

    /// Whether this booking holds its room on any night of `stay`. Only
    /// confirmed bookings hold a room; a stay may start on the day another
    /// ends.
    pub fn occupies(&self, stay: &DateRange) -> bool {
        self.status == BookingStatus::Confirmed
            && self.check_in < stay.check_out()
            && stay.check_in() < self.check_out
    }

    /// Why this booking can no longer be cancelled on `today`, if it can't.
    pub fn cancel_blocker(&self, today: NaiveDate) -> Option<&'static str> {
        if self.status != BookingStatus::Confirmed {
            Some("only confirmed bookings can be cancelled")
        } else if self.check_in <= today {
            Some("the stay has already started")
        } else {
            None
        }
    }
}

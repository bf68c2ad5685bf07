// Booking endpoints (`/rest/v1/bookings`).

use crate::client::Gateway;
use crate::error::Error;
use crate::types::{BookingRecord, NewBooking, StatusPatch};

const TABLE: &str = "bookings";

impl Gateway {
    /// All bookings, newest first.
    pub async fn list_bookings(&self) -> Result<Vec<BookingRecord>, Error> {
        self.select(
            TABLE,
            &[("select", "*".into()), ("order", "created_at.desc".into())],
        )
        .await
    }

    pub async fn create_booking(&self, booking: &NewBooking<'_>) -> Result<BookingRecord, Error> {
        self.insert(TABLE, booking).await
    }

    /// Mark a booking cancelled. The row is kept.
    pub async fn cancel_booking(&self, id: &str) -> Result<BookingRecord, Error> {
        self.update(TABLE, id, &StatusPatch { status: "cancelled" })
            .await
    }
}

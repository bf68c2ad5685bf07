// Room endpoints (`/rest/v1/rooms`).

use tracing::debug;

use crate::client::Gateway;
use crate::error::Error;
use crate::types::{NewRoom, RoomRecord, StatusPatch};

const TABLE: &str = "rooms";

impl Gateway {
    /// All rooms ordered by room number.
    pub async fn list_rooms(&self) -> Result<Vec<RoomRecord>, Error> {
        self.select(
            TABLE,
            &[("select", "*".into()), ("order", "room_number.asc".into())],
        )
        .await
    }

    /// Rooms whose status is `available`.
    pub async fn list_available_rooms(&self) -> Result<Vec<RoomRecord>, Error> {
        self.select(
            TABLE,
            &[
                ("select", "*".into()),
                ("status", "eq.available".into()),
                ("order", "room_number.asc".into()),
            ],
        )
        .await
    }

    pub async fn create_room(&self, room: &NewRoom<'_>) -> Result<RoomRecord, Error> {
        debug!(room_number = room.room_number, "creating room");
        self.insert(TABLE, room).await
    }

    pub async fn update_room_status(&self, id: &str, status: &str) -> Result<RoomRecord, Error> {
        self.update(TABLE, id, &StatusPatch { status }).await
    }
}

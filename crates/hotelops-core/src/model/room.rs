// ── Room domain type ──

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::{CatalogItem, ItemId};
use super::status::RoomStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub room_number: String,
    pub room_type: String,
    pub description: Option<String>,
    pub capacity: Option<u32>,
    pub price_per_night: Decimal,
    pub amenities: Vec<String>,
    pub status: RoomStatus,
}

impl Room {
    pub fn is_available(&self) -> bool {
        self.status == RoomStatus::Available
    }

    /// The room as a priced catalog entry (nightly rate), for quoting.
    pub fn as_catalog_item(&self) -> CatalogItem {
        CatalogItem {
            id: ItemId::new(self.id.clone()),
            name: format!("Room {}", self.room_number),
            unit_price: self.price_per_night,
            available: self.is_available(),
            category: self.room_type.clone(),
        }
    }
}

// ── Menu and room-service order types ──

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::{CatalogItem, ItemId};
use super::status::OrderStatus;

/// A dish or drink on the room-service menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: Decimal,
    /// Minutes.
    pub preparation_time: Option<u32>,
    pub available: bool,
}

impl MenuItem {
    pub fn as_catalog_item(&self) -> CatalogItem {
        CatalogItem {
            id: self.id.clone(),
            name: self.name.clone(),
            unit_price: self.price,
            available: self.available,
            category: self.category.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub room_number: Option<String>,
    pub lines: Vec<OrderLine>,
    pub total_amount: Decimal,
    pub special_instructions: Option<String>,
    pub status: OrderStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

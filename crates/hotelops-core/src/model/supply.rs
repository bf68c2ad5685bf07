// ── Inventory, suppliers and purchase orders ──

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::status::PurchaseOrderStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub quantity: i64,
    pub unit: Option<String>,
    pub minimum_quantity: i64,
    pub unit_price: Option<Decimal>,
    pub supplier_id: Option<String>,
}

impl InventoryItem {
    /// At or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.minimum_quantity
    }

    /// Units needed to get back to the threshold, zero when stocked.
    pub fn shortfall(&self) -> i64 {
        (self.minimum_quantity - self.quantity).max(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    pub inventory_item_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: String,
    pub supplier_id: String,
    pub lines: Vec<PurchaseOrderLine>,
    pub status: PurchaseOrderStatus,
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

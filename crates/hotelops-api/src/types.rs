// Wire types for the REST tables and auth endpoints.
//
// Field names follow the backend's snake_case columns. Money columns are
// numeric in the database and travel as JSON numbers, decoded straight into
// `Decimal`. Optional columns default so that partially populated rows still
// decode; required columns do not, so a schema mismatch surfaces as a
// validation failure instead of a half-empty record.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ── Rooms ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoomRecord {
    pub id: String,
    pub room_number: String,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_night: Decimal,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewRoom<'a> {
    pub room_number: &'a str,
    pub room_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_night: Decimal,
    pub capacity: u32,
    pub amenities: &'a [String],
    pub status: &'a str,
}

// ── Bookings ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BookingRecord {
    pub id: String,
    pub room_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewBooking<'a> {
    pub room_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<&'a str>,
}

// ── Menu & orders ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MenuItemRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub preparation_time: Option<u32>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMenuItem<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub category: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation_time: Option<u32>,
    pub is_available: bool,
}

/// One line of an order, stored inline on the order row.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OrderLineRecord {
    pub menu_item_id: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OrderRecord {
    pub id: String,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderLineRecord>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(default)]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewOrder<'a> {
    pub room_number: &'a str,
    pub items: &'a [OrderLineRecord],
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub special_instructions: &'a str,
    pub status: &'a str,
}

// ── Supply ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InventoryItemRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub minimum_quantity: i64,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub supplier_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewInventoryItem<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub category: &'a str,
    pub quantity: i64,
    pub unit: &'a str,
    pub minimum_quantity: i64,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub unit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SupplierRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// One line of a purchase order, stored inline on the order row.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PurchaseOrderLineRecord {
    pub inventory_item_id: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PurchaseOrderRecord {
    pub id: String,
    pub supplier_id: String,
    #[serde(default)]
    pub items: Vec<PurchaseOrderLineRecord>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPurchaseOrder<'a> {
    pub supplier_id: &'a str,
    pub items: &'a [PurchaseOrderLineRecord],
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
}

/// Body for the `status` column updates shared by rooms, bookings and orders.
#[derive(Debug, Clone, Serialize)]
pub struct StatusPatch<'a> {
    pub status: &'a str,
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserMetadata {
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
}

fn default_true() -> bool {
    true
}

// ── Domain model ──
//
// Canonical representations of the backend's rows. Gateway records are
// converted into these in `crate::convert`; consumers (the CLI) depend on
// these types only.

pub mod booking;
pub mod catalog;
pub mod menu;
pub mod room;
pub mod status;
pub mod supply;

// ── Re-exports ──────────────────────────────────────────────────────

pub use booking::Booking;
pub use catalog::{CatalogItem, ItemId};
pub use menu::{MenuItem, Order, OrderLine};
pub use room::Room;
pub use status::{BookingStatus, OrderStatus, PurchaseOrderStatus, RoomStatus};
pub use supply::{InventoryItem, PurchaseOrder, PurchaseOrderLine, Supplier};

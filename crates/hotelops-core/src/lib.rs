// hotelops-core: Domain layer between hotelops-api and the CLI.
//
// Holds the two pieces of client-side logic that never touch the network
// (the order cart and the stay price calculator), the domain model decoded
// from gateway records, and the `Hotel` facade that sequences gateway calls.

pub mod cart;
pub mod config;
pub mod convert;
pub mod error;
pub mod hotel;
pub mod model;
pub mod pricing;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cart::{Cart, CartLine, OrderDetails, OrderSubmission, SubmissionLine};
pub use config::{GatewayConfig, TlsVerification};
pub use error::CoreError;
pub use hotel::{Dashboard, Hotel, InventoryDraft, MenuItemDraft, RoomDraft};
pub use pricing::{BookingQuote, DateRange, format_money, nights, quote};
pub use store::{Slot, Ticket};

pub use model::{
    Booking, BookingStatus, CatalogItem, InventoryItem, ItemId, MenuItem, Order, OrderLine,
    OrderStatus, PurchaseOrder, PurchaseOrderLine, PurchaseOrderStatus, Room, RoomStatus, Supplier,
};

// Session and sign-up types are owned by the api crate; re-exported so consumers only
// depend on core.
pub use hotelops_api::{RegisterRequest, Session, SessionStatus, SessionStore, SessionUser};

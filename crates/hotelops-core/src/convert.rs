// ── API-to-domain type conversions ──
//
// Bridges `hotelops_api::types` records into `crate::model`. Status text is
// parsed leniently, missing optional columns get defaults, and priced rows
// with a negative amount are rejected as a schema mismatch.

use rust_decimal::Decimal;

use hotelops_api::types::{
    BookingRecord, InventoryItemRecord, MenuItemRecord, OrderLineRecord, OrderRecord,
    PurchaseOrderLineRecord, PurchaseOrderRecord, RoomRecord, SupplierRecord,
};

use crate::error::CoreError;
use crate::model::{
    Booking, BookingStatus, InventoryItem, ItemId, MenuItem, Order, OrderLine, OrderStatus,
    PurchaseOrder, PurchaseOrderLine, PurchaseOrderStatus, Room, RoomStatus, Supplier,
};

// ── Helpers ────────────────────────────────────────────────────────

fn non_negative(amount: Decimal, what: &str, id: &str) -> Result<Decimal, CoreError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CoreError::decode(format!("{what} for {id} is negative ({amount})")));
    }
    Ok(amount)
}

/// Convert a batch, failing on the first record that does not convert.
pub(crate) fn decode_all<W, D>(records: Vec<W>) -> Result<Vec<D>, CoreError>
where
    D: TryFrom<W, Error = CoreError>,
{
    records.into_iter().map(D::try_from).collect()
}

// ── Rooms & bookings ───────────────────────────────────────────────

impl TryFrom<RoomRecord> for Room {
    type Error = CoreError;

    fn try_from(r: RoomRecord) -> Result<Self, Self::Error> {
        let price_per_night = non_negative(r.price_per_night, "nightly rate", &r.id)?;
        Ok(Self {
            price_per_night,
            status: r
                .status
                .as_deref()
                .map_or_else(RoomStatus::default, RoomStatus::parse_lenient),
            room_type: r.room_type.unwrap_or_else(|| "standard".into()),
            id: r.id,
            room_number: r.room_number,
            description: r.description,
            capacity: r.capacity,
            amenities: r.amenities,
        })
    }
}

impl TryFrom<BookingRecord> for Booking {
    type Error = CoreError;

    fn try_from(b: BookingRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            status: b
                .status
                .as_deref()
                .map_or_else(BookingStatus::default, BookingStatus::parse_lenient),
            id: b.id,
            room_id: b.room_id,
            user_id: b.user_id,
            check_in: b.check_in_date,
            check_out: b.check_out_date,
            total_price: b.total_price,
            special_requests: b.special_requests,
            created_at: b.created_at,
        })
    }
}

// ── Menu & orders ──────────────────────────────────────────────────

impl TryFrom<MenuItemRecord> for MenuItem {
    type Error = CoreError;

    fn try_from(m: MenuItemRecord) -> Result<Self, Self::Error> {
        let price = non_negative(m.price, "price", &m.id)?;
        Ok(Self {
            id: ItemId::from(m.id),
            name: m.name,
            description: m.description,
            category: m.category.unwrap_or_else(|| "other".into()),
            price,
            preparation_time: m.preparation_time,
            available: m.is_available,
        })
    }
}

impl From<OrderLineRecord> for OrderLine {
    fn from(l: OrderLineRecord) -> Self {
        Self {
            item_id: ItemId::from(l.menu_item_id),
            quantity: l.quantity,
            unit_price: l.unit_price,
        }
    }
}

impl TryFrom<OrderRecord> for Order {
    type Error = CoreError;

    fn try_from(o: OrderRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            status: o
                .status
                .as_deref()
                .map_or_else(OrderStatus::default, OrderStatus::parse_lenient),
            id: o.id,
            room_number: o.room_number,
            lines: o.items.into_iter().map(OrderLine::from).collect(),
            total_amount: o.total_amount,
            special_instructions: o.special_instructions.filter(|s| !s.is_empty()),
            created_at: o.created_at,
        })
    }
}

// ── Supply ─────────────────────────────────────────────────────────

impl TryFrom<InventoryItemRecord> for InventoryItem {
    type Error = CoreError;

    fn try_from(i: InventoryItemRecord) -> Result<Self, Self::Error> {
        let unit_price = i
            .unit_price
            .map(|p| non_negative(p, "unit price", &i.id))
            .transpose()?;
        Ok(Self {
            id: i.id,
            name: i.name,
            description: i.description,
            category: i.category,
            quantity: i.quantity,
            unit: i.unit,
            minimum_quantity: i.minimum_quantity,
            unit_price,
            supplier_id: i.supplier_id,
        })
    }
}

impl TryFrom<SupplierRecord> for Supplier {
    type Error = CoreError;

    fn try_from(s: SupplierRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: s.id,
            name: s.name,
            contact_person: s.contact_person,
            email: s.email,
            phone: s.phone,
            address: s.address,
            active: s.is_active,
        })
    }
}

impl From<PurchaseOrderLineRecord> for PurchaseOrderLine {
    fn from(l: PurchaseOrderLineRecord) -> Self {
        Self {
            inventory_item_id: l.inventory_item_id,
            quantity: l.quantity,
            unit_price: l.unit_price,
        }
    }
}

impl TryFrom<PurchaseOrderRecord> for PurchaseOrder {
    type Error = CoreError;

    fn try_from(p: PurchaseOrderRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            status: p
                .status
                .as_deref()
                .map_or_else(PurchaseOrderStatus::default, PurchaseOrderStatus::parse_lenient),
            id: p.id,
            supplier_id: p.supplier_id,
            lines: p.items.into_iter().map(PurchaseOrderLine::from).collect(),
            total_amount: p.total_amount,
            notes: p.notes,
            created_at: p.created_at,
        })
    }
}

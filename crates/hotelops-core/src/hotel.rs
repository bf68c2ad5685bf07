// ── Application facade ──
//
// `Hotel` owns the gateway and one `Slot` per listed collection. Every
// operation that touches the network goes through here; the cart and the
// price calculator are validated first so local failures never send a
// request.

use std::future::Future;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::Serialize;
use tracing::{debug, info, warn};

use hotelops_api::types::{
    NewBooking, NewInventoryItem, NewMenuItem, NewOrder, NewPurchaseOrder, NewRoom,
    OrderLineRecord, PurchaseOrderLineRecord,
};
use hotelops_api::{Gateway, RegisterRequest, Session, SessionStore};

use crate::cart::{Cart, OrderDetails};
use crate::config::GatewayConfig;
use crate::convert::decode_all;
use crate::error::CoreError;
use crate::model::{
    Booking, BookingStatus, CatalogItem, InventoryItem, ItemId, MenuItem, Order, OrderStatus,
    PurchaseOrder, PurchaseOrderStatus, Room, RoomStatus, Supplier,
};
use crate::pricing::{BookingQuote, DateRange, quote};
use crate::store::Slot;

/// Input for [`Hotel::create_room`].
#[derive(Debug, Clone)]
pub struct RoomDraft {
    pub room_number: String,
    pub room_type: String,
    pub description: Option<String>,
    pub price_per_night: Decimal,
    pub capacity: u32,
    pub amenities: Vec<String>,
}

/// Input for [`Hotel::create_menu_item`].
#[derive(Debug, Clone)]
pub struct MenuItemDraft {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub price: Decimal,
    /// Minutes.
    pub preparation_time: Option<u32>,
    pub available: bool,
}

/// Input for [`Hotel::create_inventory_item`].
#[derive(Debug, Clone)]
pub struct InventoryDraft {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub quantity: u32,
    pub unit: String,
    pub minimum_quantity: u32,
    pub unit_price: Option<Decimal>,
    pub supplier_id: Option<String>,
}

fn check_price(price: Decimal, what: &str) -> Result<(), CoreError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CoreError::decode(format!("{what} must not be negative (got {price})")));
    }
    Ok(())
}

/// Headline numbers across every area, fetched concurrently.
///
/// Room figures are always present. The others are `None` when their
/// listing failed to load; the failed listings are named in `unavailable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub rooms_total: usize,
    pub rooms_available: usize,
    pub rooms_occupied: usize,
    pub active_bookings: Option<usize>,
    /// Sum of non-cancelled booking totals.
    pub booked_revenue: Option<Decimal>,
    pub menu_items_available: Option<usize>,
    pub open_orders: Option<usize>,
    pub low_stock_items: Option<usize>,
    pub unavailable: Vec<&'static str>,
}

/// The application root: gateway plus cached listings.
#[derive(Debug)]
pub struct Hotel {
    gateway: Gateway,
    rooms: Slot<Vec<Room>>,
    bookings: Slot<Vec<Booking>>,
    menu: Slot<Vec<MenuItem>>,
    orders: Slot<Vec<Order>>,
    inventory: Slot<Vec<InventoryItem>>,
}

/// Begin a fetch on `slot`, await it, and apply the result if still current.
async fn refresh<T, F>(slot: &Slot<T>, fetch: F) -> Result<Arc<T>, CoreError>
where
    F: Future<Output = Result<T, CoreError>>,
{
    let ticket = slot.begin();
    let value = Arc::new(fetch.await?);
    slot.apply(ticket, Arc::clone(&value));
    Ok(value)
}

impl Hotel {
    // ── Construction ─────────────────────────────────────────────────

    /// Build the gateway from `config`, sharing `session` with it.
    pub fn connect(config: &GatewayConfig, session: SessionStore) -> Result<Self, CoreError> {
        let gateway = Gateway::new(
            config.url.as_str(),
            config.api_key.clone(),
            session,
            &config.transport(),
        )?;
        debug!(url = %config.url, "gateway ready");
        Ok(Self::from_gateway(gateway))
    }

    pub fn from_gateway(gateway: Gateway) -> Self {
        Self {
            gateway,
            rooms: Slot::new("rooms"),
            bookings: Slot::new("bookings"),
            menu: Slot::new("menu"),
            orders: Slot::new("orders"),
            inventory: Slot::new("inventory"),
        }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn session(&self) -> &SessionStore {
        self.gateway.session()
    }

    // ── Auth ─────────────────────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Arc<Session>, CoreError> {
        Ok(self.gateway.login(email, password).await?)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Arc<Session>, CoreError> {
        Ok(self.gateway.register(request).await?)
    }

    /// End the session and forget everything fetched under it.
    pub async fn logout(&self) -> Result<(), CoreError> {
        self.gateway.logout().await?;
        self.reset_all();
        Ok(())
    }

    fn reset_all(&self) {
        self.rooms.reset();
        self.bookings.reset();
        self.menu.reset();
        self.orders.reset();
        self.inventory.reset();
    }

    // ── Rooms ────────────────────────────────────────────────────────

    pub async fn rooms(&self) -> Result<Arc<Vec<Room>>, CoreError> {
        refresh(&self.rooms, async {
            decode_all(self.gateway.list_rooms().await?)
        })
        .await
    }

    pub async fn available_rooms(&self) -> Result<Vec<Room>, CoreError> {
        decode_all(self.gateway.list_available_rooms().await?)
    }

    /// Available rooms with no confirmed booking on any night of the stay.
    pub async fn available_rooms_between(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<Room>, CoreError> {
        let stay = DateRange::new(check_in, check_out)?;
        let (rooms, bookings) = tokio::try_join!(self.available_rooms(), self.bookings())?;
        Ok(rooms
            .into_iter()
            .filter(|room| {
                !bookings
                    .iter()
                    .any(|b| b.room_id == room.id && b.occupies(&stay))
            })
            .collect())
    }

    pub async fn create_room(&self, draft: &RoomDraft) -> Result<Room, CoreError> {
        if draft.price_per_night.is_sign_negative() && !draft.price_per_night.is_zero() {
            return Err(CoreError::InvalidRate {
                rate: draft.price_per_night,
            });
        }
        let record = self
            .gateway
            .create_room(&NewRoom {
                room_number: &draft.room_number,
                room_type: &draft.room_type,
                description: draft.description.as_deref(),
                price_per_night: draft.price_per_night,
                capacity: draft.capacity,
                amenities: &draft.amenities,
                status: RoomStatus::Available.as_str(),
            })
            .await?;
        self.rooms.reset();
        Room::try_from(record)
    }

    pub async fn set_room_status(&self, id: &str, status: &RoomStatus) -> Result<Room, CoreError> {
        let record = self.gateway.update_room_status(id, status.as_str()).await?;
        self.rooms.reset();
        Room::try_from(record)
    }

    /// Find a room by id, or by room number, in the freshest listing.
    pub async fn room(&self, key: &str) -> Result<Room, CoreError> {
        let rooms = match self.rooms.latest() {
            Some(rooms) => rooms,
            None => self.rooms().await?,
        };
        rooms
            .iter()
            .find(|r| r.id == key || r.room_number == key)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "Room",
                identifier: key.to_owned(),
            })
    }

    // ── Bookings ─────────────────────────────────────────────────────

    pub async fn bookings(&self) -> Result<Arc<Vec<Booking>>, CoreError> {
        refresh(&self.bookings, async {
            decode_all(self.gateway.list_bookings().await?)
        })
        .await
    }

    /// Price a stay in `room_key` without booking it. The dates are
    /// validated before the room is looked up.
    pub async fn quote_room(
        &self,
        room_key: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<(Room, BookingQuote), CoreError> {
        DateRange::new(check_in, check_out)?;
        let room = self.room(room_key).await?;
        let quote = quote(room.price_per_night, check_in, check_out)?;
        Ok((room, quote))
    }

    /// Book an available room for the signed-in user, then mark the room
    /// booked.
    ///
    /// The room must be free on every night of the stay. Once the booking
    /// is created it is returned even if marking the room fails.
    pub async fn book_room(
        &self,
        room_key: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        special_requests: Option<&str>,
    ) -> Result<Booking, CoreError> {
        let (room, quote) = self.quote_room(room_key, check_in, check_out).await?;
        if !room.is_available() {
            return Err(CoreError::ItemUnavailable { item_id: room.id });
        }
        let bookings = self.bookings().await?;
        if let Some(clash) = bookings
            .iter()
            .find(|b| b.room_id == room.id && b.occupies(&quote.range))
        {
            debug!(room = %room.room_number, booking_id = %clash.id, "stay overlaps a confirmed booking");
            return Err(CoreError::ItemUnavailable { item_id: room.id });
        }

        let user_id = self.session().current().map(|s| s.user_id.clone());
        let record = self
            .gateway
            .create_booking(&NewBooking {
                room_id: &room.id,
                user_id: user_id.as_deref(),
                check_in_date: quote.range.check_in(),
                check_out_date: quote.range.check_out(),
                total_price: quote.total,
                status: BookingStatus::Confirmed.as_str(),
                special_requests: special_requests.filter(|s| !s.trim().is_empty()),
            })
            .await?;
        info!(
            booking_id = %record.id,
            room = %room.room_number,
            nights = quote.nights,
            total = %quote.total,
            "room booked"
        );

        self.bookings.reset();
        if let Err(e) = self
            .gateway
            .update_room_status(&room.id, RoomStatus::Booked.as_str())
            .await
        {
            warn!(
                booking_id = %record.id,
                room = %room.room_number,
                error = %e,
                "booking created but room status not updated"
            );
        }
        self.rooms.reset();
        Booking::try_from(record)
    }

    /// Cancel a confirmed booking whose stay has not started yet.
    pub async fn cancel_booking(&self, id: &str) -> Result<Booking, CoreError> {
        let today = Local::now().date_naive();
        let bookings = self.bookings().await?;
        let booking = bookings
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "Booking",
                identifier: id.to_owned(),
            })?;
        if let Some(reason) = booking.cancel_blocker(today) {
            return Err(CoreError::NotCancellable {
                booking_id: id.to_owned(),
                reason,
            });
        }

        let record = self.gateway.cancel_booking(id).await?;
        self.bookings.reset();
        info!(booking_id = id, "booking cancelled");
        Booking::try_from(record)
    }

    // ── Menu & orders ────────────────────────────────────────────────

    /// Re-fetch the menu, replacing the cached catalog wholesale.
    pub async fn menu(&self) -> Result<Arc<Vec<MenuItem>>, CoreError> {
        refresh(&self.menu, async {
            decode_all(self.gateway.list_menu_items().await?)
        })
        .await
    }

    /// Look up a menu item as a cart-ready catalog entry.
    pub async fn catalog_item(&self, id: &ItemId) -> Result<CatalogItem, CoreError> {
        let menu = match self.menu.latest() {
            Some(menu) => menu,
            None => self.menu().await?,
        };
        menu.iter()
            .find(|item| &item.id == id)
            .map(MenuItem::as_catalog_item)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "Menu item",
                identifier: id.to_string(),
            })
    }

    /// Add a dish or drink to the menu.
    pub async fn create_menu_item(&self, draft: &MenuItemDraft) -> Result<MenuItem, CoreError> {
        check_price(draft.price, "price")?;
        let record = self
            .gateway
            .create_menu_item(&NewMenuItem {
                name: &draft.name,
                description: draft.description.as_deref(),
                category: &draft.category,
                price: draft.price,
                preparation_time: draft.preparation_time,
                is_available: draft.available,
            })
            .await?;
        self.menu.reset();
        info!(menu_item_id = %record.id, name = %record.name, "menu item created");
        MenuItem::try_from(record)
    }

    pub async fn orders(&self) -> Result<Arc<Vec<Order>>, CoreError> {
        refresh(&self.orders, async {
            decode_all(self.gateway.list_orders().await?)
        })
        .await
    }

    /// Submit the cart. On success the cart is cleared; on any failure it is
    /// left as it was.
    pub async fn place_order(&self, cart: &mut Cart, details: &OrderDetails) -> Result<Order, CoreError> {
        let submission = cart.to_submission(details)?;
        let items: Vec<OrderLineRecord> = submission
            .lines()
            .iter()
            .map(|line| OrderLineRecord {
                menu_item_id: line.item_id.to_string(),
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();

        let record = self
            .gateway
            .create_order(&NewOrder {
                room_number: submission.destination(),
                items: &items,
                total_amount: submission.total(),
                special_instructions: submission.special_instructions(),
                status: OrderStatus::Pending.as_str(),
            })
            .await?;
        info!(
            order_id = %record.id,
            room = submission.destination(),
            total = %submission.total(),
            "order placed"
        );

        cart.clear();
        self.orders.reset();
        Order::try_from(record)
    }

    pub async fn set_order_status(&self, id: &str, status: &OrderStatus) -> Result<Order, CoreError> {
        let record = self.gateway.update_order_status(id, status.as_str()).await?;
        self.orders.reset();
        Order::try_from(record)
    }

    // ── Supply ───────────────────────────────────────────────────────

    pub async fn inventory(&self) -> Result<Arc<Vec<InventoryItem>>, CoreError> {
        refresh(&self.inventory, async {
            decode_all(self.gateway.list_inventory_items().await?)
        })
        .await
    }

    pub async fn create_inventory_item(
        &self,
        draft: &InventoryDraft,
    ) -> Result<InventoryItem, CoreError> {
        if let Some(price) = draft.unit_price {
            check_price(price, "unit price")?;
        }
        let record = self
            .gateway
            .create_inventory_item(&NewInventoryItem {
                name: &draft.name,
                description: draft.description.as_deref(),
                category: &draft.category,
                quantity: i64::from(draft.quantity),
                unit: &draft.unit,
                minimum_quantity: i64::from(draft.minimum_quantity),
                unit_price: draft.unit_price,
                supplier_id: draft.supplier_id.as_deref(),
            })
            .await?;
        self.inventory.reset();
        info!(inventory_item_id = %record.id, name = %record.name, "inventory item created");
        InventoryItem::try_from(record)
    }

    /// Items at or below their minimum quantity.
    pub async fn low_stock(&self) -> Result<Vec<InventoryItem>, CoreError> {
        let inventory = self.inventory().await?;
        Ok(inventory.iter().filter(|i| i.is_low_stock()).cloned().collect())
    }

    pub async fn suppliers(&self) -> Result<Vec<Supplier>, CoreError> {
        decode_all(self.gateway.list_suppliers().await?)
    }

    pub async fn purchase_orders(&self) -> Result<Vec<PurchaseOrder>, CoreError> {
        decode_all(self.gateway.list_purchase_orders().await?)
    }

    /// Raise a pending purchase order for `quantity` units of an inventory
    /// item with its usual supplier.
    pub async fn reorder(&self, item_id: &str, quantity: u32) -> Result<PurchaseOrder, CoreError> {
        if quantity == 0 {
            return Err(CoreError::decode("reorder quantity must be at least 1"));
        }
        let inventory = self.inventory().await?;
        let item = inventory
            .iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "Inventory item",
                identifier: item_id.to_owned(),
            })?;
        let supplier_id = item.supplier_id.as_deref().ok_or_else(|| {
            CoreError::decode(format!("{} has no supplier to reorder from", item.name))
        })?;

        let unit_price = item.unit_price.unwrap_or_default();
        let lines = [PurchaseOrderLineRecord {
            inventory_item_id: item.id.clone(),
            quantity,
            unit_price,
        }];
        let notes = format!("Reorder of {}", item.name);
        let record = self
            .gateway
            .create_purchase_order(&NewPurchaseOrder {
                supplier_id,
                items: &lines,
                total_amount: unit_price * Decimal::from(quantity),
                status: PurchaseOrderStatus::Pending.as_str(),
                notes: Some(&notes),
            })
            .await?;
        info!(purchase_order_id = %record.id, item = %item.name, quantity, "reorder raised");
        PurchaseOrder::try_from(record)
    }

    pub async fn set_purchase_order_status(
        &self,
        id: &str,
        status: &PurchaseOrderStatus,
    ) -> Result<PurchaseOrder, CoreError> {
        let record = self
            .gateway
            .update_purchase_order_status(id, status.as_str())
            .await?;
        PurchaseOrder::try_from(record)
    }

    // ── Dashboard ────────────────────────────────────────────────────

    /// Fetch every listing at once and summarize whatever loaded.
    ///
    /// Each listing is applied to its own slot as it arrives. Only a rooms
    /// failure, or a rejected session, fails the whole summary.
    pub async fn dashboard(&self) -> Result<Dashboard, CoreError> {
        let (rooms, bookings, menu, orders, inventory) = tokio::join!(
            self.rooms(),
            self.bookings(),
            self.menu(),
            self.orders(),
            self.inventory(),
        );
        let rooms = rooms?;

        let mut unavailable = Vec::new();
        let bookings = loaded("bookings", bookings, &mut unavailable)?;
        let menu = loaded("menu", menu, &mut unavailable)?;
        let orders = loaded("orders", orders, &mut unavailable)?;
        let inventory = loaded("inventory", inventory, &mut unavailable)?;

        Ok(Dashboard {
            rooms_total: rooms.len(),
            rooms_available: rooms.iter().filter(|r| r.is_available()).count(),
            rooms_occupied: rooms
                .iter()
                .filter(|r| matches!(r.status, RoomStatus::Occupied | RoomStatus::Booked))
                .count(),
            active_bookings: bookings.as_ref().map(|all| {
                all.iter()
                    .filter(|b| matches!(b.status, BookingStatus::Pending | BookingStatus::Confirmed))
                    .count()
            }),
            booked_revenue: bookings.as_ref().map(|all| {
                all.iter()
                    .filter(|b| !b.is_cancelled())
                    .map(|b| b.total_price)
                    .sum()
            }),
            menu_items_available: menu.map(|all| all.iter().filter(|m| m.available).count()),
            open_orders: orders.map(|all| {
                all.iter()
                    .filter(|o| {
                        matches!(
                            o.status,
                            OrderStatus::Pending | OrderStatus::Preparing | OrderStatus::Ready
                        )
                    })
                    .count()
            }),
            low_stock_items: inventory.map(|all| all.iter().filter(|i| i.is_low_stock()).count()),
            unavailable,
        })
    }
}

/// Keep a secondary dashboard listing, or record it as unavailable. Auth
/// failures still propagate so the caller can send the user to login.
fn loaded<T>(
    listing: &'static str,
    result: Result<Arc<T>, CoreError>,
    unavailable: &mut Vec<&'static str>,
) -> Result<Option<Arc<T>>, CoreError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e @ CoreError::Auth { .. }) => Err(e),
        Err(e) => {
            warn!(listing, error = %e, "dashboard listing unavailable");
            unavailable.push(listing);
            Ok(None)
        }
    }
}

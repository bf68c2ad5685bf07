// Room-service menu and order endpoints.

use crate::client::Gateway;
use crate::error::Error;
use crate::types::{MenuItemRecord, NewMenuItem, NewOrder, OrderRecord, StatusPatch};

const MENU_TABLE: &str = "menu_items";
const ORDER_TABLE: &str = "orders";

impl Gateway {
    // ── Menu ─────────────────────────────────────────────────────────

    /// Menu items grouped by category.
    pub async fn list_menu_items(&self) -> Result<Vec<MenuItemRecord>, Error> {
        self.select(
            MENU_TABLE,
            &[
                ("select", "*".into()),
                ("order", "category.asc,name.asc".into()),
            ],
        )
        .await
    }

    pub async fn create_menu_item(&self, item: &NewMenuItem<'_>) -> Result<MenuItemRecord, Error> {
        self.insert(MENU_TABLE, item).await
    }

    // ── Orders ───────────────────────────────────────────────────────

    pub async fn list_orders(&self) -> Result<Vec<OrderRecord>, Error> {
        self.select(
            ORDER_TABLE,
            &[("select", "*".into()), ("order", "created_at.desc".into())],
        )
        .await
    }

    pub async fn create_order(&self, order: &NewOrder<'_>) -> Result<OrderRecord, Error> {
        self.insert(ORDER_TABLE, order).await
    }

    pub async fn update_order_status(&self, id: &str, status: &str) -> Result<OrderRecord, Error> {
        self.update(ORDER_TABLE, id, &StatusPatch { status }).await
    }
}

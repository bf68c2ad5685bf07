// Inventory, supplier and purchase-order endpoints.

use crate::client::Gateway;
use crate::error::Error;
use crate::types::{
    InventoryItemRecord, NewInventoryItem, NewPurchaseOrder, PurchaseOrderRecord, StatusPatch,
    SupplierRecord,
};

const INVENTORY_TABLE: &str = "inventory_items";
const PURCHASE_ORDER_TABLE: &str = "purchase_orders";
const SUPPLIER_TABLE: &str = "suppliers";

impl Gateway {
    // ── Inventory ────────────────────────────────────────────────────

    pub async fn list_inventory_items(&self) -> Result<Vec<InventoryItemRecord>, Error> {
        self.select(
            INVENTORY_TABLE,
            &[("select", "*".into()), ("order", "name.asc".into())],
        )
        .await
    }

    pub async fn create_inventory_item(
        &self,
        item: &NewInventoryItem<'_>,
    ) -> Result<InventoryItemRecord, Error> {
        self.insert(INVENTORY_TABLE, item).await
    }

    // ── Purchase orders ──────────────────────────────────────────────

    /// Purchase orders, newest first.
    pub async fn list_purchase_orders(&self) -> Result<Vec<PurchaseOrderRecord>, Error> {
        self.select(
            PURCHASE_ORDER_TABLE,
            &[("select", "*".into()), ("order", "created_at.desc".into())],
        )
        .await
    }

    pub async fn create_purchase_order(
        &self,
        order: &NewPurchaseOrder<'_>,
    ) -> Result<PurchaseOrderRecord, Error> {
        self.insert(PURCHASE_ORDER_TABLE, order).await
    }

    pub async fn update_purchase_order_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<PurchaseOrderRecord, Error> {
        self.update(PURCHASE_ORDER_TABLE, id, &StatusPatch { status })
            .await
    }

    // ── Suppliers ────────────────────────────────────────────────────

    pub async fn list_suppliers(&self) -> Result<Vec<SupplierRecord>, Error> {
        self.select(
            SUPPLIER_TABLE,
            &[("select", "*".into()), ("order", "name.asc".into())],
        )
        .await
    }
}

// ── Order cart ──
//
// Client-held aggregation of catalog selections. One line per item id,
// kept in first-added order; the unit price is captured when a line is
// created so later catalog refreshes do not reprice what is already in the
// cart.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{CatalogItem, ItemId};

/// One catalog item and how many of it are in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub item_id: ItemId,
    /// Display name captured when the line was created.
    pub name: String,
    /// Always at least 1.
    pub quantity: u32,
    /// Unit price captured when the line was created.
    pub unit_price: Decimal,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Destination and free-text notes that accompany a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDetails {
    /// Room number the order is delivered to.
    pub destination: String,
    pub special_instructions: String,
}

impl OrderDetails {
    pub fn new(destination: impl Into<String>, special_instructions: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            special_instructions: special_instructions.into(),
        }
    }
}

/// One line of a submission payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionLine {
    pub item_id: ItemId,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Immutable snapshot of a cart, ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSubmission {
    lines: Vec<SubmissionLine>,
    total: Decimal,
    destination: String,
    special_instructions: String,
}

impl OrderSubmission {
    pub fn lines(&self) -> &[SubmissionLine] {
        &self.lines
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn special_instructions(&self) -> &str {
        &self.special_instructions
    }
}

/// Insertion-ordered cart with at most one line per item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    lines: IndexMap<ItemId, CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item`. Returns the line's new quantity.
    ///
    /// An existing line keeps its position and captured price.
    pub fn add(&mut self, item: &CatalogItem) -> Result<u32, CoreError> {
        self.add_quantity(item, 1)
    }

    /// Add `quantity` units of `item` in one step. Zero is a no-op that
    /// still rejects unavailable items.
    pub fn add_quantity(&mut self, item: &CatalogItem, quantity: u32) -> Result<u32, CoreError> {
        if !item.available {
            return Err(CoreError::ItemUnavailable {
                item_id: item.id.to_string(),
            });
        }
        if quantity == 0 {
            return Ok(self.quantity_of(&item.id));
        }

        let line = self
            .lines
            .entry(item.id.clone())
            .and_modify(|line| line.quantity = line.quantity.saturating_add(quantity))
            .or_insert_with(|| CartLine {
                item_id: item.id.clone(),
                name: item.name.clone(),
                quantity,
                unit_price: item.unit_price,
            });
        debug!(item_id = %line.item_id, quantity = line.quantity, "cart line updated");
        Ok(line.quantity)
    }

    /// Take one unit of `item_id` out. Returns the remaining quantity; the
    /// line disappears at zero. Unknown ids are ignored.
    pub fn remove(&mut self, item_id: &ItemId) -> u32 {
        let Some(line) = self.lines.get_mut(item_id) else {
            return 0;
        };
        if line.quantity > 1 {
            line.quantity -= 1;
            return line.quantity;
        }
        self.lines.shift_remove(item_id);
        0
    }

    /// Σ quantity × captured unit price.
    pub fn total(&self) -> Decimal {
        self.lines.values().map(CartLine::subtotal).sum()
    }

    /// Snapshot the cart into a submission payload. The cart itself is left
    /// untouched; clear it once the submission has been accepted.
    pub fn to_submission(&self, details: &OrderDetails) -> Result<OrderSubmission, CoreError> {
        if self.lines.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        if details.destination.trim().is_empty() {
            return Err(CoreError::MissingDestination);
        }

        Ok(OrderSubmission {
            lines: self
                .lines
                .values()
                .map(|line| SubmissionLine {
                    item_id: line.item_id.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
                .collect(),
            total: self.total(),
            destination: details.destination.trim().to_owned(),
            special_instructions: details.special_instructions.clone(),
        })
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    // ── Read accessors ───────────────────────────────────────────────

    /// Lines in first-added order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, item_id: &ItemId) -> u32 {
        self.lines.get(item_id).map_or(0, |line| line.quantity)
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.values().map(|line| line.quantity).sum()
    }
}

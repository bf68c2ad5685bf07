//! Inventory command handlers.

use tabled::Tabled;

use hotelops_core::{Hotel, InventoryDraft, InventoryItem, PurchaseOrder, format_money};

use crate::cli::{GlobalOpts, InventoryArgs, InventoryCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct InventoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "On hand")]
    on_hand: String,
    #[tabled(rename = "Minimum")]
    minimum: String,
    #[tabled(rename = "Unit price")]
    unit_price: String,
    #[tabled(rename = "Low")]
    low: String,
}

impl From<&InventoryItem> for InventoryRow {
    fn from(i: &InventoryItem) -> Self {
        let unit = i.unit.as_deref().unwrap_or("");
        Self {
            id: i.id.clone(),
            name: i.name.clone(),
            category: util::or_dash(i.category.as_deref()),
            on_hand: format!("{} {unit}", i.quantity).trim_end().to_owned(),
            minimum: i.minimum_quantity.to_string(),
            unit_price: i.unit_price.map(format_money).unwrap_or_default(),
            low: if i.is_low_stock() {
                format!("short {}", i.shortfall())
            } else {
                String::new()
            },
        }
    }
}

fn reorder_detail(po: &PurchaseOrder) -> String {
    output::detail(&[
        ("Purchase order", po.id.clone()),
        ("Supplier", po.supplier_id.clone()),
        ("Total", format_money(po.total_amount)),
        ("Status", po.status.to_string()),
        ("Notes", po.notes.clone().unwrap_or_default()),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    hotel: &Hotel,
    args: InventoryArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        InventoryCommand::List { low_stock } => {
            let items = if low_stock {
                hotel.low_stock().await?
            } else {
                hotel.inventory().await?.as_ref().clone()
            };
            let out = output::render_list(
                &global.output,
                &items,
                |i| InventoryRow::from(i),
                |i| i.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        InventoryCommand::Create {
            name,
            category,
            quantity,
            unit,
            minimum,
            unit_price,
            supplier,
            description,
        } => {
            let draft = InventoryDraft {
                name,
                category,
                description,
                quantity,
                unit,
                minimum_quantity: minimum,
                unit_price: unit_price
                    .map(|raw| util::parse_amount("unit-price", &raw))
                    .transpose()?,
                supplier_id: supplier,
            };
            let item = hotel.create_inventory_item(&draft).await?;
            output::notice(global, &format!("{} added to inventory", item.name));
            let out = output::render_list(
                &global.output,
                std::slice::from_ref(&item),
                |i| InventoryRow::from(i),
                |i| i.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        InventoryCommand::Reorder { item, quantity } => {
            let po = hotel.reorder(&item, quantity).await?;
            output::notice(
                global,
                &format!("Purchase order {} raised for {}", po.id, format_money(po.total_amount)),
            );
            let out = output::render_single(&global.output, &po, reorder_detail, |p| p.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

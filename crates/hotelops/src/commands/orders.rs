//! Room-service order handlers.
//!
//! `orders place` builds a cart from `--item` arguments against the current
//! menu and submits it in one request.

use tabled::Tabled;

use hotelops_core::{Cart, Hotel, ItemId, Order, OrderDetails, OrderStatus, format_money};

use crate::cli::{GlobalOpts, OrdersArgs, OrdersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "Items")]
    items: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Placed")]
    placed: String,
}

impl From<&Order> for OrderRow {
    fn from(o: &Order) -> Self {
        Self {
            id: o.id.clone(),
            room: util::or_dash(o.room_number.as_deref()),
            items: o.item_count().to_string(),
            total: format_money(o.total_amount),
            status: o.status.to_string(),
            placed: o
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

fn detail(o: &Order) -> String {
    let lines = o
        .lines
        .iter()
        .map(|l| format!("{} × {} @ {}", l.quantity, l.item_id, format_money(l.unit_price)))
        .collect::<Vec<_>>()
        .join("\n       ");
    output::detail(&[
        ("Order", o.id.clone()),
        ("Room", o.room_number.clone().unwrap_or_default()),
        ("Items", lines),
        ("Total", format_money(o.total_amount)),
        ("Notes", o.special_instructions.clone().unwrap_or_default()),
        ("Status", o.status.to_string()),
    ])
}

// ── Item specs ──────────────────────────────────────────────────────

/// Parse `<id>` or `<id>:<N>` into an item id and quantity. Anything after
/// the last `:` must be a whole number.
fn parse_item_spec(raw: &str) -> Result<(ItemId, u32), CliError> {
    let raw = raw.trim();
    let invalid = |reason: String| CliError::Validation {
        field: "item".into(),
        reason,
    };

    let (id, quantity) = match raw.rsplit_once(':') {
        Some((id, count)) => {
            if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(format!("expected <id>:<quantity>, got '{raw}'")));
            }
            let quantity: u32 = count
                .parse()
                .map_err(|_| invalid(format!("quantity too large in '{raw}'")))?;
            (id.trim_end(), quantity)
        }
        None => (raw, 1),
    };

    if id.is_empty() {
        return Err(invalid(format!("missing menu item id in '{raw}'")));
    }
    if quantity == 0 {
        return Err(invalid(format!("quantity must be at least 1 in '{raw}'")));
    }
    Ok((ItemId::new(id), quantity))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(hotel: &Hotel, args: OrdersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        OrdersCommand::List => {
            let orders = hotel.orders().await?;
            let out = output::render_list(
                &global.output,
                &orders,
                |o| OrderRow::from(o),
                |o| o.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OrdersCommand::Place {
            room,
            items,
            instructions,
        } => {
            let specs = items
                .iter()
                .map(|raw| parse_item_spec(raw))
                .collect::<Result<Vec<_>, _>>()?;

            let mut cart = Cart::new();
            for (id, quantity) in &specs {
                let item = hotel.catalog_item(id).await?;
                cart.add_quantity(&item, *quantity)?;
            }

            let details = OrderDetails::new(room, instructions.unwrap_or_default());
            let order = hotel.place_order(&mut cart, &details).await?;
            output::notice(
                global,
                &format!(
                    "Order {} placed for {}",
                    order.id,
                    format_money(order.total_amount)
                ),
            );
            let out = output::render_single(&global.output, &order, detail, |o| o.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OrdersCommand::SetStatus { id, status } => {
            let status = util::parse_status(&status, OrderStatus::KNOWN, OrderStatus::parse_lenient)?;
            let order = hotel.set_order_status(&id, &status).await?;
            output::notice(global, &format!("Order {} is now {}", order.id, order.status));
            Ok(())
        }
    }
}

//! `dashboard`: one concurrent fetch of every listing, summarized.

use hotelops_core::{Dashboard, Hotel, format_money};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

const UNAVAILABLE: &str = "unavailable";

fn count_or_unavailable(value: Option<usize>) -> String {
    value.map_or_else(|| UNAVAILABLE.to_owned(), |n| n.to_string())
}

fn detail(d: &Dashboard) -> String {
    output::detail(&[
        (
            "Rooms",
            format!(
                "{} total, {} available, {} occupied or booked",
                d.rooms_total, d.rooms_available, d.rooms_occupied
            ),
        ),
        ("Active bookings", count_or_unavailable(d.active_bookings)),
        (
            "Booked revenue",
            d.booked_revenue
                .map_or_else(|| UNAVAILABLE.to_owned(), format_money),
        ),
        (
            "Menu items",
            d.menu_items_available
                .map_or_else(|| UNAVAILABLE.to_owned(), |n| format!("{n} available")),
        ),
        ("Open orders", count_or_unavailable(d.open_orders)),
        ("Low stock", count_or_unavailable(d.low_stock_items)),
    ])
}

pub async fn handle(hotel: &Hotel, global: &GlobalOpts) -> Result<(), CliError> {
    let dashboard = hotel.dashboard().await?;
    if !dashboard.unavailable.is_empty() && !global.quiet {
        eprintln!("warning: could not load {}", dashboard.unavailable.join(", "));
    }
    let out = output::render_single(&global.output, &dashboard, detail, |d| {
        format!(
            "rooms_available={} open_orders={} low_stock_items={}",
            d.rooms_available,
            count_or_unavailable(d.open_orders),
            count_or_unavailable(d.low_stock_items)
        )
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

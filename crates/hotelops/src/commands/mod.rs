//! Command dispatch: bridges CLI args -> `Hotel` calls -> output formatting.

pub mod auth;
pub mod bookings;
pub mod config_cmd;
pub mod dashboard;
pub mod inventory;
pub mod menu;
pub mod orders;
pub mod purchase_orders;
pub mod rooms;
pub mod suppliers;
pub mod util;

use hotelops_core::Hotel;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, hotel: &Hotel, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(hotel, args, global).await,
        Command::Register(args) => auth::register(hotel, args, global).await,
        Command::Logout => auth::logout(hotel, global).await,
        Command::Whoami => auth::whoami(hotel, global),
        Command::Rooms(args) => rooms::handle(hotel, args, global).await,
        Command::Bookings(args) => bookings::handle(hotel, args, global).await,
        Command::Menu(args) => menu::handle(hotel, args, global).await,
        Command::Orders(args) => orders::handle(hotel, args, global).await,
        Command::Inventory(args) => inventory::handle(hotel, args, global).await,
        Command::Suppliers(args) => suppliers::handle(hotel, args, global).await,
        Command::PurchaseOrders(args) => purchase_orders::handle(hotel, args, global).await,
        Command::Dashboard => dashboard::handle(hotel, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

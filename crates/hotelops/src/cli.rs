//! Clap derive structures for the `hotelops` CLI.
//!
//! Only clap types live here so `build.rs` can include this file to render
//! man pages. Dates, prices and statuses arrive as strings and are parsed by
//! the command handlers.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hotelops -- front desk, room service and stock room from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "hotelops",
    version,
    about = "Run hotel rooms, bookings, room service and supplies from the command line",
    long_about = "Manage a hotel's rooms, guest bookings, room-service orders and\n\
        inventory against a hosted backend.\n\n\
        Configure a backend with `hotelops config init`, then sign in with\n\
        `hotelops login`.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "HOTELOPS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, env = "HOTELOPS_URL", global = true)]
    pub url: Option<String>,

    /// Anon API key sent with every request
    #[arg(long, env = "HOTELOPS_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HOTELOPS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "HOTELOPS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "HOTELOPS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with email and password
    Login(LoginArgs),

    /// Create an account and sign in
    Register(RegisterArgs),

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage rooms
    #[command(alias = "r")]
    Rooms(RoomsArgs),

    /// Quote, book and cancel stays
    #[command(alias = "b")]
    Bookings(BookingsArgs),

    /// Browse the room-service menu
    Menu(MenuArgs),

    /// Place and track room-service orders
    #[command(alias = "o")]
    Orders(OrdersArgs),

    /// Track stock levels and reorder
    #[command(alias = "inv")]
    Inventory(InventoryArgs),

    /// List suppliers
    Suppliers(SuppliersArgs),

    /// Track purchase orders
    #[command(alias = "po")]
    PurchaseOrders(PurchaseOrdersArgs),

    /// Headline numbers across rooms, bookings, orders and stock
    #[command(alias = "dash")]
    Dashboard,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(long, short = 'e', env = "HOTELOPS_EMAIL")]
    pub email: String,

    /// Account password (prompted when omitted)
    #[arg(long, env = "HOTELOPS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Account email
    #[arg(long, short = 'e')]
    pub email: String,

    /// Given name
    #[arg(long)]
    pub first_name: String,

    /// Family name
    #[arg(long)]
    pub last_name: String,

    /// Account password (prompted when omitted)
    #[arg(long, env = "HOTELOPS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ROOMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RoomsArgs {
    #[command(subcommand)]
    pub command: RoomsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoomsCommand {
    /// List rooms
    #[command(alias = "ls")]
    List {
        /// Only rooms that can be booked now
        #[arg(long)]
        available: bool,

        /// With --check-out: only available rooms free for this stay (YYYY-MM-DD)
        #[arg(long, requires = "check_out")]
        check_in: Option<String>,

        /// With --check-in: departure date of the stay (YYYY-MM-DD)
        #[arg(long, requires = "check_in")]
        check_out: Option<String>,
    },

    /// Show one room by id or room number
    Get {
        /// Room id or room number
        room: String,
    },

    /// Add a room
    Create {
        /// Room number shown to guests
        #[arg(long)]
        number: String,

        /// Room type (e.g. single, double, suite)
        #[arg(long = "type")]
        room_type: String,

        /// Nightly rate, e.g. 129.50
        #[arg(long)]
        rate: String,

        /// Maximum guests
        #[arg(long, default_value = "2")]
        capacity: u32,

        /// Free-text description
        #[arg(long)]
        description: Option<String>,

        /// Amenity (repeatable)
        #[arg(long = "amenity")]
        amenities: Vec<String>,
    },

    /// Change a room's status
    SetStatus {
        /// Room id or room number
        room: String,

        /// available, occupied, maintenance or booked
        status: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOOKINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BookingsArgs {
    #[command(subcommand)]
    pub command: BookingsCommand,
}

/// Room and dates shared by `quote` and `create`.
#[derive(Debug, Args)]
pub struct StayArgs {
    /// Room id or room number
    #[arg(long)]
    pub room: String,

    /// Arrival date (YYYY-MM-DD)
    #[arg(long)]
    pub check_in: String,

    /// Departure date (YYYY-MM-DD)
    #[arg(long)]
    pub check_out: String,
}

#[derive(Debug, Subcommand)]
pub enum BookingsCommand {
    /// List bookings, newest first
    #[command(alias = "ls")]
    List,

    /// Price a stay without booking it
    Quote(StayArgs),

    /// Book a stay
    Create {
        #[command(flatten)]
        stay: StayArgs,

        /// Special requests for the front desk
        #[arg(long)]
        requests: Option<String>,
    },

    /// Cancel a booking
    Cancel {
        /// Booking id
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MENU & ORDERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MenuArgs {
    #[command(subcommand)]
    pub command: MenuCommand,
}

#[derive(Debug, Subcommand)]
pub enum MenuCommand {
    /// List menu items
    #[command(alias = "ls")]
    List {
        /// Only items in this category (case-insensitive)
        #[arg(long)]
        category: Option<String>,

        /// Include items that are currently unavailable
        #[arg(long)]
        all: bool,
    },

    /// Add a dish or drink to the menu
    Create {
        /// Name shown to guests
        #[arg(long)]
        name: String,

        /// Menu section, e.g. mains or drinks
        #[arg(long)]
        category: String,

        /// Price, e.g. 12.50
        #[arg(long)]
        price: String,

        /// Free-text description
        #[arg(long)]
        description: Option<String>,

        /// Preparation time in minutes
        #[arg(long)]
        prep_time: Option<u32>,

        /// Add the item without offering it yet
        #[arg(long)]
        unavailable: bool,
    },
}

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List orders
    #[command(alias = "ls")]
    List,

    /// Place a room-service order
    Place {
        /// Room the order is delivered to
        #[arg(long)]
        room: String,

        /// Menu item id, optionally with a quantity: `<id>` or `<id>:<N>` (repeatable)
        #[arg(long = "item", required = true)]
        items: Vec<String>,

        /// Delivery instructions
        #[arg(long)]
        instructions: Option<String>,
    },

    /// Change an order's status
    SetStatus {
        /// Order id
        id: String,

        /// pending, preparing, ready, delivered or cancelled
        status: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SUPPLY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct InventoryArgs {
    #[command(subcommand)]
    pub command: InventoryCommand,
}

#[derive(Debug, Subcommand)]
pub enum InventoryCommand {
    /// List inventory items
    #[command(alias = "ls")]
    List {
        /// Only items at or below their minimum quantity
        #[arg(long)]
        low_stock: bool,
    },

    /// Track a new stock item
    Create {
        /// Item name
        #[arg(long)]
        name: String,

        /// Stock category, e.g. linen or toiletries
        #[arg(long)]
        category: String,

        /// Units currently on hand
        #[arg(long, default_value = "0")]
        quantity: u32,

        /// Unit of measure
        #[arg(long, default_value = "pcs")]
        unit: String,

        /// Reorder threshold
        #[arg(long, default_value = "0")]
        minimum: u32,

        /// Price per unit, e.g. 2.40
        #[arg(long)]
        unit_price: Option<String>,

        /// Supplier id used for reorders
        #[arg(long)]
        supplier: Option<String>,

        /// Free-text description
        #[arg(long)]
        description: Option<String>,
    },

    /// Raise a purchase order with the item's supplier
    Reorder {
        /// Inventory item id
        item: String,

        /// Units to order
        #[arg(long, short = 'n')]
        quantity: u32,
    },
}

#[derive(Debug, Args)]
pub struct SuppliersArgs {
    #[command(subcommand)]
    pub command: SuppliersCommand,
}

#[derive(Debug, Subcommand)]
pub enum SuppliersCommand {
    /// List suppliers
    #[command(alias = "ls")]
    List,
}

#[derive(Debug, Args)]
pub struct PurchaseOrdersArgs {
    #[command(subcommand)]
    pub command: PurchaseOrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum PurchaseOrdersCommand {
    /// List purchase orders
    #[command(alias = "ls")]
    List,

    /// Change a purchase order's status
    SetStatus {
        /// Purchase order id
        id: String,

        /// pending, approved, ordered, received or cancelled
        status: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with guided setup
    Init,

    /// Display the resolved configuration (secrets masked)
    Show,

    /// Print the config and session file locations
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

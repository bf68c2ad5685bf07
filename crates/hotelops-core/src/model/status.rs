// ── Workflow statuses ──
//
// Each status column has a fixed set of values the application acts on.
// Values outside that set are kept verbatim in `Other` so a newer backend
// never breaks decoding.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::EnumString;

macro_rules! status_text {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Known values, in workflow order.
            pub const KNOWN: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(raw) => raw,
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }

            /// Parse a value, keeping unknown text in `Other`.
            pub fn parse_lenient(raw: &str) -> Self {
                raw.parse().unwrap_or_else(|_| Self::Other(raw.to_owned()))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Ok(Self::parse_lenient(&raw))
            }
        }
    };
}

/// Room occupancy state.
#[derive(Debug, Clone, PartialEq, Eq, Default, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
    Booked,
    #[strum(default)]
    Other(String),
}

status_text!(RoomStatus {
    Available => "available",
    Occupied => "occupied",
    Maintenance => "maintenance",
    Booked => "booked",
});

#[derive(Debug, Clone, PartialEq, Eq, Default, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    #[strum(default)]
    Other(String),
}

status_text!(BookingStatus {
    Pending => "pending",
    Confirmed => "confirmed",
    Cancelled => "cancelled",
    Completed => "completed",
});

/// Room-service order progress.
#[derive(Debug, Clone, PartialEq, Eq, Default, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
    #[strum(default)]
    Other(String),
}

status_text!(OrderStatus {
    Pending => "pending",
    Preparing => "preparing",
    Ready => "ready",
    Delivered => "delivered",
    Cancelled => "cancelled",
});

#[derive(Debug, Clone, PartialEq, Eq, Default, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PurchaseOrderStatus {
    #[default]
    Pending,
    Approved,
    Ordered,
    Received,
    Cancelled,
    #[strum(default)]
    Other(String),
}

status_text!(PurchaseOrderStatus {
    Pending => "pending",
    Approved => "approved",
    Ordered => "ordered",
    Received => "received",
    Cancelled => "cancelled",
});

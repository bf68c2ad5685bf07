//! Booking command handlers.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use hotelops_core::{Booking, BookingQuote, Hotel, Room, format_money};

use crate::cli::{BookingsArgs, BookingsCommand, GlobalOpts, StayArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BookingRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "Check-in")]
    check_in: String,
    #[tabled(rename = "Check-out")]
    check_out: String,
    #[tabled(rename = "Nights")]
    nights: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl BookingRow {
    fn new(b: &Booking, room_numbers: &HashMap<String, String>) -> Self {
        Self {
            id: b.id.clone(),
            room: room_numbers
                .get(&b.room_id)
                .cloned()
                .unwrap_or_else(|| b.room_id.clone()),
            check_in: b.check_in.to_string(),
            check_out: b.check_out.to_string(),
            nights: b.stay().map(|s| s.nights().to_string()).unwrap_or_default(),
            total: format_money(b.total_price),
            status: b.status.to_string(),
        }
    }
}

fn booking_detail(b: &Booking) -> String {
    output::detail(&[
        ("Booking", b.id.clone()),
        ("Room", b.room_id.clone()),
        ("Check-in", b.check_in.to_string()),
        ("Check-out", b.check_out.to_string()),
        ("Total", format_money(b.total_price)),
        ("Status", b.status.to_string()),
        ("Requests", b.special_requests.clone().unwrap_or_default()),
    ])
}

// ── Quote view ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct QuoteView {
    room_id: String,
    room_number: String,
    check_in: NaiveDate,
    check_out: NaiveDate,
    nights: u32,
    rate: Decimal,
    total: Decimal,
}

impl QuoteView {
    fn new(room: &Room, quote: &BookingQuote) -> Self {
        Self {
            room_id: room.id.clone(),
            room_number: room.room_number.clone(),
            check_in: quote.range.check_in(),
            check_out: quote.range.check_out(),
            nights: quote.nights,
            rate: quote.rate,
            total: quote.total,
        }
    }
}

fn quote_detail(q: &QuoteView) -> String {
    output::detail(&[
        ("Room", q.room_number.clone()),
        ("Stay", format!("{} → {}", q.check_in, q.check_out)),
        (
            "Nights",
            format!("{} × {}", q.nights, format_money(q.rate)),
        ),
        ("Total", format_money(q.total)),
    ])
}

fn stay_dates(stay: &StayArgs) -> Result<(NaiveDate, NaiveDate), CliError> {
    Ok((
        util::parse_date("check-in", &stay.check_in)?,
        util::parse_date("check-out", &stay.check_out)?,
    ))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    hotel: &Hotel,
    args: BookingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        BookingsCommand::List => {
            let (bookings, rooms) = tokio::try_join!(hotel.bookings(), hotel.rooms())?;
            let room_numbers: HashMap<String, String> = rooms
                .iter()
                .map(|r| (r.id.clone(), r.room_number.clone()))
                .collect();
            let out = output::render_list(
                &global.output,
                &bookings,
                |b| BookingRow::new(b, &room_numbers),
                |b| b.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BookingsCommand::Quote(stay) => {
            let (check_in, check_out) = stay_dates(&stay)?;
            let (room, quote) = hotel.quote_room(&stay.room, check_in, check_out).await?;
            let view = QuoteView::new(&room, &quote);
            let out = output::render_single(&global.output, &view, quote_detail, |q| {
                q.total.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BookingsCommand::Create { stay, requests } => {
            util::require_session(hotel)?;
            let (check_in, check_out) = stay_dates(&stay)?;
            let booking = hotel
                .book_room(&stay.room, check_in, check_out, requests.as_deref())
                .await?;
            output::notice(
                global,
                &format!(
                    "Booked room {} for {}",
                    stay.room,
                    format_money(booking.total_price)
                ),
            );
            let out = output::render_single(&global.output, &booking, booking_detail, |b| {
                b.id.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BookingsCommand::Cancel { id } => {
            let booking = hotel.cancel_booking(&id).await?;
            output::notice(global, &format!("Booking {} cancelled", booking.id));
            Ok(())
        }
    }
}

//! Room command handlers.

use tabled::Tabled;

use hotelops_core::{Hotel, Room, RoomDraft, RoomStatus, format_money};

use crate::cli::{GlobalOpts, RoomsArgs, RoomsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RoomRow {
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Type")]
    room_type: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Guests")]
    capacity: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&Room> for RoomRow {
    fn from(r: &Room) -> Self {
        Self {
            number: r.room_number.clone(),
            room_type: r.room_type.clone(),
            rate: format_money(r.price_per_night),
            capacity: r.capacity.map(|c| c.to_string()).unwrap_or_default(),
            status: r.status.to_string(),
            id: r.id.clone(),
        }
    }
}

fn detail(r: &Room) -> String {
    output::detail(&[
        ("Room", r.room_number.clone()),
        ("Type", r.room_type.clone()),
        ("Rate", format!("{} / night", format_money(r.price_per_night))),
        ("Guests", r.capacity.map(|c| c.to_string()).unwrap_or_default()),
        ("Status", r.status.to_string()),
        ("Amenities", r.amenities.join(", ")),
        ("Description", r.description.clone().unwrap_or_default()),
        ("ID", r.id.clone()),
    ])
}

fn print_room(room: &Room, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, room, detail, |r| r.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(hotel: &Hotel, args: RoomsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        RoomsCommand::List {
            available,
            check_in,
            check_out,
        } => {
            let rooms = match (check_in, check_out) {
                (Some(check_in), Some(check_out)) => {
                    let check_in = util::parse_date("check-in", &check_in)?;
                    let check_out = util::parse_date("check-out", &check_out)?;
                    hotel.available_rooms_between(check_in, check_out).await?
                }
                _ if available => hotel.available_rooms().await?,
                _ => hotel.rooms().await?.as_ref().clone(),
            };
            let out = output::render_list(&global.output, &rooms, |r| RoomRow::from(r), |r| r.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RoomsCommand::Get { room } => print_room(&hotel.room(&room).await?, global),

        RoomsCommand::Create {
            number,
            room_type,
            rate,
            capacity,
            description,
            amenities,
        } => {
            let draft = RoomDraft {
                room_number: number,
                room_type,
                description,
                price_per_night: util::parse_amount("rate", &rate)?,
                capacity,
                amenities,
            };
            let room = hotel.create_room(&draft).await?;
            output::notice(global, &format!("Room {} created", room.room_number));
            print_room(&room, global)
        }

        RoomsCommand::SetStatus { room, status } => {
            let status = util::parse_status(&status, RoomStatus::KNOWN, RoomStatus::parse_lenient)?;
            let id = hotel.room(&room).await?.id;
            let updated = hotel.set_room_status(&id, &status).await?;
            output::notice(
                global,
                &format!("Room {} is now {}", updated.room_number, updated.status),
            );
            Ok(())
        }
    }
}

//! Supplier command handlers.

use tabled::Tabled;

use hotelops_core::{Hotel, Supplier};

use crate::cli::{GlobalOpts, SuppliersArgs, SuppliersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct SupplierRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Contact")]
    contact: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&Supplier> for SupplierRow {
    fn from(s: &Supplier) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            contact: util::or_dash(s.contact_person.as_deref()),
            email: util::or_dash(s.email.as_deref()),
            phone: util::or_dash(s.phone.as_deref()),
            active: if s.active { "yes" } else { "no" }.into(),
        }
    }
}

pub async fn handle(
    hotel: &Hotel,
    args: SuppliersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SuppliersCommand::List => {
            let suppliers = hotel.suppliers().await?;
            let out = output::render_list(
                &global.output,
                &suppliers,
                |s| SupplierRow::from(s),
                |s| s.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

//! Purchase order command handlers.

use std::collections::HashMap;

use tabled::Tabled;

use hotelops_core::{Hotel, PurchaseOrder, PurchaseOrderStatus, format_money};

use crate::cli::{GlobalOpts, PurchaseOrdersArgs, PurchaseOrdersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct PurchaseOrderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Supplier")]
    supplier: String,
    #[tabled(rename = "Lines")]
    lines: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl PurchaseOrderRow {
    fn new(po: &PurchaseOrder, supplier_names: &HashMap<String, String>) -> Self {
        Self {
            id: po.id.clone(),
            supplier: supplier_names
                .get(&po.supplier_id)
                .cloned()
                .unwrap_or_else(|| po.supplier_id.clone()),
            lines: po.lines.len(),
            total: format_money(po.total_amount),
            status: po.status.to_string(),
            created: po
                .created_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

pub async fn handle(
    hotel: &Hotel,
    args: PurchaseOrdersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PurchaseOrdersCommand::List => {
            let (orders, suppliers) =
                tokio::try_join!(hotel.purchase_orders(), hotel.suppliers())?;
            let supplier_names: HashMap<String, String> = suppliers
                .into_iter()
                .map(|s| (s.id, s.name))
                .collect();
            let out = output::render_list(
                &global.output,
                &orders,
                |po| PurchaseOrderRow::new(po, &supplier_names),
                |po| po.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PurchaseOrdersCommand::SetStatus { id, status } => {
            let status = util::parse_status(
                &status,
                PurchaseOrderStatus::KNOWN,
                PurchaseOrderStatus::parse_lenient,
            )?;
            let po = hotel.set_purchase_order_status(&id, &status).await?;
            output::notice(global, &format!("Purchase order {} is now {}", po.id, po.status));
            Ok(())
        }
    }
}

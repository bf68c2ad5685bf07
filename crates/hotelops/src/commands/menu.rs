//! Menu command handlers.

use tabled::Tabled;

use hotelops_core::{Hotel, MenuItem, MenuItemDraft, format_money};

use crate::cli::{GlobalOpts, MenuArgs, MenuCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct MenuRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Prep")]
    prep: String,
    #[tabled(rename = "Available")]
    available: String,
}

impl From<&MenuItem> for MenuRow {
    fn from(m: &MenuItem) -> Self {
        Self {
            id: m.id.to_string(),
            name: m.name.clone(),
            category: m.category.clone(),
            price: format_money(m.price),
            prep: m
                .preparation_time
                .map(|mins| format!("{mins} min"))
                .unwrap_or_default(),
            available: if m.available { "yes" } else { "no" }.into(),
        }
    }
}

/// Items to show: available ones unless `all`, optionally one category.
fn select<'a>(menu: &'a [MenuItem], category: Option<&str>, all: bool) -> Vec<&'a MenuItem> {
    menu.iter()
        .filter(|m| all || m.available)
        .filter(|m| category.is_none_or(|c| m.category.eq_ignore_ascii_case(c.trim())))
        .collect()
}

fn detail(m: &MenuItem) -> String {
    output::detail(&[
        ("Menu item", m.name.clone()),
        ("Category", m.category.clone()),
        ("Price", format_money(m.price)),
        (
            "Prep",
            m.preparation_time
                .map(|mins| format!("{mins} min"))
                .unwrap_or_default(),
        ),
        ("Available", if m.available { "yes" } else { "no" }.into()),
        ("Description", m.description.clone().unwrap_or_default()),
        ("ID", m.id.to_string()),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(hotel: &Hotel, args: MenuArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        MenuCommand::List { category, all } => {
            let menu = hotel.menu().await?;
            let items = select(&menu, category.as_deref(), all);
            let out = output::render_list(
                &global.output,
                &items,
                |m| MenuRow::from(*m),
                |m| m.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MenuCommand::Create {
            name,
            category,
            price,
            description,
            prep_time,
            unavailable,
        } => {
            let draft = MenuItemDraft {
                name,
                category,
                description,
                price: util::parse_amount("price", &price)?,
                preparation_time: prep_time,
                available: !unavailable,
            };
            let item = hotel.create_menu_item(&draft).await?;
            output::notice(
                global,
                &format!("{} added to the menu at {}", item.name, format_money(item.price)),
            );
            let out = output::render_single(&global.output, &item, detail, |m| m.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotelops_core::ItemId;
    use rust_decimal::Decimal;

    fn item(id: &str, category: &str, available: bool) -> MenuItem {
        MenuItem {
            id: ItemId::new(id),
            name: id.to_uppercase(),
            description: None,
            category: category.into(),
            price: Decimal::new(950, 2),
            preparation_time: Some(15),
            available,
        }
    }

    #[test]
    fn hides_unavailable_unless_all() {
        let menu = [item("soup", "Starters", true), item("cake", "Desserts", false)];
        assert_eq!(select(&menu, None, false).len(), 1);
        assert_eq!(select(&menu, None, true).len(), 2);
    }

    #[test]
    fn category_match_ignores_case() {
        let menu = [item("soup", "Starters", true), item("salad", "starters", true), item("tea", "Drinks", true)];
        let ids: Vec<_> = select(&menu, Some("STARTERS"), false)
            .iter()
            .map(|m| m.id.to_string())
            .collect();
        assert_eq!(ids, ["soup", "salad"]);
    }
}

use console::style;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::models::{CartSummary, Melon};

#[derive(Tabled)]
struct MelonTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    melon_type: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Seedless")]
    seedless: String,
    #[tabled(rename = "Price")]
    price: String,
}

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Melon")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Unit Price")]
    unit_price: String,
    #[tabled(rename = "Total")]
    line_total: String,
}

pub fn format_melon_table(melons: &[Melon]) -> String {
    if melons.is_empty() {
        return String::new();
    }

    let rows: Vec<MelonTableRow> = melons
        .iter()
        .map(|melon| MelonTableRow {
            id: melon.id.clone(),
            name: truncate(&melon.common_name, 30),
            melon_type: melon.melon_type.clone(),
            color: if melon.color.is_empty() {
                "-".to_string()
            } else {
                melon.color.clone()
            },
            seedless: if melon.seedless { "yes" } else { "no" }.to_string(),
            price: melon.price_str(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left())
        .modify(Columns::last(), Alignment::right());

    table.to_string()
}

pub fn format_melon_detail(melon: &Melon) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", style("ID").bold(), style(&melon.id).cyan()));
    output.push_str(&format!("{}: {}\n", style("Name").bold(), style(&melon.common_name).green()));
    output.push_str(&format!("{}: {}\n", style("Type").bold(), melon.melon_type));
    output.push_str(&format!("{}: {}\n", style("Price").bold(), style(melon.price_str()).yellow()));

    if !melon.color.is_empty() {
        output.push_str(&format!("{}: {}\n", style("Color").bold(), melon.color));
    }

    output.push_str(&format!(
        "{}: {}\n",
        style("Seedless").bold(),
        if melon.seedless { "yes" } else { "no" }
    ));

    if !melon.image_url.is_empty() {
        output.push_str(&format!("{}: {}\n", style("Image").bold(), style(&melon.image_url).dim()));
    }

    output
}

/// Cart rows plus a trailing order total line. Empty carts render as an empty string.
pub fn format_cart_table(summary: &CartSummary) -> String {
    if summary.is_empty() {
        return String::new();
    }

    let rows: Vec<CartTableRow> = summary
        .entries
        .iter()
        .map(|entry| CartTableRow {
            id: entry.melon.id.clone(),
            name: truncate(&entry.melon.common_name, 30),
            quantity: entry.quantity,
            unit_price: entry.unit_price().to_string(),
            line_total: entry.line_total.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left())
        .modify(Columns::new(2..), Alignment::right());

    format!(
        "{}\n{}: {} ({} melons)",
        table,
        style("Order Total").bold(),
        style(summary.total).green(),
        summary.total_quantity
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cart, Catalog, Price};

    #[test]
    fn test_empty_tables_render_empty() {
        assert!(format_melon_table(&[]).is_empty());
        assert!(format_cart_table(&CartSummary::default()).is_empty());
    }

    #[test]
    fn test_cart_table_contains_totals() {
        let catalog = Catalog::new(vec![Melon::new("m1", "musk", "Musk Melon", Price::from_cents(500))]).unwrap();
        let mut cart = Cart::new();
        cart.add("m1").unwrap();
        cart.add("m1").unwrap();

        let output = format_cart_table(&cart.render(&catalog).unwrap());
        assert!(output.contains("Musk Melon"));
        assert!(output.contains("$10.00"));
        assert!(output.contains("Order Total"));
    }

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(truncate("Honeydew", 30), "Honeydew");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
    }
}

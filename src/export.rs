//! Export renderers: CSV, titled text tables, per-order receipts and a JSON
//! backup. Callers reject empty inputs before rendering.

use std::fmt::Write;

use comfy_table::{Table, presets::ASCII_FULL_CONDENSED};
use csv::{Terminator, WriterBuilder};

use crate::models::{Order, Product};

const RULE: &str = "--------------------------------";

pub const PRODUCTS_CSV: &str = "goodwin_products.csv";
pub const PRODUCTS_REPORT: &str = "goodwin_products.txt";
pub const ORDERS_CSV: &str = "goodwin_orders.csv";
pub const ORDERS_REPORT: &str = "goodwin_orders.txt";

pub fn receipt_file_name(order: &Order) -> String {
    format!("Order_{}.txt", order.id)
}

/// `date` is the `YYYY-MM-DD` day the backup is taken.
pub fn backup_file_name(date: &str) -> String {
    format!("goodwin_orders_backup_{date}.json")
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn write_csv<I>(header: &[&str], rows: I) -> anyhow::Result<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flush csv: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Header plus one row per product. Fields containing quotes, commas or
/// line breaks are quoted with inner quotes doubled.
pub fn products_csv(products: &[Product]) -> anyhow::Result<String> {
    write_csv(
        &["ID", "Name", "Type", "Price", "Stock", "Visible"],
        products.iter().map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                p.product_type.clone(),
                p.price.to_string(),
                p.stock.to_string(),
                yes_no(p.visible).to_string(),
            ]
        }),
    )
}

pub fn orders_csv(orders: &[Order]) -> anyhow::Result<String> {
    write_csv(
        &["Order ID", "Date", "Customer", "Phone", "City", "Total", "Status", "Items Account"],
        orders.iter().map(|o| {
            vec![
                o.id.clone(),
                o.date.clone(),
                o.customer_name.clone(),
                o.phone.clone(),
                o.city.clone(),
                o.total.to_string(),
                o.status.to_string(),
                o.items.len().to_string(),
            ]
        }),
    )
}

fn titled(title: &str, table: Table) -> String {
    format!("{title}\n\n{table}\n")
}

pub fn products_report(business_name: &str, products: &[Product]) -> String {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL_CONDENSED)
        .set_header(["ID", "Name", "Type", "Price", "Stock", "Visible"]);
    for p in products {
        table.add_row([
            p.id.to_string(),
            p.name.clone(),
            p.product_type.clone(),
            format!("Rs.{}", p.price),
            p.stock.to_string(),
            yes_no(p.visible).to_string(),
        ]);
    }
    titled(&format!("{business_name} - Product List"), table)
}

pub fn orders_report(business_name: &str, orders: &[Order]) -> String {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL_CONDENSED)
        .set_header(["ID", "Date", "Customer", "Phone", "Total", "Status"]);
    for o in orders {
        table.add_row([
            o.id.clone(),
            o.date.clone(),
            o.customer_name.clone(),
            o.phone.clone(),
            format!("Rs.{}", o.total),
            o.status.to_string(),
        ]);
    }
    titled(&format!("{business_name} - Order History"), table)
}

pub fn receipt(business_name: &str, order: &Order) -> String {
    let mut text = format!("ORDER RECEIPT - {business_name}\n{RULE}\n");
    let _ = writeln!(text, "Order ID: {}", order.id);
    let _ = writeln!(text, "Date: {}", order.date);
    let _ = writeln!(text, "Customer: {}", order.customer_name);
    let _ = writeln!(text, "Phone: {}", order.phone);
    let _ = writeln!(text, "Address: {}, {}", order.address, order.city);
    let _ = writeln!(text, "{RULE}\n");
    text.push_str("ITEMS:\n");

    for (index, item) in order.items.iter().enumerate() {
        let _ = writeln!(
            text,
            "{}. {} ({}) - {} x Rs.{} = Rs.{}",
            index + 1,
            item.name,
            item.size,
            item.quantity,
            item.price,
            item.line_total()
        );
    }

    let _ = writeln!(text, "\n{RULE}");
    let _ = writeln!(text, "TOTAL AMOUNT: Rs.{}", order.total);
    let _ = writeln!(text, "{RULE}");
    if !order.delivery_notes.is_empty() {
        let _ = writeln!(text, "Notes: {}", order.delivery_notes);
    }
    text
}

pub fn orders_backup(orders: &[Order]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(orders)
}

//! WhatsApp deep-links with pre-filled messages.

use std::fmt::Write;

use crate::models::Order;

/// Strips everything but ASCII digits, as `wa.me` expects.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn whatsapp_link(phone: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        normalize_phone(phone),
        urlencoding::encode(message)
    )
}

pub fn tel_link(phone: &str) -> String {
    format!("tel:{phone}")
}

/// Summary sent to the business when an order is placed.
pub fn order_summary(business_name: &str, order: &Order) -> String {
    let mut message = format!("*New Order - {business_name}*\n");
    let _ = writeln!(message, "Order ID: {}", order.id);
    let _ = writeln!(message, "Customer: {}", order.customer_name);
    let _ = writeln!(message, "Phone: {}", order.phone);
    let _ = writeln!(message, "Address: {}, {}\n", order.address, order.city);
    message.push_str("*Order Details:*\n");

    for (index, item) in order.items.iter().enumerate() {
        let _ = writeln!(
            message,
            "{}. {} ({}) - {} x Rs.{}",
            index + 1,
            item.name,
            item.size,
            item.quantity,
            item.price
        );
    }

    let _ = writeln!(message, "\n*Total: Rs.{}*", order.total);
    if !order.delivery_notes.is_empty() {
        let _ = writeln!(message, "Note: {}", order.delivery_notes);
    }
    message
}

/// Opening line for an admin reaching out to the customer about an order.
pub fn customer_followup(order: &Order) -> String {
    format!(
        "Hello {}, regarding your Order {}...",
        order.customer_name, order.id
    )
}

pub fn contact_message(business_name: &str, name: &str, phone: &str, message: &str) -> String {
    format!("Hi {business_name}, I'm {name}. My number is {phone}. {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_keeps_only_phone_digits() {
        let link = whatsapp_link("+94 75 627-2858", "Hi there");
        assert_eq!(link, "https://wa.me/94756272858?text=Hi%20there");
    }

    #[test]
    fn link_encodes_newlines_and_symbols() {
        let link = whatsapp_link("0771234567", "*Total: Rs.10*\n&");
        assert!(link.ends_with("?text=%2ATotal%3A%20Rs.10%2A%0A%26"));
    }
}

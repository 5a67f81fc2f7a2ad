//! Email templates.

use std::fmt::Write as _;

use crate::{
    domain::orders::{OrderItemRecord, OrderRecord},
    notifications::mailer::EmailMessage,
};

/// Render an amount in cents as dollars, e.g. `$31.59`.
#[must_use]
pub fn format_dollars(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

/// Confirmation sent once an order's payment succeeds.
#[must_use]
pub fn order_confirmation(order: &OrderRecord, items: &[OrderItemRecord]) -> EmailMessage {
    let totals = &order.totals;
    let order_date = order.created_at.strftime("%Y-%m-%d").to_string();

    let mut summary = vec![
        ("Subtotal", format_dollars(totals.subtotal)),
        ("Tax", format_dollars(totals.tax)),
        ("Shipping", format_dollars(totals.shipping)),
    ];

    if totals.discount > 0 {
        summary.push(("Discount", format!("-{}", format_dollars(totals.discount))));
    }

    summary.push(("Total", format_dollars(totals.total)));

    let mut text = format!(
        "Order Confirmation - 1/2 Drinks\n\nOrder #{}\nOrder Date: {order_date}\nStatus: {}\n\nItems Ordered:\n",
        order.order_number,
        order.status.as_str()
    );
    let mut html = format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Order Confirmation - 1/2 Drinks</title></head>\
         <body><h1>1/2 Drinks</h1><h2>Order Confirmation</h2>\
         <h3>Order #{}</h3><p><strong>Order Date:</strong> {order_date}</p><p><strong>Status:</strong> {}</p>\
         <h4>Items Ordered:</h4><ul>",
        escape_html(&order.order_number),
        order.status.as_str()
    );

    for item in items {
        let line_total = format_dollars(item.total);

        let _ = writeln!(text, "- {} x{} - {line_total}", item.name, item.quantity);
        let _ = write!(
            html,
            "<li>{} x{} <span>{line_total}</span></li>",
            escape_html(&item.name),
            item.quantity
        );
    }

    text.push('\n');
    html.push_str("</ul><div class=\"total\">");

    for (label, amount) in &summary {
        let _ = writeln!(text, "{label}: {amount}");
        let _ = write!(html, "<p>{label}: {amount}</p>");
    }

    text.push_str("\nThank you for choosing 1/2 Drinks!\nQuestions? Contact us at support@halfdrinks.com\n");
    html.push_str(
        "</div><p>Thank you for choosing 1/2 Drinks!</p>\
         <p>Questions? Contact us at support@halfdrinks.com</p></body></html>",
    );

    EmailMessage {
        to: order.email.clone(),
        subject: format!("Order Confirmation #{} - 1/2 Drinks", order.order_number),
        html,
        text,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Map;
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::models::LineItemTarget,
            orders::{Address, OrderStatus, OrderUuid, records::OrderItemUuid},
            pricing::OrderTotals,
            products::records::ProductUuid,
        },
    };

    use super::*;

    fn order(discount: u64) -> TestResult<OrderRecord> {
        Ok(OrderRecord {
            uuid: OrderUuid::new(),
            order_number: "ORD-1718000000000-ABC123XYZ".to_string(),
            customer_uuid: None,
            email: "fan@example.com".to_string(),
            status: OrderStatus::Confirmed,
            totals: OrderTotals::calculate(2_000, discount)?,
            shipping_address: Address {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                company: None,
                address1: "12 Analytical Way".to_string(),
                address2: None,
                city: "London".to_string(),
                state: "LDN".to_string(),
                zip_code: "N1 9GU".to_string(),
                country: "GB".to_string(),
                phone: None,
            },
            billing_address: None,
            promotion_uuid: None,
            promotion_code: None,
            payment_intent_id: Some("pi_1".to_string()),
            created_at: "2024-06-10T12:00:00Z".parse()?,
            updated_at: "2024-06-10T12:00:00Z".parse()?,
        })
    }

    fn item(order: &OrderRecord, name: &str) -> OrderItemRecord {
        OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: order.uuid,
            target: LineItemTarget::Product(ProductUuid::new()),
            name: name.to_string(),
            quantity: 2,
            price: 1_000,
            total: 2_000,
            options: Map::new(),
        }
    }

    #[test]
    fn formats_cents_as_dollars() {
        assert_eq!(format_dollars(3_159), "$31.59");
        assert_eq!(format_dollars(5), "$0.05");
        assert_eq!(format_dollars(0), "$0.00");
    }

    #[test]
    fn confirmation_lists_items_and_totals() -> TestResult {
        let order = order(0)?;
        let message = order_confirmation(&order, &[item(&order, "Berry Blast")]);

        assert_eq!(message.to, "fan@example.com");
        assert_eq!(
            message.subject,
            "Order Confirmation #ORD-1718000000000-ABC123XYZ - 1/2 Drinks"
        );
        assert!(message.text.contains("- Berry Blast x2 - $20.00"), "{}", message.text);
        assert!(message.text.contains("Total: $31.59"), "{}", message.text);
        assert!(message.text.contains("Order Date: 2024-06-10"), "{}", message.text);
        assert!(!message.text.contains("Discount"), "no discount line without discount");

        Ok(())
    }

    #[test]
    fn confirmation_shows_discount_and_escapes_names() -> TestResult {
        let order = order(500)?;
        let message = order_confirmation(&order, &[item(&order, "<b>Mine</b>")]);

        assert!(message.text.contains("Discount: -$5.00"), "{}", message.text);
        assert!(message.html.contains("&lt;b&gt;Mine&lt;/b&gt;"), "{}", message.html);
        assert!(!message.html.contains("<b>Mine"), "name must be escaped");

        Ok(())
    }
}

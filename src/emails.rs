//! Emails
//!
//! HTML bodies for the messages sent after checkout. Rendering is pure string formatting;
//! delivery is someone else's job.

use jiff::Timestamp;
use quick_xml::escape::escape;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};

use crate::{
    cart::{Cart, CartLineItem},
    pricing::{format_price, total_price},
};

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order id
    pub id: String,

    /// Purchased lines
    pub items: Vec<CartLineItem>,

    /// Amount charged
    pub total: Decimal,

    /// Free-text shipping address
    pub shipping_address: String,

    /// When the order was placed
    pub placed_at: Timestamp,
}

impl Order {
    /// Create an order from the contents of a cart.
    pub fn from_cart(
        id: impl Into<String>,
        cart: &Cart,
        shipping_address: impl Into<String>,
        placed_at: Timestamp,
    ) -> Self {
        let items = cart.items().to_vec();

        Self {
            id: id.into(),
            total: total_price(&items),
            items,
            shipping_address: shipping_address.into(),
            placed_at,
        }
    }
}

/// The person who placed an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

/// Notification sent to the store owner when an order is placed.
pub fn order_notification_html(
    order: &Order,
    customer: &Customer,
    currency: &'static Currency,
) -> String {
    format!(
        concat!(
            "<html><body>",
            "<h1>New order {id}</h1>",
            "<p>Placed by {name} &lt;{email}&gt; on {placed_at}</p>",
            "<h2>Ship to</h2><p>{address}</p>",
            "{items}",
            "<p><strong>Total: {total}</strong></p>",
            "</body></html>"
        ),
        id = escape(&order.id),
        name = escape(&customer.name),
        email = escape(&customer.email),
        placed_at = order.placed_at.strftime("%Y-%m-%d %H:%M UTC"),
        address = escape(&order.shipping_address),
        items = items_table(&order.items, currency),
        total = escape(&format_price(order.total, currency)),
    )
}

/// Thank-you message sent to the customer after checkout.
pub fn thank_you_html(order: &Order, customer: &Customer, currency: &'static Currency) -> String {
    format!(
        concat!(
            "<html><body>",
            "<h1>Thank you, {name}!</h1>",
            "<p>We have received your order {id} and will let you know when it ships.</p>",
            "{items}",
            "<p><strong>Total: {total}</strong></p>",
            "<p>Your order will be delivered to:<br>{address}</p>",
            "</body></html>"
        ),
        name = escape(&customer.name),
        id = escape(&order.id),
        items = items_table(&order.items, currency),
        total = escape(&format_price(order.total, currency)),
        address = escape(&order.shipping_address),
    )
}

fn items_table(items: &[CartLineItem], currency: &'static Currency) -> String {
    let rows: String = items.iter().map(|item| item_row(item, currency)).collect();

    format!(
        concat!(
            "<table>",
            "<tr><th>Artwork</th><th>Size</th><th>Colour</th><th>Qty</th><th>Price</th></tr>",
            "{rows}",
            "</table>"
        ),
        rows = rows
    )
}

fn item_row(item: &CartLineItem, currency: &'static Currency) -> String {
    let size = item.size.as_ref().map_or("", |size| size.label.as_str());
    let colour = item
        .variant
        .as_ref()
        .map_or("", |variant| variant.color_name.as_str());

    format!(
        "<tr><td>{title}</td><td>{size}</td><td>{colour}</td><td>{quantity}</td><td>{price}</td></tr>",
        title = escape(&item.title),
        size = escape(size),
        colour = escape(colour),
        quantity = item.quantity,
        price = escape(&format_price(item.line_total(), currency)),
    )
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{
        artworks::CategoryRef,
        cart::{CartAggregator, SizeSnapshot, VariantSnapshot},
    };

    use super::*;

    fn order() -> Result<Order, jiff::Error> {
        let mut cart = Cart::new();

        cart.add(CartLineItem {
            id: "art-1-v1-1".to_string(),
            artwork_id: "art-1".to_string(),
            title: "Dawn <Study>".to_string(),
            price: Decimal::from(1200),
            quantity: 2,
            size: Some(SizeSnapshot {
                value: "Large".to_string(),
                label: "Large (60 x 90 cm)".to_string(),
                price_adjustment: Decimal::from(200),
            }),
            variant: Some(VariantSnapshot {
                id: "v1".to_string(),
                color_name: "Walnut & Gold".to_string(),
                color_hex: "#5c4033".to_string(),
                price_adjustment: Decimal::ZERO,
                sku: None,
            }),
            image_url: String::new(),
            category: CategoryRef::default(),
            delivery_note: String::new(),
        });

        Ok(Order::from_cart(
            "ord-7",
            &cart,
            "12 Canal Road, Pune",
            "2024-06-01T09:30:00Z".parse()?,
        ))
    }

    fn customer() -> Customer {
        Customer {
            name: "Asha \"AJ\" Rao".to_string(),
            email: "asha@example.com".to_string(),
        }
    }

    #[test]
    fn order_from_cart_totals_lines() -> TestResult {
        let order = order()?;

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total, Decimal::from(2400));

        Ok(())
    }

    #[test]
    fn notification_lists_lines_and_total() -> TestResult {
        let html = order_notification_html(&order()?, &customer(), iso::USD);

        assert!(html.contains("<h1>New order ord-7</h1>"));
        assert!(html.contains("&lt;asha@example.com&gt; on 2024-06-01 09:30 UTC"));
        assert!(html.contains("<td>Large (60 x 90 cm)</td>"));
        assert!(html.contains("<td>2</td>"));
        assert!(html.contains("Total: $2,400.00"));

        Ok(())
    }

    #[test]
    fn interpolated_text_is_escaped() -> TestResult {
        let html = thank_you_html(&order()?, &customer(), iso::USD);

        assert!(html.contains("Dawn &lt;Study&gt;"));
        assert!(html.contains("Walnut &amp; Gold"));
        assert!(html.contains("Asha &quot;AJ&quot; Rao"));
        assert!(!html.contains("<Study>"));

        Ok(())
    }

    #[test]
    fn lines_without_options_render_empty_cells() -> TestResult {
        let mut order = order()?;

        for item in &mut order.items {
            item.size = None;
            item.variant = None;
        }

        let html = thank_you_html(&order, &customer(), iso::GBP);

        assert!(html.contains("<td></td><td></td><td>2</td><td>£2,400.00</td>"));

        Ok(())
    }
}

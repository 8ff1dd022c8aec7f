use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use bookshop_db::models::{BookId, CustomerId, Order, OrderId, OrderItem, OrderStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderRequest {
    pub customer_id: CustomerId,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerOrdersParams {
    pub customer_id: CustomerId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemView {
    pub book_id: BookId,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

impl From<&OrderItem> for OrderItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            book_id: item.book_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            // stored orders were validated, so the product fits
            total_price: item.total_price().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderView {
    pub id: OrderId,
    pub customer_id: CustomerId,
    #[serde(with = "time::serde::rfc3339")]
    pub order_date: OffsetDateTime,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub shipping_address: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub shipped_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub delivery_date: Option<OffsetDateTime>,
    pub items: Vec<OrderItemView>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            order_date: order.order_date,
            total_amount: order.total_amount,
            status: order.status,
            notes: order.notes.clone(),
            shipping_address: order.shipping_address.clone(),
            shipped_date: order.shipped_date,
            delivery_date: order.delivery_date,
            items: order.items.iter().map(OrderItemView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn view_adds_line_totals() {
        let order = Order {
            id: 4,
            customer_id: 9,
            order_date: datetime!(2025-02-03 10:00 UTC),
            total_amount: Decimal::new(3000, 2),
            status: OrderStatus::Pending,
            notes: None,
            shipping_address: Some("1 Main St".to_string()),
            shipped_date: None,
            delivery_date: None,
            items: vec![OrderItem {
                book_id: 1,
                quantity: 3,
                unit_price: Decimal::new(1000, 2),
            }],
        };

        let value = serde_json::to_value(OrderView::from(&order)).unwrap();
        assert_eq!(value["items"][0]["total_price"], "30.00");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["order_date"], "2025-02-03T10:00:00Z");
        assert!(value["shipped_date"].is_null());
    }
}

use std::sync::Arc;

use time::OffsetDateTime;

use bookshop_db::models::{CustomerId, NewOrder, Order, OrderId, OrderItem};
use bookshop_db::OrderRepository;

use super::models::PlaceOrderRequest;
use crate::error::ShopError;
use crate::modules::cart::CartAggregator;

/// Turns session carts into stored orders.
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    cart: CartAggregator,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>, cart: CartAggregator) -> Self {
        Self { orders, cart }
    }

    /// Check out the session's cart.
    ///
    /// Only lines that still resolve to active books become order items,
    /// priced at the current catalog price. The cart is cleared once the
    /// order is stored.
    pub async fn place_order(
        &self,
        session: &str,
        request: PlaceOrderRequest,
    ) -> Result<Order, ShopError> {
        ShopError::require_positive("customer_id", request.customer_id)?;

        let cart = self.cart.render(session).await?;
        if cart.is_empty() {
            tracing::warn!(customer_id = request.customer_id, "checkout with an empty cart");
            return Err(ShopError::invalid("cart", "cart is empty"));
        }

        let items = cart
            .items
            .iter()
            .map(|line| OrderItem {
                book_id: line.book_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();

        let order = self
            .orders
            .insert_order(NewOrder {
                customer_id: request.customer_id,
                order_date: OffsetDateTime::now_utc(),
                notes: request.notes,
                shipping_address: request.shipping_address,
                items,
            })
            .await?;

        self.cart.clear(session).await;

        tracing::info!(
            order_id = order.id,
            customer_id = order.customer_id,
            total = %order.total_amount,
            "order placed"
        );
        Ok(order)
    }

    pub async fn order(&self, id: OrderId) -> Result<Order, ShopError> {
        ShopError::require_positive("order_id", id)?;
        self.orders
            .find_order(id)
            .await?
            .ok_or_else(|| ShopError::not_found("order", id))
    }

    /// Every order of one customer, by id
    pub async fn customer_orders(&self, customer_id: CustomerId) -> Result<Vec<Order>, ShopError> {
        ShopError::require_positive("customer_id", customer_id)?;
        let mut orders = self.orders.customer_orders(customer_id).await?;
        orders.sort_by_key(|order| order.id);
        Ok(orders)
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::error::StoreError;

pub type BookId = i32;
pub type AuthorId = i32;
pub type CategoryId = i32;
pub type OrderId = i32;
pub type CustomerId = i32;

fn active_by_default() -> bool {
    true
}

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub isbn: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub stock_quantity: u32,
    pub publication_date: Date,
    /// Cover image file name, relative to the book image directory
    #[serde(default)]
    pub image_url: Option<String>,
    /// Soft-delete marker; inactive books never reach customers
    #[serde(default = "active_by_default")]
    pub active: bool,
    pub author_id: AuthorId,
    pub category_id: CategoryId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
}

impl Book {
    /// Check the invariants every stored book must hold.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.title.trim().is_empty() {
            return Err(StoreError::invalid("book", self.id, "title is required"));
        }
        if self.isbn.trim().is_empty() {
            return Err(StoreError::invalid("book", self.id, "ISBN is required"));
        }
        if self.price <= Decimal::ZERO {
            return Err(StoreError::invalid(
                "book",
                self.id,
                "price must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default = "active_by_default")]
    pub active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
}

impl Author {
    /// Display name, always derived from the name parts.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.first_name.trim().is_empty() {
            return Err(StoreError::invalid("author", self.id, "first name is required"));
        }
        if self.last_name.trim().is_empty() {
            return Err(StoreError::invalid("author", self.id, "last name is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "active_by_default")]
    pub active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
}

impl Category {
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::invalid("category", self.id, "name is required"));
        }
        Ok(())
    }
}

/// A book joined with its author and category.
///
/// Either side of the join may be missing when the referenced row is gone.
#[derive(Debug, Clone, PartialEq)]
pub struct BookEntry {
    pub book: Book,
    pub author: Option<Author>,
    pub category: Option<Category>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub book_id: BookId,
    pub quantity: i32,
    /// Price per copy at the moment the order was placed
    pub unit_price: Decimal,
}

impl OrderItem {
    /// Price times quantity; `None` when the product does not fit a decimal
    pub fn total_price(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
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
    pub items: Vec<OrderItem>,
}

/// An order that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub order_date: OffsetDateTime,
    pub notes: Option<String>,
    pub shipping_address: Option<String>,
    pub items: Vec<OrderItem>,
}

impl NewOrder {
    pub fn total_amount(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.total_price()?))
    }

    /// Check the order and return its total.
    pub(crate) fn validate(&self) -> Result<Decimal, StoreError> {
        if self.items.is_empty() {
            return Err(StoreError::invalid(
                "order",
                0,
                "an order needs at least one item",
            ));
        }
        if let Some(item) = self.items.iter().find(|item| item.quantity < 1) {
            return Err(StoreError::invalid(
                "order",
                0,
                format!("quantity for book {} must be at least 1", item.book_id),
            ));
        }
        self.total_amount()
            .ok_or_else(|| StoreError::invalid("order", 0, "order total is out of range"))
    }
}

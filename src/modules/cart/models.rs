use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bookshop_db::models::BookId;

/// A book and how many copies of it the session wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub book_id: BookId,
    pub quantity: i32,
}

/// A cart line joined with the book's current catalog data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLineView {
    pub book_id: BookId,
    pub title: String,
    pub author_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total_price: Decimal,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn one() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddItemRequest {
    pub book_id: BookId,
    #[serde(default = "one")]
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartCount {
    pub count: i64,
}

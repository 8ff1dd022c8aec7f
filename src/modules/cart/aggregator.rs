use std::sync::Arc;

use rust_decimal::Decimal;

use bookshop_db::models::{Author, BookId};

use super::models::{CartLine, CartLineView, CartView};
use super::session::SessionStore;
use crate::error::ShopError;
use crate::modules::catalog::CatalogService;
use crate::utils;

const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Session cart operations backed by a [`SessionStore`] and the catalog.
///
/// Every mutation reads the session's full line list, changes it and
/// writes it back.
#[derive(Clone)]
pub struct CartAggregator {
    sessions: Arc<dyn SessionStore>,
    catalog: CatalogService,
}

impl CartAggregator {
    pub fn new(sessions: Arc<dyn SessionStore>, catalog: CatalogService) -> Self {
        Self { sessions, catalog }
    }

    /// Add `quantity` copies of a book, merging with an existing line.
    pub async fn add_item(
        &self,
        session: &str,
        book_id: BookId,
        quantity: i32,
    ) -> Result<(), ShopError> {
        ShopError::require_positive("quantity", quantity)?;
        self.catalog.find_book(book_id).await?;

        let mut lines = self.sessions.get(session).await;
        match lines.iter_mut().find(|line| line.book_id == book_id) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| ShopError::invalid("quantity", "too many copies in the cart"))?;
            }
            None => lines.push(CartLine { book_id, quantity }),
        }
        self.sessions.set(session, lines).await;

        tracing::debug!(book_id, quantity, "added to cart");
        Ok(())
    }

    /// Overwrite a line's quantity; zero or less removes the line.
    pub async fn set_quantity(
        &self,
        session: &str,
        book_id: BookId,
        quantity: i32,
    ) -> Result<(), ShopError> {
        let mut lines = self.sessions.get(session).await;
        let position = lines.iter().position(|line| line.book_id == book_id);

        match (position, quantity > 0) {
            (Some(index), true) => lines[index].quantity = quantity,
            (Some(index), false) => {
                lines.remove(index);
            }
            (None, true) => {
                self.catalog.find_book(book_id).await?;
                lines.push(CartLine { book_id, quantity });
            }
            (None, false) => return Ok(()),
        }
        self.sessions.set(session, lines).await;
        Ok(())
    }

    pub async fn remove_item(&self, session: &str, book_id: BookId) {
        let mut lines = self.sessions.get(session).await;
        let before = lines.len();
        lines.retain(|line| line.book_id != book_id);
        if lines.len() != before {
            self.sessions.set(session, lines).await;
        }
    }

    /// Total copies in the cart, without touching the catalog
    pub async fn count(&self, session: &str) -> i64 {
        self.sessions
            .get(session)
            .await
            .iter()
            .map(|line| i64::from(line.quantity))
            .sum()
    }

    /// Join the cart with current catalog data.
    ///
    /// Lines whose book is missing or inactive are left out of the view
    /// (and the total) but stay in the session.
    pub async fn render(&self, session: &str) -> Result<CartView, ShopError> {
        let lines = self.sessions.get(session).await;
        let mut items = Vec::with_capacity(lines.len());

        for line in lines {
            let Some(entry) = self.catalog.resolve_book(line.book_id).await? else {
                tracing::debug!(book_id = line.book_id, "skipping unavailable cart line");
                continue;
            };
            let book = &entry.book;
            let subtotal = book
                .price
                .checked_mul(Decimal::from(line.quantity))
                .ok_or_else(|| ShopError::invalid("quantity", "line total is out of range"))?;
            items.push(CartLineView {
                book_id: book.id,
                title: book.title.clone(),
                author_name: entry
                    .author
                    .as_ref()
                    .map(Author::full_name)
                    .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
                unit_price: book.price,
                quantity: line.quantity,
                subtotal,
                image_url: utils::image_or_placeholder(book.image_url.as_deref()),
            });
        }

        items.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.book_id.cmp(&b.book_id)));
        let total_price = items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.subtotal))
            .ok_or_else(|| ShopError::invalid("quantity", "cart total is out of range"))?;

        Ok(CartView { items, total_price })
    }

    /// Drop every line of the session's cart
    pub async fn clear(&self, session: &str) {
        self.sessions.remove(session).await;
    }
}

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::{
    Author, AuthorId, Book, BookEntry, BookId, Category, CategoryId, CustomerId, NewOrder, Order,
    OrderId, OrderStatus,
};
use crate::repository::{CatalogRepository, CatalogWriter, OrderRepository};
use crate::seed::SeedData;

#[derive(Debug, Default)]
struct Tables {
    authors: BTreeMap<AuthorId, Author>,
    categories: BTreeMap<CategoryId, Category>,
    books: BTreeMap<BookId, Book>,
    orders: BTreeMap<OrderId, Order>,
    last_order_id: OrderId,
}

impl Tables {
    fn put_author(&mut self, author: Author) -> Result<(), StoreError> {
        author.validate()?;
        self.authors.insert(author.id, author);
        Ok(())
    }

    fn put_category(&mut self, category: Category) -> Result<(), StoreError> {
        category.validate()?;
        self.categories.insert(category.id, category);
        Ok(())
    }

    fn put_book(&mut self, book: Book) -> Result<(), StoreError> {
        book.validate()?;
        if !self.authors.contains_key(&book.author_id) {
            return Err(StoreError::invalid(
                "book",
                book.id,
                format!("unknown author {}", book.author_id),
            ));
        }
        if !self.categories.contains_key(&book.category_id) {
            return Err(StoreError::invalid(
                "book",
                book.id,
                format!("unknown category {}", book.category_id),
            ));
        }
        self.books.insert(book.id, book);
        Ok(())
    }

    fn entry(&self, book: &Book) -> BookEntry {
        BookEntry {
            book: book.clone(),
            author: self.authors.get(&book.author_id).cloned(),
            category: self.categories.get(&book.category_id).cloned(),
        }
    }
}

/// Process-local store implementing every repository trait.
///
/// Data lives for as long as the store does; there is no persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a seed document, validating every record.
    pub fn from_seed(seed: SeedData) -> Result<Self, StoreError> {
        let mut tables = Tables::default();

        for author in seed.authors {
            if tables.authors.contains_key(&author.id) {
                return Err(StoreError::invalid("author", author.id, "duplicate id"));
            }
            tables.put_author(author)?;
        }
        for category in seed.categories {
            if tables.categories.contains_key(&category.id) {
                return Err(StoreError::invalid("category", category.id, "duplicate id"));
            }
            tables.put_category(category)?;
        }
        for book in seed.books {
            if tables.books.contains_key(&book.id) {
                return Err(StoreError::invalid("book", book.id, "duplicate id"));
            }
            tables.put_book(book)?;
        }

        tracing::info!(
            target: "bookshop-db",
            authors = tables.authors.len(),
            categories = tables.categories.len(),
            books = tables.books.len(),
            "in-memory store seeded"
        );

        Ok(Self {
            tables: RwLock::new(tables),
        })
    }
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn book_entries(&self) -> Result<Vec<BookEntry>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.books.values().map(|book| tables.entry(book)).collect())
    }

    async fn find_book(&self, id: BookId) -> Result<Option<BookEntry>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.books.get(&id).map(|book| tables.entry(book)))
    }

    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn authors(&self) -> Result<Vec<Author>, StoreError> {
        Ok(self.tables.read().await.authors.values().cloned().collect())
    }

    async fn find_author(&self, id: AuthorId) -> Result<Option<Author>, StoreError> {
        Ok(self.tables.read().await.authors.get(&id).cloned())
    }
}

#[async_trait]
impl CatalogWriter for MemoryStore {
    async fn insert_book(&self, mut book: Book) -> Result<Book, StoreError> {
        let mut tables = self.tables.write().await;
        book.id = match tables.books.last_key_value() {
            Some((last, _)) => last
                .checked_add(1)
                .ok_or_else(|| StoreError::invalid("book", *last, "no book ids left"))?,
            None => 1,
        };
        tables.put_book(book.clone())?;

        tracing::debug!(target: "bookshop-db", book_id = book.id, "book stored");
        Ok(book)
    }

    async fn replace_book(&self, book: Book) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.books.contains_key(&book.id) {
            return Ok(false);
        }
        tables.put_book(book)?;
        Ok(true)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        let total_amount = order.validate()?;

        let mut tables = self.tables.write().await;
        tables.last_order_id += 1;
        let stored = Order {
            id: tables.last_order_id,
            customer_id: order.customer_id,
            order_date: order.order_date,
            total_amount,
            status: OrderStatus::Pending,
            notes: order.notes,
            shipping_address: order.shipping_address,
            shipped_date: None,
            delivery_date: None,
            items: order.items,
        };
        tables.orders.insert(stored.id, stored.clone());

        tracing::debug!(
            target: "bookshop-db",
            order_id = stored.id,
            customer_id = stored.customer_id,
            "order stored"
        );

        Ok(stored)
    }

    async fn find_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.tables.read().await.orders.get(&id).cloned())
    }

    async fn customer_orders(&self, customer_id: CustomerId) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .orders
            .values()
            .filter(|order| order.customer_id == customer_id)
            .cloned()
            .collect())
    }
}

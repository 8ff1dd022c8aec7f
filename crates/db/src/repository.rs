use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{
    Author, AuthorId, Book, BookEntry, BookId, Category, CategoryId, CustomerId, NewOrder, Order,
    OrderId,
};

/// Read access to books, authors and categories.
///
/// Implementations return every row, active or not; visibility rules live
/// in the catalog service, not in the store.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Every book joined with its author and category
    async fn book_entries(&self) -> Result<Vec<BookEntry>, StoreError>;

    async fn find_book(&self, id: BookId) -> Result<Option<BookEntry>, StoreError>;

    async fn categories(&self) -> Result<Vec<Category>, StoreError>;

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    async fn authors(&self) -> Result<Vec<Author>, StoreError>;

    async fn find_author(&self, id: AuthorId) -> Result<Option<Author>, StoreError>;
}

/// Book maintenance for catalog staff.
#[async_trait]
pub trait CatalogWriter: CatalogRepository {
    /// Store a new book under the next free id; the id on `book` is ignored
    async fn insert_book(&self, book: Book) -> Result<Book, StoreError>;

    /// Replace a stored book, `false` when no book has its id
    async fn replace_book(&self, book: Book) -> Result<bool, StoreError>;
}

/// Persistence for placed orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Store the order and return it with its assigned id
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError>;

    async fn find_order(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    /// Orders placed by one customer, oldest first
    async fn customer_orders(&self, customer_id: CustomerId) -> Result<Vec<Order>, StoreError>;
}

//! Test doubles shared by the module tests.

use std::sync::Arc;

use async_trait::async_trait;
use bookshop_db::models::{Author, AuthorId, BookEntry, BookId, Category, CategoryId};
use bookshop_db::{CatalogRepository, StoreError};
use bookshop_kernel::settings::CatalogSettings;

use super::catalog::query::fixtures::{author, book, category, entry};
use super::catalog::CatalogService;

/// Catalog repository over fixed rows; entries may reference missing authors.
#[derive(Debug, Default, Clone)]
pub struct StubCatalog {
    pub entries: Vec<BookEntry>,
    pub categories: Vec<Category>,
    pub authors: Vec<Author>,
}

#[async_trait]
impl CatalogRepository for StubCatalog {
    async fn book_entries(&self) -> Result<Vec<BookEntry>, StoreError> {
        Ok(self.entries.clone())
    }

    async fn find_book(&self, id: BookId) -> Result<Option<BookEntry>, StoreError> {
        Ok(self.entries.iter().find(|e| e.book.id == id).cloned())
    }

    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.categories.clone())
    }

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn authors(&self) -> Result<Vec<Author>, StoreError> {
        Ok(self.authors.clone())
    }

    async fn find_author(&self, id: AuthorId) -> Result<Option<Author>, StoreError> {
        Ok(self.authors.iter().find(|a| a.id == id).cloned())
    }
}

/// Repository whose every call fails as an unreachable store would.
pub struct DownCatalog;

#[async_trait]
impl CatalogRepository for DownCatalog {
    async fn book_entries(&self) -> Result<Vec<BookEntry>, StoreError> {
        Err(down())
    }

    async fn find_book(&self, _id: BookId) -> Result<Option<BookEntry>, StoreError> {
        Err(down())
    }

    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Err(down())
    }

    async fn find_category(&self, _id: CategoryId) -> Result<Option<Category>, StoreError> {
        Err(down())
    }

    async fn authors(&self) -> Result<Vec<Author>, StoreError> {
        Err(down())
    }

    async fn find_author(&self, _id: AuthorId) -> Result<Option<Author>, StoreError> {
        Err(down())
    }
}

fn down() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

/// Small shop used across the service tests.
///
/// Books: 1 "Dune" 10.99, 2 "Children of Dune" 9.99, 3 "Emma" 5.00 (no
/// author row), 7 "Neuromancer" 7.50, 8 "Old Stock" inactive.
pub fn shop() -> StubCatalog {
    let herbert = author(1, "Frank", "Herbert");
    let gibson = author(2, "William", "Gibson");
    let mut retired_author = author(3, "Old", "Writer");
    retired_author.active = false;

    let scifi = category(1, "Science Fiction");
    let classics = category(2, "Classics");
    let mut poetry = category(3, "Poetry");
    poetry.active = false;

    let mut children = book(2, "Children of Dune", 999);
    children.image_url = Some("children-of-dune.jpg".to_string());

    let mut emma = book(3, "Emma", 500);
    emma.category_id = 2;
    emma.author_id = 42;

    let mut neuromancer = book(7, "Neuromancer", 750);
    neuromancer.author_id = 2;

    let mut retired = book(8, "Old Stock", 100);
    retired.active = false;

    StubCatalog {
        entries: vec![
            entry(book(1, "Dune", 1099), &herbert, &scifi),
            entry(children, &herbert, &scifi),
            BookEntry {
                book: emma,
                author: None,
                category: Some(classics.clone()),
            },
            entry(neuromancer, &gibson, &scifi),
            entry(retired, &herbert, &scifi),
        ],
        categories: vec![scifi, classics, poetry],
        authors: vec![herbert, gibson, retired_author],
    }
}

pub fn catalog_service(repo: impl CatalogRepository + 'static) -> CatalogService {
    CatalogService::new(Arc::new(repo), CatalogSettings::default())
}

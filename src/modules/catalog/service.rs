use std::sync::Arc;

use bookshop_db::models::{Author, AuthorId, BookEntry, BookId, Category, CategoryId};
use bookshop_db::CatalogRepository;
use bookshop_kernel::settings::CatalogSettings;

use super::models::{BookListResponse, BookView};
use super::query::{self, BookPage, BookQuery};
use crate::error::ShopError;

/// Read-side facade over the catalog repository.
///
/// Applies the customer visibility rules (inactive rows are hidden) and
/// validates arguments before the store is touched.
#[derive(Clone)]
pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
    settings: CatalogSettings,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepository>, settings: CatalogSettings) -> Self {
        Self { repo, settings }
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Run a catalog query; see [`query::query_books`] for the rules.
    pub async fn query_books(&self, query: &BookQuery) -> Result<BookPage, ShopError> {
        query.validate()?;
        let entries = self.repo.book_entries().await?;
        let page = query::select_page(entries, query);

        tracing::debug!(
            category_id = ?query.category_id,
            author_id = ?query.author_id,
            page = page.page,
            total = page.total_count,
            "catalog query"
        );
        Ok(page)
    }

    /// A catalog page with the names of the category and author it is
    /// filtered by, ready to serialize.
    pub async fn book_list(&self, query: &BookQuery) -> Result<BookListResponse, ShopError> {
        let page = self.query_books(query).await?;

        let current_category = match query.category_id {
            Some(id) => self.category_name(id).await?,
            None => None,
        };
        let current_author = match query.author_id {
            Some(id) => self.author_name(id).await?,
            None => None,
        };

        Ok(BookListResponse {
            items: page.items.iter().map(BookView::from).collect(),
            paging: page.paging(),
            current_category,
            current_author,
            search_term: query.normalized_search(),
        })
    }

    /// An active book by id.
    pub async fn find_book(&self, id: BookId) -> Result<BookEntry, ShopError> {
        ShopError::require_positive("book_id", id)?;
        self.resolve_book(id)
            .await?
            .ok_or_else(|| ShopError::not_found("book", id))
    }

    /// Like [`find_book`](Self::find_book) but a missing or inactive book
    /// is `None` rather than an error.
    pub async fn resolve_book(&self, id: BookId) -> Result<Option<BookEntry>, ShopError> {
        let entry = self.repo.find_book(id).await?;
        Ok(entry.filter(|entry| entry.book.active))
    }

    /// Newest active books first.
    pub async fn featured_books(&self, count: i32) -> Result<Vec<BookEntry>, ShopError> {
        ShopError::require_positive("count", count)?;
        let mut entries: Vec<BookEntry> = self
            .repo
            .book_entries()
            .await?
            .into_iter()
            .filter(|entry| entry.book.active)
            .collect();

        entries.sort_by(|a, b| {
            b.book
                .created_at
                .cmp(&a.book.created_at)
                .then_with(|| a.book.id.cmp(&b.book.id))
        });
        entries.truncate(usize::try_from(count).unwrap_or_default());
        Ok(entries)
    }

    /// Active categories ordered by name
    pub async fn active_categories(&self) -> Result<Vec<Category>, ShopError> {
        let mut categories: Vec<Category> = self
            .repo
            .categories()
            .await?
            .into_iter()
            .filter(|category| category.active)
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(categories)
    }

    pub async fn category(&self, id: CategoryId) -> Result<Category, ShopError> {
        ShopError::require_positive("category_id", id)?;
        self.repo
            .find_category(id)
            .await?
            .ok_or_else(|| ShopError::not_found("category", id))
    }

    /// Active authors ordered by last name, then first name
    pub async fn active_authors(&self) -> Result<Vec<Author>, ShopError> {
        let mut authors: Vec<Author> = self
            .repo
            .authors()
            .await?
            .into_iter()
            .filter(|author| author.active)
            .collect();
        authors.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(authors)
    }

    pub async fn author(&self, id: AuthorId) -> Result<Author, ShopError> {
        ShopError::require_positive("author_id", id)?;
        self.repo
            .find_author(id)
            .await?
            .ok_or_else(|| ShopError::not_found("author", id))
    }

    /// Name of the category a list is filtered by, if it exists.
    pub async fn category_name(&self, id: CategoryId) -> Result<Option<String>, ShopError> {
        let category = self.repo.find_category(id).await?;
        Ok(category.map(|category| category.name))
    }

    /// Full name of the author a list is filtered by, if they exist.
    pub async fn author_name(&self, id: AuthorId) -> Result<Option<String>, ShopError> {
        let author = self.repo.find_author(id).await?;
        Ok(author.map(|author| author.full_name()))
    }
}

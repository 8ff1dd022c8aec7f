//! Catalog query engine: filter, order and paginate book entries.
//!
//! [`query_books`] is a pure function over whatever entries a repository
//! produced; every caller (HTTP API, CLI, cart) shares it so the visible
//! catalog is identical everywhere.

use bookshop_db::models::{AuthorId, BookEntry, CategoryId};

use super::models::PagingInfo;
use crate::error::ShopError;

/// Filters plus the page being requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookQuery {
    pub category_id: Option<CategoryId>,
    pub author_id: Option<AuthorId>,
    pub search_term: Option<String>,
    pub page: i32,
    pub page_size: i32,
}

impl BookQuery {
    /// First page of the unfiltered catalog
    pub fn new(page_size: i32) -> Self {
        Self {
            category_id: None,
            author_id: None,
            search_term: None,
            page: 1,
            page_size,
        }
    }

    pub fn page(mut self, page: i32) -> Self {
        self.page = page;
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn author(mut self, author_id: AuthorId) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Reject out-of-range paging and filter ids.
    ///
    /// An absent filter is fine; an explicitly supplied id must be positive.
    pub fn validate(&self) -> Result<(), ShopError> {
        if self.page < 1 {
            tracing::warn!(page = self.page, "invalid page number");
            return Err(ShopError::invalid("page", "must be at least 1"));
        }
        if self.page_size < 1 {
            tracing::warn!(page_size = self.page_size, "invalid page size");
            return Err(ShopError::invalid("page_size", "must be at least 1"));
        }
        if let Some(category_id) = self.category_id {
            ShopError::require_positive("category_id", category_id)?;
        }
        if let Some(author_id) = self.author_id {
            ShopError::require_positive("author_id", author_id)?;
        }
        Ok(())
    }

    /// The search term with surrounding whitespace removed, if anything is left.
    pub fn normalized_search(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string)
    }

    fn lowercase_term(&self) -> Option<String> {
        self.normalized_search().map(|term| term.to_lowercase())
    }

    fn matches(&self, entry: &BookEntry, term: Option<&str>) -> bool {
        let book = &entry.book;
        if !book.active {
            return false;
        }
        if self.category_id.is_some_and(|id| book.category_id != id) {
            return false;
        }
        if self.author_id.is_some_and(|id| book.author_id != id) {
            return false;
        }
        match term {
            Some(term) => matches_term(entry, term),
            None => true,
        }
    }
}

/// Case-insensitive substring match over the searchable fields.
/// `term` must already be lowercase.
fn matches_term(entry: &BookEntry, term: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(term);
    let book = &entry.book;

    contains(&book.title)
        || book.description.as_deref().is_some_and(contains)
        || contains(&book.isbn)
        || entry
            .author
            .as_ref()
            .is_some_and(|author| contains(&author.first_name) || contains(&author.last_name))
        || entry
            .category
            .as_ref()
            .is_some_and(|category| contains(&category.name))
}

/// One page of matching books and the size of the whole match set.
#[derive(Debug, Clone, PartialEq)]
pub struct BookPage {
    pub items: Vec<BookEntry>,
    /// Matches before pagination
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
}

impl BookPage {
    pub fn paging(&self) -> PagingInfo {
        PagingInfo {
            total_items: self.total_count,
            items_per_page: self.page_size,
            current_page: self.page,
        }
    }
}

/// Validate `query` and select its page from `entries`.
pub fn query_books(entries: Vec<BookEntry>, query: &BookQuery) -> Result<BookPage, ShopError> {
    query.validate()?;
    Ok(select_page(entries, query))
}

/// Filter, sort and slice `entries`; `query` must already be validated.
pub(crate) fn select_page(entries: Vec<BookEntry>, query: &BookQuery) -> BookPage {
    let term = query.lowercase_term();

    let mut matching: Vec<BookEntry> = entries
        .into_iter()
        .filter(|entry| query.matches(entry, term.as_deref()))
        .collect();

    // Title first, id breaks ties so equal titles paginate deterministically.
    matching.sort_by(|a, b| {
        a.book
            .title
            .cmp(&b.book.title)
            .then_with(|| a.book.id.cmp(&b.book.id))
    });

    let page = usize::try_from(query.page).unwrap_or(1);
    let page_size = usize::try_from(query.page_size).unwrap_or(1);
    let skip = (page - 1).saturating_mul(page_size);
    let total_count = matching.len();

    let items = matching.into_iter().skip(skip).take(page_size).collect();

    BookPage {
        items,
        total_count,
        page,
        page_size,
    }
}

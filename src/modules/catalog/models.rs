use rust_decimal::Decimal;
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use time::Date;

use bookshop_db::models::{Author, AuthorId, BookEntry, BookId, Category, CategoryId};

use super::query::BookQuery;
use crate::utils;

const UNKNOWN_AUTHOR: &str = "Unknown";
const UNCATEGORIZED: &str = "Uncategorized";

/// Pagination metadata for a catalog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingInfo {
    pub total_items: usize,
    pub items_per_page: usize,
    /// 1-based
    pub current_page: usize,
}

impl PagingInfo {
    pub fn total_pages(&self) -> usize {
        if self.items_per_page == 0 {
            return 0;
        }
        self.total_items / self.items_per_page
            + usize::from(self.total_items % self.items_per_page > 0)
    }
}

impl Serialize for PagingInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PagingInfo", 4)?;
        state.serialize_field("total_items", &self.total_items)?;
        state.serialize_field("items_per_page", &self.items_per_page)?;
        state.serialize_field("current_page", &self.current_page)?;
        state.serialize_field("total_pages", &self.total_pages())?;
        state.end()
    }
}

/// Customer-facing projection of a book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookView {
    pub id: BookId,
    pub title: String,
    pub isbn: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: u32,
    pub publication_date: Date,
    pub image_url: String,
    pub image_path: String,
    pub author_id: AuthorId,
    pub author_name: String,
    pub category_id: CategoryId,
    pub category_name: String,
}

impl From<&BookEntry> for BookView {
    fn from(entry: &BookEntry) -> Self {
        let book = &entry.book;
        Self {
            id: book.id,
            title: book.title.clone(),
            isbn: book.isbn.clone(),
            description: book.description.clone(),
            price: book.price,
            stock_quantity: book.stock_quantity,
            publication_date: book.publication_date,
            image_url: utils::image_or_placeholder(book.image_url.as_deref()),
            image_path: utils::book_image_path(book.image_url.as_deref()),
            author_id: book.author_id,
            author_name: entry
                .author
                .as_ref()
                .map(Author::full_name)
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            category_id: book.category_id,
            category_name: entry
                .category
                .as_ref()
                .map(|category| category.name.clone())
                .unwrap_or_else(|| UNCATEGORIZED.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorView {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub biography: Option<String>,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            full_name: author.full_name(),
            biography: author.biography.clone(),
        }
    }
}

/// Query string of the book list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookListParams {
    pub category_id: Option<i32>,
    pub author_id: Option<i32>,
    pub search_term: Option<String>,
    pub page: Option<i32>,
    pub page_size: Option<i32>,
}

impl BookListParams {
    /// Fill in the first page and the configured page size where absent.
    pub fn into_query(self, default_page_size: i32) -> BookQuery {
        BookQuery {
            category_id: self.category_id,
            author_id: self.author_id,
            search_term: self.search_term,
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(default_page_size),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookListResponse {
    pub items: Vec<BookView>,
    pub paging: PagingInfo,
    pub current_category: Option<String>,
    pub current_author: Option<String>,
    pub search_term: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeaturedParams {
    pub count: Option<i32>,
}

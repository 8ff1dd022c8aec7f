use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use bookshop_db::models::{AuthorId, Book, BookEntry, BookId, CategoryId};

use crate::error::ShopError;
use crate::modules::catalog::models::BookView;

fn active_by_default() -> bool {
    true
}

/// Editable fields of a book as submitted by catalog staff.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub isbn: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub stock_quantity: u32,
    pub publication_date: Date,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "active_by_default")]
    pub active: bool,
    pub author_id: AuthorId,
    pub category_id: CategoryId,
}

impl BookDraft {
    /// Field checks that need no store access.
    pub fn validate(&self) -> Result<(), ShopError> {
        if self.title.trim().is_empty() {
            return Err(ShopError::invalid("title", "is required"));
        }
        if self.isbn.trim().is_empty() {
            return Err(ShopError::invalid("isbn", "is required"));
        }
        if self.price <= Decimal::ZERO {
            return Err(ShopError::invalid("price", "must be greater than zero"));
        }
        ShopError::require_positive("author_id", self.author_id)?;
        ShopError::require_positive("category_id", self.category_id)
    }

    pub fn into_book(
        self,
        id: BookId,
        created_at: OffsetDateTime,
        modified_at: OffsetDateTime,
    ) -> Book {
        Book {
            id,
            title: self.title.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            description: self.description,
            price: self.price,
            stock_quantity: self.stock_quantity,
            publication_date: self.publication_date,
            image_url: self.image_url,
            active: self.active,
            author_id: self.author_id,
            category_id: self.category_id,
            created_at,
            modified_at,
        }
    }
}

/// Staff view of a book: the customer projection plus bookkeeping fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminBookView {
    #[serde(flatten)]
    pub book: BookView,
    pub active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
}

impl From<&BookEntry> for AdminBookView {
    fn from(entry: &BookEntry) -> Self {
        Self {
            book: BookView::from(entry),
            active: entry.book.active,
            created_at: entry.book.created_at,
            modified_at: entry.book.modified_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn draft() -> BookDraft {
        serde_json::from_value(serde_json::json!({
            "title": " Dune Messiah ",
            "isbn": "9780593098233",
            "price": "9.99",
            "publication_date": "1969-10-15",
            "author_id": 1,
            "category_id": 1
        }))
        .unwrap()
    }

    #[test]
    fn drafts_default_to_active_and_empty_stock() {
        let draft = draft();
        assert!(draft.active);
        assert_eq!(draft.stock_quantity, 0);
        assert_eq!(draft.publication_date, date!(1969 - 10 - 15));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn draft_checks_name_the_offending_field() {
        let mut untitled = draft();
        untitled.title = "   ".to_string();
        assert!(matches!(
            untitled.validate(),
            Err(ShopError::InvalidArgument { field: "title", .. })
        ));

        let mut free = draft();
        free.price = Decimal::ZERO;
        assert!(matches!(
            free.validate(),
            Err(ShopError::InvalidArgument { field: "price", .. })
        ));

        let mut orphan = draft();
        orphan.category_id = 0;
        assert!(matches!(
            orphan.validate(),
            Err(ShopError::InvalidArgument {
                field: "category_id",
                ..
            })
        ));
    }

    #[test]
    fn into_book_trims_text_and_stamps_times() {
        let created = datetime!(2024-01-01 0:00 UTC);
        let modified = datetime!(2024-02-01 0:00 UTC);
        let book = draft().into_book(5, created, modified);

        assert_eq!(book.id, 5);
        assert_eq!(book.title, "Dune Messiah");
        assert_eq!(book.created_at, created);
        assert_eq!(book.modified_at, modified);
    }
}

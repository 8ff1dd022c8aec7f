use std::sync::Arc;

use time::OffsetDateTime;

use bookshop_db::models::{BookEntry, BookId};
use bookshop_db::{CatalogRepository, CatalogWriter};

use super::models::BookDraft;
use crate::error::ShopError;

/// Book maintenance for catalog staff.
///
/// Unlike [`CatalogService`](crate::modules::catalog::CatalogService) this
/// sees inactive books. Deleting a book only deactivates it, so carts and
/// orders that mention it stay intact.
#[derive(Clone)]
pub struct CatalogAdmin {
    store: Arc<dyn CatalogWriter>,
}

impl CatalogAdmin {
    pub fn new(store: Arc<dyn CatalogWriter>) -> Self {
        Self { store }
    }

    /// Every book, active or not, ordered by title then id
    pub async fn all_books(&self) -> Result<Vec<BookEntry>, ShopError> {
        let mut entries = self.store.book_entries().await?;
        entries.sort_by(|a, b| {
            a.book
                .title
                .cmp(&b.book.title)
                .then_with(|| a.book.id.cmp(&b.book.id))
        });
        Ok(entries)
    }

    pub async fn book(&self, id: BookId) -> Result<BookEntry, ShopError> {
        ShopError::require_positive("book_id", id)?;
        self.store
            .find_book(id)
            .await?
            .ok_or_else(|| ShopError::not_found("book", id))
    }

    pub async fn add_book(&self, draft: BookDraft) -> Result<BookEntry, ShopError> {
        self.check_draft(&draft).await?;

        let now = OffsetDateTime::now_utc();
        let stored = self.store.insert_book(draft.into_book(0, now, now)).await?;

        tracing::info!(book_id = stored.id, title = %stored.title, "book added");
        self.book(stored.id).await
    }

    /// Overwrite a book's editable fields; its creation time is kept.
    pub async fn update_book(&self, id: BookId, draft: BookDraft) -> Result<BookEntry, ShopError> {
        let existing = self.book(id).await?;
        self.check_draft(&draft).await?;

        let book = draft.into_book(id, existing.book.created_at, OffsetDateTime::now_utc());
        if !self.store.replace_book(book).await? {
            return Err(ShopError::not_found("book", id));
        }

        tracing::info!(book_id = id, "book updated");
        self.book(id).await
    }

    /// Deactivate a book. Deleting an inactive book is a no-op.
    pub async fn delete_book(&self, id: BookId) -> Result<(), ShopError> {
        let mut book = self.book(id).await?.book;
        if !book.active {
            return Ok(());
        }

        book.active = false;
        book.modified_at = OffsetDateTime::now_utc();
        if !self.store.replace_book(book).await? {
            return Err(ShopError::not_found("book", id));
        }

        tracing::info!(book_id = id, "book deactivated");
        Ok(())
    }

    async fn check_draft(&self, draft: &BookDraft) -> Result<(), ShopError> {
        draft.validate()?;
        if self.store.find_author(draft.author_id).await?.is_none() {
            return Err(ShopError::invalid("author_id", "no such author"));
        }
        if self.store.find_category(draft.category_id).await?.is_none() {
            return Err(ShopError::invalid("category_id", "no such category"));
        }
        Ok(())
    }
}

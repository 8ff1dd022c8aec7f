//! Customer-facing catalog: book search, book details, featured books,
//! categories and authors.

pub mod models;
pub mod query;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshop_kernel::{InitCtx, Module};
use serde_json::{json, Value};

use crate::utils::{error_response, json_response, schema_ref};

pub use query::{query_books, BookPage, BookQuery};
pub use service::CatalogService;

pub struct CatalogModule {
    service: CatalogService,
}

impl CatalogModule {
    pub fn new(service: CatalogService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for CatalogModule {
    fn name(&self) -> &'static str {
        "catalog"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            page_size = self.service.settings().default_page_size,
            "catalog module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "catalog module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "catalog module stopped");
        Ok(())
    }
}

fn id_parameter(name: &str) -> Value {
    json!({
        "name": name,
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int32", "minimum": 1 }
    })
}

fn query_parameter(name: &str, kind: &str, description: &str) -> Value {
    json!({
        "name": name,
        "in": "query",
        "required": false,
        "description": description,
        "schema": { "type": kind }
    })
}

fn openapi_fragment() -> Value {
    json!({
        "paths": {
            "/books": { "get": list_books_operation() },
            "/books/featured": { "get": featured_books_operation() },
            "/books/{id}": {
                "get": lookup_operation("Book details", "Book", "No such active book")
            },
            "/categories": {
                "get": list_operation("Active categories", "Categories ordered by name", "Category")
            },
            "/categories/{id}": {
                "get": lookup_operation("Category details", "Category", "No such category")
            },
            "/authors": {
                "get": list_operation("Active authors", "Authors ordered by last name", "Author")
            },
            "/authors/{id}": {
                "get": lookup_operation("Author details", "Author", "No such author")
            }
        },
        "components": {
            "schemas": {
                "Book": book_schema(),
                "BookList": book_list_schema(),
                "Category": category_schema(),
                "Author": author_schema()
            }
        }
    })
}

fn list_books_operation() -> Value {
    json!({
        "summary": "Search the catalog",
        "tags": ["Catalog"],
        "parameters": [
            query_parameter("category_id", "integer", "Only books in this category"),
            query_parameter("author_id", "integer", "Only books by this author"),
            query_parameter("search_term", "string", "Matches title, description, ISBN, author or category"),
            query_parameter("page", "integer", "1-based page number"),
            query_parameter("page_size", "integer", "Books per page")
        ],
        "responses": {
            "200": json_response("One page of matching books", schema_ref("BookList")),
            "422": error_response("Invalid paging or filter"),
            "503": error_response("Catalog unavailable")
        }
    })
}

fn featured_books_operation() -> Value {
    json!({
        "summary": "Newest books",
        "tags": ["Catalog"],
        "parameters": [query_parameter("count", "integer", "Number of books")],
        "responses": {
            "200": json_response("Featured books", array_of("Book")),
            "422": error_response("Invalid count")
        }
    })
}

fn list_operation(summary: &str, description: &str, schema: &str) -> Value {
    json!({
        "summary": summary,
        "tags": ["Catalog"],
        "responses": {
            "200": json_response(description, array_of(schema)),
            "503": error_response("Catalog unavailable")
        }
    })
}

fn lookup_operation(summary: &str, schema: &str, missing: &str) -> Value {
    json!({
        "summary": summary,
        "tags": ["Catalog"],
        "parameters": [id_parameter("id")],
        "responses": {
            "200": json_response(summary, schema_ref(schema)),
            "404": error_response(missing),
            "422": error_response("Invalid id")
        }
    })
}

fn array_of(schema: &str) -> Value {
    json!({ "type": "array", "items": schema_ref(schema) })
}

fn book_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer" },
            "title": { "type": "string" },
            "isbn": { "type": "string" },
            "description": { "type": ["string", "null"] },
            "price": { "type": "string", "description": "Decimal amount" },
            "stock_quantity": { "type": "integer" },
            "publication_date": { "type": "string", "format": "date" },
            "image_url": { "type": "string" },
            "image_path": { "type": "string" },
            "author_id": { "type": "integer" },
            "author_name": { "type": "string" },
            "category_id": { "type": "integer" },
            "category_name": { "type": "string" }
        },
        "required": ["id", "title", "isbn", "price", "author_id", "category_id"]
    })
}

fn book_list_schema() -> Value {
    let paging = json!({
        "type": "object",
        "properties": {
            "total_items": { "type": "integer" },
            "items_per_page": { "type": "integer" },
            "current_page": { "type": "integer" },
            "total_pages": { "type": "integer" }
        }
    });

    json!({
        "type": "object",
        "properties": {
            "items": array_of("Book"),
            "paging": paging,
            "current_category": { "type": ["string", "null"] },
            "current_author": { "type": ["string", "null"] },
            "search_term": { "type": ["string", "null"] }
        },
        "required": ["items", "paging"]
    })
}

fn category_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer" },
            "name": { "type": "string" },
            "description": { "type": ["string", "null"] }
        },
        "required": ["id", "name"]
    })
}

fn author_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer" },
            "first_name": { "type": "string" },
            "last_name": { "type": "string" },
            "full_name": { "type": "string" },
            "biography": { "type": ["string", "null"] }
        },
        "required": ["id", "first_name", "last_name", "full_name"]
    })
}

/// Create the catalog module around a shared service
pub fn create_module(service: CatalogService) -> Arc<dyn Module> {
    Arc::new(CatalogModule::new(service))
}

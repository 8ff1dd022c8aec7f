//! Book maintenance for catalog staff: list every book, add, edit and
//! deactivate books.

pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshop_kernel::{InitCtx, Module};
use serde_json::{json, Value};

use crate::utils::{error_response, json_response, schema_ref};

pub use service::CatalogAdmin;

pub struct AdminModule {
    admin: CatalogAdmin,
}

impl AdminModule {
    pub fn new(admin: CatalogAdmin) -> Self {
        Self { admin }
    }
}

#[async_trait]
impl Module for AdminModule {
    fn name(&self) -> &'static str {
        "admin"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "admin module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.admin.clone())
    }

    fn openapi(&self) -> Option<Value> {
        Some(openapi_fragment())
    }
}

fn id_parameter() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int32", "minimum": 1 }
    })
}

fn draft_body() -> Value {
    json!({
        "required": true,
        "content": { "application/json": { "schema": schema_ref("BookDraft") } }
    })
}

fn draft_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "isbn": { "type": "string" },
            "description": { "type": ["string", "null"] },
            "price": { "type": "string", "description": "Decimal amount greater than zero" },
            "stock_quantity": { "type": "integer", "minimum": 0, "default": 0 },
            "publication_date": { "type": "string", "format": "date" },
            "image_url": { "type": ["string", "null"] },
            "active": { "type": "boolean", "default": true },
            "author_id": { "type": "integer" },
            "category_id": { "type": "integer" }
        },
        "required": ["title", "isbn", "price", "publication_date", "author_id", "category_id"]
    })
}

fn admin_book_schema() -> Value {
    json!({
        "allOf": [
            schema_ref("Book"),
            {
                "type": "object",
                "properties": {
                    "active": { "type": "boolean" },
                    "created_at": { "type": "string", "format": "date-time" },
                    "modified_at": { "type": "string", "format": "date-time" }
                },
                "required": ["active", "created_at", "modified_at"]
            }
        ]
    })
}

fn openapi_fragment() -> Value {
    let list = json!({
        "summary": "Every book, including inactive ones",
        "tags": ["Admin"],
        "responses": {
            "200": json_response(
                "Books by title",
                json!({ "type": "array", "items": schema_ref("AdminBook") })
            ),
            "503": error_response("Data store unavailable")
        }
    });
    let create = json!({
        "summary": "Add a book",
        "tags": ["Admin"],
        "requestBody": draft_body(),
        "responses": {
            "201": json_response("The stored book", schema_ref("AdminBook")),
            "422": error_response("Invalid book fields or unknown author or category")
        }
    });
    let details = json!({
        "summary": "Book details, active or not",
        "tags": ["Admin"],
        "parameters": [id_parameter()],
        "responses": {
            "200": json_response("The book", schema_ref("AdminBook")),
            "404": error_response("No such book")
        }
    });
    let update = json!({
        "summary": "Replace a book's editable fields",
        "tags": ["Admin"],
        "parameters": [id_parameter()],
        "requestBody": draft_body(),
        "responses": {
            "200": json_response("The updated book", schema_ref("AdminBook")),
            "404": error_response("No such book"),
            "422": error_response("Invalid book fields or unknown author or category")
        }
    });
    let delete = json!({
        "summary": "Deactivate a book",
        "tags": ["Admin"],
        "parameters": [id_parameter()],
        "responses": {
            "204": { "description": "Book deactivated" },
            "404": error_response("No such book")
        }
    });

    json!({
        "paths": {
            "/books": { "get": list, "post": create },
            "/books/{id}": { "get": details, "put": update, "delete": delete }
        },
        "components": {
            "schemas": {
                "BookDraft": draft_schema(),
                "AdminBook": admin_book_schema()
            }
        }
    })
}

/// Create the admin module around a shared catalog admin service
pub fn create_module(admin: CatalogAdmin) -> Arc<dyn Module> {
    Arc::new(AdminModule::new(admin))
}

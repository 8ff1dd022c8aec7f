//! Session shopping cart.

pub mod aggregator;
pub mod models;
pub mod routes;
pub mod session;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshop_kernel::{InitCtx, Module};
use serde_json::{json, Value};

use crate::utils::{error_response, json_response, schema_ref};

pub use aggregator::CartAggregator;
pub use session::{MemorySessionStore, SessionId, SessionStore};

pub struct CartModule {
    cart: CartAggregator,
}

impl CartModule {
    pub fn new(cart: CartAggregator) -> Self {
        Self { cart }
    }
}

#[async_trait]
impl Module for CartModule {
    fn name(&self) -> &'static str {
        "cart"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "cart module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.cart.clone())
    }

    fn openapi(&self) -> Option<Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "cart module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "cart module stopped");
        Ok(())
    }
}

fn session_header() -> Value {
    json!({
        "name": session::SESSION_HEADER,
        "in": "header",
        "required": true,
        "schema": { "type": "string", "minLength": 1, "maxLength": 128 }
    })
}

fn book_id_parameter() -> Value {
    json!({
        "name": "book_id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int32" }
    })
}

fn cart_operation(summary: &str, body: Option<&str>, path_param: bool) -> Value {
    let mut parameters = vec![session_header()];
    if path_param {
        parameters.push(book_id_parameter());
    }

    let mut operation = json!({
        "summary": summary,
        "tags": ["Cart"],
        "parameters": parameters,
        "responses": {
            "200": json_response("The cart after the change", schema_ref("Cart")),
            "400": error_response("Missing or malformed session header"),
            "404": error_response("Book not in the catalog"),
            "422": error_response("Invalid quantity")
        }
    });
    if let Some(schema) = body {
        operation["requestBody"] = json!({
            "required": true,
            "content": { "application/json": { "schema": schema_ref(schema) } }
        });
    }
    operation
}

fn openapi_fragment() -> Value {
    let cart_line = json!({
        "type": "object",
        "properties": {
            "book_id": { "type": "integer" },
            "title": { "type": "string" },
            "author_name": { "type": "string" },
            "unit_price": { "type": "string" },
            "quantity": { "type": "integer" },
            "subtotal": { "type": "string" },
            "image_url": { "type": "string" }
        }
    });
    let cart = json!({
        "type": "object",
        "properties": {
            "items": { "type": "array", "items": schema_ref("CartLine") },
            "total_price": { "type": "string" }
        },
        "required": ["items", "total_price"]
    });
    let add_item = json!({
        "type": "object",
        "properties": {
            "book_id": { "type": "integer" },
            "quantity": { "type": "integer", "default": 1 }
        },
        "required": ["book_id"]
    });
    let set_quantity = json!({
        "type": "object",
        "properties": { "quantity": { "type": "integer" } },
        "required": ["quantity"]
    });

    let mut show = cart_operation("Show the cart", None, false);
    show["responses"]["200"] = json_response("Current cart", schema_ref("Cart"));

    let mut clear = cart_operation("Empty the cart", None, false);
    if let Some(responses) = clear["responses"].as_object_mut() {
        responses.remove("200");
        responses.insert("204".to_string(), json!({ "description": "Cart emptied" }));
    }

    let mut count = cart_operation("Number of copies in the cart", None, false);
    count["responses"]["200"] = json_response(
        "Copy count",
        json!({ "type": "object", "properties": { "count": { "type": "integer" } } }),
    );

    json!({
        "paths": {
            "/": { "get": show, "delete": clear },
            "/count": { "get": count },
            "/items": { "post": cart_operation("Add a book", Some("AddCartItem"), false) },
            "/items/{book_id}": {
                "put": cart_operation("Change a line's quantity", Some("SetCartQuantity"), true),
                "delete": cart_operation("Remove a line", None, true)
            }
        },
        "components": {
            "schemas": {
                "Cart": cart,
                "CartLine": cart_line,
                "AddCartItem": add_item,
                "SetCartQuantity": set_quantity
            }
        }
    })
}

/// Create the cart module around a shared aggregator
pub fn create_module(cart: CartAggregator) -> Arc<dyn Module> {
    Arc::new(CartModule::new(cart))
}

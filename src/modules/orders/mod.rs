//! Checkout and order history.

pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshop_kernel::{InitCtx, Module};
use serde_json::{json, Value};

use crate::utils::{error_response, json_response, schema_ref};

pub use service::OrderService;

pub struct OrdersModule {
    orders: OrderService,
}

impl OrdersModule {
    pub fn new(orders: OrderService) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl Module for OrdersModule {
    fn name(&self) -> &'static str {
        "orders"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "orders module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.orders.clone())
    }

    fn openapi(&self) -> Option<Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "orders module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "orders module stopped");
        Ok(())
    }
}

fn order_schema() -> Value {
    let item = json!({
        "type": "object",
        "properties": {
            "book_id": { "type": "integer" },
            "quantity": { "type": "integer", "minimum": 1 },
            "unit_price": { "type": "string" },
            "total_price": { "type": "string" }
        }
    });

    json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer" },
            "customer_id": { "type": "integer" },
            "order_date": { "type": "string", "format": "date-time" },
            "total_amount": { "type": "string" },
            "status": { "type": "string", "enum": ["pending", "shipped", "delivered"] },
            "notes": { "type": ["string", "null"] },
            "shipping_address": { "type": ["string", "null"] },
            "shipped_date": { "type": ["string", "null"], "format": "date-time" },
            "delivery_date": { "type": ["string", "null"], "format": "date-time" },
            "items": { "type": "array", "items": item }
        },
        "required": ["id", "customer_id", "order_date", "total_amount", "status", "items"]
    })
}

fn openapi_fragment() -> Value {
    let place_order = json!({
        "type": "object",
        "properties": {
            "customer_id": { "type": "integer", "minimum": 1 },
            "shipping_address": { "type": "string" },
            "notes": { "type": "string" }
        },
        "required": ["customer_id"]
    });

    let list = json!({
        "summary": "Orders of a customer",
        "tags": ["Orders"],
        "parameters": [{
            "name": "customer_id",
            "in": "query",
            "required": true,
            "schema": { "type": "integer" }
        }],
        "responses": {
            "200": json_response("Orders by id", json!({ "type": "array", "items": schema_ref("Order") })),
            "422": error_response("Invalid customer id")
        }
    });

    let create = json!({
        "summary": "Check out the session cart",
        "tags": ["Orders"],
        "parameters": [{
            "name": "x-session-id",
            "in": "header",
            "required": true,
            "schema": { "type": "string" }
        }],
        "requestBody": {
            "required": true,
            "content": { "application/json": { "schema": schema_ref("PlaceOrder") } }
        },
        "responses": {
            "201": json_response("The stored order", schema_ref("Order")),
            "400": error_response("Missing or malformed session header"),
            "422": error_response("Invalid customer id or empty cart")
        }
    });

    let details = json!({
        "summary": "Order details",
        "tags": ["Orders"],
        "parameters": [{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer" }
        }],
        "responses": {
            "200": json_response("The order", schema_ref("Order")),
            "404": error_response("No such order")
        }
    });

    json!({
        "paths": {
            "/": { "get": list, "post": create },
            "/{id}": { "get": details }
        },
        "components": {
            "schemas": {
                "Order": order_schema(),
                "PlaceOrder": place_order
            }
        }
    })
}

/// Create the orders module around a shared order service
pub fn create_module(orders: OrderService) -> Arc<dyn Module> {
    Arc::new(OrdersModule::new(orders))
}

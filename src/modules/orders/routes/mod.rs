use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use bookshop_http::error::AppError;
use bookshop_http::extract::{ApiJson, ApiPath, ApiQuery};

use super::models::{CustomerOrdersParams, OrderView, PlaceOrderRequest};
use super::service::OrderService;
use crate::modules::cart::SessionId;

pub fn router(orders: OrderService) -> Router {
    Router::new()
        .route("/", get(customer_orders).post(place_order))
        .route("/{id}", get(order_details))
        .with_state(orders)
}

async fn place_order(
    State(orders): State<OrderService>,
    session: SessionId,
    ApiJson(request): ApiJson<PlaceOrderRequest>,
) -> Result<Response, AppError> {
    let order = orders.place_order(session.as_str(), request).await?;
    let location = format!("/api/orders/{}", order.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(OrderView::from(&order)),
    )
        .into_response())
}

async fn customer_orders(
    State(orders): State<OrderService>,
    ApiQuery(params): ApiQuery<CustomerOrdersParams>,
) -> Result<Json<Vec<OrderView>>, AppError> {
    let found = orders.customer_orders(params.customer_id).await?;
    Ok(Json(found.iter().map(OrderView::from).collect()))
}

async fn order_details(
    State(orders): State<OrderService>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<OrderView>, AppError> {
    let order = orders.order(id).await?;
    Ok(Json(OrderView::from(&order)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::cart::{CartAggregator, MemorySessionStore};
    use crate::modules::testing::{catalog_service, shop};
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request},
    };
    use bookshop_db::MemoryStore;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn app_with_cart() -> Router {
        let cart = CartAggregator::new(
            Arc::new(MemorySessionStore::new()),
            catalog_service(shop()),
        );
        cart.add_item("buyer", 2, 3).await.unwrap();
        router(OrderService::new(Arc::new(MemoryStore::new()), cart))
    }

    fn place(session: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/")
            .header("x-session-id", session)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn placing_an_order_returns_created_with_location() {
        let app = app_with_cart().await;

        let response = app
            .clone()
            .oneshot(place("buyer", json!({ "customer_id": 11, "notes": "gift wrap" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/api/orders/1");

        let order = json_body(response).await;
        assert_eq!(order["status"], "pending");
        assert_eq!(order["total_amount"], "29.97");
        assert_eq!(order["notes"], "gift wrap");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/?customer_id=11")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let listed = json_body(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["items"][0]["quantity"], 3);
    }

    #[tokio::test]
    async fn empty_cart_checkout_is_unprocessable() {
        let app = app_with_cart().await;
        let response = app
            .oneshot(place("someone-else", json!({ "customer_id": 11 })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["details"][0]["field"], "cart");
    }

    #[tokio::test]
    async fn listing_without_customer_id_is_an_enveloped_bad_request() {
        let app = app_with_cart().await;
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let app = app_with_cart().await;
        let response = app
            .oneshot(Request::builder().uri("/42").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use bookshop_http::error::AppError;
use bookshop_http::extract::{ApiJson, ApiPath};

use super::aggregator::CartAggregator;
use super::models::{AddItemRequest, CartCount, CartView, SetQuantityRequest};
use super::session::SessionId;

pub fn router(cart: CartAggregator) -> Router {
    Router::new()
        .route("/", get(show_cart).delete(clear_cart))
        .route("/count", get(cart_count))
        .route("/items", post(add_item))
        .route("/items/{book_id}", put(set_quantity).delete(remove_item))
        .with_state(cart)
}

async fn show_cart(
    State(cart): State<CartAggregator>,
    session: SessionId,
) -> Result<Json<CartView>, AppError> {
    Ok(Json(cart.render(session.as_str()).await?))
}

async fn cart_count(State(cart): State<CartAggregator>, session: SessionId) -> Json<CartCount> {
    Json(CartCount {
        count: cart.count(session.as_str()).await,
    })
}

async fn add_item(
    State(cart): State<CartAggregator>,
    session: SessionId,
    ApiJson(request): ApiJson<AddItemRequest>,
) -> Result<Json<CartView>, AppError> {
    cart.add_item(session.as_str(), request.book_id, request.quantity)
        .await?;
    Ok(Json(cart.render(session.as_str()).await?))
}

async fn set_quantity(
    State(cart): State<CartAggregator>,
    session: SessionId,
    ApiPath(book_id): ApiPath<i32>,
    ApiJson(request): ApiJson<SetQuantityRequest>,
) -> Result<Json<CartView>, AppError> {
    cart.set_quantity(session.as_str(), book_id, request.quantity)
        .await?;
    Ok(Json(cart.render(session.as_str()).await?))
}

async fn remove_item(
    State(cart): State<CartAggregator>,
    session: SessionId,
    ApiPath(book_id): ApiPath<i32>,
) -> Result<Json<CartView>, AppError> {
    cart.remove_item(session.as_str(), book_id).await;
    Ok(Json(cart.render(session.as_str()).await?))
}

async fn clear_cart(State(cart): State<CartAggregator>, session: SessionId) -> StatusCode {
    cart.clear(session.as_str()).await;
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::cart::session::MemorySessionStore;
    use crate::modules::testing::{catalog_service, shop};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request},
        response::Response,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let sessions = Arc::new(MemorySessionStore::new());
        router(CartAggregator::new(sessions, catalog_service(shop())))
    }

    fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-session-id", "test-session");
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_session_header_is_a_bad_request() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn add_update_and_count_through_the_api() {
        let app = app();

        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/items",
                Some(json!({ "book_id": 7, "quantity": 2 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cart = json_body(response).await;
        assert_eq!(cart["items"][0]["title"], "Neuromancer");
        assert_eq!(cart["total_price"], "15.00");

        let response = app
            .clone()
            .oneshot(request(
                Method::PUT,
                "/items/7",
                Some(json!({ "quantity": 5 })),
            ))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["items"][0]["quantity"], 5);

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/count", None))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["count"], 5);
    }

    #[tokio::test]
    async fn unknown_book_is_not_found_and_bad_quantity_unprocessable() {
        let app = app();

        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/items",
                Some(json!({ "book_id": 404 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(request(
                Method::POST,
                "/items",
                Some(json!({ "book_id": 7, "quantity": 0 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn mistyped_body_and_path_use_the_error_envelope() {
        let response = app()
            .oneshot(request(
                Method::PUT,
                "/items/7",
                Some(json!({ "quantity": "x" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "validation_error");

        let response = app()
            .oneshot(request(Method::DELETE, "/items/seven", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn remove_and_clear_empty_the_cart() {
        let app = app();
        app.clone()
            .oneshot(request(
                Method::POST,
                "/items",
                Some(json!({ "book_id": 1 })),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(request(Method::DELETE, "/items/1", None))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["items"], json!([]));

        let response = app
            .clone()
            .oneshot(request(Method::DELETE, "/", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}

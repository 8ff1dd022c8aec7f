use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use bookshop_http::error::AppError;
use bookshop_http::extract::{ApiJson, ApiPath};

use super::models::{AdminBookView, BookDraft};
use super::service::CatalogAdmin;

pub fn router(admin: CatalogAdmin) -> Router {
    Router::new()
        .route("/books", get(list_books).post(add_book))
        .route(
            "/books/{id}",
            get(book_details).put(update_book).delete(delete_book),
        )
        .with_state(admin)
}

async fn list_books(
    State(admin): State<CatalogAdmin>,
) -> Result<Json<Vec<AdminBookView>>, AppError> {
    let books = admin.all_books().await?;
    Ok(Json(books.iter().map(AdminBookView::from).collect()))
}

async fn add_book(
    State(admin): State<CatalogAdmin>,
    ApiJson(draft): ApiJson<BookDraft>,
) -> Result<Response, AppError> {
    let entry = admin.add_book(draft).await?;
    let location = format!("/api/admin/books/{}", entry.book.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(AdminBookView::from(&entry)),
    )
        .into_response())
}

async fn book_details(
    State(admin): State<CatalogAdmin>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<AdminBookView>, AppError> {
    let entry = admin.book(id).await?;
    Ok(Json(AdminBookView::from(&entry)))
}

async fn update_book(
    State(admin): State<CatalogAdmin>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(draft): ApiJson<BookDraft>,
) -> Result<Json<AdminBookView>, AppError> {
    let entry = admin.update_book(id, draft).await?;
    Ok(Json(AdminBookView::from(&entry)))
}

async fn delete_book(
    State(admin): State<CatalogAdmin>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, AppError> {
    admin.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::query::fixtures::{author, book, category};
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request},
    };
    use bookshop_db::{MemoryStore, SeedData};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let seed = SeedData {
            authors: vec![author(1, "Frank", "Herbert")],
            categories: vec![category(1, "Science Fiction")],
            books: vec![book(1, "Dune", 1099)],
        };
        router(CatalogAdmin::new(Arc::new(
            MemoryStore::from_seed(seed).unwrap(),
        )))
    }

    fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    fn draft() -> Value {
        json!({
            "title": "Dune Messiah",
            "isbn": "9780593098233",
            "price": "9.99",
            "publication_date": "1969-10-15",
            "author_id": 1,
            "category_id": 1
        })
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_answers_created_with_location() {
        let app = app();

        let response = app
            .clone()
            .oneshot(request(Method::POST, "/books", Some(draft())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/api/admin/books/2");

        let created = json_body(response).await;
        assert_eq!(created["title"], "Dune Messiah");
        assert_eq!(created["price"], "9.99");
        assert_eq!(created["active"], true);
        assert_eq!(created["author_name"], "Frank Herbert");

        let response = app
            .oneshot(request(Method::GET, "/books", None))
            .await
            .unwrap();
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_and_delete_keep_the_book_listed() {
        let app = app();

        let mut changed = draft();
        changed["title"] = json!("Dune");
        changed["price"] = json!("12.50");
        let response = app
            .clone()
            .oneshot(request(Method::PUT, "/books/1", Some(changed)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["price"], "12.50");

        let response = app
            .clone()
            .oneshot(request(Method::DELETE, "/books/1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(request(Method::GET, "/books/1", None))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["active"], false);
    }

    #[tokio::test]
    async fn invalid_drafts_are_unprocessable() {
        let mut free = draft();
        free["price"] = json!("0");
        let response = app()
            .oneshot(request(Method::POST, "/books", Some(free)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "validation_error");
        assert_eq!(body["error"]["details"][0]["field"], "price");
    }

    #[tokio::test]
    async fn missing_books_are_not_found() {
        let response = app()
            .oneshot(request(Method::DELETE, "/books/9", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], "not_found");
    }
}

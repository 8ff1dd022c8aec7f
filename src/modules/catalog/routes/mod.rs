use axum::{extract::State, routing::get, Json, Router};

use bookshop_http::error::AppError;
use bookshop_http::extract::{ApiPath, ApiQuery};

use super::models::{
    AuthorView, BookListParams, BookListResponse, BookView, CategoryView, FeaturedParams,
};
use super::service::CatalogService;

pub fn router(service: CatalogService) -> Router {
    Router::new()
        .route("/books", get(list_books))
        .route("/books/featured", get(featured_books))
        .route("/books/{id}", get(book_details))
        .route("/categories", get(list_categories))
        .route("/categories/{id}", get(category_details))
        .route("/authors", get(list_authors))
        .route("/authors/{id}", get(author_details))
        .with_state(service)
}

async fn list_books(
    State(service): State<CatalogService>,
    ApiQuery(params): ApiQuery<BookListParams>,
) -> Result<Json<BookListResponse>, AppError> {
    let query = params.into_query(service.settings().default_page_size);
    Ok(Json(service.book_list(&query).await?))
}

async fn featured_books(
    State(service): State<CatalogService>,
    ApiQuery(params): ApiQuery<FeaturedParams>,
) -> Result<Json<Vec<BookView>>, AppError> {
    let count = params.count.unwrap_or(service.settings().featured_count);
    let books = service.featured_books(count).await?;
    Ok(Json(books.iter().map(BookView::from).collect()))
}

async fn book_details(
    State(service): State<CatalogService>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<BookView>, AppError> {
    let entry = service.find_book(id).await?;
    Ok(Json(BookView::from(&entry)))
}

async fn list_categories(
    State(service): State<CatalogService>,
) -> Result<Json<Vec<CategoryView>>, AppError> {
    let categories = service.active_categories().await?;
    Ok(Json(categories.iter().map(CategoryView::from).collect()))
}

async fn category_details(
    State(service): State<CatalogService>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<CategoryView>, AppError> {
    let category = service.category(id).await?;
    Ok(Json(CategoryView::from(&category)))
}

async fn list_authors(
    State(service): State<CatalogService>,
) -> Result<Json<Vec<AuthorView>>, AppError> {
    let authors = service.active_authors().await?;
    Ok(Json(authors.iter().map(AuthorView::from).collect()))
}

async fn author_details(
    State(service): State<CatalogService>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<AuthorView>, AppError> {
    let author = service.author(id).await?;
    Ok(Json(AuthorView::from(&author)))
}

//! HTTP handlers for the books resource.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use shelf_http::error::AppError;

use super::models::{BookDeletedEnvelope, BookEnvelope, BookFields, BookPayload, BooksEnvelope};
use super::repository::BookRepository;

pub type SharedBookRepository = Arc<dyn BookRepository>;

/// Collection routes at `/books`, item routes at `/book/{id}`
pub fn router(repository: SharedBookRepository) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/book/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/books/health", get(health_check))
        .with_state(repository)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("book {id} not found"))
}

/// Get all books
async fn list_books(
    State(repository): State<SharedBookRepository>,
) -> Result<Json<BooksEnvelope>, AppError> {
    let books = repository.find_all().await?;
    Ok(Json(BooksEnvelope { books }))
}

/// Create a new book
async fn create_book(
    State(repository): State<SharedBookRepository>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<BookEnvelope>), AppError> {
    let Json(payload) = payload?;
    let fields = BookFields::try_from(payload)?;
    let book = repository.insert(fields).await?;
    Ok((StatusCode::CREATED, Json(BookEnvelope { book })))
}

/// Get one book by id
async fn get_book(
    State(repository): State<SharedBookRepository>,
    Path(id): Path<i64>,
) -> Result<Json<BookEnvelope>, AppError> {
    let book = repository.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(BookEnvelope { book }))
}

/// Update a book
///
/// A missing id is reported before the body is looked at.
async fn update_book(
    State(repository): State<SharedBookRepository>,
    Path(id): Path<i64>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<Json<BookEnvelope>, AppError> {
    if repository.find_by_id(id).await?.is_none() {
        return Err(not_found(id));
    }

    let Json(payload) = payload?;
    let fields = BookFields::try_from(payload)?;
    let book = repository
        .update(id, fields)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(BookEnvelope { book }))
}

/// Delete a book
async fn delete_book(
    State(repository): State<SharedBookRepository>,
    Path(id): Path<i64>,
) -> Result<Json<BookDeletedEnvelope>, AppError> {
    let bookdeleted = repository.delete(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(BookDeletedEnvelope { bookdeleted }))
}

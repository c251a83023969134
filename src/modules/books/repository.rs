//! Persistence for books.

use async_trait::async_trait;
use sqlx::SqlitePool;
use time::OffsetDateTime;

use shelf_http::error::AppError;

use super::models::{Book, BookFields};

/// Storage operations behind the books endpoints.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Every stored book, in storage order.
    async fn find_all(&self) -> Result<Vec<Book>, AppError>;

    /// Store a new book and return it with its assigned id and timestamp.
    async fn insert(&self, fields: BookFields) -> Result<Book, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, AppError>;

    /// Overwrite title and author; `None` when the id does not exist.
    async fn update(&self, id: i64, fields: BookFields) -> Result<Option<Book>, AppError>;

    /// Remove the book, returning its last stored state.
    async fn delete(&self, id: i64) -> Result<Option<Book>, AppError>;
}

/// SQLite implementation of [`BookRepository`].
pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, AppError> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, date_added
            FROM books
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn insert(&self, fields: BookFields) -> Result<Book, AppError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, date_added)
            VALUES (?, ?, ?)
            RETURNING id, title, author, date_added
            "#,
        )
        .bind(fields.title)
        .bind(fields.author)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(book_id = book.id, "book created");
        Ok(book)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, AppError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, date_added
            FROM books
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn update(&self, id: i64, fields: BookFields) -> Result<Option<Book>, AppError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = ?, author = ?
            WHERE id = ?
            RETURNING id, title, author, date_added
            "#,
        )
        .bind(fields.title)
        .bind(fields.author)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if book.is_some() {
            tracing::info!(book_id = id, "book updated");
        }
        Ok(book)
    }

    async fn delete(&self, id: i64) -> Result<Option<Book>, AppError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            DELETE FROM books
            WHERE id = ?
            RETURNING id, title, author, date_added
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if book.is_some() {
            tracing::info!(book_id = id, "book deleted");
        }
        Ok(book)
    }
}

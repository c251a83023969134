use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use validator::Validate;

use shelf_http::error::AppError;

/// A row of the `books` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    /// Storage-assigned identifier, never reused
    pub id: i64,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: Option<String>,
    /// When the book was added; set by the service on insert
    #[serde(with = "time::serde::rfc3339")]
    pub date_added: OffsetDateTime,
}

/// Request body accepted by create and update.
///
/// Both calls overwrite every user-settable field, so an omitted `author`
/// is stored as null.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BookPayload {
    #[validate(
        required(message = "title is required"),
        length(min = 1, max = 90, message = "title must be 1-90 characters")
    )]
    pub title: Option<String>,
    #[validate(length(max = 75, message = "author must be at most 75 characters"))]
    pub author: Option<String>,
}

/// Validated field values written by insert and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub author: Option<String>,
}

impl TryFrom<BookPayload> for BookFields {
    type Error = AppError;

    fn try_from(payload: BookPayload) -> Result<Self, Self::Error> {
        payload.validate()?;

        // `required` has already rejected a missing title
        Ok(Self {
            title: payload.title.unwrap_or_default(),
            author: payload.author,
        })
    }
}

/// `{"books": [...]}`
#[derive(Debug, Serialize, Deserialize)]
pub struct BooksEnvelope {
    pub books: Vec<Book>,
}

/// `{"book": {...}}`
#[derive(Debug, Serialize, Deserialize)]
pub struct BookEnvelope {
    pub book: Book,
}

/// `{"bookdeleted": {...}}`
#[derive(Debug, Serialize, Deserialize)]
pub struct BookDeletedEnvelope {
    pub bookdeleted: Book,
}

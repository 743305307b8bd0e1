//! Book Query Handlers

use serde::Serialize;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{BookRecord, BookRepositoryPort};
use crate::application::queries::{GetBook, ListBooks};
use crate::domain::book::{Book, BookId};

// ============================================================================
// Response DTOs
// ============================================================================

/// 书籍详情响应（包含全部章节与段落）
#[derive(Debug, Clone, Serialize)]
pub struct BookResponse {
    pub id: BookId,
    pub created_at: String,
    #[serde(flatten)]
    pub book: Book,
}

impl From<BookRecord> for BookResponse {
    fn from(record: BookRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.created_at.to_rfc3339(),
            book: record.book,
        }
    }
}

/// 书籍摘要
#[derive(Debug, Clone, Serialize)]
pub struct BookSummary {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub language_id: String,
    pub chapter_count: usize,
    pub paragraph_count: usize,
    pub cover_image_path: Option<String>,
    pub created_at: String,
}

impl From<&BookRecord> for BookSummary {
    fn from(record: &BookRecord) -> Self {
        let book = &record.book;
        Self {
            id: record.id,
            title: book.title().to_string(),
            author: book.author().to_string(),
            language_id: book.language_id().to_string(),
            chapter_count: book.chapter_count(),
            paragraph_count: book.paragraph_count(),
            cover_image_path: book.cover_image_path().map(str::to_string),
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GetBook Handler
pub struct GetBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl GetBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, query: GetBook) -> Result<BookResponse, ApplicationError> {
        let record = self
            .book_repo
            .find_by_id(query.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", query.book_id))?;

        Ok(BookResponse::from(record))
    }
}

/// ListBooks Handler
pub struct ListBooksHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl ListBooksHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, _query: ListBooks) -> Result<Vec<BookSummary>, ApplicationError> {
        let records = self.book_repo.find_all().await?;
        Ok(records.iter().map(BookSummary::from).collect())
    }
}

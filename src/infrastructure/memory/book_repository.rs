//! In-Memory Book Repository Implementation

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::application::ports::{BookRecord, BookRepositoryPort, RepositoryError};
use crate::domain::book::{Book, BookId};

/// 内存书籍仓储
///
/// 每条记录带一个递增序号，用于按保存顺序列出
pub struct InMemoryBookRepository {
    books: DashMap<BookId, (u64, BookRecord)>,
    next_seq: AtomicU64,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self {
            books: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookRepositoryPort for InMemoryBookRepository {
    async fn add(&self, book: &Book) -> Result<BookId, RepositoryError> {
        let id = BookId::new();
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let record = BookRecord {
            id,
            book: book.clone(),
            created_at: Utc::now(),
        };
        self.books.insert(id, (seq, record));

        tracing::debug!(book_id = %id, title = %book.title(), "Book stored");
        Ok(id)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<BookRecord>, RepositoryError> {
        Ok(self.books.get(&id).map(|entry| entry.1.clone()))
    }

    async fn find_all(&self) -> Result<Vec<BookRecord>, RepositoryError> {
        let mut records: Vec<(u64, BookRecord)> = self
            .books
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|(seq, _)| *seq);
        Ok(records.into_iter().map(|(_, record)| record).collect())
    }

    async fn set_cover_image_path(&self, id: BookId, path: &str) -> Result<(), RepositoryError> {
        let mut entry = self
            .books
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        entry.1.book.set_cover_image_path(path);
        Ok(())
    }

    async fn delete(&self, id: BookId) -> Result<(), RepositoryError> {
        self.books
            .remove(&id)
            .map(|_| {
                tracing::debug!(book_id = %id, "Book removed");
            })
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::{BookMetadata, ChapterDraft};

    fn book(title: &str) -> Book {
        Book::assemble(
            BookMetadata {
                title: title.to_string(),
                ..BookMetadata::default()
            },
            vec![ChapterDraft::new("One", vec!["text".to_string()])],
        )
    }

    #[tokio::test]
    async fn test_add_and_find() {
        let repo = InMemoryBookRepository::new();
        let id = repo.add(&book("Dune")).await.unwrap();

        let record = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.book.title(), "Dune");
        assert!(repo.find_by_id(BookId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let repo = InMemoryBookRepository::new();
        for title in ["a", "b", "c", "d"] {
            repo.add(&book(title)).await.unwrap();
        }

        let titles: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.book.title().to_string())
            .collect();
        assert_eq!(titles, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_set_cover_and_delete() {
        let repo = InMemoryBookRepository::new();
        let id = repo.add(&book("Dune")).await.unwrap();

        repo.set_cover_image_path(id, "covers/dune.jpg").await.unwrap();
        let record = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(record.book.cover_image_path(), Some("covers/dune.jpg"));

        repo.delete(id).await.unwrap();
        assert!(repo.is_empty());
        assert!(matches!(repo.delete(id).await, Err(RepositoryError::NotFound(_))));
        assert!(matches!(
            repo.set_cover_image_path(id, "x").await,
            Err(RepositoryError::NotFound(_))
        ));
    }
}

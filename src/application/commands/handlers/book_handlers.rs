//! Book Command Handlers

use std::sync::Arc;

use crate::application::commands::{DeleteBook, UploadBook};
use crate::application::error::ApplicationError;
use crate::application::ingestion::BookIngestor;
use crate::application::ports::{BookRepositoryPort, CoverImage, CoverStoragePort};
use crate::domain::book::{BookId, MetadataSource};

// ============================================================================
// UploadBook
// ============================================================================

/// 上传书籍响应
#[derive(Debug, Clone)]
pub struct UploadBookResponse {
    pub id: BookId,
    pub title: String,
    pub chapter_count: usize,
    pub paragraph_count: usize,
    pub cover_image_path: Option<String>,
}

/// UploadBook Handler - 摄取、保存书籍与封面
pub struct UploadBookHandler {
    ingestor: BookIngestor,
    book_repo: Arc<dyn BookRepositoryPort>,
    cover_storage: Arc<dyn CoverStoragePort>,
    max_upload_size: u64,
}

impl UploadBookHandler {
    pub fn new(
        ingestor: BookIngestor,
        book_repo: Arc<dyn BookRepositoryPort>,
        cover_storage: Arc<dyn CoverStoragePort>,
    ) -> Self {
        Self {
            ingestor,
            book_repo,
            cover_storage,
            max_upload_size: u64::MAX,
        }
    }

    /// 设置上传大小上限（字节）
    pub fn with_max_upload_size(mut self, max_upload_size: u64) -> Self {
        self.max_upload_size = max_upload_size;
        self
    }

    /// 失败时只记录文件名/标题，不记录文档内容
    pub async fn handle(&self, command: UploadBook) -> Result<UploadBookResponse, ApplicationError> {
        let label = command
            .file_name
            .clone()
            .or_else(|| command.title.clone())
            .unwrap_or_else(|| "<unnamed>".to_string());

        tracing::info!(file = %label, "Starting book upload");

        let result = self.upload(command).await;
        if let Err(e) = &result {
            tracing::error!(file = %label, error = %e, "Book upload failed");
        }
        result
    }

    async fn upload(&self, command: UploadBook) -> Result<UploadBookResponse, ApplicationError> {
        if let Some(data) = &command.data {
            if data.len() as u64 > self.max_upload_size {
                return Err(ApplicationError::validation(format!(
                    "File too large: {} bytes (limit {} bytes)",
                    data.len(),
                    self.max_upload_size
                )));
            }
        }

        let caller = MetadataSource {
            title: command.title,
            author: command.author,
            language_id: command.language_id,
        };
        let data = command.data;
        let ingestor = self.ingestor.clone();

        // 解析是 CPU 密集的同步操作，放到阻塞线程池
        let ingested = tokio::task::spawn_blocking(move || ingestor.ingest(data.as_deref(), &caller))
            .await
            .map_err(|e| ApplicationError::internal(format!("Ingestion task failed: {}", e)))??;

        let book = ingested.book;
        let book_id = self.book_repo.add(&book).await?;

        // 封面保存失败时撤销已保存的书籍，上传整体失败
        let cover_image_path = match self.store_cover(book_id, ingested.cover_image).await {
            Ok(path) => path,
            Err(e) => {
                self.rollback(book_id).await;
                return Err(e);
            }
        };

        tracing::info!(
            book_id = %book_id,
            title = %book.title(),
            chapters = book.chapter_count(),
            "Book uploaded"
        );

        Ok(UploadBookResponse {
            id: book_id,
            title: book.title().to_string(),
            chapter_count: book.chapter_count(),
            paragraph_count: book.paragraph_count(),
            cover_image_path,
        })
    }

    async fn store_cover(
        &self,
        book_id: BookId,
        cover: Option<CoverImage>,
    ) -> Result<Option<String>, ApplicationError> {
        let Some(cover) = cover.filter(|cover| !cover.is_empty()) else {
            return Ok(None);
        };

        let path = self.cover_storage.save_cover(book_id, &cover).await?;
        let path = path.to_string_lossy().to_string();
        self.book_repo.set_cover_image_path(book_id, &path).await?;

        tracing::info!(book_id = %book_id, "Cover image saved");
        Ok(Some(path))
    }

    /// 尽力清理，清理失败只记录日志，不覆盖原始错误
    async fn rollback(&self, book_id: BookId) {
        if let Err(e) = self.cover_storage.delete_cover(book_id).await {
            tracing::warn!(book_id = %book_id, error = %e, "Failed to remove cover during rollback");
        }
        if let Err(e) = self.book_repo.delete(book_id).await {
            tracing::warn!(book_id = %book_id, error = %e, "Failed to remove book during rollback");
        }
    }
}

// ============================================================================
// DeleteBook
// ============================================================================

/// DeleteBook Handler
pub struct DeleteBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    cover_storage: Arc<dyn CoverStoragePort>,
}

impl DeleteBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>, cover_storage: Arc<dyn CoverStoragePort>) -> Self {
        Self {
            book_repo,
            cover_storage,
        }
    }

    pub async fn handle(&self, command: DeleteBook) -> Result<(), ApplicationError> {
        let book_id = command.book_id;

        // 检查书籍是否存在
        let record = self
            .book_repo
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", book_id))?;

        self.cover_storage.delete_cover(book_id).await?;
        self.book_repo.delete(book_id).await?;

        tracing::info!(
            book_id = %book_id,
            title = %record.book.title(),
            "Book deleted"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ingestion::{FixedReader, IngestOptions};
    use crate::application::ports::{
        ContainerMetadata, ContentUnit, CoverStorageError, PackagedDocument,
    };
    use crate::infrastructure::adapters::FileCoverStorage;
    use crate::infrastructure::memory::InMemoryBookRepository;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// 保存总是失败的封面存储
    struct FullDiskCovers;

    #[async_trait]
    impl CoverStoragePort for FullDiskCovers {
        async fn save_cover(
            &self,
            _book_id: BookId,
            _cover: &CoverImage,
        ) -> Result<PathBuf, CoverStorageError> {
            Err(CoverStorageError::IoError("disk full".to_string()))
        }

        async fn read_cover(&self, book_id: BookId) -> Result<Vec<u8>, CoverStorageError> {
            Err(CoverStorageError::FileNotFound(book_id.to_string()))
        }

        async fn delete_cover(&self, _book_id: BookId) -> Result<bool, CoverStorageError> {
            Ok(false)
        }
    }

    fn document(cover: Option<Vec<u8>>) -> PackagedDocument {
        PackagedDocument {
            metadata: ContainerMetadata {
                title: Some("Moby Dick".to_string()),
                author: None,
                language: None,
            },
            reading_order: vec![
                ContentUnit::new("c1.xhtml", "<p>Call me Ishmael.</p>"),
                ContentUnit::new("c2.xhtml", "<p>Some years ago.</p>"),
            ],
            cover_image: cover.map(|bytes| CoverImage {
                bytes,
                media_type: Some("image/png".to_string()),
            }),
            ..PackagedDocument::default()
        }
    }

    fn ingestor(document: PackagedDocument) -> BookIngestor {
        BookIngestor::new(Arc::new(FixedReader(document)), IngestOptions::default())
    }

    fn upload(data: &[u8]) -> UploadBook {
        UploadBook {
            file_name: Some("moby.epub".to_string()),
            data: Some(data.to_vec()),
            title: Some("Untitled".to_string()),
            author: Some("Herman Melville".to_string()),
            language_id: Some("en".to_string()),
        }
    }

    #[tokio::test]
    async fn test_upload_saves_book_and_cover() {
        let temp_dir = tempdir().unwrap();
        let repo = Arc::new(InMemoryBookRepository::new());
        let covers = Arc::new(FileCoverStorage::new(temp_dir.path()).await.unwrap());
        let handler = UploadBookHandler::new(ingestor(document(Some(vec![1, 2, 3]))), repo.clone(), covers);

        let response = handler.handle(upload(b"PK")).await.unwrap();
        assert_eq!(response.title, "Moby Dick");
        assert_eq!(response.chapter_count, 2);
        assert_eq!(response.paragraph_count, 2);

        let cover_path = response.cover_image_path.expect("cover stored");
        assert!(cover_path.ends_with(".png"));
        assert_eq!(std::fs::read(&cover_path).unwrap(), vec![1, 2, 3]);

        let stored = repo.find_by_id(response.id).await.unwrap().unwrap();
        assert_eq!(stored.book.author(), "Herman Melville");
        assert_eq!(stored.book.language_id(), "en");
        assert_eq!(stored.book.cover_image_path(), Some(cover_path.as_str()));
    }

    #[tokio::test]
    async fn test_upload_without_cover() {
        let temp_dir = tempdir().unwrap();
        let repo = Arc::new(InMemoryBookRepository::new());
        let covers = Arc::new(FileCoverStorage::new(temp_dir.path()).await.unwrap());
        let handler = UploadBookHandler::new(ingestor(document(Some(Vec::new()))), repo.clone(), covers);

        let response = handler.handle(upload(b"PK")).await.unwrap();
        assert!(response.cover_image_path.is_none());
    }

    #[tokio::test]
    async fn test_upload_errors() {
        let temp_dir = tempdir().unwrap();
        let repo = Arc::new(InMemoryBookRepository::new());
        let covers = Arc::new(FileCoverStorage::new(temp_dir.path()).await.unwrap());
        let handler = UploadBookHandler::new(ingestor(document(None)), repo.clone(), covers)
            .with_max_upload_size(8);

        let missing = UploadBook {
            data: None,
            ..upload(b"")
        };
        assert!(matches!(
            handler.handle(missing).await,
            Err(ApplicationError::ValidationError(_))
        ));
        assert!(matches!(
            handler.handle(upload(b"bad")).await,
            Err(ApplicationError::InvalidDocument(_))
        ));
        assert!(matches!(
            handler.handle(upload(b"far too large")).await,
            Err(ApplicationError::ValidationError(_))
        ));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_cover_save_leaves_no_book() {
        let repo = Arc::new(InMemoryBookRepository::new());
        let handler = UploadBookHandler::new(
            ingestor(document(Some(vec![1, 2, 3]))),
            repo.clone(),
            Arc::new(FullDiskCovers),
        );

        for _ in 0..2 {
            let result = handler.handle(upload(b"PK")).await;
            assert!(matches!(result, Err(ApplicationError::StorageError(_))));
        }
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_book() {
        let temp_dir = tempdir().unwrap();
        let repo = Arc::new(InMemoryBookRepository::new());
        let covers = Arc::new(FileCoverStorage::new(temp_dir.path()).await.unwrap());
        let upload_handler =
            UploadBookHandler::new(ingestor(document(Some(vec![9]))), repo.clone(), covers.clone());
        let delete_handler = DeleteBookHandler::new(repo.clone(), covers.clone());

        let response = upload_handler.handle(upload(b"PK")).await.unwrap();
        delete_handler
            .handle(DeleteBook { book_id: response.id })
            .await
            .unwrap();

        assert!(repo.find_by_id(response.id).await.unwrap().is_none());
        assert!(covers.read_cover(response.id).await.is_err());
        assert!(matches!(
            delete_handler.handle(DeleteBook { book_id: response.id }).await,
            Err(ApplicationError::NotFound { .. })
        ));
    }
}

//! File Storage - 文件系统封面存储实现
//!
//! 实现 CoverStoragePort trait，每本书一个文件：`{book_id}.{ext}`

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{CoverImage, CoverStorageError, CoverStoragePort};
use crate::domain::book::BookId;

/// 文件系统封面存储
pub struct FileCoverStorage {
    /// 存储根目录
    base_dir: PathBuf,
}

impl FileCoverStorage {
    /// 创建新的文件存储
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, CoverStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| CoverStorageError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn cover_path(&self, book_id: BookId, media_type: Option<&str>) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", book_id, extension_for(media_type)))
    }

    /// 查找已保存的封面（扩展名未知）
    async fn find_cover(&self, book_id: BookId) -> Result<Option<PathBuf>, CoverStorageError> {
        let stem = book_id.to_string();
        let mut entries = fs::read_dir(&self.base_dir)
            .await
            .map_err(|e| CoverStorageError::IoError(e.to_string()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CoverStorageError::IoError(e.to_string()))?
        {
            let path = entry.path();
            if path.file_stem().map_or(false, |s| s == stem.as_str()) {
                return Ok(Some(path));
            }
        }

        Ok(None)
    }
}

/// 媒体类型 → 文件扩展名
pub fn extension_for(media_type: Option<&str>) -> &'static str {
    let media_type = media_type
        .map(|m| m.split(';').next().unwrap_or(m).trim().to_ascii_lowercase())
        .unwrap_or_default();

    match media_type.as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        _ => "bin",
    }
}

#[async_trait]
impl CoverStoragePort for FileCoverStorage {
    async fn save_cover(
        &self,
        book_id: BookId,
        cover: &CoverImage,
    ) -> Result<PathBuf, CoverStorageError> {
        if cover.is_empty() {
            return Err(CoverStorageError::EmptyImage);
        }

        // 同一本书只保留一个封面文件
        if let Some(existing) = self.find_cover(book_id).await? {
            fs::remove_file(&existing)
                .await
                .map_err(|e| CoverStorageError::IoError(e.to_string()))?;
        }

        let cover_path = self.cover_path(book_id, cover.media_type.as_deref());

        fs::write(&cover_path, &cover.bytes)
            .await
            .map_err(|e| CoverStorageError::IoError(e.to_string()))?;

        tracing::debug!(
            "Saved cover: book={}, size={} bytes",
            book_id,
            cover.bytes.len()
        );

        Ok(cover_path)
    }

    async fn read_cover(&self, book_id: BookId) -> Result<Vec<u8>, CoverStorageError> {
        let cover_path = self
            .find_cover(book_id)
            .await?
            .ok_or_else(|| CoverStorageError::FileNotFound(book_id.to_string()))?;

        fs::read(&cover_path)
            .await
            .map_err(|e| CoverStorageError::IoError(e.to_string()))
    }

    async fn delete_cover(&self, book_id: BookId) -> Result<bool, CoverStorageError> {
        let Some(cover_path) = self.find_cover(book_id).await? else {
            return Ok(false);
        };

        fs::remove_file(&cover_path)
            .await
            .map_err(|e| CoverStorageError::IoError(e.to_string()))?;

        tracing::debug!("Deleted cover: book={}", book_id);

        Ok(true)
    }
}

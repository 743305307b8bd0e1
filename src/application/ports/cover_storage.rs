//! Cover Storage Port - 出站端口
//!
//! 定义封面图片存储的抽象接口

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use super::CoverImage;
use crate::domain::book::BookId;

/// 封面存储错误
#[derive(Debug, Error)]
pub enum CoverStorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Empty cover image")]
    EmptyImage,
}

/// Cover Storage Port
#[async_trait]
pub trait CoverStoragePort: Send + Sync {
    /// 保存封面，返回存储路径
    async fn save_cover(&self, book_id: BookId, cover: &CoverImage) -> Result<PathBuf, CoverStorageError>;

    /// 读取封面
    async fn read_cover(&self, book_id: BookId) -> Result<Vec<u8>, CoverStorageError>;

    /// 删除封面，返回是否存在过
    async fn delete_cover(&self, book_id: BookId) -> Result<bool, CoverStorageError>;
}

//! Repository Ports - 出站端口
//!
//! 定义书籍持久化的抽象接口
//! 具体实现在 infrastructure 层（如内存仓储）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::book::{Book, BookId};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// 已保存的书籍
#[derive(Debug, Clone)]
pub struct BookRecord {
    pub id: BookId,
    pub book: Book,
    pub created_at: DateTime<Utc>,
}

/// Book Repository Port
#[async_trait]
pub trait BookRepositoryPort: Send + Sync {
    /// 保存书籍，返回分配的标识
    async fn add(&self, book: &Book) -> Result<BookId, RepositoryError>;

    /// 根据 ID 查找书籍
    async fn find_by_id(&self, id: BookId) -> Result<Option<BookRecord>, RepositoryError>;

    /// 获取所有书籍（按保存顺序）
    async fn find_all(&self) -> Result<Vec<BookRecord>, RepositoryError>;

    /// 记录封面存储路径
    async fn set_cover_image_path(&self, id: BookId, path: &str) -> Result<(), RepositoryError>;

    /// 删除书籍
    async fn delete(&self, id: BookId) -> Result<(), RepositoryError>;
}

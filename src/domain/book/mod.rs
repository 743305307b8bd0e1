//! Book Context - 书籍限界上下文
//!
//! 职责:
//! - Book 聚合管理
//! - 章节与段落实体（连续编号、非空约束）
//! - 元数据覆盖策略

mod aggregate;
mod entities;
mod errors;
mod value_objects;

pub use aggregate::Book;
pub use entities::{Chapter, ChapterDraft, Paragraph};
pub use errors::BookError;
pub use value_objects::{BookId, BookMetadata, MetadataSource};

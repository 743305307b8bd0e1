//! Domain Layer - 领域层
//!
//! - Book Context: 书籍、章节、段落
//! - Markup: 标记解析与段落提取（纯函数，无 I/O）

pub mod book;
pub mod markup;

pub use markup::{normalize, ContentBlockExtractor, ExtractorConfig};

//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ContainerReader、Repository、CoverStorage）
//! - ingestion: 摄取流水线（结构提取、段落提取、编号组装）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ingestion;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{DeleteBookHandler, UploadBookHandler, UploadBookResponse},
    DeleteBook, UploadBook,
};
pub use error::ApplicationError;
pub use ingestion::{BookIngestor, IngestError, IngestOptions, IngestedBook};
pub use ports::{
    BookRecord, BookRepositoryPort, ContainerReaderPort, CoverStoragePort, FormatError,
    PackagedDocument,
};
pub use queries::{
    handlers::{BookResponse, BookSummary, GetBookHandler, ListBooksHandler},
    GetBook, ListBooks,
};

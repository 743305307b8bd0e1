//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod container_reader;
mod cover_storage;
mod repositories;

pub use container_reader::{
    content_path, ContainerMetadata, ContainerReaderPort, ContentUnit, CoverImage, FormatError,
    NavigationItem, PackagedDocument,
};
pub use cover_storage::{CoverStorageError, CoverStoragePort};
pub use repositories::{BookRecord, BookRepositoryPort, RepositoryError};

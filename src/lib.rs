//! ReadAloud - 电子书摄取
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Book Context: Book / Chapter / Paragraph
//! - Markup: 标签扫描、文本规范化、段落提取
//!
//! 应用层 (application/):
//! - Ports: 端口定义（ContainerReader, BookRepository, CoverStorage）
//! - Ingestion: 结构提取 → 段落提取 → 编号组装
//! - Commands: CQRS 命令处理器（上传、删除）
//! - Queries: CQRS 查询处理器（详情、列表）
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: EPUB 读取器, 封面文件存储
//! - Memory: 书籍内存仓储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};

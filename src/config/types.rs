//! Configuration Types
//!
//! 定义所有配置结构体

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::ingestion::{IngestOptions, StructureOptions, DEFAULT_FALLBACK_TITLE_PREFIX};
use crate::domain::markup::{ExtractorConfig, DEFAULT_MIN_BLOCK_CHARS};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 摄取配置
    #[serde(default)]
    pub ingestion: IngestionConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 摄取配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestionConfig {
    /// 分区层与块切分层保留的最少字符数（按字符计，含边界）
    #[serde(default = "default_min_block_chars")]
    pub min_block_chars: usize,

    /// 回退章节标题前缀，生成 "{prefix} {n}"
    #[serde(default = "default_fallback_title_prefix")]
    pub fallback_title_prefix: String,

    /// 是否展开嵌套导航条目
    #[serde(default)]
    pub flatten_nested_navigation: bool,

    /// 上传文件最大大小（字节），默认 50MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_min_block_chars() -> usize {
    DEFAULT_MIN_BLOCK_CHARS
}

fn default_fallback_title_prefix() -> String {
    DEFAULT_FALLBACK_TITLE_PREFIX.to_string()
}

fn default_max_upload_size() -> u64 {
    50 * 1024 * 1024 // 50 MB
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            min_block_chars: default_min_block_chars(),
            fallback_title_prefix: default_fallback_title_prefix(),
            flatten_nested_navigation: false,
            max_upload_size: default_max_upload_size(),
        }
    }
}

impl IngestionConfig {
    /// 转换为流水线选项
    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            extractor: ExtractorConfig {
                min_block_chars: self.min_block_chars,
            },
            structure: StructureOptions {
                fallback_title_prefix: self.fallback_title_prefix.clone(),
                flatten_nested_navigation: self.flatten_nested_navigation,
            },
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// 封面图片存储目录
    #[serde(default = "default_covers_dir")]
    pub covers_dir: PathBuf,
}

fn default_covers_dir() -> PathBuf {
    PathBuf::from("data/covers")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            covers_dir: default_covers_dir(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

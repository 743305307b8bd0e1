//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `READALOUD_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `READALOUD_INGESTION__MIN_BLOCK_CHARS=40`
/// - `READALOUD_INGESTION__FALLBACK_TITLE_PREFIX=Part`
/// - `READALOUD_STORAGE__COVERS_DIR=/data/covers`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("ingestion.min_block_chars", 20)?
        .set_default("ingestion.fallback_title_prefix", "Chapter")?
        .set_default("ingestion.flatten_nested_navigation", false)?
        .set_default("ingestion.max_upload_size", 50 * 1024 * 1024)?
        .set_default("storage.covers_dir", "data/covers")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: READALOUD_LOG__LEVEL=debug
    builder = builder.add_source(
        Environment::with_prefix("READALOUD")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.ingestion.min_block_chars == 0 {
        return Err(ConfigError::ValidationError(
            "ingestion.min_block_chars cannot be 0".to_string(),
        ));
    }

    if config.ingestion.fallback_title_prefix.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "ingestion.fallback_title_prefix cannot be empty".to_string(),
        ));
    }

    if config.ingestion.max_upload_size == 0 {
        return Err(ConfigError::ValidationError(
            "ingestion.max_upload_size cannot be 0".to_string(),
        ));
    }

    if config.storage.covers_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.covers_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 以 TOML 格式输出生效的配置
pub fn render_config(config: &AppConfig) -> Result<String, ConfigError> {
    toml::to_string_pretty(config).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Min Block Chars: {}", config.ingestion.min_block_chars);
    tracing::info!("Fallback Title Prefix: {}", config.ingestion.fallback_title_prefix);
    tracing::info!(
        "Flatten Nested Navigation: {}",
        config.ingestion.flatten_nested_navigation
    );
    tracing::info!("Max Upload Size: {} bytes", config.ingestion.max_upload_size);
    tracing::info!("Covers Directory: {:?}", config.storage.covers_dir);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

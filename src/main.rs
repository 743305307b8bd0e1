//! ReadAloud - 电子书摄取命令行
//!
//! 读取一个 EPUB 文件，摄取为 Book（章节 + 段落），输出 JSON

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use readaloud::application::commands::handlers::UploadBookHandler;
use readaloud::application::commands::UploadBook;
use readaloud::application::ingestion::BookIngestor;
use readaloud::application::queries::handlers::GetBookHandler;
use readaloud::application::queries::GetBook;
use readaloud::config::{load_config_from_path, print_config, render_config, AppConfig};
use readaloud::infrastructure::adapters::{EpubContainerReader, FileCoverStorage};
use readaloud::infrastructure::memory::InMemoryBookRepository;

/// 将 EPUB 电子书摄取为可朗读的章节与段落
#[derive(Debug, Parser)]
#[command(name = "readaloud", version, about)]
struct Cli {
    /// 要摄取的 EPUB 文件
    #[arg(required_unless_present = "print_config")]
    file: Option<PathBuf>,

    /// 标题（容器未提供时使用）
    #[arg(long)]
    title: Option<String>,

    /// 作者（容器未提供时使用）
    #[arg(long)]
    author: Option<String>,

    /// 语言标识（总是优先于容器中的语言）
    #[arg(long)]
    language: Option<String>,

    /// 配置文件路径
    #[arg(long)]
    config: Option<PathBuf>,

    /// 输出生效的配置（TOML）后退出
    #[arg(long)]
    print_config: bool,

    /// 只输出摘要，不输出段落
    #[arg(long)]
    summary: bool,
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!("{},readaloud={}", config.log.level, config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    // 日志写到 stderr，stdout 留给 JSON 输出
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    if cli.print_config {
        println!("{}", render_config(&config)?);
        return Ok(());
    }

    init_tracing(&config);
    print_config(&config);

    let file = cli.file.context("No input file given")?;
    let data = tokio::fs::read(&file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let book_repo = Arc::new(InMemoryBookRepository::new());
    let cover_storage = Arc::new(FileCoverStorage::new(&config.storage.covers_dir).await?);
    let ingestor = BookIngestor::new(
        Arc::new(EpubContainerReader::new()),
        config.ingestion.ingest_options(),
    );

    let upload_handler = UploadBookHandler::new(ingestor, book_repo.clone(), cover_storage)
        .with_max_upload_size(config.ingestion.max_upload_size);

    let response = upload_handler
        .handle(UploadBook {
            file_name: Some(file.display().to_string()),
            data: Some(data),
            title: cli.title,
            author: cli.author,
            language_id: cli.language,
        })
        .await?;

    let book = GetBookHandler::new(book_repo)
        .handle(GetBook {
            book_id: response.id,
        })
        .await?;

    let output = if cli.summary {
        serde_json::json!({
            "id": book.id,
            "title": book.book.title(),
            "author": book.book.author(),
            "language_id": book.book.language_id(),
            "cover_image_path": book.book.cover_image_path(),
            "chapters": book
                .book
                .chapters()
                .iter()
                .map(|c| serde_json::json!({
                    "number": c.number(),
                    "title": c.title(),
                    "paragraphs": c.paragraph_count(),
                }))
                .collect::<Vec<_>>(),
        })
    } else {
        serde_json::to_value(&book)?
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

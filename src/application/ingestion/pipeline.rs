//! 摄取流水线入口
//!
//! Container Reader → 结构提取 → 段落提取 → 编号与组装
//!
//! 同步执行：源数据先被完整读取，再进行结构提取。不做重试，不产出部分结果。

use std::io::Read;
use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{ContainerReaderPort, CoverImage, FormatError};
use crate::domain::book::{Book, MetadataSource};
use crate::domain::markup::{ContentBlockExtractor, ExtractorConfig};

use super::assembler::BookAssembler;
use super::structure::{extract_candidates, StructureOptions};

/// 摄取错误
#[derive(Debug, Error)]
pub enum IngestError {
    /// 没有提供源数据流
    #[error("No source stream supplied")]
    NullSource,

    /// 容器无法读取或结构无效（原样透传读取器的错误）
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// 摄取选项
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    pub extractor: ExtractorConfig,
    pub structure: StructureOptions,
}

/// 摄取结果
#[derive(Debug, Clone)]
pub struct IngestedBook {
    pub book: Book,
    /// 容器中的封面，原样透传
    pub cover_image: Option<CoverImage>,
}

/// 书籍摄取器
///
/// 每次调用互相独立，不共享可变状态
#[derive(Clone)]
pub struct BookIngestor {
    reader: Arc<dyn ContainerReaderPort>,
    assembler: BookAssembler,
    structure: StructureOptions,
}

impl BookIngestor {
    pub fn new(reader: Arc<dyn ContainerReaderPort>, options: IngestOptions) -> Self {
        Self {
            reader,
            assembler: BookAssembler::new(ContentBlockExtractor::new(options.extractor)),
            structure: options.structure,
        }
    }

    /// 摄取一个容器
    ///
    /// `caller` 为调用方提供的标题、作者、语言，按覆盖策略参与合并
    pub fn ingest<S: Read>(
        &self,
        source: Option<S>,
        caller: &MetadataSource,
    ) -> Result<IngestedBook, IngestError> {
        let mut source = source.ok_or(IngestError::NullSource)?;

        let mut data = Vec::new();
        source
            .read_to_end(&mut data)
            .map_err(|e| FormatError::new(format!("failed to read source: {}", e)))?;

        let document = self.reader.open(&data)?;

        let (origin, candidates) = extract_candidates(&document, &self.structure);
        let candidate_count = candidates.len();

        let book = self
            .assembler
            .assemble(candidates, caller, &document.metadata);

        tracing::debug!(
            source = ?origin,
            candidates = candidate_count,
            chapters = book.chapter_count(),
            paragraphs = book.paragraph_count(),
            "Container ingested"
        );

        Ok(IngestedBook {
            book,
            cover_image: document.cover_image,
        })
    }
}

impl std::fmt::Debug for BookIngestor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookIngestor")
            .field("assembler", &self.assembler)
            .field("structure", &self.structure)
            .finish_non_exhaustive()
    }
}

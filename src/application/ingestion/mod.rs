//! Ingestion - 电子书摄取流水线
//!
//! - structure: 导航树 / 阅读顺序 → 候选章节
//! - assembler: 候选章节 → 编号后的 Book
//! - pipeline: 入口 `BookIngestor::ingest`

mod assembler;
mod pipeline;
mod structure;

pub use assembler::BookAssembler;
pub use pipeline::{BookIngestor, IngestError, IngestOptions, IngestedBook};
pub use structure::{
    extract_candidates, CandidateChapter, CandidateSource, StructureOptions,
    DEFAULT_FALLBACK_TITLE_PREFIX,
};

#[cfg(test)]
pub(crate) use pipeline::tests::FixedReader;

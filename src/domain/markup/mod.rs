//! Markup - 标记内容处理
//!
//! - dom: 基于 scraper 解析树的文档顺序遍历
//! - normalizer: 标记片段 → 纯文本
//! - extractor: 标记单元 → 段落列表（分层回退策略）

mod dom;
mod extractor;
mod normalizer;

pub use dom::{walk, DomEvent};
pub use extractor::{
    block_split_tier, division_tier, paragraph_tier, ContentBlockExtractor, ExtractionTier,
    ExtractorConfig, DEFAULT_MIN_BLOCK_CHARS,
};
pub use normalizer::{collapse_whitespace, fragment_text, normalize};

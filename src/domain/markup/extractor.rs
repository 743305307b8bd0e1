//! 内容块提取器
//!
//! 一个标记单元 → 有序、非空的段落文本列表
//!
//! 标记单元先用 scraper 解析为文档树（隐式闭合、未闭合元素按 HTML 解析规则
//! 处理），script/style 元素及其全部内容不参与提取。
//!
//! 分层策略，前一层没有结果时才尝试下一层：
//! 1. 段落标签层：每个 `<p>` 的内容，规范化后非空即保留
//! 2. 分区标签层：每个 `<div>` 的内容，规范化后达到最小字符数才保留
//! 3. 块边界切分层：按 p/div/br/h1-h6 元素边界切分，规范化后达到最小字符数才保留

use scraper::Html;

use super::dom::{walk, DomEvent};
use super::normalizer::normalize;

/// 分区层与切分层的默认最小字符数
pub const DEFAULT_MIN_BLOCK_CHARS: usize = 20;

/// 块边界元素
const BLOCK_BOUNDARY_TAGS: &[&str] = &["p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6"];

/// 提取配置
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// 宽松层（分区层、切分层）的最小字符数
    pub min_block_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_block_chars: DEFAULT_MIN_BLOCK_CHARS,
        }
    }
}

/// 提取层级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionTier {
    Paragraph,
    Division,
    BlockSplit,
}

impl ExtractionTier {
    /// 按优先级排列的全部层级
    pub const ALL: [ExtractionTier; 3] = [
        ExtractionTier::Paragraph,
        ExtractionTier::Division,
        ExtractionTier::BlockSplit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionTier::Paragraph => "paragraph",
            ExtractionTier::Division => "division",
            ExtractionTier::BlockSplit => "block_split",
        }
    }

    /// 在已解析的文档上执行本层策略
    pub fn apply(&self, document: &Html, config: &ExtractorConfig) -> Vec<String> {
        match self {
            ExtractionTier::Paragraph => paragraph_tier(document),
            ExtractionTier::Division => division_tier(document, config.min_block_chars),
            ExtractionTier::BlockSplit => block_split_tier(document, config.min_block_chars),
        }
    }
}

/// 内容块提取器
#[derive(Debug, Clone, Default)]
pub struct ContentBlockExtractor {
    config: ExtractorConfig,
}

impl ContentBlockExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// 提取段落文本，保持文档顺序
    pub fn extract(&self, raw_markup: &str) -> Vec<String> {
        self.extract_with_tier(raw_markup)
            .map(|(_, paragraphs)| paragraphs)
            .unwrap_or_default()
    }

    /// 提取段落文本，同时返回产生结果的层级；所有层都为空时返回 None
    pub fn extract_with_tier(&self, raw_markup: &str) -> Option<(ExtractionTier, Vec<String>)> {
        if raw_markup.trim().is_empty() {
            return None;
        }

        let document = Html::parse_document(raw_markup);
        ExtractionTier::ALL.iter().find_map(|tier| {
            let paragraphs = tier.apply(&document, &self.config);
            (!paragraphs.is_empty()).then_some((*tier, paragraphs))
        })
    }
}

/// 段落标签层
pub fn paragraph_tier(document: &Html) -> Vec<String> {
    element_contents(document, "p")
        .iter()
        .map(|text| normalize(text))
        .filter(|text| !text.is_empty())
        .collect()
}

/// 分区标签层
pub fn division_tier(document: &Html, min_chars: usize) -> Vec<String> {
    keep_long_enough(element_contents(document, "div"), min_chars)
}

/// 块边界切分层
pub fn block_split_tier(document: &Html, min_chars: usize) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    walk(document, |event| match event {
        DomEvent::Text(text) => current.push_str(text),
        _ if event.is_any_element(BLOCK_BOUNDARY_TAGS) => {
            segments.push(std::mem::take(&mut current));
        }
        _ => {}
    });
    segments.push(current);

    keep_long_enough(segments, min_chars)
}

fn keep_long_enough(fragments: Vec<String>, min_chars: usize) -> Vec<String> {
    fragments
        .iter()
        .map(|text| normalize(text))
        .filter(|text| !text.is_empty() && text.chars().count() >= min_chars)
        .collect()
}

/// 收集指定元素内部的文本（按深度感知）
///
/// 元素内部以同名元素为界切开：嵌套的同名元素不会让外层内容重复出现，
/// 外层在内层前后的文本各自成为独立片段，整体保持文档顺序。
fn element_contents(document: &Html, name: &str) -> Vec<String> {
    let mut contents = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    walk(document, |event| match event {
        DomEvent::Text(text) if depth > 0 => current.push_str(text),
        DomEvent::Open(_) | DomEvent::Close(_) if event.is_element(name) => {
            if depth > 0 {
                contents.push(std::mem::take(&mut current));
            }
            if matches!(event, DomEvent::Open(_)) {
                depth += 1;
            } else {
                depth = depth.saturating_sub(1);
            }
        }
        _ => {}
    });

    contents
}

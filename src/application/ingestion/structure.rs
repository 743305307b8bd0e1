//! 结构提取
//!
//! 导航树或阅读顺序 → 有序的候选章节（标题 + 原始标记）
//!
//! - 导航树非空：按文档顺序解析每个条目的内容引用，解析失败的条目直接丢弃
//! - 导航树为空或没有任何条目解析成功：按阅读顺序，每个内容单元一章，
//!   标题为 "{前缀} {n}"，n 为其在阅读顺序中的位置（从 1 开始）
//!
//! 这里不检查段落内容，空章节由组装阶段过滤

use crate::application::ports::{NavigationItem, PackagedDocument};

/// 默认回退章节标题前缀
pub const DEFAULT_FALLBACK_TITLE_PREFIX: &str = "Chapter";

/// 候选章节
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateChapter<'a> {
    pub title: String,
    pub markup: &'a str,
}

/// 候选章节来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    Navigation,
    ReadingOrder,
}

/// 结构提取选项
#[derive(Debug, Clone)]
pub struct StructureOptions {
    /// 回退章节标题前缀
    pub fallback_title_prefix: String,
    /// 是否按深度优先展开嵌套导航条目
    pub flatten_nested_navigation: bool,
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            fallback_title_prefix: DEFAULT_FALLBACK_TITLE_PREFIX.to_string(),
            flatten_nested_navigation: false,
        }
    }
}

/// 提取候选章节
pub fn extract_candidates<'a>(
    document: &'a PackagedDocument,
    options: &StructureOptions,
) -> (CandidateSource, Vec<CandidateChapter<'a>>) {
    let from_navigation = navigation_candidates(document, options);
    if !from_navigation.is_empty() {
        return (CandidateSource::Navigation, from_navigation);
    }

    if !document.navigation.is_empty() {
        tracing::debug!(
            items = document.navigation.len(),
            "No navigation item resolved, falling back to reading order"
        );
    }
    (
        CandidateSource::ReadingOrder,
        reading_order_candidates(document, options),
    )
}

fn navigation_candidates<'a>(
    document: &'a PackagedDocument,
    options: &StructureOptions,
) -> Vec<CandidateChapter<'a>> {
    let mut items: Vec<&NavigationItem> = Vec::new();
    for item in &document.navigation {
        collect_items(item, options.flatten_nested_navigation, &mut items);
    }

    items
        .into_iter()
        .filter_map(|item| match document.resolve(&item.content_ref) {
            Some(markup) => Some(CandidateChapter {
                title: item.title.trim().to_string(),
                markup,
            }),
            None => {
                tracing::debug!(
                    title = %item.title,
                    content_ref = %item.content_ref,
                    "Navigation item could not be resolved, skipped"
                );
                None
            }
        })
        .collect()
}

fn collect_items<'a>(item: &'a NavigationItem, flatten: bool, out: &mut Vec<&'a NavigationItem>) {
    out.push(item);
    if flatten {
        for child in &item.children {
            collect_items(child, flatten, out);
        }
    }
}

fn reading_order_candidates<'a>(
    document: &'a PackagedDocument,
    options: &StructureOptions,
) -> Vec<CandidateChapter<'a>> {
    document
        .reading_order
        .iter()
        .zip(1usize..)
        .map(|(unit, position)| CandidateChapter {
            title: format!("{} {}", options.fallback_title_prefix, position),
            markup: unit.markup.as_str(),
        })
        .collect()
}

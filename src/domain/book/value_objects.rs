//! Book Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 书籍唯一标识（由持久化层分配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 书籍元数据（标题、作者、语言）
///
/// 字段均为已决议的最终值，空字符串表示两个来源都没有提供
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMetadata {
    pub title: String,
    pub author: String,
    pub language_id: String,
}

impl BookMetadata {
    /// 按覆盖策略合并提取值与调用方提供值
    ///
    /// - 标题/作者：优先使用提取值，提取值为空或仅空白时使用调用方值
    /// - 语言：调用方值非空时总是使用调用方值，否则退回提取值
    pub fn resolve(extracted: &MetadataSource, caller: &MetadataSource) -> Self {
        Self {
            title: first_present(&extracted.title, &caller.title),
            author: first_present(&extracted.author, &caller.author),
            language_id: first_present(&caller.language_id, &extracted.language_id),
        }
    }
}

/// 一个元数据来源（容器提取或调用方提供），字段均可缺失
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataSource {
    pub title: Option<String>,
    pub author: Option<String>,
    pub language_id: Option<String>,
}

fn first_present(preferred: &Option<String>, fallback: &Option<String>) -> String {
    [preferred, fallback]
        .into_iter()
        .flatten()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(title: Option<&str>, author: Option<&str>, language: Option<&str>) -> MetadataSource {
        MetadataSource {
            title: title.map(String::from),
            author: author.map(String::from),
            language_id: language.map(String::from),
        }
    }

    #[test]
    fn test_extracted_title_wins_over_caller() {
        let extracted = source(Some("Moby Dick"), Some("Herman Melville"), None);
        let caller = source(Some("Untitled"), Some("Unknown"), None);

        let metadata = BookMetadata::resolve(&extracted, &caller);
        assert_eq!(metadata.title, "Moby Dick");
        assert_eq!(metadata.author, "Herman Melville");
    }

    #[test]
    fn test_whitespace_extracted_values_fall_back_to_caller() {
        let extracted = source(Some("   "), None, None);
        let caller = source(Some("Untitled"), Some("Anonymous"), None);

        let metadata = BookMetadata::resolve(&extracted, &caller);
        assert_eq!(metadata.title, "Untitled");
        assert_eq!(metadata.author, "Anonymous");
    }

    #[test]
    fn test_caller_language_always_wins_when_present() {
        let extracted = source(None, None, Some("en"));
        let caller = source(None, None, Some("fr-FR"));
        assert_eq!(BookMetadata::resolve(&extracted, &caller).language_id, "fr-FR");

        let blank_caller = source(None, None, Some(" "));
        assert_eq!(BookMetadata::resolve(&extracted, &blank_caller).language_id, "en");
    }

    #[test]
    fn test_missing_everywhere_is_empty() {
        let metadata = BookMetadata::resolve(&MetadataSource::default(), &MetadataSource::default());
        assert_eq!(metadata, BookMetadata::default());
    }
}

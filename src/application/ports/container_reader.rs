//! Container Reader Port - 出站端口
//!
//! 定义打包电子书容器的读取接口
//! 具体实现在 infrastructure 层（如基于 epub crate 的 EpubContainerReader）

use std::collections::HashMap;
use thiserror::Error;

/// 容器格式错误（无法读取或结构无效）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid container format: {0}")]
pub struct FormatError(pub String);

impl FormatError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// 容器中提取的元数据
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
}

/// 导航（目录）条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationItem {
    pub title: String,
    /// 内容引用，容器内路径，可能带 `#fragment`
    pub content_ref: String,
    pub children: Vec<NavigationItem>,
}

impl NavigationItem {
    pub fn new(title: impl Into<String>, content_ref: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content_ref: content_ref.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<NavigationItem>) -> Self {
        self.children = children;
        self
    }
}

/// 内容单元 - 容器内一个可寻址的标记资源
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUnit {
    /// 容器内路径
    pub path: String,
    pub markup: String,
}

impl ContentUnit {
    pub fn new(path: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            markup: markup.into(),
        }
    }
}

/// 封面图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    pub bytes: Vec<u8>,
    /// 容器声明的媒体类型，如 `image/jpeg`
    pub media_type: Option<String>,
}

impl CoverImage {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// 打开后的容器内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackagedDocument {
    pub metadata: ContainerMetadata,
    /// 导航树，文档顺序
    pub navigation: Vec<NavigationItem>,
    /// 阅读顺序，打包顺序
    pub reading_order: Vec<ContentUnit>,
    /// 不在阅读顺序中、但被导航引用的资源（路径 → 标记）
    pub resources: HashMap<String, String>,
    pub cover_image: Option<CoverImage>,
}

impl PackagedDocument {
    /// 将导航内容引用解析为原始标记
    ///
    /// 去掉 `#fragment` 后按路径查找，先查阅读顺序再查附加资源
    pub fn resolve(&self, content_ref: &str) -> Option<&str> {
        let path = content_path(content_ref);
        if path.is_empty() {
            return None;
        }

        self.reading_order
            .iter()
            .find(|unit| unit.path == path)
            .map(|unit| unit.markup.as_str())
            .or_else(|| self.resources.get(path).map(String::as_str))
    }
}

/// 内容引用的路径部分（去掉 fragment 与前导 `./`）
pub fn content_path(content_ref: &str) -> &str {
    let path = content_ref.split('#').next().unwrap_or_default();
    path.strip_prefix("./").unwrap_or(path)
}

/// Container Reader Port
///
/// 同步接口：调用方先完整读取源数据，再交给读取器
pub trait ContainerReaderPort: Send + Sync {
    fn open(&self, data: &[u8]) -> Result<PackagedDocument, FormatError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> PackagedDocument {
        let mut resources = HashMap::new();
        resources.insert("OEBPS/notes.xhtml".to_string(), "<p>Notes</p>".to_string());
        PackagedDocument {
            reading_order: vec![ContentUnit::new("OEBPS/ch1.xhtml", "<p>One</p>")],
            resources,
            ..PackagedDocument::default()
        }
    }

    #[test]
    fn test_resolve_strips_fragment() {
        let doc = document();
        assert_eq!(doc.resolve("OEBPS/ch1.xhtml#section-2"), Some("<p>One</p>"));
        assert_eq!(doc.resolve("OEBPS/ch1.xhtml"), Some("<p>One</p>"));
    }

    #[test]
    fn test_resolve_falls_back_to_resources() {
        let doc = document();
        assert_eq!(doc.resolve("OEBPS/notes.xhtml"), Some("<p>Notes</p>"));
    }

    #[test]
    fn test_resolve_failures() {
        let doc = document();
        assert_eq!(doc.resolve("OEBPS/missing.xhtml"), None);
        assert_eq!(doc.resolve("#only-fragment"), None);
        assert_eq!(doc.resolve(""), None);
    }

    #[test]
    fn test_content_path() {
        assert_eq!(content_path("./a/b.xhtml#x"), "a/b.xhtml");
        assert_eq!(content_path("a.xhtml"), "a.xhtml");
    }
}

//! EPUB Container Reader
//!
//! 将 EPUB 包转换为 `PackagedDocument`：
//! - 元数据：dc:title / dc:creator / dc:language
//! - 导航树：NCX / nav 文档，保留子条目
//! - 阅读顺序：spine 顺序，无法读取为文本的条目保留为空单元（不改变位置编号）
//! - 导航指向 spine 之外的文档时，额外载入到 resources

use epub::doc::{EpubDoc, NavPoint};
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::application::ports::{
    content_path, ContainerMetadata, ContainerReaderPort, ContentUnit, CoverImage, FormatError,
    NavigationItem, PackagedDocument,
};

/// EPUB 容器读取器（无状态）
#[derive(Debug, Clone, Copy, Default)]
pub struct EpubContainerReader;

impl EpubContainerReader {
    pub fn new() -> Self {
        Self
    }
}

impl ContainerReaderPort for EpubContainerReader {
    fn open(&self, data: &[u8]) -> Result<PackagedDocument, FormatError> {
        let mut doc = EpubDoc::from_reader(Cursor::new(data))
            .map_err(|e| FormatError::new(format!("not a readable EPUB container: {}", e)))?;

        let metadata = read_metadata(&doc);
        let navigation: Vec<NavigationItem> = doc.toc.iter().map(navigation_item).collect();
        let reading_order = read_spine(&mut doc);
        let resources = read_navigation_targets(&mut doc, &navigation, &reading_order);
        let cover_image = doc.get_cover().map(|(bytes, media_type)| CoverImage {
            bytes,
            media_type: Some(media_type).filter(|m| !m.is_empty()),
        });

        tracing::debug!(
            navigation = navigation.len(),
            reading_order = reading_order.len(),
            resources = resources.len(),
            has_cover = cover_image.is_some(),
            "EPUB container opened"
        );

        Ok(PackagedDocument {
            metadata,
            navigation,
            reading_order,
            resources,
            cover_image,
        })
    }
}

fn read_metadata<R: Read + Seek>(doc: &EpubDoc<R>) -> ContainerMetadata {
    let field = |name: &str| {
        doc.mdata(name)
            .map(|item| item.value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    ContainerMetadata {
        title: field("title"),
        author: field("creator"),
        language: field("language"),
    }
}

fn navigation_item(point: &NavPoint) -> NavigationItem {
    NavigationItem::new(point.label.clone(), path_string(&point.content))
        .with_children(point.children.iter().map(navigation_item).collect())
}

fn read_spine<R: Read + Seek>(doc: &mut EpubDoc<R>) -> Vec<ContentUnit> {
    let count = doc.get_num_chapters();
    let mut units = Vec::with_capacity(count);

    for position in 0..count {
        if !doc.set_current_chapter(position) {
            tracing::warn!(position, "Spine item could not be selected, kept empty");
            units.push(ContentUnit::new(String::new(), String::new()));
            continue;
        }

        let path = doc
            .get_current_path()
            .map(|p| path_string(&p))
            .unwrap_or_default();

        match doc.get_current_str() {
            Some((markup, _mime)) => units.push(ContentUnit::new(path, markup)),
            None => {
                tracing::warn!(path = %path, "Spine item is not readable text, kept empty");
                units.push(ContentUnit::new(path, String::new()));
            }
        }
    }

    units
}

fn read_navigation_targets<R: Read + Seek>(
    doc: &mut EpubDoc<R>,
    navigation: &[NavigationItem],
    reading_order: &[ContentUnit],
) -> HashMap<String, String> {
    let mut targets = Vec::new();
    for item in navigation {
        collect_targets(item, &mut targets);
    }

    let mut resources = HashMap::new();
    for target in targets {
        if target.is_empty()
            || resources.contains_key(target)
            || reading_order.iter().any(|unit| unit.path == target)
        {
            continue;
        }
        if let Some(markup) = doc.get_resource_str_by_path(target) {
            resources.insert(target.to_string(), markup);
        }
    }
    resources
}

fn collect_targets<'a>(item: &'a NavigationItem, out: &mut Vec<&'a str>) {
    out.push(content_path(&item.content_ref));
    for child in &item.children {
        collect_targets(child, out);
    }
}

/// 包内路径统一使用 `/` 分隔
fn path_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

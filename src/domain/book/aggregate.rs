//! Book Context - Aggregate Root

use serde::{Deserialize, Serialize};

use super::{BookMetadata, Chapter, ChapterDraft};

/// Book 聚合根
///
/// 不变量:
/// - 章节编号为 1..K，保持原始相对顺序
/// - 每个章节的段落编号为 1..M
/// - 不包含空章节
/// - 组装完成后不再被摄取流程修改（封面路径由持久化层回填）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    title: String,
    author: String,
    language_id: String,
    cover_image_path: Option<String>,
    chapters: Vec<Chapter>,
}

impl Book {
    /// 由章节草稿组装书籍
    ///
    /// 先过滤出有内容的章节，再单独一轮按位置编号
    pub fn assemble(metadata: BookMetadata, drafts: Vec<ChapterDraft>) -> Self {
        let surviving: Vec<ChapterDraft> = drafts
            .into_iter()
            .filter(ChapterDraft::has_content)
            .collect();

        let chapters = surviving
            .into_iter()
            .zip(1u32..)
            .filter_map(|(draft, number)| Chapter::new(number, draft.title, draft.paragraphs).ok())
            .collect();

        Self {
            title: metadata.title,
            author: metadata.author,
            language_id: metadata.language_id,
            cover_image_path: None,
            chapters,
        }
    }

    pub fn set_cover_image_path(&mut self, path: impl Into<String>) {
        self.cover_image_path = Some(path.into());
    }

    // Getters
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    pub fn cover_image_path(&self) -> Option<&str> {
        self.cover_image_path.as_deref()
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn paragraph_count(&self) -> usize {
        self.chapters.iter().map(Chapter::paragraph_count).sum()
    }

    pub fn get_chapter(&self, number: u32) -> Option<&Chapter> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        self.chapters.get(index)
    }
}

//! 编号与组装
//!
//! 候选章节 → 提取段落 → 丢弃空章节 → 连续编号 → 应用元数据覆盖策略

use crate::application::ports::ContainerMetadata;
use crate::domain::book::{Book, BookMetadata, ChapterDraft, MetadataSource};
use crate::domain::markup::ContentBlockExtractor;

use super::structure::CandidateChapter;

/// 书籍组装器
#[derive(Debug, Clone, Default)]
pub struct BookAssembler {
    extractor: ContentBlockExtractor,
}

impl BookAssembler {
    pub fn new(extractor: ContentBlockExtractor) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &ContentBlockExtractor {
        &self.extractor
    }

    /// 组装书籍
    ///
    /// 零个章节存活不是错误，返回空章节列表的书籍
    pub fn assemble(
        &self,
        candidates: Vec<CandidateChapter<'_>>,
        caller: &MetadataSource,
        extracted: &ContainerMetadata,
    ) -> Book {
        let drafts: Vec<ChapterDraft> = candidates
            .into_iter()
            .filter_map(|candidate| self.draft(candidate))
            .collect();

        let extracted = MetadataSource {
            title: extracted.title.clone(),
            author: extracted.author.clone(),
            language_id: extracted.language.clone(),
        };
        let metadata = BookMetadata::resolve(&extracted, caller);

        Book::assemble(metadata, drafts)
    }

    fn draft(&self, candidate: CandidateChapter<'_>) -> Option<ChapterDraft> {
        match self.extractor.extract_with_tier(candidate.markup) {
            Some((tier, paragraphs)) => {
                tracing::trace!(
                    title = %candidate.title,
                    tier = tier.as_str(),
                    paragraphs = paragraphs.len(),
                    "Chapter extracted"
                );
                Some(ChapterDraft::new(candidate.title, paragraphs))
            }
            None => {
                tracing::debug!(title = %candidate.title, "Chapter has no paragraphs, dropped");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::markup::ExtractorConfig;

    fn candidate<'a>(title: &str, markup: &'a str) -> CandidateChapter<'a> {
        CandidateChapter {
            title: title.to_string(),
            markup,
        }
    }

    #[test]
    fn test_numbering_is_contiguous_after_drops() {
        let candidates = vec![
            candidate("Cover", "<div><img src=\"cover.jpg\"/></div>"),
            candidate("One", "<p>a</p><p></p><p>b</p>"),
            candidate("Copyright", "<div>(c)</div>"),
            candidate("Two", "<p>c</p>"),
        ];
        let book = BookAssembler::default().assemble(
            candidates,
            &MetadataSource::default(),
            &ContainerMetadata::default(),
        );

        let chapters: Vec<(u32, &str)> = book
            .chapters()
            .iter()
            .map(|c| (c.number(), c.title()))
            .collect();
        assert_eq!(chapters, vec![(1, "One"), (2, "Two")]);

        let first: Vec<(u32, &str)> = book.chapters()[0]
            .paragraphs()
            .iter()
            .map(|p| (p.number(), p.text()))
            .collect();
        assert_eq!(first, vec![(1, "a"), (2, "b")]);
    }

    #[test]
    fn test_metadata_policy_applied() {
        let caller = MetadataSource {
            title: Some("Untitled".to_string()),
            author: Some("Uploader".to_string()),
            language_id: Some("en-US".to_string()),
        };
        let extracted = ContainerMetadata {
            title: Some("Moby Dick".to_string()),
            author: Some(" ".to_string()),
            language: Some("en".to_string()),
        };
        let book = BookAssembler::default().assemble(Vec::new(), &caller, &extracted);

        assert_eq!(book.title(), "Moby Dick");
        assert_eq!(book.author(), "Uploader");
        assert_eq!(book.language_id(), "en-US");
        assert_eq!(book.chapter_count(), 0);
    }

    #[test]
    fn test_uses_configured_extractor() {
        let assembler = BookAssembler::new(ContentBlockExtractor::new(ExtractorConfig {
            min_block_chars: 3,
        }));
        let book = assembler.assemble(
            vec![candidate("Short", "<div>abc</div>")],
            &MetadataSource::default(),
            &ContainerMetadata::default(),
        );
        assert_eq!(book.chapter_count(), 1);
        assert_eq!(assembler.extractor().config().min_block_chars, 3);
    }
}

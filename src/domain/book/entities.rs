//! Book Context - Entities

use serde::{Deserialize, Serialize};

use super::BookError;

/// 段落 - 最小朗读单位
///
/// 不变量:
/// - number 从 1 开始，在章节内连续
/// - text 非空且不全为空白
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    number: u32,
    text: String,
}

impl Paragraph {
    pub fn new(number: u32, text: impl Into<String>) -> Result<Self, BookError> {
        let text = text.into();
        if number == 0 {
            return Err(BookError::InvalidNumber("paragraph"));
        }
        if text.trim().is_empty() {
            return Err(BookError::EmptyParagraph);
        }
        Ok(Self { number, text })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// 章节
///
/// 不变量:
/// - number 从 1 开始，在书内连续
/// - 至少包含一个段落
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    number: u32,
    title: String,
    paragraphs: Vec<Paragraph>,
}

impl Chapter {
    /// 以给定编号构建章节，段落按顺序编号为 1..M
    ///
    /// 空白段落会在编号前被过滤；过滤后无段落时返回错误
    pub fn new(number: u32, title: impl Into<String>, texts: Vec<String>) -> Result<Self, BookError> {
        let title = title.into();
        if number == 0 {
            return Err(BookError::InvalidNumber("chapter"));
        }

        let paragraphs = texts
            .into_iter()
            .filter(|text| !text.trim().is_empty())
            .zip(1u32..)
            .map(|(text, number)| Paragraph::new(number, text))
            .collect::<Result<Vec<_>, _>>()?;

        if paragraphs.is_empty() {
            return Err(BookError::EmptyChapter(title));
        }

        Ok(Self {
            number,
            title,
            paragraphs,
        })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn get_paragraph(&self, number: u32) -> Option<&Paragraph> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        self.paragraphs.get(index)
    }
}

/// 未编号的章节草稿（标题 + 已提取的段落文本）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterDraft {
    pub title: String,
    pub paragraphs: Vec<String>,
}

impl ChapterDraft {
    pub fn new(title: impl Into<String>, paragraphs: Vec<String>) -> Self {
        Self {
            title: title.into(),
            paragraphs,
        }
    }

    /// 是否还有可保留的段落
    pub fn has_content(&self) -> bool {
        self.paragraphs.iter().any(|text| !text.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_rejects_blank_text() {
        assert!(Paragraph::new(1, "  \n\t").is_err());
        assert!(Paragraph::new(0, "text").is_err());
        assert_eq!(Paragraph::new(3, "text").unwrap().number(), 3);
    }

    #[test]
    fn test_chapter_numbers_paragraphs_after_filtering() {
        let texts = vec![
            "first".to_string(),
            "   ".to_string(),
            "second".to_string(),
            String::new(),
            "third".to_string(),
        ];
        let chapter = Chapter::new(1, "Opening", texts).unwrap();

        let numbers: Vec<u32> = chapter.paragraphs().iter().map(Paragraph::number).collect();
        let texts: Vec<&str> = chapter.paragraphs().iter().map(Paragraph::text).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(chapter.get_paragraph(2).unwrap().text(), "second");
        assert!(chapter.get_paragraph(0).is_none());
        assert!(chapter.get_paragraph(4).is_none());
    }

    #[test]
    fn test_chapter_without_content_is_rejected() {
        let result = Chapter::new(1, "Blank", vec![" ".to_string()]);
        assert!(matches!(result, Err(BookError::EmptyChapter(title)) if title == "Blank"));
    }

    #[test]
    fn test_draft_content_detection() {
        assert!(!ChapterDraft::new("a", vec![]).has_content());
        assert!(!ChapterDraft::new("a", vec!["\t".to_string()]).has_content());
        assert!(ChapterDraft::new("a", vec!["x".to_string()]).has_content());
    }
}

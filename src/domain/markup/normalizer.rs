//! 文本规范化
//!
//! 标记片段 → 纯文本，严格按以下顺序：
//! 1. 解析片段（scraper），只保留文本节点：标签、注释、script/style 被去除，
//!    字符实体在解析时解码
//! 2. 连续空白（含换行、制表符）折叠为一个空格
//! 3. 去除首尾空白
//!
//! 实体解码可能产生新的类标签文本（如 `&lt;b&gt;`），因此整个流程重复执行
//! 直到结果不再变化，保证幂等。代价是书中以转义形式出现的标记文本会在后续
//! 轮次中被当作标签去除：`&lt;html&gt; is the root` → `is the root`，
//! `if x&lt;y and y&gt;z then` → `if xz then`。不构成标签的 `<`、`&` 保留。

use scraper::Html;

use super::dom::{walk, DomEvent};

/// 规范化标记片段为纯文本
pub fn normalize(fragment: &str) -> String {
    let mut current = normalize_once(fragment);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// 片段中的全部文本（已解码实体，未折叠空白）
pub fn fragment_text(fragment: &str) -> String {
    let document = Html::parse_fragment(fragment);
    let mut text = String::with_capacity(fragment.len());
    walk(&document, |event| {
        if let DomEvent::Text(run) = event {
            text.push_str(run);
        }
    });
    text
}

/// 折叠空白并去除首尾空白
pub fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !collapsed.is_empty() {
            collapsed.push(' ');
        }
        collapsed.push_str(word);
    }
    collapsed
}

fn normalize_once(fragment: &str) -> String {
    if fragment.is_empty() {
        return String::new();
    }
    collapse_whitespace(&fragment_text(fragment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(normalize("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(normalize("&quot;Hi&quot; &#8212; &#x41;"), "\"Hi\" \u{2014} A");
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        assert_eq!(normalize("Hello\n\n   world"), "Hello world");
        assert_eq!(normalize("\t a \r\n b \u{00A0} c "), "a b c");
        assert_eq!(normalize("a&nbsp;&nbsp;b"), "a b");
    }

    #[test]
    fn test_tags_are_removed() {
        assert_eq!(normalize("<b>bold</b> and <em class=\"x\">em</em>"), "bold and em");
        assert_eq!(normalize("line<br/>break"), "linebreak");
        assert_eq!(normalize("<!-- note -->text"), "text");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_literal_angle_brackets_survive() {
        assert_eq!(normalize("1 &lt; 2"), "1 < 2");
        assert_eq!(normalize("a < b"), "a < b");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Tom &amp; Jerry",
            "&amp;amp;lt;",
            "&lt;b&gt;bold&lt;/b&gt; text",
            "x &lt; y &gt; z",
            "<p>Hello\n\n   world</p>",
            "a &lt;!-- c --&gt; d",
            "&#60;p&#62;nested&#60;/p&#62;",
            "plain",
            "",
            "<unclosed attr=\"value",
            "中文&nbsp;文本\u{3000}测试",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_fragment_text_keeps_text_runs() {
        assert_eq!(fragment_text("<div>a<span>b</span>c</div>"), "abc");
        assert_eq!(fragment_text("<script>x()</script>y"), "y");
    }

    #[test]
    fn test_escaped_markup_is_removed_on_later_passes() {
        assert_eq!(normalize("&lt;html&gt; is the root"), "is the root");
        assert_eq!(normalize("if x&lt;y and y&gt;z then"), "if xz then");
        // 不构成标签的字符保留
        assert_eq!(normalize("if x &lt; y then"), "if x < y then");
        assert_eq!(normalize("AT&amp;T"), "AT&T");
    }
}

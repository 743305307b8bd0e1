//! 解析树遍历
//!
//! 标记交给 scraper（html5ever）解析，隐式闭合、未闭合元素、实体等按 HTML
//! 解析规则处理。这里只按文档顺序产出文本与元素开闭事件，script/style
//! 子树整体跳过。

use scraper::{Html, Node};

/// 整体跳过（含内容）的元素
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// 遍历事件，元素名为去掉命名空间前缀后的本地名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEvent<'a> {
    Text(&'a str),
    Open(&'a str),
    Close(&'a str),
}

impl DomEvent<'_> {
    /// 是否为指定元素的开或闭事件（不区分大小写）
    pub fn is_element(&self, name: &str) -> bool {
        match self {
            DomEvent::Open(tag) | DomEvent::Close(tag) => tag.eq_ignore_ascii_case(name),
            DomEvent::Text(_) => false,
        }
    }

    pub fn is_any_element(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.is_element(name))
    }
}

/// 按文档顺序遍历根元素下的所有节点
///
/// 使用显式栈，深层嵌套的输入不会耗尽调用栈
pub fn walk<'a>(document: &'a Html, mut visit: impl FnMut(DomEvent<'a>)) {
    let root = document.root_element();
    let root_name = local_name(root.value().name());
    visit(DomEvent::Open(root_name));
    let mut stack = vec![(root_name, root.children())];

    loop {
        let Some((name, children)) = stack.last_mut() else {
            break;
        };
        let name = *name;
        let Some(child) = children.next() else {
            stack.pop();
            visit(DomEvent::Close(name));
            continue;
        };

        match child.value() {
            Node::Text(text) => visit(DomEvent::Text(&**text)),
            Node::Element(element) => {
                let tag = local_name(element.name());
                if is_raw_text(tag) {
                    continue;
                }
                visit(DomEvent::Open(tag));
                stack.push((tag, child.children()));
            }
            _ => {}
        }
    }
}

fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|raw| tag.eq_ignore_ascii_case(raw))
}

/// `xhtml:p` → `p`
fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

//! Doc comment rendering
//!
//! Comment bodies are markdown. They are rewritten once to turn
//! `{@link Name#member}` references into ordinary in-page links and then
//! handed to a [`Markdown`] implementation that produces document nodes.

use crate::diagnostics::RenderResult;
use crate::dom::{tag, DocNode, Element};
use crate::slug::link_slug;
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, Options};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// Regex for {@link ...} references
    static ref LINK_REGEX: Regex = Regex::new(r"\{@link ([\w#.]+)\}").unwrap();
}

/// Markdown to document tree conversion
pub trait Markdown: Send + Sync {
    /// Render a markdown string into block-level nodes
    fn render(&self, text: &str) -> RenderResult<Vec<DocNode>>;
}

/// Rewrite `{@link Target}` into ``[`Target`](#slug)``
pub fn rewrite_links(text: &str, globals_prefix: &str) -> String {
    LINK_REGEX
        .replace_all(text, |caps: &Captures| {
            let target = &caps[1];
            format!("[`{}`](#{})", target, link_slug(target, globals_prefix))
        })
        .into_owned()
}

/// [`Markdown`] implementation backed by comrak
#[derive(Debug, Clone, Default)]
pub struct ComrakMarkdown {
    /// Class prefix for fenced code blocks, e.g. `code-block_`
    pub code_class_prefix: String,
}

impl ComrakMarkdown {
    /// Create a renderer with the default code class prefix
    pub fn new() -> Self {
        Self {
            code_class_prefix: "code-block_".to_string(),
        }
    }
}

impl Markdown for ComrakMarkdown {
    fn render(&self, text: &str) -> RenderResult<Vec<DocNode>> {
        let arena = Arena::new();
        let mut options = Options::default();
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        let root = parse_document(&arena, text, &options);
        Ok(self.convert_children(root))
    }
}

impl ComrakMarkdown {
    fn convert_children<'a>(&self, node: &'a AstNode<'a>) -> Vec<DocNode> {
        node.children()
            .flat_map(|child| self.convert(child))
            .collect()
    }

    fn convert<'a>(&self, node: &'a AstNode<'a>) -> Vec<DocNode> {
        let value = node.data.borrow().value.clone();
        let element = |tag_name: &str| tag(tag_name, self.convert_children(node));
        let single = |el: Element| vec![el.into_node()];

        match value {
            NodeValue::Text(text) => vec![DocNode::text(text)],
            NodeValue::SoftBreak => vec![DocNode::text("\n")],
            NodeValue::LineBreak => single(tag("br", vec![])),
            NodeValue::Code(code) => single(tag("code", vec![DocNode::text(code.literal)])),
            NodeValue::HtmlInline(_) => vec![],
            NodeValue::Paragraph => single(element("p")),
            NodeValue::Emph => single(element("em")),
            NodeValue::Strong => single(element("strong")),
            NodeValue::Strikethrough => single(element("del")),
            NodeValue::BlockQuote => single(element("blockquote")),
            NodeValue::Item(_) => single(element("li")),
            NodeValue::ThematicBreak => single(tag("hr", vec![])),
            NodeValue::Heading(heading) => single(element(&format!("h{}", heading.level))),
            NodeValue::List(list) => match list.list_type {
                ListType::Bullet => single(element("ul")),
                ListType::Ordered => single(element("ol")),
            },
            NodeValue::Link(link) => {
                let mut el = element("a").prop("href", link.url);
                if !link.title.is_empty() {
                    el = el.prop("title", link.title);
                }
                single(el)
            }
            NodeValue::Image(link) => single(
                tag("img", vec![])
                    .prop("src", link.url)
                    .prop("alt", crate::dom::to_text(&self.convert_children(node))),
            ),
            NodeValue::CodeBlock(block) => {
                let mut code = tag("code", vec![DocNode::text(block.literal)]);
                let lang = block.info.split_whitespace().next().unwrap_or_default();
                if !lang.is_empty() {
                    code = code.class(format!("{}{}", self.code_class_prefix, lang));
                }
                single(tag("pre", vec![code.into_node()]))
            }
            NodeValue::HtmlBlock(_) => vec![],
            NodeValue::Table(_) => single(element("table")),
            NodeValue::TableRow(_) => single(element("tr")),
            NodeValue::TableCell => {
                let header = node
                    .parent()
                    .is_some_and(|row| matches!(row.data.borrow().value, NodeValue::TableRow(true)));
                single(element(if header { "th" } else { "td" }))
            }
            _ => self.convert_children(node),
        }
    }
}

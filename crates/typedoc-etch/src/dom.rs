//! Document tree
//!
//! The renderer produces a small HTML-shaped tree instead of strings, so
//! the layout can post-process headings (anchors, edit links) before
//! serializing. `to_html` is the default serialization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node in the rendered document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DocNode {
    /// Literal text
    Text { value: String },
    /// HTML element
    Element(Element),
}

/// HTML element with renderer-internal annotations
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub tag_name: String,

    #[serde(default)]
    pub properties: IndexMap<String, String>,

    #[serde(default)]
    pub children: Vec<DocNode>,

    /// Anchor for headings
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub slug: Option<String>,

    /// Source edit link for headings
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub edit_url: Option<String>,

    /// Layout hint: do not add the default styling class
    #[serde(default, skip_serializing_if = "is_false")]
    pub no_class: bool,

    /// Layout hint: heading gets no anchor
    #[serde(default, skip_serializing_if = "is_false")]
    pub no_slug: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Element {
    /// Add a property
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Set the `class` property
    pub fn class(self, class_name: impl Into<String>) -> Self {
        self.prop("class", class_name)
    }

    /// Set the anchor slug
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Set the edit link
    pub fn edit_url(mut self, url: Option<String>) -> Self {
        self.edit_url = url;
        self
    }

    /// Mark as unstyled
    pub fn no_class(mut self) -> Self {
        self.no_class = true;
        self
    }

    /// Mark as anchorless
    pub fn no_slug(mut self) -> Self {
        self.no_slug = true;
        self
    }

    /// Wrap into a node
    pub fn into_node(self) -> DocNode {
        DocNode::Element(self)
    }
}

impl DocNode {
    /// Create a text node
    pub fn text(value: impl Into<String>) -> Self {
        DocNode::Text {
            value: value.into(),
        }
    }

    /// Empty text placeholder, used to keep table columns aligned
    pub fn empty() -> Self {
        Self::text("")
    }

    /// Element if this node is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            DocNode::Element(el) => Some(el),
            DocNode::Text { .. } => None,
        }
    }

    /// Flattened text content
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        match self {
            DocNode::Text { value } => out.push_str(value),
            DocNode::Element(el) => {
                for child in &el.children {
                    child.write_text(out);
                }
            }
        }
    }

    /// Serialize to HTML. Slugs become `id` attributes.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            DocNode::Text { value } => out.push_str(&html_escape::encode_text(value)),
            DocNode::Element(el) => {
                out.push('<');
                out.push_str(&el.tag_name);
                if let Some(slug) = el.slug.as_ref().filter(|_| !el.no_slug) {
                    write_attr(out, "id", slug);
                }
                for (key, value) in &el.properties {
                    write_attr(out, key, value);
                }
                out.push('>');
                if is_void_element(&el.tag_name) {
                    return;
                }
                for child in &el.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(&el.tag_name);
                out.push('>');
            }
        }
    }
}

fn write_attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    out.push_str(&html_escape::encode_double_quoted_attribute(value));
    out.push('"');
}

fn is_void_element(tag_name: &str) -> bool {
    matches!(tag_name, "br" | "hr" | "img")
}

/// Build an element from a tag name and children
pub fn tag(tag_name: &str, children: Vec<DocNode>) -> Element {
    Element {
        tag_name: tag_name.to_string(),
        children,
        ..Default::default()
    }
}

/// Build an element holding a single text child
pub fn tag_text(tag_name: &str, text: impl Into<String>) -> Element {
    tag(tag_name, vec![DocNode::text(text)])
}

/// Concatenate inline runs with a text separator between them
pub fn join(separator: &str, parts: Vec<Vec<DocNode>>) -> Vec<DocNode> {
    let last = parts.len().saturating_sub(1);
    let mut out = Vec::new();
    for (index, part) in parts.into_iter().enumerate() {
        out.extend(part);
        if index != last {
            out.push(DocNode::text(separator));
        }
    }
    out
}

/// Flattened text of a node list
pub fn to_text(nodes: &[DocNode]) -> String {
    nodes.iter().map(DocNode::to_text).collect()
}

/// Inline children of the first block, or nothing
pub fn first_block_children(nodes: Vec<DocNode>) -> Vec<DocNode> {
    match nodes.into_iter().next() {
        Some(DocNode::Element(el)) => el.children,
        _ => vec![],
    }
}

/// Root of a rendered page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    pub children: Vec<DocNode>,
}

impl Document {
    /// Serialize all top-level nodes to HTML
    pub fn to_html(&self) -> String {
        self.children.iter().map(DocNode::to_html).collect()
    }
}

//! Page assembly and submenu

use super::symbol::by_name;
use super::{render_class, render_function, render_variable, RenderContext};
use crate::config::RenderConfig;
use crate::diagnostics::RenderResult;
use crate::dom::{tag, tag_text, DocNode, Document};
use crate::reflection::{Declaration, ReflectionKind};
use serde::{Deserialize, Serialize};

/// Entry of the page submenu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmenuItem {
    /// Link to a symbol on the page
    Link { code: String, link: String },
    /// Titled list of links
    Group { text: String, ul: Vec<SubmenuItem> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Functions,
    Variables,
    Types,
}

impl Group {
    const ALL: [Group; 3] = [Group::Functions, Group::Variables, Group::Types];

    fn title(self) -> &'static str {
        match self {
            Group::Functions => "Functions",
            Group::Variables => "Variables",
            Group::Types => "Types",
        }
    }

    fn contains(self, config: &RenderConfig, decl: &Declaration) -> bool {
        match self {
            Group::Functions => decl.kind == ReflectionKind::Function,
            Group::Variables => {
                decl.kind == ReflectionKind::Variable
                    && !config.excluded_variables.contains(&decl.name)
            }
            Group::Types => matches!(
                decl.kind,
                ReflectionKind::TypeAlias | ReflectionKind::Interface
            ),
        }
    }
}

/// Top-level declarations that get a section, inline types removed
fn visible<'d>(config: &RenderConfig, decls: &'d [Declaration]) -> Vec<&'d Declaration> {
    decls.iter().filter(|d| !config.is_inline(&d.name)).collect()
}

fn classes<'d>(decls: &[&'d Declaration]) -> Vec<&'d Declaration> {
    let mut classes: Vec<&Declaration> = decls
        .iter()
        .copied()
        .filter(|d| d.kind == ReflectionKind::Class)
        .collect();
    classes.sort_by(|a, b| by_name(a, b));
    classes
}

fn group_items<'d>(
    config: &RenderConfig,
    group: Group,
    decls: &[&'d Declaration],
) -> Vec<&'d Declaration> {
    let mut items: Vec<&Declaration> = decls
        .iter()
        .copied()
        .filter(|d| group.contains(config, d) && !config.is_simple(&d.name))
        .collect();
    items.sort_by(|a, b| by_name(a, b));
    items
}

/// Render a whole page: classes first, then the Functions, Variables and
/// Types groups.
pub fn render_page(
    ctx: &RenderContext,
    decls: &[Declaration],
) -> RenderResult<(Document, Vec<SubmenuItem>)> {
    let decls = visible(ctx.config, decls);
    let mut children = Vec::new();

    for cls in classes(&decls) {
        children.push(render_class(ctx, cls)?);
    }

    let mut symbols = children.len();
    for group in Group::ALL {
        let items = group_items(ctx.config, group, &decls);
        if items.is_empty() {
            continue;
        }
        symbols += items.len();

        let mut article = vec![tag_text("h1", group.title()).no_slug().into_node()];
        for item in items {
            article.push(if item.is_callable() {
                render_function(ctx, item)?
            } else {
                render_variable(ctx, item)?
            });
        }
        children.push(tag("article", article).into_node());
    }

    tracing::debug!(
        page = %ctx.page,
        declarations = decls.len(),
        symbols,
        "rendered page"
    );
    Ok((Document { children }, submenu_items(ctx, &decls)))
}

/// Submenu for a page: class links, then Functions and Variables lists
pub fn render_submenu(ctx: &RenderContext, decls: &[Declaration]) -> Vec<SubmenuItem> {
    submenu_items(ctx, &visible(ctx.config, decls))
}

fn submenu_items(ctx: &RenderContext, decls: &[&Declaration]) -> Vec<SubmenuItem> {
    let mut submenu: Vec<SubmenuItem> = classes(decls)
        .into_iter()
        .map(|cls| SubmenuItem::Link {
            code: cls.name.clone(),
            link: format!("#{}", cls.name.to_lowercase()),
        })
        .collect();

    for group in [Group::Functions, Group::Variables] {
        let items = group_items(ctx.config, group, decls);
        if items.is_empty() {
            continue;
        }
        let ul = items
            .into_iter()
            .map(|item| SubmenuItem::Link {
                code: if item.kind == ReflectionKind::Function {
                    format!("{}()", item.name)
                } else {
                    item.name.clone()
                },
                link: format!("#{}", ctx.to_slug(&item.name)),
            })
            .collect();
        submenu.push(SubmenuItem::Group {
            text: group.title().to_string(),
            ul,
        });
    }
    submenu
}

/// Count of sections a page will contain
pub(crate) fn symbol_count(document: &Document) -> usize {
    fn count(node: &DocNode) -> usize {
        match node {
            DocNode::Element(el) => {
                let own = matches!(el.tag_name.as_str(), "article" | "section")
                    && el.children.first().and_then(DocNode::as_element).is_some_and(|h| !h.no_slug);
                usize::from(own) + el.children.iter().map(count).sum::<usize>()
            }
            DocNode::Text { .. } => 0,
        }
    }
    document.children.iter().map(count).sum()
}

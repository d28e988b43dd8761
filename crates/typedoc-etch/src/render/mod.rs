//! Declaration to document rendering
//!
//! Every renderer takes the per-page [`RenderContext`] explicitly, so pages
//! can be rendered in parallel with one context each.

mod decl;
mod page;
mod symbol;
mod table;
mod ts_type;

pub use decl::render_decl;
pub use page::{render_page, render_submenu, SubmenuItem};
pub(crate) use page::symbol_count;
pub use symbol::{render_class, render_function, render_members, render_variable, resolve_children};
pub use table::render_table;
pub use ts_type::render_type;

use crate::config::RenderConfig;
use crate::diagnostics::RenderResult;
use crate::dom::{first_block_children, tag, DocNode};
use crate::markdown::{rewrite_links, Markdown};
use crate::reflection::Comment;
use crate::slug;
use crate::types::TypeExpr;
use regex::Regex;

/// Per-page rendering state
pub struct RenderContext<'a> {
    /// Page identity, e.g. `node-api`
    pub page: String,
    pub config: &'a RenderConfig,
    pub markdown: &'a dyn Markdown,
    edit_url: Regex,
}

impl<'a> RenderContext<'a> {
    /// Create a context for one page
    pub fn new(
        page: impl Into<String>,
        config: &'a RenderConfig,
        markdown: &'a dyn Markdown,
    ) -> RenderResult<Self> {
        config.validate()?;
        Ok(Self {
            page: page.into(),
            config,
            markdown,
            edit_url: config.edit_url.regex()?,
        })
    }

    /// Anchor of a top-level symbol
    pub fn to_slug(&self, name: &str) -> String {
        slug::to_slug(name, &self.config.globals_prefix)
    }

    /// Render free text, resolving `{@link}` shorthands first
    pub fn render_markdown(&self, text: &str) -> RenderResult<Vec<DocNode>> {
        if text.trim().is_empty() {
            return Ok(vec![]);
        }
        let text = rewrite_links(text, &self.config.globals_prefix);
        self.markdown.render(&text)
    }

    /// Blocks of a doc comment, nothing when absent
    pub fn render_comment(&self, comment: Option<&Comment>) -> RenderResult<Vec<DocNode>> {
        match comment {
            Some(comment) => self.render_markdown(&comment.body()),
            None => Ok(vec![]),
        }
    }

    /// "Edit on GitHub" link for a source file
    pub fn edit_url(&self, file_name: &str) -> Option<String> {
        let file_name = file_name.replace('\\', "/");
        let caps = self.edit_url.captures(&file_name)?;
        Some(
            self.config
                .edit_url
                .template
                .replace("{name}", &caps["name"])
                .replace("{path}", &caps["path"]),
        )
    }
}

/// `Type: <code>T</code>. `
pub(crate) fn prop_type_html(ctx: &RenderContext, ty: Option<&TypeExpr>) -> RenderResult<Vec<DocNode>> {
    let Some(ty) = ty else {
        return Ok(vec![]);
    };
    Ok(vec![tag(
        "p",
        vec![
            DocNode::text("Type: "),
            tag("code", render_type(ctx, ty)?).no_class().into_node(),
            DocNode::text(". "),
        ],
    )
    .into_node()])
}

/// Inline children of the first paragraph of a comment
pub(crate) fn comment_inline(ctx: &RenderContext, comment: Option<&Comment>) -> RenderResult<Vec<DocNode>> {
    Ok(first_block_children(ctx.render_comment(comment)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::ComrakMarkdown;

    #[test]
    fn test_edit_url() {
        let config = RenderConfig::default();
        let md = ComrakMarkdown::new();
        let ctx = RenderContext::new("web-api", &config, &md).unwrap();
        assert_eq!(
            ctx.edit_url("/home/ci/logux-client/client/index.d.ts").as_deref(),
            Some("https://github.com/logux/client/edit/master/client/index.d.ts")
        );
        assert_eq!(
            ctx.edit_url("C:\\src\\logux-core\\log\\index.d.ts").as_deref(),
            Some("https://github.com/logux/core/edit/master/log/index.d.ts")
        );
        assert_eq!(ctx.edit_url("src/unrelated.ts"), None);
    }

    #[test]
    fn test_render_comment_absent() {
        let config = RenderConfig::default();
        let md = ComrakMarkdown::new();
        let ctx = RenderContext::new("web-api", &config, &md).unwrap();
        assert!(ctx.render_comment(None).unwrap().is_empty());
        assert!(ctx
            .render_comment(Some(&Comment::default()))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_render_comment_rewrites_links() {
        let config = RenderConfig::default();
        let md = ComrakMarkdown::new();
        let ctx = RenderContext::new("web-api", &config, &md).unwrap();
        let nodes = ctx
            .render_comment(Some(&Comment::short("See {@link Log#add}.")))
            .unwrap();
        let html: String = nodes.iter().map(DocNode::to_html).collect();
        assert!(html.contains("href=\"#log-add\""));
    }
}

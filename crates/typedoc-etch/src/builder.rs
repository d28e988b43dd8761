//! Page builder and layouts
//!
//! `ApiBuilder` turns a set of top-level declarations into one finished
//! HTML page. It does no I/O: the caller writes `BuildOutput::html` to
//! `BuildOutput::path` under its own output directory.
//!
//! # Usage
//!
//! ```
//! use typedoc_etch::builder::{ApiBuilder, StandaloneLayout};
//! use typedoc_etch::test::mock_variable;
//! use typedoc_etch::types::TypeExpr;
//!
//! let decls = vec![mock_variable("actionEvents", TypeExpr::intrinsic("string"))];
//! let layout = StandaloneLayout::new().unwrap();
//! let output = ApiBuilder::new("Web API").build(&decls, &layout).unwrap();
//! assert_eq!(output.url, "/web-api/");
//! assert!(output.html.contains("globals-actionevents"));
//! ```

use crate::config::RenderConfig;
use crate::diagnostics::{RenderError, RenderResult};
use crate::dom::Document;
use crate::markdown::{ComrakMarkdown, Markdown};
use crate::reflection::{load_declarations, Declaration};
use crate::render::{render_page, RenderContext, SubmenuItem};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::PathBuf;

/// Wraps a rendered page tree into a complete HTML document
pub trait Layout: Send + Sync {
    /// Render the page at `url`.
    ///
    /// `title` is the page title with a ` / ` separator appended, ready to
    /// be followed by a site name.
    fn render(
        &self,
        url: &str,
        submenu: &[SubmenuItem],
        title: &str,
        tree: &Document,
    ) -> RenderResult<String>;
}

const STANDALONE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{title}}{{site_name}}</title>
    <link rel="canonical" href="{{url}}">
</head>
<body>
<nav>
<ul>
{{#each submenu}}
{{#if link}}
    <li><a href="{{link}}"><code>{{code}}</code></a></li>
{{else}}
    <li>{{text}}<ul>
{{#each ul}}
        <li><a href="{{link}}"><code>{{code}}</code></a></li>
{{/each}}
    </ul></li>
{{/if}}
{{/each}}
</ul>
</nav>
<main>
{{{body}}}
</main>
</body>
</html>
"##;

#[derive(Serialize)]
struct PageContext<'a> {
    url: &'a str,
    title: &'a str,
    site_name: &'a str,
    submenu: &'a [SubmenuItem],
    body: String,
}

/// Minimal HTML5 page with a navigation list and the rendered tree
pub struct StandaloneLayout {
    /// Appended to the page title
    pub site_name: String,
    registry: Handlebars<'static>,
}

impl StandaloneLayout {
    const TEMPLATE_NAME: &'static str = "page";

    /// Create a layout with the built-in template
    pub fn new() -> RenderResult<Self> {
        Self::with_template(STANDALONE_TEMPLATE)
    }

    /// Create a layout from a custom handlebars template.
    ///
    /// The template receives `url`, `title`, `site_name`, `submenu` and the
    /// serialized tree as `body`.
    pub fn with_template(template: &str) -> RenderResult<Self> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string(Self::TEMPLATE_NAME, template)
            .map_err(|e| RenderError::layout(e.to_string()))?;
        Ok(Self {
            site_name: "Logux".to_string(),
            registry,
        })
    }

    /// Set the site name
    pub fn site_name(mut self, name: impl Into<String>) -> Self {
        self.site_name = name.into();
        self
    }
}

impl Layout for StandaloneLayout {
    fn render(
        &self,
        url: &str,
        submenu: &[SubmenuItem],
        title: &str,
        tree: &Document,
    ) -> RenderResult<String> {
        let context = PageContext {
            url,
            title,
            site_name: &self.site_name,
            submenu,
            body: tree.to_html(),
        };
        self.registry
            .render(Self::TEMPLATE_NAME, &context)
            .map_err(|e| RenderError::layout(e.to_string()))
    }
}

/// A finished page
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// Page identity, e.g. `node-api`
    pub file: String,
    /// Site URL, e.g. `/node-api/`
    pub url: String,
    /// Output path relative to the site root
    pub path: PathBuf,
    /// Complete HTML from the layout
    pub html: String,
    /// Number of anchored sections on the page
    pub symbol_count: usize,
}

/// Page identity from a title: whitespace becomes `-`, then lower-case
pub fn page_file(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Builder for one API page
pub struct ApiBuilder {
    /// Page title, e.g. `Node API`
    pub title: String,
    pub config: RenderConfig,
    markdown: Box<dyn Markdown>,
}

impl ApiBuilder {
    /// Create a builder with the default tables and comrak markdown
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            config: RenderConfig::default(),
            markdown: Box::new(ComrakMarkdown::new()),
        }
    }

    /// Use a custom configuration
    pub fn config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom markdown renderer
    pub fn markdown(mut self, markdown: impl Markdown + 'static) -> Self {
        self.markdown = Box::new(markdown);
        self
    }

    /// Render the page and pass it through `layout`
    pub fn build(&self, decls: &[Declaration], layout: &dyn Layout) -> RenderResult<BuildOutput> {
        let file = page_file(&self.title);
        let url = format!("/{}/", file);
        tracing::debug!(title = %self.title, %file, "building API page");

        let ctx = RenderContext::new(file.as_str(), &self.config, self.markdown.as_ref())?;
        let (tree, submenu) = render_page(&ctx, decls)?;
        let symbol_count = crate::render::symbol_count(&tree);
        let html = layout.render(&url, &submenu, &format!("{} / ", self.title), &tree)?;

        Ok(BuildOutput {
            path: PathBuf::from(&file).join("index.html"),
            file,
            url,
            html,
            symbol_count,
        })
    }

    /// Load TypeDoc JSON and build the page
    pub fn build_json(&self, json: &str, layout: &dyn Layout) -> RenderResult<BuildOutput> {
        let decls = load_declarations(json)?;
        self.build(&decls, layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::*;
    use crate::types::TypeExpr;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Records what the builder hands to the layout
    #[derive(Default)]
    struct RecordingLayout {
        seen: Mutex<Vec<(String, String, usize)>>,
    }

    impl Layout for RecordingLayout {
        fn render(
            &self,
            url: &str,
            submenu: &[SubmenuItem],
            title: &str,
            _tree: &Document,
        ) -> RenderResult<String> {
            self.seen
                .lock()
                .unwrap()
                .push((url.to_string(), title.to_string(), submenu.len()));
            Ok("<html></html>".to_string())
        }
    }

    struct FailingLayout;

    impl Layout for FailingLayout {
        fn render(&self, _: &str, _: &[SubmenuItem], _: &str, _: &Document) -> RenderResult<String> {
            Err(RenderError::layout("template missing"))
        }
    }

    fn decls() -> Vec<Declaration> {
        vec![
            mock_class("Client", vec![mock_property("node", TypeExpr::reference("ClientNode"))]),
            mock_function("createFilter", vec![], TypeExpr::reference("Filter")),
        ]
    }

    #[test]
    fn test_page_file() {
        assert_eq!(page_file("Node API"), "node-api");
        assert_eq!(page_file("Redux  API"), "redux--api");
        assert_eq!(page_file("web"), "web");
    }

    #[test]
    fn test_build_output() {
        let layout = RecordingLayout::default();
        let output = ApiBuilder::new("Node API").build(&decls(), &layout).unwrap();
        assert_eq!(output.file, "node-api");
        assert_eq!(output.url, "/node-api/");
        assert_eq!(output.path, PathBuf::from("node-api").join("index.html"));
        assert_eq!(output.html, "<html></html>");
        assert_eq!(output.symbol_count, 3);

        let seen = layout.seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![("/node-api/".to_string(), "Node API / ".to_string(), 2)]
        );
    }

    #[test]
    fn test_layout_error_propagates() {
        let err = ApiBuilder::new("Node API")
            .build(&decls(), &FailingLayout)
            .unwrap_err();
        assert!(matches!(err, RenderError::Layout(_)));
    }

    #[test]
    fn test_standalone_layout() {
        let layout = StandaloneLayout::new().unwrap();
        let output = ApiBuilder::new("Web API").build(&decls(), &layout).unwrap();
        let html = &output.html;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Web API / Logux</title>"));
        assert!(html.contains("<a href=\"#client\"><code>Client</code></a>"));
        assert!(html.contains("<li>Functions<ul>"));
        assert!(html.contains("<code>createFilter()</code>"));
        assert!(html.contains("<h1 id=\"client\">Client</h1>"));
    }

    #[test]
    fn test_standalone_layout_site_name() {
        let layout = StandaloneLayout::new().unwrap().site_name("Docs");
        let html = layout
            .render("/x/", &[], "X / ", &Document::default())
            .unwrap();
        assert!(html.contains("<title>X / Docs</title>"));
    }

    #[test]
    fn test_invalid_template() {
        let err = StandaloneLayout::with_template("{{#each submenu}}").err().unwrap();
        assert!(matches!(err, RenderError::Layout(_)));
    }

    #[test]
    fn test_build_json() {
        let json = r#"{
            "name": "logux",
            "children": [
                { "name": "actionEvents", "kindString": "Variable",
                  "type": { "type": "intrinsic", "name": "string" } }
            ]
        }"#;
        let output = ApiBuilder::new("Web API")
            .build_json(json, &RecordingLayout::default())
            .unwrap();
        assert_eq!(output.symbol_count, 1);

        let err = ApiBuilder::new("Web API")
            .build_json("{", &RecordingLayout::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::Serialization(_)));
    }
}

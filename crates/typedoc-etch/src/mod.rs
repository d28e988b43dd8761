//! typedoc-etch: API reference pages from TypeDoc declarations
//!
//! This crate turns the declaration tree TypeDoc emits for a TypeScript
//! package into one HTML page per API:
//! - Loading TypeDoc JSON into a typed declaration model
//! - Rendering type expressions with links to local and external symbols
//! - Building sections for classes, functions, variables and types
//! - Rendering doc comments from markdown, with `{@link}` shorthands
//! - Wrapping the page tree into a layout
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  TypeDoc JSON   │
//! └────────┬────────┘
//!          ▼
//!   ┌─────────────┐     ┌──────────────┐
//!   │ Declaration │────▶│ RenderContext│ (page, config, markdown)
//!   └─────────────┘     └──────┬───────┘
//!                              ▼
//!                    ┌───────────────────┐
//!                    │ Document + submenu│
//!                    └─────────┬─────────┘
//!                              ▼
//!                         ┌────────┐
//!                         │ Layout │
//!                         └────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use typedoc_etch::{ApiBuilder, StandaloneLayout};
//!
//! let json = std::fs::read_to_string("api.json").expect("read TypeDoc output");
//! let layout = StandaloneLayout::new().expect("valid template");
//! let page = ApiBuilder::new("Node API")
//!     .build_json(&json, &layout)
//!     .expect("render page");
//! std::fs::write(&page.path, page.html).expect("write page");
//! ```

// Core types
pub mod dom;
pub mod reflection;
pub mod types;

// Rendering
pub mod config;
pub mod diagnostics;
pub mod markdown;
pub mod render;
pub mod slug;

// Page building
pub mod builder;

// Re-exports for convenience
pub use builder::{page_file, ApiBuilder, BuildOutput, Layout, StandaloneLayout};
pub use config::RenderConfig;
pub use diagnostics::{RenderError, RenderResult};
pub use dom::{DocNode, Document, Element};
pub use markdown::{ComrakMarkdown, Markdown};
pub use reflection::{load_declarations, Comment, Declaration, ReflectionKind, Signature};
pub use render::{render_page, render_submenu, RenderContext, SubmenuItem};
pub use types::{ReferenceType, TypeExpr};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

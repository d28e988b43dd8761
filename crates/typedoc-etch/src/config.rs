//! Renderer configuration
//!
//! The name tables that steer rendering (external links, builtin names,
//! hidden constructors) live here instead of in the renderer, so a site can
//! load its own from TOML. `RenderConfig::default()` is the table set used
//! for the Logux API pages.

use crate::diagnostics::{RenderError, RenderResult};
use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const EXTERNAL_TYPES: &[(&str, &str)] = &[
    ("Reducer", "https://redux.js.org/basics/reducers/"),
    ("StoreEnhancer", "https://redux.js.org/advanced/middleware"),
    (
        "PreloadedState",
        "https://redux.js.org/recipes/structuring-reducers/initializing-state/",
    ),
    ("ReduxStore", "https://redux.js.org/basics/store"),
    (
        "Partial",
        "https://www.typescriptlang.org/docs/handbook/utility-types.html#partialt",
    ),
    (
        "ReturnType",
        "https://www.typescriptlang.org/docs/handbook/utility-types.html#returntypet",
    ),
    (
        "Promise",
        "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Guide/Using_promises",
    ),
    ("Observable", "https://github.com/tc39/proposal-observable"),
    (
        "ReduxContext",
        "https://react-redux.js.org/using-react-redux/accessing-store",
    ),
    ("Process", "https://nodejs.org/api/process.html#process_process"),
    ("HTTPServer", "https://nodejs.org/api/http.html#http_class_http_server"),
    ("Unsubscribe", "https://github.com/ai/nanoevents/#remove-listener"),
    ("Component", "https://reactjs.org/docs/react-component.html"),
    ("ActionTree", "https://vuex.vuejs.org/guide/hot-reload.html"),
    ("GetterTree", "https://vuex.vuejs.org/guide/hot-reload.html"),
    ("ModuleTree", "https://vuex.vuejs.org/guide/hot-reload.html"),
    ("MutationTree", "https://vuex.vuejs.org/guide/hot-reload.html"),
    (
        "WebSocket",
        "https://developer.mozilla.org/en-US/docs/Web/API/WebSocket",
    ),
    (
        "Map",
        "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Map",
    ),
    ("VuexDispatch", "https://vuex.vuejs.org/api/#dispatch"),
    ("Module", "https://vuex.vuejs.org/guide/modules.html"),
    (
        "ModuleOptions",
        "https://vuex.vuejs.org/guide/modules.html#preserving-state",
    ),
    (
        "VuexStoreOptions",
        "https://vuex.vuejs.org/api/#vuex-store-constructor-options",
    ),
    ("VuexStore", "https://vuex.vuejs.org/api/#vuex-store"),
    (
        "SubscribeActionOptions",
        "https://vuex.vuejs.org/api/#subscribeaction",
    ),
    ("WatchOptions", "https://vuex.vuejs.org/api/#watch"),
    ("CommitOptions", "https://vuex.vuejs.org/api/#commit"),
    ("SubscribeOptions", "https://vuex.vuejs.org/api/#subscribe"),
    (
        "ComponentType",
        "https://github.com/DefinitelyTyped/DefinitelyTyped/blob/master/types/react/index.d.ts#L81",
    ),
    ("App", "https://v3.vuejs.org/api/global-api.html#createapp"),
    (
        "InjectionKey",
        "https://v3.vuejs.org/api/composition-api.html#provide-inject",
    ),
    ("Ref", "https://v3.vuejs.org/api/refs-api.html#ref"),
    (
        "ComputedGetter",
        "https://v3.vuejs.org/api/computed-watch-api.html#computed",
    ),
    (
        "ComputedRef",
        "https://v3.vuejs.org/api/computed-watch-api.html#computed",
    ),
    (
        "VuexPayload",
        "https://vuex.vuejs.org/guide/mutations.html#commit-with-payload",
    ),
];

const SIMPLE_TYPES: &[&str] = &[
    "WebSocket",
    "RegExp",
    "Error",
    "Array",
    "function",
    "boolean",
    "string",
    "object",
    "number",
    "any",
    "ExtendedVue",
    "Store",
];

const HIDE_CONSTRUCTOR: &[&str] = &["ChannelContext", "Context", "ServerClient", "TestLog"];

const TEMPLATELESS: &[&str] = &["ActionIterator", "ActionListener", "Log"];

const INLINE_TYPES: &[&str] = &["NodeState"];

fn set_of(names: &[&str]) -> IndexSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Page-dependent meaning of a generic placeholder.
///
/// On the page named `page` the placeholder means `page_type`, on every
/// other page it means `other_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaParam {
    pub name: String,
    pub page: String,
    pub page_type: String,
    pub other_type: String,
}

impl Default for MetaParam {
    fn default() -> Self {
        Self {
            name: "M".to_string(),
            page: "node-api".to_string(),
            page_type: "ServerMeta".to_string(),
            other_type: "ClientMeta".to_string(),
        }
    }
}

impl MetaParam {
    /// Concrete type the placeholder stands for on `page`
    pub fn resolve(&self, page: &str) -> &str {
        if page == self.page {
            &self.page_type
        } else {
            &self.other_type
        }
    }
}

/// Relabeling of a parent class detected by its symbol path suffix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreAlias {
    pub suffix: String,
    pub label: String,
}

impl Default for StoreAlias {
    fn default() -> Self {
        Self {
            suffix: "/vuex/types/index\".Store".to_string(),
            label: "VuexStore".to_string(),
        }
    }
}

/// Mapping from a source file path to its "edit on GitHub" URL.
///
/// `pattern` must capture `name` and `path`; both are substituted into
/// `template` as `{name}` and `{path}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditUrl {
    pub pattern: String,
    pub template: String,
}

impl Default for EditUrl {
    fn default() -> Self {
        Self {
            pattern: r"logux-(?P<name>[^/]+)/(?P<path>.*)$".to_string(),
            template: "https://github.com/logux/{name}/edit/master/{path}".to_string(),
        }
    }
}

impl EditUrl {
    /// Compile the pattern
    pub fn regex(&self) -> RenderResult<Regex> {
        Regex::new(&self.pattern)
            .map_err(|e| RenderError::config(format!("invalid edit_url.pattern: {}", e)))
    }
}

/// Configuration for the API renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Types documented elsewhere, rendered as links to these URLs
    pub external_types: IndexMap<String, String>,
    /// Builtin names rendered as plain text and never documented
    pub simple_types: IndexSet<String>,
    /// Classes whose constructor table is suppressed
    pub hide_constructor: IndexSet<String>,
    /// Generic types whose arguments are never shown
    pub templateless: IndexSet<String>,
    /// References replaced by their definition instead of a link
    pub inline_types: IndexSet<String>,
    /// Variables left out of the Variables group
    pub excluded_variables: IndexSet<String>,
    /// Class members never given a section
    pub excluded_members: IndexSet<String>,
    pub meta_param: MetaParam,
    pub store_alias: StoreAlias,
    pub edit_url: EditUrl,
    /// Anchor prefix for names that are not capitalized
    pub globals_prefix: String,
    /// Generic argument text longer than this gets a padded `<`
    pub wrap_threshold: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            external_types: EXTERNAL_TYPES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            simple_types: set_of(SIMPLE_TYPES),
            hide_constructor: set_of(HIDE_CONSTRUCTOR),
            templateless: set_of(TEMPLATELESS),
            inline_types: set_of(INLINE_TYPES),
            excluded_variables: set_of(&["WebSocket"]),
            excluded_members: set_of(&["constructor", "Error"]),
            meta_param: MetaParam::default(),
            store_alias: StoreAlias::default(),
            edit_url: EditUrl::default(),
            globals_prefix: "globals-".to_string(),
            wrap_threshold: 25,
        }
    }
}

impl RenderConfig {
    /// Parse a TOML configuration. Missing fields keep their defaults.
    pub fn from_toml_str(content: &str) -> RenderResult<Self> {
        let config: RenderConfig =
            toml::from_str(content).map_err(|e| RenderError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Check that the configuration can be used for rendering
    pub fn validate(&self) -> RenderResult<()> {
        let regex = self.edit_url.regex()?;
        let names: Vec<_> = regex.capture_names().flatten().collect();
        for required in ["name", "path"] {
            if !names.contains(&required) {
                return Err(RenderError::config(format!(
                    "edit_url.pattern has no `{}` group",
                    required
                )));
            }
        }
        Ok(())
    }

    /// Check if a name is a builtin
    pub fn is_simple(&self, name: &str) -> bool {
        self.simple_types.contains(name)
    }

    /// Check if a reference is expanded in place
    pub fn is_inline(&self, name: &str) -> bool {
        self.inline_types.contains(name)
    }

    /// Documentation URL of an external type
    pub fn external_url(&self, name: &str) -> Option<&str> {
        self.external_types.get(name).map(String::as_str)
    }
}

//! Declaration model
//!
//! This module provides `Declaration`, the central data structure for every
//! documented symbol (class, function, variable, member, parameter). The
//! shape follows the JSON emitted by TypeDoc, so a project file can be
//! deserialized directly with [`load_declarations`].

use crate::diagnostics::RenderResult;
use crate::types::TypeExpr;
use serde::{Deserialize, Serialize};

/// Kind of declaration, read from TypeDoc's `kindString`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReflectionKind {
    Class,
    Function,
    Variable,
    Interface,
    #[serde(rename = "Type alias")]
    TypeAlias,
    Method,
    Property,
    Parameter,
    #[serde(rename = "Type parameter")]
    TypeParameter,
    Constructor,
    #[serde(rename = "Call signature")]
    CallSignature,
    #[serde(rename = "Constructor signature")]
    ConstructorSignature,
    #[serde(rename = "Index signature")]
    IndexSignature,
    #[serde(rename = "Type literal")]
    TypeLiteral,
    #[serde(rename = "Object literal")]
    ObjectLiteral,
    Accessor,
    #[serde(rename = "Get signature")]
    GetSignature,
    #[serde(rename = "Set signature")]
    SetSignature,
    Enumeration,
    #[serde(rename = "Enumeration member")]
    EnumerationMember,
    Namespace,
    Module,
}

/// Declaration flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flags {
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub is_static: bool,
}

/// Doc comment attached to a declaration or signature
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// First paragraph
    #[serde(default)]
    pub short_text: String,
    /// Remaining description
    #[serde(default)]
    pub text: String,
    /// `@returns` text
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub returns: Option<String>,
}

impl Comment {
    /// Create a comment from its first paragraph
    pub fn short(text: impl Into<String>) -> Self {
        Self {
            short_text: text.into(),
            ..Default::default()
        }
    }

    /// Markdown body: short text and long text separated by a blank line
    pub fn body(&self) -> String {
        [self.short_text.trim_end(), self.text.trim_end()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Source file position
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReference {
    pub file_name: String,
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub character: usize,
}

/// Call or index signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    #[serde(default)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<Comment>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Declaration>,

    #[serde(default, alias = "typeParameter", skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<Declaration>,

    /// Return type (value type for index signatures)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub ty: Option<TypeExpr>,
}

impl Signature {
    /// Create a signature with the given return type
    pub fn returning(ty: TypeExpr) -> Self {
        Self {
            name: "__call".to_string(),
            comment: None,
            parameters: vec![],
            type_parameters: vec![],
            ty: Some(ty),
        }
    }

    /// Set the parameters
    pub fn with_parameters(mut self, params: Vec<Declaration>) -> Self {
        self.parameters = params;
        self
    }

    /// Set the type parameters
    pub fn with_type_parameters(mut self, params: Vec<Declaration>) -> Self {
        self.type_parameters = params;
        self
    }

    /// Set the comment
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Parameter names as shown in headings: `(a, b?)`
    pub fn argument_list(&self) -> String {
        let args = self
            .parameters
            .iter()
            .map(|p| {
                if p.flags.is_optional {
                    format!("{}?", p.name)
                } else {
                    p.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("({})", args)
    }
}

/// A documented symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub name: String,

    #[serde(rename = "kindString")]
    pub kind: ReflectionKind,

    #[serde(default)]
    pub flags: Flags,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<Comment>,

    /// Value type for variables, properties and parameters
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub ty: Option<TypeExpr>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signatures: Vec<Signature>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Declaration>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extended_types: Vec<TypeExpr>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub index_signature: Option<Box<Signature>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceReference>,
}

impl Declaration {
    /// Name TypeDoc gives to anonymous declarations
    pub const ANONYMOUS: &'static str = "__type";

    /// Create an empty declaration
    pub fn new(name: impl Into<String>, kind: ReflectionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            flags: Flags::default(),
            comment: None,
            ty: None,
            signatures: vec![],
            children: vec![],
            extended_types: vec![],
            index_signature: None,
            sources: vec![],
        }
    }

    /// Create an anonymous type literal
    pub fn anonymous(children: Vec<Declaration>) -> Self {
        Self::new(Self::ANONYMOUS, ReflectionKind::TypeLiteral).with_children(children)
    }

    /// Set the value type
    pub fn with_type(mut self, ty: TypeExpr) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Set the comment
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Set the children
    pub fn with_children(mut self, children: Vec<Declaration>) -> Self {
        self.children = children;
        self
    }

    /// Add a call signature
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signatures.push(signature);
        self
    }

    /// Set the parent types
    pub fn with_extended_types(mut self, types: Vec<TypeExpr>) -> Self {
        self.extended_types = types;
        self
    }

    /// Set the index signature
    pub fn with_index_signature(mut self, signature: Signature) -> Self {
        self.index_signature = Some(Box::new(signature));
        self
    }

    /// Add a source location
    pub fn with_source(mut self, file_name: impl Into<String>) -> Self {
        self.sources.push(SourceReference {
            file_name: file_name.into(),
            ..Default::default()
        });
        self
    }

    /// Mark as optional
    pub fn optional(mut self) -> Self {
        self.flags.is_optional = true;
        self
    }

    /// Mark as static
    pub fn static_member(mut self) -> Self {
        self.flags.is_static = true;
        self
    }

    /// Check if this declaration has no name of its own
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty() || self.name == Self::ANONYMOUS
    }

    /// Check if this declaration can be called
    pub fn is_callable(&self) -> bool {
        !self.signatures.is_empty()
    }

    /// Own comment, falling back to the first signature's comment
    pub fn effective_comment(&self) -> Option<&Comment> {
        self.comment
            .as_ref()
            .or_else(|| self.signatures.first().and_then(|s| s.comment.as_ref()))
    }

    /// The first constructor among the children
    pub fn constructor(&self) -> Option<&Declaration> {
        self.children
            .iter()
            .find(|c| c.kind == ReflectionKind::Constructor)
    }

    /// `(a, b?)` built from the first signature, `()` if there is none
    pub fn argument_list(&self) -> String {
        self.signatures
            .first()
            .map(Signature::argument_list)
            .unwrap_or_else(|| "()".to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DeclarationInput {
    Project { children: Vec<Declaration> },
    List(Vec<Declaration>),
}

/// Parse TypeDoc JSON into top-level declarations.
///
/// Accepts either a project object with `children` or a bare array.
pub fn load_declarations(json: &str) -> RenderResult<Vec<Declaration>> {
    let input: DeclarationInput = serde_json::from_str(json)?;
    Ok(match input {
        DeclarationInput::Project { children } => children,
        DeclarationInput::List(list) => list,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_argument_list() {
        let sig = Signature::returning(TypeExpr::void()).with_parameters(vec![
            Declaration::new("a", ReflectionKind::Parameter),
            Declaration::new("b", ReflectionKind::Parameter).optional(),
        ]);
        assert_eq!(sig.argument_list(), "(a, b?)");

        let func = Declaration::new("f", ReflectionKind::Function).with_signature(sig);
        assert_eq!(func.argument_list(), "(a, b?)");
    }

    #[test]
    fn test_argument_list_without_parameters() {
        let func = Declaration::new("f", ReflectionKind::Function)
            .with_signature(Signature::returning(TypeExpr::void()));
        assert_eq!(func.argument_list(), "()");
        let prop = Declaration::new("p", ReflectionKind::Property);
        assert_eq!(prop.argument_list(), "()");
    }

    #[test]
    fn test_comment_body_skips_empty_parts() {
        assert_eq!(Comment::short("Short.").body(), "Short.");
        let full = Comment {
            short_text: "Short.".into(),
            text: "Long text.\n".into(),
            ..Default::default()
        };
        assert_eq!(full.body(), "Short.\n\nLong text.");
        assert_eq!(Comment::default().body(), "");
    }

    #[test]
    fn test_effective_comment_falls_back_to_signature() {
        let method = Declaration::new("m", ReflectionKind::Method).with_signature(
            Signature::returning(TypeExpr::void()).with_comment(Comment::short("From sig")),
        );
        assert_eq!(method.effective_comment().unwrap().short_text, "From sig");
    }

    #[test]
    fn test_deserialize_typedoc_declaration() {
        let json = r#"{
            "id": 12,
            "name": "Client",
            "kind": 128,
            "kindString": "Class",
            "flags": { "isExported": true },
            "comment": { "shortText": "Base client." },
            "children": [
                {
                    "id": 13,
                    "name": "constructor",
                    "kindString": "Constructor",
                    "flags": {},
                    "signatures": [{
                        "name": "new Client",
                        "kindString": "Constructor signature",
                        "parameters": [{
                            "name": "opts",
                            "kindString": "Parameter",
                            "flags": { "isOptional": true },
                            "type": { "type": "intrinsic", "name": "object" }
                        }],
                        "type": { "type": "reference", "name": "Client" }
                    }]
                }
            ],
            "sources": [{ "fileName": "logux-client/client/index.d.ts", "line": 4, "character": 0 }]
        }"#;
        let decl: Declaration = serde_json::from_str(json).unwrap();
        assert_eq!(decl.kind, ReflectionKind::Class);
        assert_eq!(decl.comment.as_ref().unwrap().short_text, "Base client.");
        let ctor = decl.constructor().unwrap();
        assert!(ctor.signatures[0].parameters[0].flags.is_optional);
        assert_eq!(decl.sources[0].file_name, "logux-client/client/index.d.ts");
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let json = r#"{ "name": "x", "kindString": "Decorator" }"#;
        assert!(serde_json::from_str::<Declaration>(json).is_err());
    }

    #[test]
    fn test_load_declarations_accepts_project_and_list() {
        let project = r#"{ "name": "root", "children": [{ "name": "a", "kindString": "Variable" }] }"#;
        let list = r#"[{ "name": "a", "kindString": "Variable" }]"#;
        assert_eq!(load_declarations(project).unwrap(), load_declarations(list).unwrap());
    }

    #[test]
    fn test_type_parameter_alias() {
        let json = r#"{
            "name": "__call",
            "typeParameter": [{ "name": "T", "kindString": "Type parameter" }],
            "type": { "type": "intrinsic", "name": "void" }
        }"#;
        let sig: Signature = serde_json::from_str(json).unwrap();
        assert_eq!(sig.type_parameters[0].name, "T");
    }

    #[test]
    fn test_block_tags_and_alias_parameters_are_ignored() {
        let json = r#"{
            "name": "Filter",
            "kindString": "Type alias",
            "comment": {
                "shortText": "Action filter.",
                "tags": [{ "tag": "template", "text": "Meta type.", "param": "M" }]
            },
            "typeParameter": [{ "name": "M", "kindString": "Type parameter" }],
            "type": { "type": "intrinsic", "name": "object" }
        }"#;
        let decl: Declaration = serde_json::from_str(json).unwrap();
        assert_eq!(decl.comment, Some(Comment::short("Action filter.")));

        let round_trip = serde_json::to_value(&decl).unwrap();
        assert!(round_trip.get("typeParameter").is_none());
        assert!(round_trip["comment"].get("tags").is_none());
    }
}

//! Type expressions
//!
//! This module provides `TypeExpr`, the recursive type grammar emitted by
//! the extractor for every `type` field. The JSON form is internally tagged
//! on `type`, so an unknown tag fails deserialization instead of being
//! silently dropped.

use crate::reflection::Declaration;
use serde::{Deserialize, Serialize};

/// Reference to a named type (`Foo`, `Promise<T>`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceType {
    /// Referenced type name
    pub name: String,

    /// Generic arguments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeExpr>,

    /// Fully qualified symbol path, e.g. `"node_modules/vuex/types/index".Store`
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub symbol_fully_qualified_name: Option<String>,

    /// Resolved target declaration, when the extractor could resolve it.
    /// Its `type` is the alias definition used for inlining and unwrapping.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reflection: Option<Box<Declaration>>,
}

impl ReferenceType {
    /// Create a reference without arguments or target
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_arguments: vec![],
            symbol_fully_qualified_name: None,
            reflection: None,
        }
    }

    /// Set the generic arguments
    pub fn with_arguments(mut self, args: Vec<TypeExpr>) -> Self {
        self.type_arguments = args;
        self
    }

    /// Set the fully qualified symbol path
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol_fully_qualified_name = Some(symbol.into());
        self
    }

    /// Set the resolved target declaration
    pub fn with_reflection(mut self, target: Declaration) -> Self {
        self.reflection = Some(Box::new(target));
        self
    }

    /// The aliased type of the resolved target, if any
    pub fn target_type(&self) -> Option<&TypeExpr> {
        self.reflection.as_ref().and_then(|r| r.ty.as_ref())
    }
}

/// Type expression grammar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TypeExpr {
    /// Named type reference
    Reference(ReferenceType),

    /// String literal type (`'add'`)
    StringLiteral { value: String },

    /// Built-in type (`string`, `void`)
    Intrinsic { name: String },

    /// Generic parameter (`T`)
    TypeParameter { name: String },

    /// Indexed access (`T[K]`)
    IndexedAccess {
        object_type: Box<TypeExpr>,
        index_type: Box<TypeExpr>,
    },

    /// Union (`A | B`)
    Union { types: Vec<TypeExpr> },

    /// Intersection (`A & B`)
    Intersection { types: Vec<TypeExpr> },

    /// Array (`T[]`)
    Array { element_type: Box<TypeExpr> },

    /// Tuple (`[A, B]`)
    Tuple {
        #[serde(default)]
        elements: Vec<TypeExpr>,
    },

    /// Inline anonymous declaration (object literal, function shape)
    Reflection { declaration: Box<Declaration> },

    /// Conditional (`T extends U ? X : Y`)
    Conditional {
        check_type: Box<TypeExpr>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        extends_type: Option<Box<TypeExpr>>,
        true_type: Box<TypeExpr>,
        false_type: Box<TypeExpr>,
    },

    /// Type operator (`keyof T`)
    TypeOperator {
        operator: String,
        target: Box<TypeExpr>,
    },

    /// Type query (`typeof x`)
    Query { query_type: Box<TypeExpr> },
}

impl TypeExpr {
    /// Create a reference to a named type
    pub fn reference(name: impl Into<String>) -> Self {
        TypeExpr::Reference(ReferenceType::new(name))
    }

    /// Create an intrinsic type
    pub fn intrinsic(name: impl Into<String>) -> Self {
        TypeExpr::Intrinsic { name: name.into() }
    }

    /// Create a type parameter
    pub fn type_parameter(name: impl Into<String>) -> Self {
        TypeExpr::TypeParameter { name: name.into() }
    }

    /// Create a string literal type
    pub fn string_literal(value: impl Into<String>) -> Self {
        TypeExpr::StringLiteral {
            value: value.into(),
        }
    }

    /// Create the `void` intrinsic
    pub fn void() -> Self {
        Self::intrinsic("void")
    }

    /// Create a union type
    pub fn union(types: Vec<TypeExpr>) -> Self {
        TypeExpr::Union { types }
    }

    /// Create an intersection type
    pub fn intersection(types: Vec<TypeExpr>) -> Self {
        TypeExpr::Intersection { types }
    }

    /// Create an array type
    pub fn array(element: TypeExpr) -> Self {
        TypeExpr::Array {
            element_type: Box::new(element),
        }
    }

    /// Create a tuple type
    pub fn tuple(elements: Vec<TypeExpr>) -> Self {
        TypeExpr::Tuple { elements }
    }

    /// Create an inline declaration type
    pub fn reflection(declaration: Declaration) -> Self {
        TypeExpr::Reflection {
            declaration: Box::new(declaration),
        }
    }

    /// Name carried by the expression, for the variants that have one
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeExpr::Reference(r) => Some(&r.name),
            TypeExpr::Intrinsic { name } | TypeExpr::TypeParameter { name } => Some(name),
            _ => None,
        }
    }

    /// Check if this is the `void` return type
    pub fn is_void(&self) -> bool {
        self.name() == Some("void")
    }

    /// Embedded declaration of a reflection type
    pub fn declaration(&self) -> Option<&Declaration> {
        match self {
            TypeExpr::Reflection { declaration } => Some(declaration),
            _ => None,
        }
    }

    /// Reference payload of a reference type
    pub fn as_reference(&self) -> Option<&ReferenceType> {
        match self {
            TypeExpr::Reference(r) => Some(r),
            _ => None,
        }
    }
}

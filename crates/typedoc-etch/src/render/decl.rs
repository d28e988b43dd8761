//! Inline rendering of anonymous and nested declarations
//!
//! Parameters, object literal properties and function shapes have no
//! section of their own. They render as `name: type`, `{ a: A, b: B }` or
//! `(a: A) => R` inside a type expression.

use super::{render_type, RenderContext};
use crate::diagnostics::RenderResult;
use crate::dom::{join, DocNode};
use crate::reflection::{Declaration, Signature};

/// Render a declaration inline
pub fn render_decl(ctx: &RenderContext, decl: &Declaration) -> RenderResult<Vec<DocNode>> {
    let body = if let Some(ty) = &decl.ty {
        render_type(ctx, ty)?
    } else if !decl.children.is_empty() {
        let parts = decl
            .children
            .iter()
            .map(|child| render_decl(ctx, child))
            .collect::<RenderResult<Vec<_>>>()?;
        join(", ", parts)
    } else if let Some(index) = &decl.index_signature {
        render_index_signature(ctx, index)?
    } else if let Some(signature) = decl.signatures.first() {
        render_signature(ctx, signature)?
    } else {
        vec![]
    };

    if decl.is_anonymous() {
        if decl.is_callable() {
            return Ok(body);
        }
        if body.is_empty() {
            return Ok(vec![DocNode::text("{ }")]);
        }
        let mut out = vec![DocNode::text("{ ")];
        out.extend(body);
        out.push(DocNode::text(" }"));
        return Ok(out);
    }

    let mut name = decl.name.clone();
    if decl.flags.is_optional {
        name.push('?');
    }
    let mut out = vec![DocNode::text(format!("{}: ", name))];
    out.extend(body);
    Ok(out)
}

/// `(a: A, b?: B) => R`
pub(crate) fn render_signature(ctx: &RenderContext, signature: &Signature) -> RenderResult<Vec<DocNode>> {
    let params = signature
        .parameters
        .iter()
        .map(|p| render_decl(ctx, p))
        .collect::<RenderResult<Vec<_>>>()?;
    let mut out = vec![DocNode::text("(")];
    out.extend(join(", ", params));
    out.push(DocNode::text(") => "));
    if let Some(ty) = &signature.ty {
        out.extend(render_type(ctx, ty)?);
    }
    Ok(out)
}

/// `[key: K]: V`
fn render_index_signature(ctx: &RenderContext, index: &Signature) -> RenderResult<Vec<DocNode>> {
    let mut out = Vec::new();
    match index.parameters.first() {
        Some(key) => {
            out.push(DocNode::text(format!("[{}: ", key.name)));
            if let Some(ty) = &key.ty {
                out.extend(render_type(ctx, ty)?);
            }
        }
        None => out.push(DocNode::text("[")),
    }
    out.push(DocNode::text("]: "));
    if let Some(ty) = &index.ty {
        out.extend(render_type(ctx, ty)?);
    }
    Ok(out)
}

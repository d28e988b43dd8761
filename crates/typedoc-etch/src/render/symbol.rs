//! Sections for classes, functions, variables and class members

use super::{prop_type_html, render_table, render_type, RenderContext};
use crate::diagnostics::{RenderError, RenderResult};
use crate::dom::{tag, tag_text, DocNode, Element};
use crate::reflection::{Declaration, ReflectionKind};
use crate::slug::{is_capitalized, member_slug};
use crate::types::TypeExpr;
use std::cmp::Ordering;

/// Capitalized names first, then case-insensitive, then ordinal
pub(crate) fn by_name(a: &Declaration, b: &Declaration) -> Ordering {
    is_capitalized(&b.name)
        .cmp(&is_capitalized(&a.name))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

/// Properties before methods, then [`by_name`]
pub(crate) fn by_type_and_name(a: &Declaration, b: &Declaration) -> Ordering {
    let a_method = a.kind == ReflectionKind::Method;
    let b_method = b.kind == ReflectionKind::Method;
    a_method.cmp(&b_method).then_with(|| by_name(a, b))
}

fn title_extra(text: impl Into<String>) -> DocNode {
    tag_text("span", text).class("title_extra").into_node()
}

fn paragraph(children: Vec<DocNode>) -> DocNode {
    tag("p", children).into_node()
}

/// One `Parameter` table per signature that has parameters
fn params_html(ctx: &RenderContext, node: &Declaration) -> RenderResult<Vec<DocNode>> {
    node.signatures
        .iter()
        .filter(|s| !s.parameters.is_empty())
        .map(|s| render_table(ctx, "Parameter", &s.parameters))
        .collect()
}

/// Type template tables, when any type parameter is documented
fn templates_html(ctx: &RenderContext, node: &Declaration) -> RenderResult<Vec<DocNode>> {
    let documented: Vec<_> = node
        .signatures
        .iter()
        .filter(|s| s.type_parameters.iter().any(|t| t.comment.is_some()))
        .collect();
    if documented.is_empty() {
        return Ok(vec![]);
    }
    let mut out = vec![paragraph(vec![DocNode::text("Type templates for TypeScript:")])];
    for signature in documented {
        out.push(render_table(ctx, "Templates", &signature.type_parameters)?);
    }
    Ok(out)
}

/// `Returns <code>T</code>. <@returns text>`, skipped for `void`
fn returns_html(ctx: &RenderContext, node: &Declaration) -> RenderResult<Vec<DocNode>> {
    let Some(signature) = node.signatures.first() else {
        return Ok(vec![]);
    };
    let Some(ty) = signature.ty.as_ref().filter(|t| !t.is_void()) else {
        return Ok(vec![]);
    };
    let returns = node
        .effective_comment()
        .and_then(|c| c.returns.clone())
        .unwrap_or_default();

    let mut children = vec![
        DocNode::text("Returns "),
        tag("code", render_type(ctx, ty)?).no_class().into_node(),
        DocNode::text(". "),
    ];
    children.extend(crate::dom::first_block_children(ctx.render_markdown(&returns)?));
    Ok(vec![paragraph(children)])
}

/// `Extends X.` for the first parent class
fn extends_html(ctx: &RenderContext, parents: &[TypeExpr]) -> RenderResult<Vec<DocNode>> {
    let Some(parent) = parents.first() else {
        return Ok(vec![]);
    };
    let reference = parent
        .as_reference()
        .ok_or_else(|| RenderError::malformed("extended type is not a reference", parent))?;

    let alias = &ctx.config.store_alias;
    let name = match &reference.symbol_fully_qualified_name {
        Some(symbol) if symbol.ends_with(&alias.suffix) => alias.label.as_str(),
        _ => reference.name.as_str(),
    };

    let link = if ctx.config.is_simple(name) {
        tag_text("code", name)
    } else if let Some(url) = ctx.config.external_url(name) {
        tag_text("a", name).prop("href", url)
    } else {
        tag_text("a", name).prop("href", format!("#{}", name.to_lowercase()))
    };
    Ok(vec![paragraph(vec![
        DocNode::text("Extends "),
        link.into_node(),
        DocNode::text("."),
    ])])
}

/// Sections for class members, or for children of a function namespace
pub fn render_members(
    ctx: &RenderContext,
    owner: &str,
    members: &[&Declaration],
    is_static: bool,
) -> RenderResult<Vec<DocNode>> {
    let separator = if is_static { "." } else { "#" };
    let mut members: Vec<&Declaration> = members
        .iter()
        .copied()
        .filter(|m| !ctx.config.excluded_members.contains(&m.name))
        .collect();
    members.sort_by(|a, b| by_type_and_name(a, b));

    members
        .into_iter()
        .map(|member| {
            tracing::trace!(owner, member = %member.name, "rendering member");
            let mut name = vec![
                title_extra(format!("{}{}", owner, separator)),
                DocNode::text(member.name.as_str()),
            ];
            if member.kind == ReflectionKind::Method {
                name.push(title_extra(member.argument_list()));
            }

            let mut children = vec![tag("h2", vec![tag("code", name).no_class().into_node()])
                .slug(member_slug(owner, &member.name, is_static))
                .into_node()];
            children.extend(ctx.render_comment(member.effective_comment())?);
            children.extend(prop_type_html(ctx, member.ty.as_ref())?);
            children.extend(params_html(ctx, member)?);
            children.extend(templates_html(ctx, member)?);
            children.extend(returns_html(ctx, member)?);
            Ok(tag("section", children).into_node())
        })
        .collect()
}

/// Article for a class
pub fn render_class(ctx: &RenderContext, cls: &Declaration) -> RenderResult<DocNode> {
    tracing::trace!(class = %cls.name, "rendering class");
    let edit_url = match cls.sources.first() {
        Some(source) => {
            let url = ctx.edit_url(&source.file_name);
            if url.is_none() {
                tracing::warn!(
                    class = %cls.name,
                    file = %source.file_name,
                    "source path does not match edit_url.pattern"
                );
            }
            url
        }
        None => None,
    };

    let mut children = vec![tag_text("h1", cls.name.as_str())
        .slug(cls.name.to_lowercase())
        .edit_url(edit_url)
        .into_node()];
    children.extend(extends_html(ctx, &cls.extended_types)?);
    children.extend(ctx.render_comment(cls.comment.as_ref())?);
    if !ctx.config.hide_constructor.contains(&cls.name) {
        if let Some(constructor) = cls.constructor() {
            children.extend(params_html(ctx, constructor)?);
        }
    }

    let (statics, instance): (Vec<&Declaration>, Vec<&Declaration>) =
        cls.children.iter().partition(|c| c.flags.is_static);
    children.extend(render_members(ctx, &cls.name, &statics, true)?);
    children.extend(render_members(ctx, &cls.name, &instance, false)?);

    Ok(tag("article", children).into_node())
}

/// Section for a top-level function
pub fn render_function(ctx: &RenderContext, node: &Declaration) -> RenderResult<DocNode> {
    tracing::trace!(function = %node.name, "rendering function");
    let heading = tag(
        "code",
        vec![
            DocNode::text(node.name.as_str()),
            title_extra(node.argument_list()),
        ],
    )
    .no_class();

    let mut children = vec![tag("h2", vec![heading.into_node()])
        .slug(ctx.to_slug(&node.name))
        .into_node()];
    let comment = node.signatures.first().and_then(|s| s.comment.as_ref());
    children.extend(ctx.render_comment(comment.or(node.comment.as_ref()))?);
    children.extend(params_html(ctx, node)?);
    children.extend(templates_html(ctx, node)?);
    children.extend(returns_html(ctx, node)?);
    let members: Vec<&Declaration> = node.children.iter().collect();
    children.extend(render_members(ctx, &node.name, &members, false)?);

    Ok(tag("section", children).into_node())
}

fn first_child_documented(decl: &Declaration) -> bool {
    decl.children.first().is_some_and(|c| c.comment.is_some())
}

/// Property declarations behind a base type.
///
/// - a reflection yields its children
/// - `Omit<T, K>` yields the children of `T` minus the literal keys in `K`
/// - any other reference is unwrapped through its resolved alias, or yields
///   the members of a resolved interface or class
pub fn resolve_children(ty: &TypeExpr) -> RenderResult<Vec<Declaration>> {
    match ty {
        TypeExpr::Reflection { declaration } => Ok(declaration.children.clone()),
        TypeExpr::Reference(reference) if reference.name == "Omit" => {
            let [base, keys] = reference.type_arguments.as_slice() else {
                return Err(RenderError::malformed("Omit needs two type arguments", reference));
            };
            let omitted = omitted_keys(keys)?;
            Ok(resolve_children(base)?
                .into_iter()
                .filter(|c| !omitted.contains(&c.name))
                .collect())
        }
        TypeExpr::Reference(reference) => match (reference.target_type(), &reference.reflection) {
            (Some(target), _) => resolve_children(target),
            (None, Some(target)) if !target.children.is_empty() => Ok(target.children.clone()),
            (None, Some(_)) => Err(RenderError::malformed(
                "resolved definition has no properties",
                reference,
            )),
            (None, None) => Err(RenderError::malformed(
                "reference without a resolved definition",
                reference,
            )),
        },
        other => Err(RenderError::malformed("type has no properties", other)),
    }
}

fn omitted_keys(keys: &TypeExpr) -> RenderResult<Vec<String>> {
    match keys {
        TypeExpr::StringLiteral { value } => Ok(vec![value.clone()]),
        TypeExpr::Union { types } => types.iter().map(omitted_key).collect(),
        other => Err(RenderError::malformed("Omit keys are not string literals", other)),
    }
}

fn omitted_key(key: &TypeExpr) -> RenderResult<String> {
    match key {
        TypeExpr::StringLiteral { value } => Ok(value.clone()),
        other => Err(RenderError::malformed("Omit key is not a string literal", other)),
    }
}

fn is_inline_base(ctx: &RenderContext, base: &TypeExpr) -> bool {
    let Some(reference) = base.as_reference() else {
        return false;
    };
    ctx.config.is_inline(&reference.name)
        || reference
            .target_type()
            .and_then(TypeExpr::name)
            .is_some_and(|name| ctx.config.is_inline(name))
}

fn variable_body(ctx: &RenderContext, ty: &TypeExpr) -> RenderResult<Vec<DocNode>> {
    if let Some(decl) = ty.declaration().filter(|d| first_child_documented(d)) {
        return Ok(vec![render_table(ctx, "Property", &decl.children)?]);
    }

    if let TypeExpr::Intersection { types } = ty {
        if let [base, extra, ..] = types.as_slice() {
            if let Some(inline) = extra.declaration().filter(|d| first_child_documented(d)) {
                let mut props = resolve_children(base)?;
                props.extend(inline.children.iter().cloned());
                let table = render_table(ctx, "Property", &props)?;

                let resolved = base
                    .as_reference()
                    .is_some_and(|r| r.reflection.is_some());
                if resolved && !is_inline_base(ctx, base) {
                    let mut extends = vec![DocNode::text("Extends ")];
                    extends.extend(render_type(ctx, base)?);
                    extends.push(DocNode::text("."));
                    return Ok(vec![paragraph(extends), table]);
                }
                return Ok(vec![table]);
            }
        }
    }

    prop_type_html(ctx, Some(ty))
}

/// Section for a variable, type alias or interface
pub fn render_variable(ctx: &RenderContext, node: &Declaration) -> RenderResult<DocNode> {
    tracing::trace!(variable = %node.name, "rendering variable");
    let heading: Element = tag(
        "h2",
        vec![tag_text("code", node.name.as_str()).no_class().into_node()],
    )
    .slug(ctx.to_slug(&node.name));

    let mut children = vec![heading.into_node()];
    children.extend(ctx.render_comment(node.comment.as_ref())?);
    if let Some(ty) = &node.ty {
        children.extend(variable_body(ctx, ty)?);
    }
    Ok(tag("section", children).into_node())
}

//! Type expression rendering

use super::{render_decl, RenderContext};
use crate::diagnostics::{RenderError, RenderResult};
use crate::dom::{join, tag, tag_text, to_text, DocNode};
use crate::types::{ReferenceType, TypeExpr};

/// Render a type expression as an inline run of nodes
pub fn render_type(ctx: &RenderContext, ty: &TypeExpr) -> RenderResult<Vec<DocNode>> {
    match ty {
        TypeExpr::Reference(reference) => render_reference(ctx, reference),
        TypeExpr::StringLiteral { value } => Ok(vec![tag_text("span", format!("'{}'", value))
            .class("code-block_string")
            .into_node()]),
        TypeExpr::Intrinsic { name } | TypeExpr::TypeParameter { name } => {
            let meta = &ctx.config.meta_param;
            if *name == meta.name {
                let resolved = TypeExpr::reference(meta.resolve(&ctx.page));
                return render_type(ctx, &resolved);
            }
            Ok(vec![DocNode::text(name.as_str())])
        }
        TypeExpr::IndexedAccess {
            object_type,
            index_type,
        } => {
            let mut out = render_type(ctx, object_type)?;
            out.push(DocNode::text("["));
            out.extend(render_type(ctx, index_type)?);
            out.push(DocNode::text("]"));
            Ok(out)
        }
        TypeExpr::Union { types } => Ok(join(" | ", render_all(ctx, types)?)),
        TypeExpr::Intersection { types } => Ok(join(" & ", render_all(ctx, types)?)),
        TypeExpr::Array { element_type } => {
            let mut out = render_type(ctx, element_type)?;
            out.push(DocNode::text("[]"));
            Ok(out)
        }
        TypeExpr::Tuple { elements } => {
            let mut out = vec![DocNode::text("[")];
            out.extend(join(", ", render_all(ctx, elements)?));
            out.push(DocNode::text("]"));
            Ok(out)
        }
        TypeExpr::Reflection { declaration } => render_decl(ctx, declaration),
        TypeExpr::Conditional {
            check_type,
            true_type,
            false_type,
            ..
        } => {
            let mut out = render_type(ctx, check_type)?;
            out.push(DocNode::text(" ? "));
            out.extend(render_type(ctx, true_type)?);
            out.push(DocNode::text(" : "));
            out.extend(render_type(ctx, false_type)?);
            Ok(out)
        }
        TypeExpr::TypeOperator { operator, target } => {
            let mut out = vec![tag_text("span", format!(" {} ", operator))
                .class("code-block_keyword")
                .into_node()];
            out.extend(render_type(ctx, target)?);
            Ok(out)
        }
        TypeExpr::Query { query_type } => {
            let mut out = vec![DocNode::text("typeof ")];
            out.extend(render_type(ctx, query_type)?);
            Ok(out)
        }
    }
}

fn render_all(ctx: &RenderContext, types: &[TypeExpr]) -> RenderResult<Vec<Vec<DocNode>>> {
    types.iter().map(|t| render_type(ctx, t)).collect()
}

fn render_reference(ctx: &RenderContext, reference: &ReferenceType) -> RenderResult<Vec<DocNode>> {
    let config = ctx.config;
    let name = reference.name.as_str();

    if config.is_inline(name) {
        let target = reference.target_type().ok_or_else(|| {
            RenderError::malformed("inline type without a resolved definition", reference)
        })?;
        return render_type(ctx, target);
    }

    let mut out = vec![if config.is_simple(name) {
        DocNode::text(name)
    } else if let Some(url) = config.external_url(name) {
        tag_text("a", name).prop("href", url).into_node()
    } else {
        tag_text("a", name)
            .prop("href", format!("#{}", ctx.to_slug(name)))
            .into_node()
    }];

    if !reference.type_arguments.is_empty() && !config.templateless.contains(name) {
        let body = join(", ", render_all(ctx, &reference.type_arguments)?);
        let open = if to_text(&body).chars().count() > config.wrap_threshold {
            " <"
        } else {
            "<"
        };
        out.push(DocNode::text(open));
        out.extend(body);
        out.push(DocNode::text(">"));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::dom::Element;
    use crate::markdown::ComrakMarkdown;
    use crate::reflection::{Declaration, ReflectionKind};
    use pretty_assertions::assert_eq;

    fn render(page: &str, ty: &TypeExpr) -> Vec<DocNode> {
        let config = RenderConfig::default();
        let md = ComrakMarkdown::new();
        let ctx = RenderContext::new(page, &config, &md).unwrap();
        render_type(&ctx, ty).unwrap()
    }

    fn links(nodes: &[DocNode]) -> Vec<String> {
        nodes
            .iter()
            .filter_map(DocNode::as_element)
            .filter(|el| el.tag_name == "a")
            .map(|el: &Element| el.properties["href"].clone())
            .collect()
    }

    #[test]
    fn test_union_of_references() {
        let ty = TypeExpr::union(vec![TypeExpr::reference("A"), TypeExpr::reference("B")]);
        let nodes = render("web-api", &ty);
        assert_eq!(to_text(&nodes), "A | B");
        assert_eq!(links(&nodes), vec!["#a", "#b"]);
    }

    #[test]
    fn test_simple_and_external_references() {
        let nodes = render("web-api", &TypeExpr::reference("string"));
        assert_eq!(nodes, vec![DocNode::text("string")]);

        let nodes = render("web-api", &TypeExpr::reference("Observable"));
        assert_eq!(links(&nodes), vec!["https://github.com/tc39/proposal-observable"]);
    }

    #[test]
    fn test_lowercase_reference_uses_globals_slug() {
        let nodes = render("web-api", &TypeExpr::reference("actionEvents"));
        assert_eq!(links(&nodes), vec!["#globals-actionevents"]);
    }

    #[test]
    fn test_short_generic_arguments() {
        let ty = TypeExpr::Reference(
            ReferenceType::new("Promise").with_arguments(vec![TypeExpr::intrinsic("void")]),
        );
        assert_eq!(to_text(&render("web-api", &ty)), "Promise<void>");
    }

    #[test]
    fn test_long_generic_arguments_are_padded() {
        let ty = TypeExpr::Reference(ReferenceType::new("Map").with_arguments(vec![
            TypeExpr::intrinsic("string"),
            TypeExpr::reference("LongNamedSubscription"),
        ]));
        let text = to_text(&render("web-api", &ty));
        assert_eq!(text, "Map <string, LongNamedSubscription>");
    }

    #[test]
    fn test_argument_text_at_threshold_is_not_padded() {
        // "string, abcdefghijklmnopq" is exactly 25 characters
        let ty = TypeExpr::Reference(ReferenceType::new("Map").with_arguments(vec![
            TypeExpr::intrinsic("string"),
            TypeExpr::intrinsic("abcdefghijklmnopq"),
        ]));
        assert_eq!(
            to_text(&render("web-api", &ty)),
            "Map<string, abcdefghijklmnopq>"
        );
    }

    #[test]
    fn test_templateless_hides_arguments() {
        let ty = TypeExpr::Reference(
            ReferenceType::new("Log").with_arguments(vec![TypeExpr::type_parameter("M")]),
        );
        assert_eq!(to_text(&render("web-api", &ty)), "Log");
    }

    #[test]
    fn test_meta_parameter_depends_on_page() {
        let ty = TypeExpr::type_parameter("M");
        assert_eq!(links(&render("node-api", &ty)), vec!["#servermeta"]);
        assert_eq!(links(&render("web-api", &ty)), vec!["#clientmeta"]);
        assert_eq!(
            render("web-api", &TypeExpr::type_parameter("T")),
            vec![DocNode::text("T")]
        );
    }

    #[test]
    fn test_inline_type_expands_definition() {
        let state = Declaration::new("NodeState", ReflectionKind::TypeAlias).with_type(
            TypeExpr::union(vec![
                TypeExpr::string_literal("online"),
                TypeExpr::string_literal("offline"),
            ]),
        );
        let ty = TypeExpr::Reference(ReferenceType::new("NodeState").with_reflection(state));
        let nodes = render("web-api", &ty);
        assert_eq!(to_text(&nodes), "'online' | 'offline'");
        assert!(links(&nodes).is_empty());
    }

    #[test]
    fn test_inline_type_without_target_fails() {
        let config = RenderConfig::default();
        let md = ComrakMarkdown::new();
        let ctx = RenderContext::new("web-api", &config, &md).unwrap();
        let err = render_type(&ctx, &TypeExpr::reference("NodeState")).unwrap_err();
        assert!(matches!(err, RenderError::MalformedInput { .. }));
        assert!(err.to_string().contains("NodeState"));
    }

    #[test]
    fn test_structural_forms() {
        let indexed = TypeExpr::IndexedAccess {
            object_type: Box::new(TypeExpr::type_parameter("T")),
            index_type: Box::new(TypeExpr::string_literal("type")),
        };
        assert_eq!(to_text(&render("web-api", &indexed)), "T['type']");

        let array = TypeExpr::array(TypeExpr::intrinsic("string"));
        assert_eq!(to_text(&render("web-api", &array)), "string[]");

        let tuple = TypeExpr::tuple(vec![TypeExpr::intrinsic("string"), TypeExpr::intrinsic("number")]);
        assert_eq!(to_text(&render("web-api", &tuple)), "[string, number]");

        let both = TypeExpr::intersection(vec![TypeExpr::intrinsic("object"), TypeExpr::intrinsic("any")]);
        assert_eq!(to_text(&render("web-api", &both)), "object & any");
    }

    #[test]
    fn test_conditional_operator_and_query() {
        let conditional = TypeExpr::Conditional {
            check_type: Box::new(TypeExpr::type_parameter("T")),
            extends_type: Some(Box::new(TypeExpr::intrinsic("string"))),
            true_type: Box::new(TypeExpr::intrinsic("number")),
            false_type: Box::new(TypeExpr::intrinsic("never")),
        };
        assert_eq!(to_text(&render("web-api", &conditional)), "T ? number : never");

        let keyof = TypeExpr::TypeOperator {
            operator: "keyof".to_string(),
            target: Box::new(TypeExpr::type_parameter("T")),
        };
        let nodes = render("web-api", &keyof);
        assert_eq!(to_text(&nodes), " keyof T");
        assert_eq!(nodes[0].as_element().unwrap().properties["class"], "code-block_keyword");

        let indexed = TypeExpr::IndexedAccess {
            object_type: Box::new(TypeExpr::type_parameter("E")),
            index_type: Box::new(keyof),
        };
        assert_eq!(to_text(&render("web-api", &indexed)), "E[ keyof T]");

        let query = TypeExpr::Query {
            query_type: Box::new(TypeExpr::reference("actions")),
        };
        assert_eq!(to_text(&render("web-api", &query)), "typeof actions");
    }

    #[test]
    fn test_string_literal_is_highlighted() {
        let nodes = render("web-api", &TypeExpr::string_literal("add"));
        let span = nodes[0].as_element().unwrap();
        assert_eq!(span.properties["class"], "code-block_string");
        assert_eq!(nodes[0].to_text(), "'add'");
    }

    #[test]
    fn test_deep_nesting() {
        let mut ty = TypeExpr::intrinsic("string");
        for _ in 0..200 {
            ty = TypeExpr::array(ty);
        }
        let text = to_text(&render("web-api", &ty));
        assert_eq!(text.len(), "string".len() + 400);
    }
}

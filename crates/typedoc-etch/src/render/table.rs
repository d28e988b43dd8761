//! Member tables for parameters, properties and type templates

use super::decl::render_signature;
use super::{comment_inline, render_type, RenderContext};
use crate::diagnostics::RenderResult;
use crate::dom::{tag, tag_text, DocNode};
use crate::reflection::Declaration;

/// ` ?` marker after optional member names
fn optional_marker() -> Vec<DocNode> {
    vec![
        DocNode::text(" "),
        tag_text("span", "?").prop("aria-title", "Optional").into_node(),
    ]
}

/// Build a `label | Type | Description` table.
///
/// The description column exists only when some member has a comment.
pub fn render_table(
    ctx: &RenderContext,
    label: &str,
    members: &[Declaration],
) -> RenderResult<DocNode> {
    let has_desc = members.iter().any(|m| m.comment.is_some());

    let mut rows = vec![tag(
        "tr",
        vec![
            tag_text("th", label).into_node(),
            tag_text("th", "Type").into_node(),
            if has_desc {
                tag_text("th", "Description").into_node()
            } else {
                DocNode::empty()
            },
        ],
    )
    .into_node()];

    for member in members {
        let ty = match member.signatures.first() {
            Some(signature) => render_signature(ctx, signature)?,
            None => match &member.ty {
                Some(ty) => render_type(ctx, ty)?,
                None => vec![],
            },
        };

        let mut name_cell = vec![tag_text("code", member.name.as_str()).into_node()];
        if member.flags.is_optional {
            name_cell.extend(optional_marker());
        } else {
            name_cell.push(DocNode::empty());
        }

        rows.push(
            tag(
                "tr",
                vec![
                    tag("td", name_cell).into_node(),
                    tag("td", vec![tag("code", ty).no_class().into_node()]).into_node(),
                    if has_desc {
                        tag("td", comment_inline(ctx, member.comment.as_ref())?).into_node()
                    } else {
                        DocNode::empty()
                    },
                ],
            )
            .into_node(),
        );
    }

    Ok(tag("table", rows).into_node())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::dom::Element;
    use crate::markdown::ComrakMarkdown;
    use crate::reflection::{Comment, Signature};
    use crate::test::mock_parameter;
    use crate::types::TypeExpr;
    use pretty_assertions::assert_eq;

    fn table(members: &[Declaration]) -> Element {
        let config = RenderConfig::default();
        let md = ComrakMarkdown::new();
        let ctx = RenderContext::new("web-api", &config, &md).unwrap();
        match render_table(&ctx, "Parameter", members).unwrap() {
            DocNode::Element(el) => el,
            other => panic!("expected table, got {:?}", other),
        }
    }

    fn cells(row: &DocNode) -> &[DocNode] {
        &row.as_element().unwrap().children
    }

    #[test]
    fn test_table_without_descriptions() {
        let el = table(&[mock_parameter("action", TypeExpr::reference("Action"))]);
        assert_eq!(el.tag_name, "table");
        assert_eq!(el.children.len(), 2);
        let header = cells(&el.children[0]);
        assert_eq!(header[0].to_text(), "Parameter");
        assert_eq!(header[1].to_text(), "Type");
        assert_eq!(header[2], DocNode::empty());
        let row = cells(&el.children[1]);
        assert_eq!(row[0].to_text(), "action");
        assert_eq!(row[1].to_text(), "Action");
        assert_eq!(row[2], DocNode::empty());
    }

    #[test]
    fn test_description_column_when_any_commented() {
        let el = table(&[
            mock_parameter("action", TypeExpr::reference("Action"))
                .with_comment(Comment::short("The **new** action.")),
            mock_parameter("meta", TypeExpr::reference("Meta")),
        ]);
        let header = cells(&el.children[0]);
        assert_eq!(header[2].to_text(), "Description");

        let first = cells(&el.children[1]);
        let desc = first[2].as_element().unwrap();
        assert_eq!(desc.tag_name, "td");
        assert_eq!(first[2].to_text(), "The new action.");
        assert_eq!(desc.children[1].as_element().unwrap().tag_name, "strong");

        let second = cells(&el.children[2]);
        let empty = second[2].as_element().unwrap();
        assert_eq!(empty.tag_name, "td");
        assert!(empty.children.is_empty());
    }

    #[test]
    fn test_optional_marker() {
        let el = table(&[mock_parameter("opts", TypeExpr::intrinsic("object")).optional()]);
        let name = cells(&el.children[1])[0].as_element().unwrap();
        assert_eq!(name.children.len(), 3);
        let marker = name.children[2].as_element().unwrap();
        assert_eq!(marker.properties["aria-title"], "Optional");
        assert_eq!(name.children[2].to_text(), "?");
    }

    #[test]
    fn test_callable_member_shows_signature() {
        let callback = Declaration::new("listener", crate::reflection::ReflectionKind::Property)
            .with_signature(
                Signature::returning(TypeExpr::void())
                    .with_parameters(vec![mock_parameter("action", TypeExpr::reference("Action"))]),
            );
        let el = table(&[callback]);
        let ty = cells(&el.children[1])[1].as_element().unwrap();
        let code = ty.children[0].as_element().unwrap();
        assert!(code.no_class);
        assert_eq!(ty.children[0].to_text(), "(action: Action) => void");
    }
}

//! Method definitions and their formal parameters.

use super::parser::{node_line, node_text};
use crate::core::parameters::{DeclaredParameter, MethodDefinition};
use tree_sitter::Node;

const METHOD: &str = "method";
const SINGLETON_METHOD: &str = "singleton_method";

pub fn is_definition(node: &Node) -> bool {
    matches!(node.kind(), METHOD | SINGLETON_METHOD)
}

/// Nearest `def` or `def self.` that contains `node`.
pub fn enclosing_definition<'tree>(node: &Node<'tree>) -> Option<Node<'tree>> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if is_definition(&ancestor) {
            return Some(ancestor);
        }
        current = ancestor.parent();
    }
    None
}

/// Build a [`MethodDefinition`] from a `method` or `singleton_method` node.
pub fn extract_definition(node: &Node, source: &str) -> Option<MethodDefinition> {
    if !is_definition(node) {
        return None;
    }

    let name = node_text(&node.child_by_field_name("name")?, source).to_string();
    let parameters = node
        .child_by_field_name("parameters")
        .map(|params| extract_parameters(&params, source))
        .unwrap_or_default();

    Some(
        MethodDefinition::new(name, parameters)
            .with_singleton(node.kind() == SINGLETON_METHOD)
            .with_line(node_line(node)),
    )
}

fn extract_parameters(params: &Node, source: &str) -> Vec<DeclaredParameter> {
    let mut cursor = params.walk();
    params
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .map(|child| declared_parameter(&child, source))
        .collect()
}

fn declared_parameter(node: &Node, source: &str) -> DeclaredParameter {
    let text = |n: &Node| node_text(n, source).to_string();
    let name = || {
        node.child_by_field_name("name")
            .map(|n| text(&n))
            .unwrap_or_default()
    };
    let value = || node.child_by_field_name("value").map(|n| text(&n));

    match node.kind() {
        "identifier" => DeclaredParameter::Required { name: text(node) },
        "optional_parameter" => DeclaredParameter::Optional {
            name: name(),
            default: value().unwrap_or_default(),
        },
        "splat_parameter" => DeclaredParameter::Rest {
            name: name(),
            surface: text(node),
        },
        "keyword_parameter" => match value() {
            Some(default) => DeclaredParameter::KeywordOptional {
                name: name(),
                default,
            },
            None => DeclaredParameter::KeywordRequired { name: name() },
        },
        "hash_splat_parameter" => DeclaredParameter::KeywordRest {
            name: name(),
            surface: text(node),
        },
        "hash_splat_nil" => DeclaredParameter::NoKeywords,
        "block_parameter" => DeclaredParameter::Block { name: name() },
        "forward_parameter" => DeclaredParameter::ForwardAll,
        _ => DeclaredParameter::Unrecognized {
            surface: text(node),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::ruby::parser::parse_source;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn first_definition(source: &str) -> MethodDefinition {
        let ast = parse_source(source, Path::new("test.rb")).unwrap();
        find_definition(ast.root(), &ast.source).expect("no definition found")
    }

    fn find_definition(node: Node, source: &str) -> Option<MethodDefinition> {
        if let Some(def) = extract_definition(&node, source) {
            return Some(def);
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        children.into_iter().find_map(|c| find_definition(c, source))
    }

    #[test]
    fn test_extract_every_parameter_kind() {
        let def = first_definition(
            "def each(a, b = 1, *rest, c:, d: 2, **opts, &blk)\nend\n",
        );

        assert_eq!(def.name, "each");
        assert!(!def.singleton);
        assert_eq!(
            def.parameters,
            vec![
                DeclaredParameter::required("a"),
                DeclaredParameter::optional("b", "1"),
                DeclaredParameter::rest("rest"),
                DeclaredParameter::keyword("c"),
                DeclaredParameter::keyword_optional("d", "2"),
                DeclaredParameter::keyword_rest("opts"),
                DeclaredParameter::block("blk"),
            ]
        );
    }

    #[test]
    fn test_extract_singleton_method() {
        let def = first_definition("class Widget\n  def self.each(x)\n  end\nend\n");

        assert_eq!(def.name, "each");
        assert!(def.singleton);
        assert_eq!(def.line, 2);
        assert_eq!(def.parameters, vec![DeclaredParameter::required("x")]);
    }

    #[test]
    fn test_extract_method_without_parameters() {
        let def = first_definition("def each\nend\n");
        assert!(def.parameters.is_empty());
    }

    #[test]
    fn test_extract_forwarding_and_nil_keywords() {
        assert_eq!(
            first_definition("def each(...)\nend\n").parameters,
            vec![DeclaredParameter::ForwardAll]
        );
        assert_eq!(
            first_definition("def each(x, **nil)\nend\n").parameters,
            vec![DeclaredParameter::required("x"), DeclaredParameter::NoKeywords]
        );
    }

    #[test]
    fn test_destructured_parameter_is_unrecognized() {
        let def = first_definition("def each((a, b))\nend\n");
        assert_eq!(
            def.parameters,
            vec![DeclaredParameter::Unrecognized {
                surface: "(a, b)".to_string()
            }]
        );
    }

    #[test]
    fn test_anonymous_splats() {
        let def = first_definition("def each(*, **)\nend\n");
        assert_eq!(
            def.parameters,
            vec![
                DeclaredParameter::Rest {
                    name: String::new(),
                    surface: "*".to_string()
                },
                DeclaredParameter::KeywordRest {
                    name: String::new(),
                    surface: "**".to_string()
                },
            ]
        );
    }
}

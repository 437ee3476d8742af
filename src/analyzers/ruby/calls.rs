//! Locating `to_enum`/`enum_for` calls and reading their arguments.

use super::definitions::{enclosing_definition, extract_definition};
use super::parser::{node_column, node_line, node_text, RubyAst};
use crate::core::arguments::{
    CallArguments, ConversionCall, Expression, KeywordArguments, KeywordPair, MethodReference,
};
use crate::core::parameters::MethodDefinition;
use tree_sitter::Node;

pub const DEFAULT_CONVERSION_METHODS: &[&str] = &["to_enum", "enum_for"];

const CURRENT_METHOD_BUILTIN: &str = "__method__";

/// A conversion call paired with the method it appears in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSite {
    pub call: ConversionCall,
    /// `None` when the call is outside any method body.
    pub definition: Option<MethodDefinition>,
}

/// Every conversion call in the file, in source order.
pub fn find_conversion_calls(ast: &RubyAst, conversion_methods: &[String]) -> Vec<ConversionSite> {
    let mut sites = Vec::new();
    collect_sites(ast.root(), &ast.source, conversion_methods, &mut sites);
    sites
}

fn collect_sites(
    node: Node,
    source: &str,
    conversion_methods: &[String],
    sites: &mut Vec<ConversionSite>,
) {
    if let Some(site) = conversion_site(&node, source, conversion_methods) {
        sites.push(site);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_sites(child, source, conversion_methods, sites);
    }
}

fn conversion_site(
    node: &Node,
    source: &str,
    conversion_methods: &[String],
) -> Option<ConversionSite> {
    let method = conversion_method(node, source, conversion_methods)?;
    let arguments = argument_nodes(&node.child_by_field_name("arguments")?);
    let (first, rest) = arguments.split_first()?;

    let definition = enclosing_definition(node).and_then(|def| extract_definition(&def, source));
    let parameter_names: Vec<&str> = definition
        .as_ref()
        .map(|def| def.parameter_names().collect())
        .unwrap_or_default();

    let end = node.end_position();
    let call = ConversionCall {
        method: method.to_string(),
        target: method_reference(first, source, &parameter_names),
        arguments: call_arguments(rest, source),
        line: node_line(node),
        column: node_column(node),
        end_line: end.row + 1,
        end_column: end.column + 1,
    };

    Some(ConversionSite { call, definition })
}

/// Name of the conversion method when `node` is a call to one, on `self`
/// or with no receiver.
fn conversion_method<'a>(
    node: &Node,
    source: &'a str,
    conversion_methods: &[String],
) -> Option<&'a str> {
    if node.kind() != "call" {
        return None;
    }

    let method = node_text(&node.child_by_field_name("method")?, source);
    if !conversion_methods.iter().any(|m| m == method) {
        return None;
    }

    if let Some(receiver) = node.child_by_field_name("receiver") {
        if receiver.kind() != "self" || uses_safe_navigation(node) {
            return None;
        }
    }

    Some(method)
}

fn uses_safe_navigation(node: &Node) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| child.kind() == "&.");
    found
}

fn argument_nodes<'tree>(list: &Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

fn method_reference(node: &Node, source: &str, parameter_names: &[&str]) -> MethodReference {
    let text = node_text(node, source);
    match node.kind() {
        "simple_symbol" => MethodReference::Symbol(text.trim_start_matches(':').to_string()),
        "delimited_symbol" if !has_interpolation(node) => {
            MethodReference::Symbol(unquote(text.trim_start_matches(':')).to_string())
        }
        "identifier" if text == CURRENT_METHOD_BUILTIN => MethodReference::CurrentMethod,
        // A parameter shadows any method of the same name.
        "identifier" if parameter_names.contains(&text) => MethodReference::Other(text.to_string()),
        "identifier" => MethodReference::Call(text.to_string()),
        "call" => call_reference(node, source),
        _ => MethodReference::Other(text.to_string()),
    }
}

fn call_reference(node: &Node, source: &str) -> MethodReference {
    let method = node
        .child_by_field_name("method")
        .map(|m| node_text(&m, source))
        .unwrap_or_default();
    let has_receiver = node.child_by_field_name("receiver").is_some();
    let has_arguments = node
        .child_by_field_name("arguments")
        .is_some_and(|args| !argument_nodes(&args).is_empty());

    if method == CURRENT_METHOD_BUILTIN && !has_receiver && !has_arguments {
        MethodReference::CurrentMethod
    } else {
        MethodReference::Call(method.to_string())
    }
}

fn call_arguments(nodes: &[Node], source: &str) -> CallArguments {
    let mut arguments = CallArguments::new();
    let mut keywords = KeywordArguments::default();

    let significant: Vec<&Node> = nodes
        .iter()
        .filter(|n| n.kind() != "block_argument")
        .collect();
    let last_index = significant.len().checked_sub(1);

    for (index, node) in significant.iter().enumerate() {
        match node.kind() {
            "pair" => keywords.pairs.push(keyword_pair(node, source)),
            "hash_splat_argument" => keywords.spreads.push(expression(node, source)),
            "forward_argument" => arguments.forwards_all = true,
            "hash" if Some(index) == last_index && keywords.is_empty() => {
                keywords = hash_literal(node, source);
            }
            _ => arguments.positional.push(expression(node, source)),
        }
    }

    if !keywords.is_empty() {
        arguments.keywords = Some(keywords);
    }
    arguments
}

fn hash_literal(node: &Node, source: &str) -> KeywordArguments {
    let mut keywords = KeywordArguments::default();
    for entry in argument_nodes(node) {
        match entry.kind() {
            "pair" => keywords.pairs.push(keyword_pair(&entry, source)),
            "hash_splat_argument" => keywords.spreads.push(expression(&entry, source)),
            _ => {}
        }
    }
    keywords
}

fn keyword_pair(node: &Node, source: &str) -> KeywordPair {
    let key = node
        .child_by_field_name("key")
        .and_then(|key| symbol_key(&key, node, source));

    match node.child_by_field_name("value") {
        Some(value) => KeywordPair {
            key,
            value: expression(&value, source),
        },
        None => match key {
            Some(key) => KeywordPair::shorthand(key),
            None => KeywordPair {
                key: None,
                value: Expression::other(node_text(node, source)),
            },
        },
    }
}

/// Symbol name of a hash key: `name:`, `:name =>`, `"name":`.
fn symbol_key(key: &Node, pair: &Node, source: &str) -> Option<String> {
    let text = node_text(key, source);
    match key.kind() {
        "hash_key_symbol" | "identifier" | "constant" => Some(text.to_string()),
        "simple_symbol" => Some(text.trim_start_matches(':').to_string()),
        "delimited_symbol" if !has_interpolation(key) => {
            Some(unquote(text.trim_start_matches(':')).to_string())
        }
        "string" if !has_interpolation(key) && !uses_arrow(pair) => Some(unquote(text).to_string()),
        _ => None,
    }
}

fn uses_arrow(pair: &Node) -> bool {
    let mut cursor = pair.walk();
    let found = pair.children(&mut cursor).any(|child| child.kind() == "=>");
    found
}

fn has_interpolation(node: &Node) -> bool {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .any(|child| child.kind() == "interpolation");
    found
}

fn unquote(text: &str) -> &str {
    text.strip_prefix(['"', '\''])
        .and_then(|t| t.strip_suffix(['"', '\'']))
        .unwrap_or(text)
}

fn expression(node: &Node, source: &str) -> Expression {
    let text = node_text(node, source);
    match node.kind() {
        "identifier" => Expression::local(text),
        "splat_argument" => Expression::splat(text),
        "hash_splat_argument" => Expression::keyword_splat(text),
        _ => Expression::other(text),
    }
}

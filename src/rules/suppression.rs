//! Inline disable directives in Ruby comments.
//!
//! Recognised forms, with `enumguard:` accepted in place of `rubocop:`:
//!
//! ```ruby
//! to_enum(:each) # rubocop:disable Lint/ToEnumArguments
//!
//! # rubocop:disable Lint/ToEnumArguments
//! ...
//! # rubocop:enable Lint/ToEnumArguments
//! ```
//!
//! A directive on a line of code covers that line only. A directive on its
//! own line opens (or closes) a range; an unclosed range runs to the end of
//! the file. `todo` is treated as `disable`. An empty rule list or `all`
//! matches every rule, and a department name such as `Lint` matches all of
//! its rules.

use crate::analyzers::ruby::parser::{node_line, node_text, RubyAst};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tree_sitter::Node;

static DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#\s*(?:rubocop|enumguard)\s*:\s*(disable|enable|todo)\b\s*([\w/,\s]*)")
        .expect("directive pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Disable,
    Enable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Directive {
    line: usize,
    mode: Mode,
    rules: Vec<String>,
    own_line: bool,
}

impl Directive {
    fn applies_to(&self, rule: &str) -> bool {
        self.rules.is_empty() || self.rules.iter().any(|r| rule_matches(r, rule))
    }
}

fn rule_matches(pattern: &str, rule: &str) -> bool {
    pattern == "all"
        || pattern == rule
        || rule
            .split_once('/')
            .is_some_and(|(department, _)| department == pattern)
}

/// Lines on which offenses of one rule are suppressed.
#[derive(Debug, Clone, Default)]
pub struct SuppressionContext {
    ranges: Vec<(usize, Option<usize>)>,
    lines: HashSet<usize>,
}

impl SuppressionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_suppressed(&self, line: usize) -> bool {
        self.lines.contains(&line)
            || self
                .ranges
                .iter()
                .any(|&(start, end)| line >= start && end.is_none_or(|end| line <= end))
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty() && self.lines.is_empty()
    }
}

/// Collect the directives in `ast` that concern `rule`.
pub fn parse_suppression_comments(ast: &RubyAst, rule: &str) -> SuppressionContext {
    let mut comments = Vec::new();
    collect_comments(ast.root(), &mut comments);

    let directives = comments
        .iter()
        .filter_map(|comment| parse_directive(comment, &ast.source))
        .filter(|directive| directive.applies_to(rule));

    let mut context = SuppressionContext::new();
    let mut open: Option<usize> = None;

    for directive in directives {
        match (directive.own_line, directive.mode) {
            (false, Mode::Disable) => {
                context.lines.insert(directive.line);
            }
            (false, Mode::Enable) => {}
            (true, Mode::Disable) => {
                open.get_or_insert(directive.line);
            }
            (true, Mode::Enable) => {
                if let Some(start) = open.take() {
                    context.ranges.push((start, Some(directive.line)));
                }
            }
        }
    }

    if let Some(start) = open {
        log::debug!(
            "{}: disable directive at line {} is never re-enabled",
            ast.path.display(),
            start
        );
        context.ranges.push((start, None));
    }

    context
}

fn collect_comments<'tree>(node: Node<'tree>, comments: &mut Vec<Node<'tree>>) {
    if node.kind() == "comment" {
        comments.push(node);
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_comments(child, comments);
    }
}

fn parse_directive(comment: &Node, source: &str) -> Option<Directive> {
    let text = node_text(comment, source);
    let captures = DIRECTIVE.captures(text)?;

    let mode = match &captures[1] {
        "enable" => Mode::Enable,
        _ => Mode::Disable,
    };
    let rules = captures
        .get(2)
        .map(|m| {
            m.as_str()
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let line_start = source[..comment.start_byte()]
        .rfind('\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    let own_line = source[line_start..comment.start_byte()].trim().is_empty();

    Some(Directive {
        line: node_line(comment),
        mode,
        rules,
        own_line,
    })
}

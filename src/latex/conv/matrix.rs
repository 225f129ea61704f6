// Delimiter groups, matrices, and piecewise arrays

use smallvec::SmallVec;

use super::node::convert_node;
use crate::ast::{MathNode, NodeKind};

/// Convert a delimiter group, detecting matrix and equation-array content
/// before falling back to a plain bracketed expression.
pub(crate) fn convert_delimiter_group(node: &MathNode) -> String {
    let attrs = node.attrs();
    let open = attrs.open.as_deref().unwrap_or("(");
    let close = attrs.close.as_deref().unwrap_or(")");

    let Some(first) = node.child_of_kind(NodeKind::Element) else {
        return String::new();
    };

    for grandchild in first.children() {
        match grandchild.kind() {
            NodeKind::Matrix => {
                let env = match open {
                    "(" => "pmatrix",
                    "[" => "bmatrix",
                    "{" => "Bmatrix",
                    "|" => "vmatrix",
                    _ => "matrix",
                };
                return convert_matrix(grandchild, env);
            },
            NodeKind::EqArray => {
                let content = convert_node(grandchild, Some(NodeKind::Element));
                // an unmatched `{` around an equation array is a piecewise
                // definition
                if open == "{" && close.is_empty() {
                    return format!("\\begin{{cases}} {content} \\end{{cases}}");
                }
                return content;
            },
            _ => {},
        }
    }

    let inner = convert_node(first, Some(NodeKind::DelimiterGroup));
    match (open, close) {
        ("(", ")") => format!("\\left({inner}\\right)"),
        ("[", "]") => format!("\\left[{inner}\\right]"),
        ("{", "}") => format!("\\left\\{{{inner}\\right\\}}"),
        ("|", "|") => format!("\\left|{inner}\\right|"),
        _ => format!("{open}{inner}{close}"),
    }
}

/// Convert a matrix node into the given environment. Empty cells and empty
/// rows are dropped; an empty matrix is an empty fragment.
pub(crate) fn convert_matrix(node: &MathNode, env: &str) -> String {
    let mut rows: Vec<String> = Vec::new();
    for row in node.children_of_kind(NodeKind::MatrixRow) {
        let mut cells: SmallVec<[String; 4]> = SmallVec::new();
        for cell in row.children_of_kind(NodeKind::Element) {
            let content = convert_node(cell, Some(NodeKind::MatrixRow));
            if !content.is_empty() {
                cells.push(content);
            }
        }
        if !cells.is_empty() {
            rows.push(cells.join(" & "));
        }
    }

    if rows.is_empty() {
        return String::new();
    }
    format!("\\begin{{{env}}} {} \\end{{{env}}}", rows.join(" \\\\ "))
}

/// Convert an equation array: one row per element child, each row split
/// into a value and a condition for the `cases` environment.
pub(crate) fn convert_eq_array(node: &MathNode) -> String {
    let mut rows: Vec<String> = Vec::new();
    for part in node.children_of_kind(NodeKind::Element) {
        let part = convert_node(part, Some(NodeKind::EqArray));
        let part = part.trim();
        if !part.is_empty() {
            rows.push(format_case_row(part));
        }
    }
    rows.join(" \\\\ ")
}

// Split on the first comma only: "0, & n even" -> value "0", condition
// "n even". Parity conditions are prose and go into text mode.
fn format_case_row(row: &str) -> String {
    let Some((value, condition)) = row.split_once(',') else {
        return row.to_owned();
    };
    let value = value.trim();
    let mut condition = condition.trim();
    if let Some(rest) = condition.strip_prefix('&') {
        condition = rest.trim();
    }

    if condition.is_empty() {
        return value.to_owned();
    }
    if condition.contains("odd") || condition.contains("even") {
        format!("{value}, & \\text{{{condition}}}")
    } else {
        format!("{value}, & {condition}")
    }
}

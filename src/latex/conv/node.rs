// Node dispatch and structural converters
//
// Each converter is a pure function from a node (plus its already-converted
// children) to a LaTeX fragment. Conversion is total: kinds without a
// dedicated converter fall through to child concatenation, and missing
// optional children become empty fragments.

use phf::phf_map;

use super::matrix;
use crate::ast::{MathNode, NodeKind};
use crate::latex::{cleanup, commands, functions, postprocess, symbols, textrun};

/// Accent codepoints with a dedicated LaTeX command; everything else
/// renders as a hat.
static ACCENTS: phf::Map<&'static str, &'static str> = phf_map! {
    "\u{0302}" => "hat",
    "\u{0303}" => "tilde",
    "\u{0304}" => "bar",
    "\u{0307}" => "dot",
    "\u{0308}" => "ddot",
    "\u{20d7}" => "vec",
};

/// Convert an expression tree to a LaTeX fragment.
///
/// A `Math` root finalizes the assembled expression with the cleanup and
/// post-processing passes; any other root yields the raw structural
/// fragment for that node.
pub fn to_latex(node: &MathNode) -> String {
    convert_node(node, None)
}

/// Dispatch one node to its converter. `parent` is the kind of the node's
/// immediate parent; the fraction converter reads it for binomial
/// detection.
pub(crate) fn convert_node(node: &MathNode, parent: Option<NodeKind>) -> String {
    match node.kind() {
        NodeKind::Math => convert_math(node),
        NodeKind::Run => textrun::convert(node),
        NodeKind::Fraction => convert_fraction(node, parent),
        NodeKind::SupScript => convert_superscript(node),
        NodeKind::SubScript => convert_subscript(node),
        NodeKind::SubSupScript => convert_sub_sup(node),
        NodeKind::Nary => convert_nary(node),
        NodeKind::Radical => convert_radical(node),
        NodeKind::DelimiterGroup => matrix::convert_delimiter_group(node),
        NodeKind::Matrix => matrix::convert_matrix(node, "matrix"),
        NodeKind::EqArray => matrix::convert_eq_array(node),
        NodeKind::Function => convert_function(node),
        NodeKind::LimitLower | NodeKind::LimitUpper => convert_limit_script(node),
        NodeKind::Accent => convert_accent(node),
        // Containers (Para, Element, Numerator, ...) and kinds without a
        // dedicated converter degrade to child concatenation.
        _ => convert_children(node),
    }
}

/// Convert every child in order and concatenate the fragments.
pub(crate) fn convert_children(node: &MathNode) -> String {
    let mut out = String::new();
    for child in node.children() {
        out.push_str(&convert_node(child, Some(node.kind())));
    }
    out
}

fn convert_child_of_kind(node: &MathNode, kind: NodeKind) -> String {
    node.child_of_kind(kind)
        .map(|child| convert_node(child, Some(node.kind())))
        .unwrap_or_default()
}

// Top-level expression: assemble, clean, then run the global pass once.
fn convert_math(node: &MathNode) -> String {
    let latex = convert_children(node);
    let latex = cleanup::clean(&latex);
    postprocess::apply(&latex)
}

fn convert_fraction(node: &MathNode, parent: Option<NodeKind>) -> String {
    let numerator = convert_child_of_kind(node, NodeKind::Numerator);
    let denominator = convert_child_of_kind(node, NodeKind::Denominator);
    let numerator = numerator.trim();
    let denominator = denominator.trim();

    // Small numeric fractions (1/2, 2/3, ...) are common in exponents and
    // take priority over binomial detection.
    if matches!(numerator, "1" | "2" | "3") && matches!(denominator, "2" | "3" | "4") {
        return commands::format("frac", &[numerator, denominator]);
    }

    let single_alpha = |s: &str| {
        let mut chars = s.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
    };
    if single_alpha(numerator)
        && single_alpha(denominator)
        && ((numerator == "n" && denominator == "k") || parent == Some(NodeKind::DelimiterGroup))
    {
        return commands::format("binom", &[numerator, denominator]);
    }

    commands::format("frac", &[numerator, denominator])
}

fn convert_superscript(node: &MathNode) -> String {
    let mut base = convert_child_of_kind(node, NodeKind::Element);
    let sup = convert_child_of_kind(node, NodeKind::Sup);

    if base.starts_with("\\left[") {
        base = repair_duplicated_integrals(base);
    }
    if !cleanup::has_compound_command(&base) {
        base = cleanup::clean(&base);
    }

    format!("{base}^{{{sup}}}")
}

// Narrow repair for one observed malformed input: a nested integral
// superscript whose base duplicated the bracketed integral expression.
// Keeps the first well-formed bracketed expression (its first two integral
// commands) and drops the rest.
fn repair_duplicated_integrals(base: String) -> String {
    let parts: Vec<&str> = base.split("\\int").collect();
    if parts.len() <= 3 {
        return base;
    }
    let mut repaired = parts[..3].join("\\int");
    repaired.push_str("\\right]");
    repaired
}

fn convert_subscript(node: &MathNode) -> String {
    let base = convert_child_of_kind(node, NodeKind::Element);
    let sub = convert_child_of_kind(node, NodeKind::Sub);
    let base = cleanup::clean(&base);
    format!("{base}_{{{sub}}}")
}

fn convert_sub_sup(node: &MathNode) -> String {
    let base = convert_child_of_kind(node, NodeKind::Element);
    let sub = convert_child_of_kind(node, NodeKind::Sub);
    let sup = convert_child_of_kind(node, NodeKind::Sup);
    let base = cleanup::clean(&base);
    format!("{base}_{{{sub}}}^{{{sup}}}")
}

fn convert_nary(node: &MathNode) -> String {
    let operator = node.attrs().operator.as_deref().unwrap_or("∫");
    let operator = symbols::substitute(operator);
    // the table's trailing space would detach the limits
    let mut out = operator.trim_end().to_owned();

    if let Some(sub) = node.child_of_kind(NodeKind::Sub) {
        out.push_str("_{");
        out.push_str(&convert_node(sub, Some(NodeKind::Nary)));
        out.push('}');
    }
    if let Some(sup) = node.child_of_kind(NodeKind::Sup) {
        out.push_str("^{");
        out.push_str(&convert_node(sup, Some(NodeKind::Nary)));
        out.push('}');
    }
    if let Some(operand) = node.child_of_kind(NodeKind::Element) {
        out.push(' ');
        out.push_str(&convert_node(operand, Some(NodeKind::Nary)));
    }
    out
}

fn convert_radical(node: &MathNode) -> String {
    let operand = convert_child_of_kind(node, NodeKind::Element);
    if node.attrs().degree_hidden {
        return commands::format("sqrt", &[&operand]);
    }
    if let Some(degree) = node.child_of_kind(NodeKind::Degree) {
        let degree = convert_node(degree, Some(NodeKind::Radical));
        if !degree.trim().is_empty() {
            return format!("\\sqrt[{degree}]{{{operand}}}");
        }
    }
    commands::format("sqrt", &[&operand])
}

fn convert_function(node: &MathNode) -> String {
    let name_node = node.child_of_kind(NodeKind::FunctionName);
    let argument = convert_child_of_kind(node, NodeKind::Element);

    // A limit-lower marker inside the name means the name already carries
    // its own subscript; keep the argument only when it is not itself
    // another limit expression.
    if let Some(name_node) = name_node {
        if name_node.contains_kind(NodeKind::LimitLower) {
            let name = convert_node(name_node, Some(NodeKind::Function));
            if !argument.is_empty() && !argument.contains("\\lim") {
                return format!("{} {}", name.trim_end(), argument);
            }
            return name;
        }
    }

    let mut name = name_node
        .map(|n| convert_node(n, Some(NodeKind::Function)))
        .unwrap_or_default();
    if !name.is_empty() && !name.starts_with('\\') {
        name = functions::recognize(&name);
    }

    // Limits never parenthesize their argument.
    if !name.is_empty() && name.to_lowercase().contains("lim") {
        if !argument.is_empty() {
            return format!("{} {}", name.trim_end(), argument);
        }
        return name;
    }

    if !name.is_empty() && !argument.is_empty() {
        format!("{}({})", name.trim_end(), argument)
    } else if !name.is_empty() {
        name
    } else {
        argument
    }
}

fn convert_limit_script(node: &MathNode) -> String {
    let base = convert_child_of_kind(node, NodeKind::Element);
    let limit = convert_child_of_kind(node, NodeKind::Limit);

    let base = if base == "lim" {
        "\\lim".to_owned()
    } else if !base.starts_with('\\') {
        functions::recognize(&base)
    } else {
        base
    };

    format!("{}_{{{limit}}}", base.trim_end())
}

fn convert_accent(node: &MathNode) -> String {
    let base = convert_child_of_kind(node, NodeKind::Element);
    let name = node
        .attrs()
        .accent
        .as_deref()
        .and_then(|chr| ACCENTS.get(chr).copied())
        .unwrap_or("hat");
    commands::format(name, &[&base])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builder;

    #[test]
    fn test_small_numeric_fraction_is_never_binomial() {
        let node = builder::fraction(vec![builder::run("1")], vec![builder::run("2")]);
        assert_eq!(to_latex(&node), "\\frac{1}{2}");
    }

    #[test]
    fn test_n_over_k_is_binomial() {
        let node = builder::fraction(vec![builder::run("n")], vec![builder::run("k")]);
        assert_eq!(to_latex(&node), "\\binom{n}{k}");
    }

    #[test]
    fn test_single_letter_fraction_is_plain() {
        let node = builder::fraction(vec![builder::run("a")], vec![builder::run("b")]);
        assert_eq!(to_latex(&node), "\\frac{a}{b}");
    }

    #[test]
    fn test_single_letter_fraction_under_delimiter_parent_is_binomial() {
        let node = builder::fraction(vec![builder::run("a")], vec![builder::run("b")]);
        assert_eq!(
            convert_node(&node, Some(NodeKind::DelimiterGroup)),
            "\\binom{a}{b}"
        );
    }

    #[test]
    fn test_superscript() {
        let node = builder::superscript(vec![builder::run("x")], vec![builder::run("2")]);
        assert_eq!(to_latex(&node), "x^{2}");
    }

    #[test]
    fn test_subscript_and_superscript() {
        let node = builder::sub_sup(
            vec![builder::run("x")],
            vec![builder::run("i")],
            vec![builder::run("2")],
        );
        assert_eq!(to_latex(&node), "x_{i}^{2}");
    }

    #[test]
    fn test_superscript_missing_children_are_empty() {
        let node = MathNode::new(NodeKind::SupScript);
        assert_eq!(to_latex(&node), "^{}");
    }

    #[test]
    fn test_duplicated_integral_base_is_repaired() {
        let integral = || {
            builder::nary(
                None,
                Some(vec![builder::run("0")]),
                Some(vec![builder::run("1")]),
                Some(vec![builder::run("x")]),
            )
        };
        let base = builder::delimiter(
            "[",
            "]",
            vec![integral(), integral(), integral(), integral()],
        );
        let node = builder::superscript(vec![base], vec![builder::run("2")]);
        let out = to_latex(&node);
        assert_eq!(out.matches("\\int").count(), 2);
        assert!(out.starts_with("\\left["));
        assert!(out.ends_with("\\right]^{2}"));
    }

    #[test]
    fn test_nary_defaults_to_integral() {
        let node = builder::nary(
            None,
            Some(vec![builder::run("0")]),
            Some(vec![builder::run("1")]),
            Some(vec![builder::run("f(x)")]),
        );
        assert_eq!(to_latex(&node), "\\int_{0}^{1} f(x)");
    }

    #[test]
    fn test_nary_sum_without_upper_limit() {
        let node = builder::nary(
            Some("∑"),
            Some(vec![builder::run("n=1")]),
            None,
            Some(vec![builder::run("n")]),
        );
        assert_eq!(to_latex(&node), "\\sum_{n=1} n");
    }

    #[test]
    fn test_radical_with_hidden_degree() {
        let node = builder::sqrt(vec![builder::run("x")]);
        assert_eq!(to_latex(&node), "\\sqrt{x}");
    }

    #[test]
    fn test_radical_with_explicit_degree() {
        let node = builder::radical(vec![builder::run("3")], vec![builder::run("x")]);
        assert_eq!(to_latex(&node), "\\sqrt[3]{x}");
    }

    #[test]
    fn test_radical_with_blank_degree_falls_back() {
        let node = builder::radical(vec![builder::run(" ")], vec![builder::run("x")]);
        assert_eq!(to_latex(&node), "\\sqrt{x}");
    }

    #[test]
    fn test_accent_mapping() {
        let node = builder::accent(Some("\u{0303}"), vec![builder::run("x")]);
        assert_eq!(to_latex(&node), "\\tilde{x}");
    }

    #[test]
    fn test_unknown_accent_defaults_to_hat() {
        let node = builder::accent(Some("?"), vec![builder::run("x")]);
        assert_eq!(to_latex(&node), "\\hat{x}");
        let node = builder::accent(None, vec![builder::run("x")]);
        assert_eq!(to_latex(&node), "\\hat{x}");
    }

    #[test]
    fn test_limit_lower() {
        let node = builder::limit_lower(
            vec![builder::run("lim")],
            vec![builder::run("x→0")],
        );
        assert_eq!(to_latex(&node), "\\lim_{x\\rightarrow 0}");
    }

    #[test]
    fn test_function_with_limit_name() {
        let limit = builder::limit_lower(vec![builder::run("lim")], vec![builder::run("x→0")]);
        let node = builder::function(vec![limit], vec![builder::run("f(x)")]);
        assert_eq!(to_latex(&node), "\\lim_{x\\rightarrow 0} f(x)");
    }

    #[test]
    fn test_function_with_limit_name_and_limit_argument() {
        let limit = builder::limit_lower(vec![builder::run("lim")], vec![builder::run("x→0")]);
        let inner = builder::limit_lower(vec![builder::run("lim")], vec![builder::run("n")]);
        let node = builder::function(vec![limit], vec![inner]);
        assert_eq!(to_latex(&node), "\\lim_{x\\rightarrow 0}");
    }

    #[test]
    fn test_ordinary_function_parenthesizes() {
        let node = builder::function(vec![builder::run("g")], vec![builder::run("x")]);
        assert_eq!(to_latex(&node), "g(x)");
    }

    #[test]
    fn test_recognized_function_name() {
        let node = builder::function(vec![builder::run("sin")], vec![builder::run("x")]);
        assert_eq!(to_latex(&node), "\\sin(x)");
    }

    #[test]
    fn test_unknown_kind_concatenates_children() {
        let mut node = MathNode::new(NodeKind::Unknown);
        node.push(builder::run("a"));
        node.push(builder::run("b"));
        assert_eq!(to_latex(&node), "ab");
    }

    #[test]
    fn test_empty_node_is_empty_fragment() {
        assert_eq!(to_latex(&MathNode::new(NodeKind::Phantom)), "");
    }
}

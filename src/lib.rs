//! Ommlatex - Office Math (OMML) expression trees to LaTeX
//!
//! This library converts an already-parsed OMML expression tree into LaTeX
//! source text suitable for `amsmath`/`amssymb` documents. It is the
//! conversion core of a document pipeline: a separate collaborator extracts
//! the math XML from a document archive and builds the tree, and another
//! splices the converted text back into a document.
//!
//! Conversion is best-effort and total: structure the converter does not
//! recognize degrades to the concatenation of its converted children, and
//! unknown symbols pass through literally, so a partially understood
//! expression still yields usable LaTeX instead of an error.
//!
//! # Example
//!
//! ```
//! use ommlatex::ast::builder;
//! use ommlatex::to_latex;
//!
//! // x^2 + 1
//! let tree = builder::math(vec![
//!     builder::superscript(vec![builder::run("x")], vec![builder::run("2")]),
//!     builder::run("+1"),
//! ]);
//! assert_eq!(to_latex(&tree), "x^2+1");
//! ```
//!
//! # Example - embedding fragments
//!
//! ```
//! use ommlatex::document;
//!
//! // short fragments go inline, long ones become display math
//! assert_eq!(document::delimited("x^{2}"), "\\(x^{2}\\)");
//! ```

pub mod ast;
pub mod document;
mod latex;

pub use latex::to_latex;

#[cfg(test)]
mod tests {
    use super::ast::builder;
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fraction_in_superscript() {
        let tree = builder::math(vec![builder::superscript(
            vec![builder::run("x")],
            vec![builder::fraction(
                vec![builder::run("1")],
                vec![builder::run("2")],
            )],
        )]);
        assert_eq!(to_latex(&tree), "x^{\\frac{1}{2}}");
    }

    #[test]
    fn test_integral_expression() {
        let tree = builder::math(vec![builder::nary(
            None,
            Some(vec![builder::run("0")]),
            Some(vec![builder::run("1")]),
            Some(vec![builder::superscript(
                vec![builder::run("x")],
                vec![builder::run("2")],
            )]),
        )]);
        // the top-level cleanup strips the single-character script braces
        assert_eq!(to_latex(&tree), "\\int_0^1 x^2");
    }

    #[test]
    fn test_set_membership_with_symbols() {
        let tree = builder::math(vec![builder::run("x∈ℝ")]);
        assert_eq!(to_latex(&tree), "x\\in \\mathbb{R} ");
    }

    #[test]
    fn test_piecewise_pipeline() {
        let rows = vec![
            vec![builder::run("1, n odd")],
            vec![builder::run("0, n even")],
        ];
        let tree = builder::math(vec![builder::delimiter(
            "{",
            "",
            vec![builder::eq_array(rows)],
        )]);
        assert_eq!(
            to_latex(&tree),
            "\\begin{cases} 1, & \\text{n odd} \\\\ 0, & \\text{n even} \\end{cases}"
        );
    }

    #[test]
    fn test_dot_operator_is_normalized_globally() {
        let tree = builder::math(vec![builder::run("a⋅b")]);
        assert_eq!(to_latex(&tree), "a\\cdot b");
    }

    #[test]
    fn test_para_concatenates_expressions() {
        let mut para = ast::MathNode::new(ast::NodeKind::Para);
        para.push(builder::math(vec![builder::run("a")]));
        para.push(builder::math(vec![builder::run("b")]));
        assert_eq!(to_latex(&para), "ab");
    }
}

// Text run conversion
//
// The rules run in a fixed order and later rules assume the earlier ones
// already ran: pre-existing commands are re-spaced before differentials are
// rewritten, differentials before symbol substitution, and function names
// last, once every symbol is already a command.

use once_cell::sync::Lazy;
use phf::phf_map;
use regex::Regex;

use super::{commands, functions, symbols};
use crate::ast::MathNode;

/// Blackboard bold letters for the common number sets
static BLACKBOARD: phf::Map<&'static str, &'static str> = phf_map! {
    "R" => "\\mathbb{R} ",
    "C" => "\\mathbb{C} ",
    "N" => "\\mathbb{N} ",
    "Z" => "\\mathbb{Z} ",
    "Q" => "\\mathbb{Q} ",
    "H" => "\\mathbb{H} ",
    "F" => "\\mathbb{F} ",
    "P" => "\\mathbb{P} ",
};

// A command name run together with the next symbol: `\neqx` -> `\neq x`.
static COMMAND_RUN_ON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\\[a-zA-Z]+)([a-zA-Z0-9])").expect("failed to build pattern"));

// Differential rewrites; the two-variable forms must run before the
// single-variable ones.
static DOUBLE_DIFFERENTIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])ⅆ([a-z])ⅆ").expect("failed to build pattern"));
static SINGLE_DIFFERENTIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])ⅆ").expect("failed to build pattern"));
static ASCII_DOUBLE_DIFFERENTIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])d([a-z])d\b").expect("failed to build pattern"));
static GREEK_DIFFERENTIAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-z])d([αβγδεζηθικλμνξοπρστυφχψω])").expect("failed to build pattern")
});

// Re-spacing guards: a lowercase follower means the command name itself
// continued (`\in` vs `\infty`), so only capital followers get a space.
static RELATION_RESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\\neq|\\in|\\rightarrow|\\leftarrow|\\implies|\\leq|\\geq)([A-Z])")
        .expect("failed to build pattern")
});
static COMMAND_RESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(\\(?:neq|eq|leq|geq|in|notin|subset|subseteq|rightarrow|leftarrow|implies|Rightarrow|forall|exists|pm|mp|times|div|cdot|approx|equiv|sim|alpha|beta|gamma|delta|epsilon|theta|lambda|mu|pi|sigma|tau|phi|psi|omega|Gamma|Delta|Sigma|Omega))([A-Z])",
    )
    .expect("failed to build pattern")
});
static GREEK_RESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\\gamma|\\alpha|\\beta|\\delta|\\theta|\\sigma)([a-z])")
        .expect("failed to build pattern")
});

/// Convert a text run leaf to LaTeX.
pub fn convert(node: &MathNode) -> String {
    let text = node.text().unwrap_or("");
    if node.attrs().double_struck {
        return blackboard(text);
    }
    convert_text(text)
}

fn blackboard(text: &str) -> String {
    match BLACKBOARD.get(text) {
        Some(mapped) => (*mapped).to_owned(),
        None => commands::format("mathbb", &[text]),
    }
}

/// The ordered rule pipeline for ordinary (non-double-struck) runs.
pub(crate) fn convert_text(text: &str) -> String {
    // Unicode minus
    let text = text.replace('−', "-");

    let text = COMMAND_RUN_ON.replace_all(&text, "${1} ${2}");

    // Differentials: `rⅆrⅆ`-style two-variable forms first, then single
    // forms, then plain ASCII `d` acting as a differential.
    let text = DOUBLE_DIFFERENTIAL.replace_all(&text, "${1} \\, d${2} \\, d");
    let text = SINGLE_DIFFERENTIAL.replace_all(&text, "${1} \\, d");
    let text = ASCII_DOUBLE_DIFFERENTIAL.replace_all(&text, "${1} \\, d${2} \\, d");
    let text = GREEK_DIFFERENTIAL.replace_all(&text, "${1} \\, d${2}");

    let text = symbols::substitute(&text);

    let text = RELATION_RESPACE.replace_all(&text, "${1} ${2}");
    let text = COMMAND_RESPACE.replace_all(&text, "${1} ${2}");
    let text = GREEK_RESPACE.replace_all(&text, "${1} ${2}");

    functions::recognize(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builder;
    use proptest::prelude::*;

    #[test]
    fn test_unicode_minus() {
        assert_eq!(convert_text("a−b"), "a-b");
    }

    #[test]
    fn test_symbol_spacing_single_space() {
        let out = convert_text("x≠y");
        assert_eq!(out, "x\\neq y");
        assert!(!out.contains("\\neqy"));
        assert!(!out.contains("  "));
    }

    #[test]
    fn test_existing_command_run_on_is_repaired() {
        assert_eq!(convert_text("\\neqx"), "\\neq x");
    }

    #[test]
    fn test_single_differential() {
        assert_eq!(convert_text("xⅆ"), "x \\, d");
    }

    #[test]
    fn test_double_differential() {
        assert_eq!(convert_text("rⅆrⅆ"), "r \\, dr \\, d");
    }

    #[test]
    fn test_bare_differential_character() {
        assert_eq!(convert_text("ⅆ"), "\\, d");
    }

    #[test]
    fn test_ascii_differential_before_greek() {
        assert_eq!(convert_text("xdθ"), "x \\, d\\theta ");
    }

    #[test]
    fn test_greek_respace() {
        assert_eq!(convert_text("\\gammaz"), "\\gamma z");
    }

    #[test]
    fn test_relation_respace_skips_lowercase() {
        // `\infty ` from the symbol table must not become `\in fty `
        assert_eq!(convert_text("∞"), "\\infty ");
        assert_eq!(convert_text("\\inX"), "\\in X");
    }

    #[test]
    fn test_function_names() {
        assert_eq!(convert_text("sin(x)"), "\\sin (x)");
    }

    #[test]
    fn test_double_struck_known_letter() {
        let node = builder::double_struck("R");
        assert_eq!(convert(&node), "\\mathbb{R} ");
    }

    #[test]
    fn test_double_struck_generic() {
        let node = builder::double_struck("AB");
        assert_eq!(convert(&node), "\\mathbb{AB} ");
    }

    proptest! {
        #[test]
        fn prop_conversion_is_total(text in "\\PC*") {
            let out = convert_text(&text);
            prop_assert!(!out.contains('−'));
            prop_assert!(!out.contains('ⅆ'));
        }
    }
}

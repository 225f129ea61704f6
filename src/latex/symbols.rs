// Symbol table and substitution
//
// Source Unicode text is rewritten to LaTeX commands by a greedy
// leftmost-longest scan; anything outside the table passes through
// unchanged. Entries whose command ends in a letter carry a trailing space
// so the command never runs into a following identifier.

use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;

/// One immutable entry of the symbol table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolEntry {
    /// Source text as it appears in a run
    pub source: &'static str,
    /// Target LaTeX command
    pub latex: &'static str,
    /// Whether the substitution carries a trailing space
    pub trailing_space: bool,
}

const fn sym(source: &'static str, latex: &'static str, trailing_space: bool) -> SymbolEntry {
    SymbolEntry {
        source,
        latex,
        trailing_space,
    }
}

/// The symbol table, in match-priority order
pub static SYMBOLS: &[SymbolEntry] = &[
    // Comparison / relations
    sym("≠", "\\neq", true),
    sym("≤", "\\leq", true),
    sym("≥", "\\geq", true),
    sym("≈", "\\approx", true),
    sym("≡", "\\equiv", true),
    sym("∼", "\\sim", true),
    // Set operations
    sym("∈", "\\in", true),
    sym("∉", "\\notin", true),
    sym("⊂", "\\subset", true),
    sym("⊆", "\\subseteq", true),
    sym("∪", "\\cup", true),
    sym("∩", "\\cap", true),
    sym("∅", "\\emptyset", true),
    // Logic
    sym("∧", "\\land", true),
    sym("∨", "\\lor", true),
    sym("¬", "\\neg", true),
    sym("∀", "\\forall", true),
    sym("∃", "\\exists", true),
    // Arrows
    sym("→", "\\rightarrow", true),
    sym("←", "\\leftarrow", true),
    sym("↔", "\\leftrightarrow", true),
    sym("⇒", "\\Rightarrow", true),
    sym("⟹", "\\implies", true),
    sym("⟸", "\\impliedby", true),
    // Greek letters
    sym("α", "\\alpha", true),
    sym("β", "\\beta", true),
    sym("γ", "\\gamma", true),
    sym("δ", "\\delta", true),
    sym("ε", "\\epsilon", true),
    sym("θ", "\\theta", true),
    sym("λ", "\\lambda", true),
    sym("μ", "\\mu", true),
    sym("π", "\\pi", true),
    sym("σ", "\\sigma", true),
    sym("τ", "\\tau", true),
    sym("φ", "\\phi", true),
    sym("ψ", "\\psi", true),
    sym("ω", "\\omega", true),
    sym("υ", "\\upsilon", true),
    sym("Γ", "\\Gamma", true),
    sym("Δ", "\\Delta", true),
    sym("Σ", "\\Sigma", true),
    sym("Ω", "\\Omega", true),
    sym("ϒ", "\\Upsilon", true),
    // Symbols ending with letters
    sym("∂", "\\partial", true),
    sym("∇", "\\nabla", true),
    sym("∞", "\\infty", true),
    sym("∠", "\\angle", true),
    sym("⊥", "\\perp", true),
    sym("∥", "\\parallel", true),
    sym("…", "\\ldots", true),
    sym("∴", "\\therefore", true),
    sym("∵", "\\because", true),
    // Binary operators
    sym("±", "\\pm", true),
    sym("∓", "\\mp", true),
    sym("×", "\\times", true),
    sym("÷", "\\div", true),
    sym("·", "\\cdot", true),
    // Big operators
    sym("∑", "\\sum", true),
    sym("∏", "\\prod", true),
    sym("∫", "\\int", true),
    // Special cases, no trailing space
    sym("√", "\\sqrt", false),
    sym("°", "^\\circ", false),
    sym("ⅆ", "\\, d", false),
    // Blackboard bold letters
    sym("ℝ", "\\mathbb{R}", true),
    sym("ℂ", "\\mathbb{C}", true),
    sym("ℕ", "\\mathbb{N}", true),
    sym("ℤ", "\\mathbb{Z}", true),
    sym("ℚ", "\\mathbb{Q}", true),
    sym("ℍ", "\\mathbb{H}", true),
    sym("𝔽", "\\mathbb{F}", true),
    sym("𝕂", "\\mathbb{K}", true),
    sym("𝔸", "\\mathbb{A}", true),
    sym("𝔹", "\\mathbb{B}", true),
    sym("𝕊", "\\mathbb{S}", true),
    sym("𝕋", "\\mathbb{T}", true),
    sym("𝕌", "\\mathbb{U}", true),
    sym("𝕍", "\\mathbb{V}", true),
    sym("𝕎", "\\mathbb{W}", true),
    sym("𝕏", "\\mathbb{X}", true),
    sym("𝕐", "\\mathbb{Y}", true),
    sym("ℙ", "\\mathbb{P}", true),
];

// Longer sources must win over their prefixes, hence LeftmostLongest.
static SYMBOL_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(SYMBOLS.iter().map(|entry| entry.source))
        .expect("failed to build symbol matcher")
});

static SYMBOL_REPLACEMENTS: Lazy<Vec<String>> = Lazy::new(|| {
    SYMBOLS
        .iter()
        .map(|entry| {
            if entry.trailing_space {
                format!("{} ", entry.latex)
            } else {
                entry.latex.to_owned()
            }
        })
        .collect()
});

/// Replace every table symbol in `text` with its LaTeX command.
///
/// Unmatched characters pass through unchanged.
pub fn substitute(text: &str) -> String {
    SYMBOL_MATCHER.replace_all(text, &SYMBOL_REPLACEMENTS[..])
}

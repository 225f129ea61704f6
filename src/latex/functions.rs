// Function name recognition

use once_cell::sync::Lazy;
use regex::Regex;

/// Known function names and their LaTeX macros, in substitution order
static FUNCTION_NAMES: &[(&str, &str)] = &[
    ("sin", "\\sin "),
    ("cos", "\\cos "),
    ("tan", "\\tan "),
    ("sec", "\\sec "),
    ("csc", "\\csc "),
    ("cot", "\\cot "),
    ("arcsin", "\\arcsin "),
    ("arccos", "\\arccos "),
    ("sinh", "\\sinh "),
    ("cosh", "\\cosh "),
    ("tanh", "\\tanh "),
    ("log", "\\log "),
    ("ln", "\\ln "),
    ("exp", "\\exp "),
    ("lim", "\\lim "),
    ("sup", "\\sup "),
    ("inf", "\\inf "),
    ("min", "\\min "),
    ("max", "\\max "),
    ("det", "\\det "),
    ("dim", "\\dim "),
];

// The follower (whitespace, opening paren, or end of string) is captured and
// re-emitted so only the bare name is replaced.
static FUNCTION_PATTERNS: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    FUNCTION_NAMES
        .iter()
        .map(|(name, latex)| {
            let pattern = format!(r"\b{name}([\s(]|$)");
            let regex = Regex::new(&pattern).expect("failed to build function pattern");
            (regex, format!("{latex}${{1}}"))
        })
        .collect()
});

/// Replace word-boundary occurrences of known function names with their
/// LaTeX macros.
///
/// Text that already starts with a backslash is assumed to be converted and
/// is returned unchanged.
pub fn recognize(text: &str) -> String {
    if text.starts_with('\\') {
        return text.to_owned();
    }
    let mut out = text.to_owned();
    for (regex, replacement) in FUNCTION_PATTERNS.iter() {
        out = regex.replace_all(&out, replacement.as_str()).into_owned();
    }
    out
}

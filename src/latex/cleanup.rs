// Local cleanup pass
//
// Runs on a freshly assembled fragment. Fragments that already contain a
// compound structural command only get brace-safe fixes; everything else
// additionally loses redundant braces.

use memchr::memmem;
use once_cell::sync::Lazy;
use regex::Regex;

static SPACE_BEFORE_SUB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+_").expect("failed to build pattern"));
static SPACE_BEFORE_SUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+\^").expect("failed to build pattern"));
static PARTIAL_RUN_ON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\\partial)([a-zA-Z])").expect("failed to build pattern"));
static FRAC_BARE_ARG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\frac([a-zA-Z0-9])\{").expect("failed to build pattern"));
static DOUBLED_BRACES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("failed to build pattern"));

/// Commands whose presence restricts the pass to brace-safe fixes
const COMPOUND_COMMANDS: &[&str] = &["\\binom", "\\left", "\\right", "\\begin"];

pub(crate) fn has_compound_command(fragment: &str) -> bool {
    COMPOUND_COMMANDS
        .iter()
        .any(|cmd| memmem::find(fragment.as_bytes(), cmd.as_bytes()).is_some())
}

/// Normalize a freshly assembled fragment.
pub(crate) fn clean(fragment: &str) -> String {
    if has_compound_command(fragment) {
        return common_fixes(fragment);
    }
    let stripped = strip_single_char_braces(fragment);
    let collapsed = DOUBLED_BRACES.replace_all(&stripped, "{${1}}");
    common_fixes(&collapsed)
}

// Fixes that are safe regardless of fragment structure.
fn common_fixes(fragment: &str) -> String {
    let fragment = SPACE_BEFORE_SUB.replace_all(fragment, "_");
    let fragment = SPACE_BEFORE_SUP.replace_all(&fragment, "^");
    let fragment = PARTIAL_RUN_ON.replace_all(&fragment, "${1} ${2}");
    FRAC_BARE_ARG
        .replace_all(&fragment, "\\frac{${1}}{")
        .into_owned()
}

/// Remove braces around a single alphanumeric character unless the group is
/// a command argument: `x^{a}` -> `x^a`, but `\frac{1}{2}` is untouched.
fn strip_single_char_braces(fragment: &str) -> String {
    let bytes = fragment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'{'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_alphanumeric()
            && bytes[i + 2] == b'}'
            && !brace_is_protected(bytes, i)
        {
            out.push(bytes[i + 1]);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    // only ASCII brace pairs were removed, so the bytes stay valid UTF-8
    String::from_utf8(out).expect("brace stripping preserved UTF-8")
}

// A group is an argument when it directly follows a command name or another
// argument group (`\frac{1}{2}`, `\sqrt[3]{x}`).
fn brace_is_protected(bytes: &[u8], open: usize) -> bool {
    if open == 0 {
        return false;
    }
    match bytes[open - 1] {
        b'}' | b']' => true,
        c if c.is_ascii_alphabetic() => {
            let mut j = open - 1;
            while j > 0 && bytes[j - 1].is_ascii_alphabetic() {
                j -= 1;
            }
            j > 0 && bytes[j - 1] == b'\\'
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_before_scripts_is_removed() {
        assert_eq!(clean("x ^2"), "x^2");
        assert_eq!(clean("x  _n"), "x_n");
    }

    #[test]
    fn test_partial_derivative_spacing() {
        assert_eq!(clean("\\partialx"), "\\partial x");
    }

    #[test]
    fn test_frac_bare_argument_is_braced() {
        assert_eq!(
            clean("\\left(\\frac1{2}\\right)"),
            "\\left(\\frac{1}{2}\\right)"
        );
    }

    #[test]
    fn test_single_char_braces_are_stripped() {
        assert_eq!(clean("x^{a}"), "x^a");
        assert_eq!(clean("{y}"), "y");
    }

    #[test]
    fn test_command_arguments_keep_braces() {
        assert_eq!(clean("\\frac{1}{2}"), "\\frac{1}{2}");
        assert_eq!(clean("\\sqrt[3]{x}"), "\\sqrt[3]{x}");
        assert_eq!(clean("\\mathbb{R} "), "\\mathbb{R} ");
    }

    #[test]
    fn test_doubled_braces_collapse() {
        assert_eq!(clean("{{x+1}}"), "{x+1}");
    }

    #[test]
    fn test_compound_fragments_keep_braces() {
        assert_eq!(clean("\\left({a}\\right)"), "\\left({a}\\right)");
        assert_eq!(clean("\\binom{n}{k} ^2"), "\\binom{n}{k}^2");
    }
}

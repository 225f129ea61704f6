// Global post-processing pass
//
// Runs exactly once over the fully assembled expression. The rules repair
// cross-boundary artifacts that only exist after fragments from different
// subtrees have been concatenated, and their order is load-bearing: brace
// repair must precede the de-duplications, the de-duplications must precede
// the spacing fixes. Every rule is a fixed point on its own output.

use memchr::memmem;
use once_cell::sync::Lazy;
use regex::Regex;

static BINOM_BARE_ARGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\binom([a-zA-Z])([a-zA-Z])").expect("failed to build pattern"));
static PARTIAL_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\partial([a-zA-Z])").expect("failed to build pattern"));
static UPSILON_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\upsilon([a-zA-Z])").expect("failed to build pattern"));
static GAMMA_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\gamma([a-zA-Z])").expect("failed to build pattern"));
static RIGHTARROW_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\rightarrow([A-Z][a-z])").expect("failed to build pattern"));
static DOUBLED_LIM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\\lim[^}]*\})\s*\\lim\s").expect("failed to build pattern"));
static QUANTIFIER_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\\exists|\\forall)([a-zA-Z])").expect("failed to build pattern"));
static WRAPPED_BINOM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\left\(\\binom\{([^}]+)\}\{([^}]+)\}\\right\)").expect("failed to build pattern")
});
static CDOT_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\cdot([A-Za-z])").expect("failed to build pattern"));
static RELATION_DIGIT_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\\approx|\\equiv|\\sim)(\d)").expect("failed to build pattern"));

// Units the de-duplications look for.
static EXPONENTIAL_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"e\^\{[^}]+\}[a-z]+").expect("failed to build pattern"));
static PAREN_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\left\(([^)]+)\\right\)").expect("failed to build pattern"));

/// Apply the full ordered fix sequence to an assembled expression.
pub(crate) fn apply(latex: &str) -> String {
    let latex = BINOM_BARE_ARGS.replace_all(latex, "\\binom{${1}}{${2}}");
    let latex = dedupe_exponential(&latex);
    let latex = dedupe_parenthesized(&latex);
    let latex = PARTIAL_SPACE.replace_all(&latex, "\\partial ${1}");
    let latex = UPSILON_SPACE.replace_all(&latex, "\\upsilon ${1}");
    let latex = GAMMA_SPACE.replace_all(&latex, "\\gamma ${1}");
    let latex = RIGHTARROW_SPACE.replace_all(&latex, "\\rightarrow ${1}");
    let latex = latex.replace('⋅', "\\cdot");
    let latex = DOUBLED_LIM.replace_all(&latex, "${1} ");
    let latex = QUANTIFIER_SPACE.replace_all(&latex, "${1} ${2}");
    let latex = WRAPPED_BINOM.replace_all(&latex, "\\binom{${1}}{${2}}");
    let latex = CDOT_SPACE.replace_all(&latex, "\\cdot ${1}");
    RELATION_DIGIT_SPACE
        .replace_all(&latex, "${1} ${2}")
        .into_owned()
}

/// Drop the duplicate of an `e^{...}xy` sub-expression that was emitted
/// twice in sequence, keeping whatever sits between the two occurrences.
///
/// The trailing letter run shrinks from the longest candidate down, so the
/// longest repeated unit wins.
fn dedupe_exponential(latex: &str) -> String {
    let mut out = latex.to_owned();
    let mut from = 0;
    while let Some((start, end)) = find_at(&EXPONENTIAL_UNIT, &out, from) {
        let Some(brace_end) = memmem::find(out[start..end].as_bytes(), b"}") else {
            break;
        };
        let letters = end - (start + brace_end + 1);
        let mut removed = false;
        for take in (1..=letters).rev() {
            let unit_end = start + brace_end + 1 + take;
            let unit = out[start..unit_end].to_owned();
            if let Some(found) = memmem::find(out[unit_end..].as_bytes(), unit.as_bytes()) {
                let dup_start = unit_end + found;
                out.replace_range(dup_start..dup_start + unit.len(), "");
                from = dup_start;
                removed = true;
                break;
            }
        }
        if !removed {
            from = end;
        }
    }
    out
}

/// Drop the trailing repetition in `word\left(...\right)word`.
///
/// The repeated word is the longest suffix of the letter run before the
/// group that the text after the group starts with.
fn dedupe_parenthesized(latex: &str) -> String {
    let mut out = latex.to_owned();
    let mut from = 0;
    while let Some((start, end)) = find_at(&PAREN_GROUP, &out, from) {
        let bytes = out.as_bytes();
        let mut word_start = start;
        while word_start > 0 && bytes[word_start - 1].is_ascii_alphabetic() {
            word_start -= 1;
        }
        let word = out[word_start..start].to_owned();
        for take in (1..=word.len()).rev() {
            let suffix = &word[word.len() - take..];
            if out[end..].starts_with(suffix) {
                out.replace_range(end..end + take, "");
                break;
            }
        }
        from = end;
    }
    out
}

fn find_at(regex: &Regex, haystack: &str, from: usize) -> Option<(usize, usize)> {
    regex
        .find_at(haystack, from)
        .map(|m| (m.start(), m.end()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_binom_bare_arguments() {
        assert_eq!(apply("\\binomnk"), "\\binom{n}{k}");
    }

    #[test]
    fn test_wrapped_binom_is_unwrapped() {
        assert_eq!(
            apply("\\left(\\binom{n}{k}\\right)"),
            "\\binom{n}{k}"
        );
    }

    #[test]
    fn test_exponential_duplicate_is_dropped() {
        assert_eq!(apply("e^{2x}ab + e^{2x}ab"), "e^{2x}ab + ");
    }

    #[test]
    fn test_parenthesized_duplicate_is_dropped() {
        assert_eq!(
            apply("f\\left(x+1\\right)f"),
            "f\\left(x+1\\right)"
        );
    }

    #[test]
    fn test_spacing_fixes() {
        assert_eq!(apply("\\partialx"), "\\partial x");
        assert_eq!(apply("\\cdotv"), "\\cdot v");
        assert_eq!(apply("\\forallx"), "\\forall x");
        assert_eq!(apply("\\rightarrowAb"), "\\rightarrow Ab");
        assert_eq!(apply("\\approx3"), "\\approx 3");
    }

    #[test]
    fn test_dot_operator_is_normalized() {
        assert_eq!(apply("a⋅b"), "a\\cdot b");
    }

    #[test]
    fn test_doubled_lim_collapses() {
        assert_eq!(
            apply("\\lim_{x \\rightarrow 0} \\lim f(x)"),
            "\\lim_{x \\rightarrow 0} f(x)"
        );
    }

    // Applying the pass to its own output must change nothing.
    #[test]
    fn test_idempotence_per_rule() {
        let cases = [
            "\\binomnk",
            "\\left(\\binom{n}{k}\\right)",
            "e^{2x}ab + e^{2x}ab",
            "f\\left(x+1\\right)f",
            "\\partialx",
            "\\upsilont",
            "\\gammaz",
            "\\rightarrowAb",
            "a⋅b",
            "\\lim_{x \\rightarrow 0} \\lim f(x)",
            "\\existsn",
            "\\cdotv",
            "\\equiv7",
            "\\int_{0}^{1} x^2 \\, dx",
        ];
        for case in cases {
            let once = apply(case);
            let twice = apply(&once);
            assert_eq!(once, twice, "not a fixed point for {case}");
        }
    }
}

// Embedding converted fragments
//
// Downstream consumers splice fragments back into running text or collect
// them into a reviewable standalone document; both forms live here so the
// conversion core stays a pure string producer.

/// Fragments shorter than this are embedded inline.
const INLINE_LIMIT: usize = 30;

/// Wrap a fragment in math delimiters, inline (`\(...\)`) for short
/// fragments and display (`\[...\]`) otherwise.
pub fn delimited(latex: &str) -> String {
    if latex.chars().count() < INLINE_LIMIT {
        format!("\\({latex}\\)")
    } else {
        format!("\\[{latex}\\]")
    }
}

/// Render fragments into a standalone article with the AMS math packages,
/// one numbered `equation` environment per fragment.
pub fn standalone<S: AsRef<str>>(fragments: &[S]) -> String {
    let mut out = String::from(
        "\\documentclass{article}\n\
         \\usepackage{amsmath}\n\
         \\usepackage{amssymb}\n\
         \\usepackage{amsfonts}\n\
         \\begin{document}\n\n",
    );
    for (index, fragment) in fragments.iter().enumerate() {
        out.push_str(&format!(
            "% Equation {}\n\\begin{{equation}}\n  {}\n\\end{{equation}}\n\n",
            index + 1,
            fragment.as_ref()
        ));
    }
    out.push_str("\\end{document}\n");
    out
}

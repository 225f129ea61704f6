// Parameterized LaTeX command formatting

use phf::phf_map;

/// How a registered LaTeX command is formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Number of braced parameters
    pub params: usize,
    /// Whether the formatted command carries a trailing space
    pub needs_space: bool,
}

const fn desc(params: usize, needs_space: bool) -> CommandDescriptor {
    CommandDescriptor {
        params,
        needs_space,
    }
}

/// Registry of formattable commands. Read-only; no entry is ever added or
/// removed at run time.
static COMMANDS: phf::Map<&'static str, CommandDescriptor> = phf_map! {
    "sqrt" => desc(1, false),
    "mathbb" => desc(1, true),
    "frac" => desc(2, false),
    "binom" => desc(2, false),
    "neq" => desc(0, true),
    "alpha" => desc(0, true),

    // accents
    "hat" => desc(1, false),
    "tilde" => desc(1, false),
    "bar" => desc(1, false),
    "dot" => desc(1, false),
    "ddot" => desc(1, false),
    "vec" => desc(1, false),
};

/// Format `\name{arg1}{arg2}...` for a registered command.
///
/// An unregistered name degrades to a bare `\name` with no arguments; extra
/// arguments beyond the registered parameter count are ignored.
pub fn format(name: &str, args: &[&str]) -> String {
    let Some(desc) = COMMANDS.get(name) else {
        return format!("\\{name}");
    };

    let mut out = String::with_capacity(
        2 + name.len() + args.iter().map(|a| a.len() + 2).sum::<usize>(),
    );
    out.push('\\');
    out.push_str(name);
    for arg in args.iter().take(desc.params) {
        out.push('{');
        out.push_str(arg);
        out.push('}');
    }
    if desc.needs_space {
        out.push(' ');
    }
    out
}

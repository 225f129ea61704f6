// LaTeX conversion
//
// Converts an OMML expression tree to LaTeX text. The dispatcher walks the
// tree depth-first; structural converters combine their children's
// fragments; a local cleanup pass normalizes fragments as they are
// assembled and one global pass repairs cross-boundary artifacts on the
// finished expression.

mod cleanup;
mod commands;
mod conv;
mod functions;
mod postprocess;
mod symbols;
mod textrun;

pub use conv::to_latex;

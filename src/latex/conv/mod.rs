// Conversion logic
//
// The dispatcher and the per-kind structural converters, split from the
// delimiter/matrix handling for readability.

pub(crate) mod matrix;
pub(crate) mod node;

pub use node::to_latex;

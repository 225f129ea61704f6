// Expression tree for OMML math
//
// The tree is the converter's only input: a parsing collaborator builds it
// from document XML, the converter walks it read-only and returns LaTeX
// fragments. Kinds the converter has no dedicated handler for degrade to
// child concatenation rather than failing.

mod node;
pub mod builder;

pub use node::{MathNode, NodeAttrs, NodeKind};

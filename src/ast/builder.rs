// Convenience constructors for expression trees
//
// The producing parser (and the tests) assemble trees through these helpers
// instead of spelling out container nodes by hand.

use super::node::{MathNode, NodeAttrs, NodeKind};

fn with_children(kind: NodeKind, children: Vec<MathNode>) -> MathNode {
    let mut node = MathNode::new(kind);
    for child in children {
        node.push(child);
    }
    node
}

/// Create a text run leaf
pub fn run(text: impl Into<String>) -> MathNode {
    let mut node = MathNode::new(NodeKind::Run);
    node.set_text(text);
    node
}

/// Create a double-struck (blackboard bold) text run
pub fn double_struck(text: impl Into<String>) -> MathNode {
    let mut node = MathNode::with_attrs(
        NodeKind::Run,
        NodeAttrs {
            double_struck: true,
            ..NodeAttrs::default()
        },
    );
    node.set_text(text);
    node
}

/// Create a generic element container (m:e)
pub fn element(children: Vec<MathNode>) -> MathNode {
    with_children(NodeKind::Element, children)
}

/// Create a top-level expression (m:oMath)
pub fn math(children: Vec<MathNode>) -> MathNode {
    with_children(NodeKind::Math, children)
}

/// Create a fraction with numerator and denominator content
pub fn fraction(numerator: Vec<MathNode>, denominator: Vec<MathNode>) -> MathNode {
    with_children(
        NodeKind::Fraction,
        vec![
            with_children(NodeKind::Numerator, numerator),
            with_children(NodeKind::Denominator, denominator),
        ],
    )
}

/// Create a superscript structure
pub fn superscript(base: Vec<MathNode>, sup: Vec<MathNode>) -> MathNode {
    with_children(
        NodeKind::SupScript,
        vec![element(base), with_children(NodeKind::Sup, sup)],
    )
}

/// Create a subscript structure
pub fn subscript(base: Vec<MathNode>, sub: Vec<MathNode>) -> MathNode {
    with_children(
        NodeKind::SubScript,
        vec![element(base), with_children(NodeKind::Sub, sub)],
    )
}

/// Create a combined sub- and superscript structure
pub fn sub_sup(base: Vec<MathNode>, sub: Vec<MathNode>, sup: Vec<MathNode>) -> MathNode {
    with_children(
        NodeKind::SubSupScript,
        vec![
            element(base),
            with_children(NodeKind::Sub, sub),
            with_children(NodeKind::Sup, sup),
        ],
    )
}

/// Create an n-ary operator node; `operator` of `None` leaves the default
/// (integral) to the converter
pub fn nary(
    operator: Option<&str>,
    lower: Option<Vec<MathNode>>,
    upper: Option<Vec<MathNode>>,
    operand: Option<Vec<MathNode>>,
) -> MathNode {
    let mut node = MathNode::with_attrs(
        NodeKind::Nary,
        NodeAttrs {
            operator: operator.map(str::to_owned),
            ..NodeAttrs::default()
        },
    );
    if let Some(lower) = lower {
        node.push(with_children(NodeKind::Sub, lower));
    }
    if let Some(upper) = upper {
        node.push(with_children(NodeKind::Sup, upper));
    }
    if let Some(operand) = operand {
        node.push(element(operand));
    }
    node
}

/// Create a square root (radical with a hidden degree)
pub fn sqrt(operand: Vec<MathNode>) -> MathNode {
    let mut node = MathNode::with_attrs(
        NodeKind::Radical,
        NodeAttrs {
            degree_hidden: true,
            ..NodeAttrs::default()
        },
    );
    node.push(element(operand));
    node
}

/// Create a radical with an explicit degree
pub fn radical(degree: Vec<MathNode>, operand: Vec<MathNode>) -> MathNode {
    with_children(
        NodeKind::Radical,
        vec![with_children(NodeKind::Degree, degree), element(operand)],
    )
}

/// Create a delimiter group around the given content
pub fn delimiter(open: &str, close: &str, content: Vec<MathNode>) -> MathNode {
    let mut node = MathNode::with_attrs(
        NodeKind::DelimiterGroup,
        NodeAttrs {
            open: Some(open.to_owned()),
            close: Some(close.to_owned()),
            ..NodeAttrs::default()
        },
    );
    node.push(element(content));
    node
}

/// Create a matrix row from cell contents
pub fn matrix_row(cells: Vec<Vec<MathNode>>) -> MathNode {
    with_children(NodeKind::MatrixRow, cells.into_iter().map(element).collect())
}

/// Create a matrix from rows of cell contents
pub fn matrix(rows: Vec<Vec<Vec<MathNode>>>) -> MathNode {
    with_children(NodeKind::Matrix, rows.into_iter().map(matrix_row).collect())
}

/// Create an equation array from row contents
pub fn eq_array(rows: Vec<Vec<MathNode>>) -> MathNode {
    with_children(NodeKind::EqArray, rows.into_iter().map(element).collect())
}

/// Create an accent node; `accent` of `None` falls back to a hat
pub fn accent(accent: Option<&str>, base: Vec<MathNode>) -> MathNode {
    let mut node = MathNode::with_attrs(
        NodeKind::Accent,
        NodeAttrs {
            accent: accent.map(str::to_owned),
            ..NodeAttrs::default()
        },
    );
    node.push(element(base));
    node
}

/// Create a function application
pub fn function(name: Vec<MathNode>, argument: Vec<MathNode>) -> MathNode {
    with_children(
        NodeKind::Function,
        vec![
            with_children(NodeKind::FunctionName, name),
            element(argument),
        ],
    )
}

/// Create an operator with a lower limit (e.g. `lim` with its approach)
pub fn limit_lower(base: Vec<MathNode>, limit: Vec<MathNode>) -> MathNode {
    with_children(
        NodeKind::LimitLower,
        vec![element(base), with_children(NodeKind::Limit, limit)],
    )
}

/// Create an operator with an upper limit
pub fn limit_upper(base: Vec<MathNode>, limit: Vec<MathNode>) -> MathNode {
    with_children(
        NodeKind::LimitUpper,
        vec![element(base), with_children(NodeKind::Limit, limit)],
    )
}

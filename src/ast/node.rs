// Math node definitions

/// Kind tag for a node in the OMML expression tree.
///
/// The set mirrors the OMML element vocabulary the converter dispatches on.
/// Kinds without a dedicated converter (and `Unknown`) take the default
/// dispatch arm: their converted children are concatenated in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Top-level expression (m:oMath)
    Math,
    /// Paragraph of expressions (m:oMathPara)
    Para,
    /// Text run leaf (m:r)
    Run,

    /// Fraction (m:f)
    Fraction,
    /// Numerator container (m:num)
    Numerator,
    /// Denominator container (m:den)
    Denominator,

    /// Superscript structure (m:sSup)
    SupScript,
    /// Subscript structure (m:sSub)
    SubScript,
    /// Combined sub- and superscript structure (m:sSubSup)
    SubSupScript,
    /// Upper operand container (m:sup)
    Sup,
    /// Lower operand container (m:sub)
    Sub,

    /// N-ary operator: sum, product, integral (m:nary)
    Nary,
    /// Radical (m:rad)
    Radical,
    /// Radical degree container (m:deg)
    Degree,

    /// Delimiter group (m:d)
    DelimiterGroup,
    /// Matrix (m:m)
    Matrix,
    /// Matrix row (m:mr)
    MatrixRow,
    /// Equation array (m:eqArr)
    EqArray,

    /// Function application (m:func)
    Function,
    /// Function name container (m:fName)
    FunctionName,
    /// Operator with lower limit (m:limLow)
    LimitLower,
    /// Operator with upper limit (m:limUpp)
    LimitUpper,
    /// Limit operand container (m:lim)
    Limit,

    /// Accent over a base (m:acc)
    Accent,

    /// Generic element container (m:e); also serves as a matrix cell
    Element,

    // Recognized but converted through the default arm.
    Phantom,
    Bar,
    BorderBox,
    GroupChar,

    /// Anything the producing parser did not recognize
    Unknown,
}

/// Named attributes a node may carry.
///
/// Only the attributes the converter reads are modeled; everything else the
/// producing parser encounters is dropped before the tree reaches the core.
/// `open`/`close` distinguish an absent delimiter character (`None`, the
/// default applies) from a present-but-empty one (`Some("")`), which the
/// piecewise detection relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeAttrs {
    /// N-ary operator character (m:chr)
    pub operator: Option<String>,
    /// Opening delimiter character (m:begChr)
    pub open: Option<String>,
    /// Closing delimiter character (m:endChr)
    pub close: Option<String>,
    /// Accent character (m:chr under m:accPr)
    pub accent: Option<String>,
    /// Radical degree suppressed (m:degHide)
    pub degree_hidden: bool,
    /// Run uses the double-struck (blackboard bold) script (m:scr)
    pub double_struck: bool,
}

/// A node in the OMML expression tree.
///
/// Nodes are produced by an external parsing collaborator and consumed
/// read-only by the converter; children are owned by their parent and the
/// tree is never mutated during conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct MathNode {
    kind: NodeKind,
    attrs: NodeAttrs,
    children: Vec<MathNode>,
    text: Option<String>,
}

impl MathNode {
    /// Create an empty node of the given kind
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: NodeAttrs::default(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Create a node with attributes
    pub fn with_attrs(kind: NodeKind, attrs: NodeAttrs) -> Self {
        Self {
            kind,
            attrs,
            children: Vec::new(),
            text: None,
        }
    }

    /// Node kind tag
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Node attributes
    #[inline]
    pub fn attrs(&self) -> &NodeAttrs {
        &self.attrs
    }

    /// Ordered child nodes
    #[inline]
    pub fn children(&self) -> &[MathNode] {
        &self.children
    }

    /// Literal text of a run leaf
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Set the literal text (run leaves)
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Append a child node
    pub fn push(&mut self, child: MathNode) {
        self.children.push(child);
    }

    /// First direct child of the given kind
    pub fn child_of_kind(&self, kind: NodeKind) -> Option<&MathNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Direct children of the given kind, in order
    pub fn children_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &MathNode> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// Whether any descendant (not the node itself) has the given kind
    pub fn contains_kind(&self, kind: NodeKind) -> bool {
        self.children
            .iter()
            .any(|c| c.kind == kind || c.contains_kind(kind))
    }
}

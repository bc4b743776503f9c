//! Node and edge types of the tree model.
//!
//! A [Node] owns the [Edge] leading to it from its parent. Parent and child
//! links are plain [NodeIndex] values into the owning
//! [Tree](crate::model::Tree) arena and are only rewired by the tree itself.

use crate::model::tree::NodeIndex;

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// A node of a rooted, labeled, multifurcating tree.
///
/// # Invariants
/// - `index` is the position of this node in the tree arena
/// - `parent` is `None` exactly for the root (and for nodes under construction)
/// - every index in `children` refers to a node whose `parent` is this node
/// - an empty `label` means "unlabeled"
#[derive(PartialEq, Debug, Clone)]
pub struct Node {
    /// Index of this node in the tree arena
    index: NodeIndex,
    /// Label; empty if unlabeled
    label: String,
    /// Ordered children
    children: Vec<NodeIndex>,
    /// Parent back-reference, `None` for the root
    parent: Option<NodeIndex>,
    /// Edge leading to this node from its parent (the root may carry a length too)
    edge: Edge,
}

impl Node {
    /// Creates a detached node without children.
    pub(crate) fn new(index: NodeIndex, label: String, edge: Edge) -> Self {
        Node {
            index,
            label,
            children: Vec::new(),
            parent: None,
            edge,
        }
    }

    /// Returns the index of this node.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the label of this node (empty if unlabeled).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` if this node carries a non-empty label.
    pub fn has_label(&self) -> bool {
        !self.label.is_empty()
    }

    /// Replaces the label of this node. An empty string removes it.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Returns the children of this node in order.
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Returns the number of children.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Returns `true` if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the edge leading to this node.
    pub fn edge(&self) -> &Edge {
        &self.edge
    }

    /// Returns the edge leading to this node, mutably.
    ///
    /// Only the length can be changed through an edge; topology cannot.
    pub fn edge_mut(&mut self) -> &mut Edge {
        &mut self.edge
    }

    // --- Link maintenance, reserved to the tree and the splicer ---

    pub(crate) fn set_parent(&mut self, parent: Option<NodeIndex>) {
        self.parent = parent;
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<NodeIndex> {
        &mut self.children
    }

    pub(crate) fn take_children(&mut self) -> Vec<NodeIndex> {
        std::mem::take(&mut self.children)
    }
}

// =#========================================================================#=
// EDGE
// =#========================================================================#=
/// Edge from a node to its parent, holding the branch length.
///
/// The length is kept both as text (as read, or as last formatted) and as a
/// number. The writer only looks at the text; computations only look at the
/// number. An edge without a length has empty text and no number.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Edge {
    length: Option<f64>,
    length_text: String,
}

impl Edge {
    /// Creates an edge without a length.
    pub fn without_length() -> Self {
        Edge::default()
    }

    /// Creates an edge from the length text found in the input.
    ///
    /// The caller has validated `text`; an empty or unparsable text yields no
    /// numeric length.
    pub fn from_text(text: impl Into<String>) -> Self {
        let length_text = text.into();
        let length = length_text.parse::<f64>().ok();
        Edge { length, length_text }
    }

    /// Creates an edge from a numeric length, formatting its text.
    pub fn from_length(length: f64) -> Self {
        Edge {
            length: Some(length),
            length_text: format_length(length),
        }
    }

    /// Returns the numeric length, if any.
    pub fn length(&self) -> Option<f64> {
        self.length
    }

    /// Returns the numeric length, counting a missing length as zero.
    pub fn length_or_zero(&self) -> f64 {
        self.length.unwrap_or(0.0)
    }

    /// Returns the length as text; empty if there is none.
    pub fn length_text(&self) -> &str {
        &self.length_text
    }

    /// Returns `true` if this edge has a length.
    pub fn has_length(&self) -> bool {
        !self.length_text.is_empty()
    }

    /// Sets the length, reformatting its text.
    pub fn set_length(&mut self, length: f64) {
        self.length = Some(length);
        self.length_text = format_length(length);
    }

    /// Removes the length.
    pub fn clear_length(&mut self) {
        self.length = None;
        self.length_text.clear();
    }

    /// Returns the edge obtained by concatenating `self` and `other`.
    ///
    /// If one of the two has no length, the other is kept verbatim (text
    /// included). Otherwise the lengths are added.
    pub fn joined_with(&self, other: &Edge) -> Edge {
        match (self.has_length(), other.has_length()) {
            (false, false) => Edge::without_length(),
            (true, false) => self.clone(),
            (false, true) => other.clone(),
            (true, true) => Edge::from_length(self.length_or_zero() + other.length_or_zero()),
        }
    }
}

/// Formats a branch length with six significant digits, dropping trailing
/// zeros, and switching to exponent notation for very large or small values
/// (the `%g` convention of tree tools).
///
/// # Examples
/// ```
/// # use nwkit::model::node::format_length;
/// assert_eq!(format_length(0.5), "0.5");
/// assert_eq!(format_length(3.0), "3");
/// assert_eq!(format_length(0.1 + 0.2), "0.3");
/// assert_eq!(format_length(1234567.0), "1.23457e+06");
/// assert_eq!(format_length(0.00001), "1e-05");
/// ```
pub fn format_length(length: f64) -> String {
    const SIGNIFICANT_DIGITS: i32 = 6;

    if length == 0.0 {
        return "0".to_string();
    }
    if !length.is_finite() {
        return length.to_string();
    }

    // Exponent after rounding to the significant digits
    let scientific = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, length);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let mantissa = trim_fraction_zeros(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exponent).max(0) as usize;
        trim_fraction_zeros(&format!("{:.*}", decimals, length)).to_string()
    }
}

fn trim_fraction_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_length_rounding_carries_into_exponent() {
        assert_eq!(format_length(999999.5), "1e+06");
        assert_eq!(format_length(-2.5), "-2.5");
        assert_eq!(format_length(100.0), "100");
        assert_eq!(format_length(0.0001), "0.0001");
    }

    #[test]
    fn test_joined_edges() {
        let a = Edge::from_text("1.5");
        let b = Edge::from_text("2");
        assert_eq!(a.joined_with(&b).length_text(), "3.5");

        let none = Edge::without_length();
        assert_eq!(a.joined_with(&none).length_text(), "1.5");
        assert_eq!(none.joined_with(&Edge::from_text("1e-3")).length_text(), "1e-3");
        assert!(!none.joined_with(&none).has_length());
    }
}

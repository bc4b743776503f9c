//! Newick rendering of trees.

use crate::model::{Node, NodeIndex, Tree};
use crate::parser::utils::escape_label;
use std::io::{self, Write};

/// Estimated characters per node: label, brackets, comma, short length
const CHARS_PER_NODE: usize = 12;

/// Returns the Newick representation of a tree with closing semicolon.
///
/// Children are written in list order, each node as
/// `(children)label:length`. Labels are escaped where needed and branch
/// lengths are written as text exactly as stored.
///
/// Returns `";"` for a tree without root.
///
/// # Example
/// ```
/// use nwkit::model::{Edge, Tree};
/// use nwkit::newick::to_newick;
///
/// let mut tree = Tree::new();
/// let a = tree.add_leaf("Homo sapiens", Edge::from_text("1.0"));
/// let b = tree.add_leaf("B", Edge::from_text("2"));
/// tree.add_root(vec![a, b], "Hominini", Edge::without_length());
///
/// assert_eq!(to_newick(&tree), "('Homo sapiens':1.0,B:2)Hominini;");
/// ```
pub fn to_newick(tree: &Tree) -> String {
    let mut newick = String::with_capacity(tree.num_nodes() * CHARS_PER_NODE);
    if tree.is_root_set() && tree.contains(tree.root_index()) {
        build_newick(tree, &mut newick, tree.root_index());
    }
    newick.push(';');
    newick
}

/// Returns the Newick representation of the subtree below `index`
/// (including the edge above it), without semicolon.
///
/// # Panics
/// Panics if `index` is not a live node of `tree`.
pub fn subtree_to_newick(tree: &Tree, index: NodeIndex) -> String {
    let mut newick = String::new();
    build_newick(tree, &mut newick, index);
    newick
}

/// Writes each tree as Newick on its own line.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_newick<'a, W, I>(writer: &mut W, trees: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Tree>,
{
    for tree in trees {
        writeln!(writer, "{}", to_newick(tree))?;
    }
    writer.flush()
}

// Recursive helper for building the Newick string
fn build_newick(tree: &Tree, newick: &mut String, index: NodeIndex) {
    write_node(newick, &tree[index], |out, child| build_newick(tree, out, child));
}

/// Writes `node` as `(children)label:length`, leaving each child to
/// `write_child`.
pub(crate) fn write_node<F>(newick: &mut String, node: &Node, mut write_child: F)
where
    F: FnMut(&mut String, NodeIndex),
{
    if !node.is_leaf() {
        newick.push('(');
        for (i, &child) in node.children().iter().enumerate() {
            if i > 0 {
                newick.push(',');
            }
            write_child(newick, child);
        }
        newick.push(')');
    }

    newick.push_str(&escape_label(node.label()));

    let edge = node.edge();
    if edge.has_length() {
        newick.push(':');
        newick.push_str(edge.length_text());
    }
}

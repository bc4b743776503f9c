//! Tree statistics.

use crate::model::Tree;
use std::fmt;

/// Kind of tree, judged by which non-root nodes carry a branch length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeType {
    /// No branch lengths
    Cladogram,
    /// Branch lengths on all edges
    Phylogram,
    /// Branch lengths on some edges only
    Neither,
}

impl fmt::Display for TreeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TreeType::Cladogram => "Cladogram",
            TreeType::Phylogram => "Phylogram",
            TreeType::Neither => "Neither",
        };
        f.write_str(name)
    }
}

/// Statistics of a single tree.
///
/// # Example
/// ```
/// use nwkit::newick::parse_str;
/// use nwkit::ops::stats::{TreeProperties, TreeType};
///
/// let tree = parse_str("((A:1,B:1):1,C:2,D:1);").unwrap();
/// let props = TreeProperties::of(&tree);
/// assert_eq!(props.tree_type, TreeType::Phylogram);
/// assert_eq!(props.num_nodes, 6);
/// assert_eq!(props.num_leaves, 4);
/// assert_eq!(props.num_dichotomies, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeProperties {
    pub tree_type: TreeType,
    pub num_nodes: usize,
    pub num_leaves: usize,
    /// Nodes with exactly two children
    pub num_dichotomies: usize,
}

impl TreeProperties {
    /// Computes the statistics of `tree`.
    pub fn of(tree: &Tree) -> Self {
        let mut with_length = 0;
        let mut without_length = 0;
        let mut num_leaves = 0;
        let mut num_dichotomies = 0;

        for node in tree.post_order_iter() {
            if node.is_leaf() {
                num_leaves += 1;
            }
            if node.num_children() == 2 {
                num_dichotomies += 1;
            }
            if node.is_root() {
                continue;
            }
            if node.edge().has_length() {
                with_length += 1;
            } else {
                without_length += 1;
            }
        }

        let tree_type = match (with_length, without_length) {
            (0, _) => TreeType::Cladogram,
            (_, 0) => TreeType::Phylogram,
            _ => TreeType::Neither,
        };

        TreeProperties {
            tree_type,
            num_nodes: tree.num_nodes(),
            num_leaves,
            num_dichotomies,
        }
    }
}

/// Output layout of [TreeProperties].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsFormat {
    /// One tab-separated line per tree
    Line,
    /// One `name:<TAB>value` line per statistic
    #[default]
    Column,
}

impl StatsFormat {
    /// Returns the header line preceding all trees, if the format has one.
    pub fn header(&self) -> Option<&'static str> {
        match self {
            StatsFormat::Line => Some("#type\t#nodes\t#leaves\t#dichotomies"),
            StatsFormat::Column => None,
        }
    }

    /// Renders the statistics of one tree, without trailing newline.
    ///
    /// # Example
    /// ```
    /// use nwkit::newick::parse_str;
    /// use nwkit::ops::stats::{StatsFormat, TreeProperties};
    ///
    /// let props = TreeProperties::of(&parse_str("(A,B);").unwrap());
    /// assert_eq!(StatsFormat::Line.render(&props), "Cladogram\t3\t2\t1");
    /// assert_eq!(
    ///     StatsFormat::Column.render(&props),
    ///     "Type:\tCladogram\n#nodes:\t3\n#leaves:\t2\n#dichotomies:\t1"
    /// );
    /// ```
    pub fn render(&self, props: &TreeProperties) -> String {
        match self {
            StatsFormat::Line => format!(
                "{}\t{}\t{}\t{}",
                props.tree_type, props.num_nodes, props.num_leaves, props.num_dichotomies
            ),
            StatsFormat::Column => format!(
                "Type:\t{}\n#nodes:\t{}\n#leaves:\t{}\n#dichotomies:\t{}",
                props.tree_type, props.num_nodes, props.num_leaves, props.num_dichotomies
            ),
        }
    }
}

use nwkit::newick::{parse_file, parse_str};
use nwkit::ops::{StatsFormat, TreeProperties, TreeType};

const CATARRHINI: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catarrhini.nw");

fn properties(newick: &str) -> TreeProperties {
    TreeProperties::of(&parse_str(newick).unwrap())
}

#[test]
fn test_catarrhini() {
    let tree = parse_file(CATARRHINI).unwrap().remove(0);
    let props = TreeProperties::of(&tree);
    assert_eq!(
        props,
        TreeProperties {
            tree_type: TreeType::Phylogram,
            num_nodes: 19,
            num_leaves: 10,
            num_dichotomies: 9,
        }
    );
}

#[test]
fn test_tree_types() {
    assert_eq!(properties("((A,B),C);").tree_type, TreeType::Cladogram);
    assert_eq!(properties("((A:1,B:1):2,C:2);").tree_type, TreeType::Phylogram);
    assert_eq!(properties("((A:1,B),C:2);").tree_type, TreeType::Neither);
    // The root's own edge does not count
    assert_eq!(properties("((A,B),C):5;").tree_type, TreeType::Cladogram);
}

#[test]
fn test_dichotomies() {
    assert_eq!(properties("(A,B,C,(D,E));").num_dichotomies, 1);
    assert_eq!(properties("((A)B,C);").num_dichotomies, 1);
    assert_eq!(properties("((A,B),(C,D));").num_dichotomies, 3);
}

#[test]
fn test_single_node() {
    let props = properties("A;");
    assert_eq!(props.tree_type, TreeType::Cladogram);
    assert_eq!(props.num_nodes, 1);
    assert_eq!(props.num_leaves, 1);
    assert_eq!(props.num_dichotomies, 0);
}

#[test]
fn test_formats() {
    let props = properties("((A:1,B),C:2);");
    assert_eq!(StatsFormat::Line.render(&props), "Neither\t5\t3\t2");
    assert_eq!(
        StatsFormat::Line.header(),
        Some("#type\t#nodes\t#leaves\t#dichotomies")
    );
    assert_eq!(StatsFormat::Column.header(), None);
    assert_eq!(
        StatsFormat::default().render(&props),
        "Type:\tNeither\n#nodes:\t5\n#leaves:\t3\n#dichotomies:\t2"
    );
}

#[test]
fn test_tree_type_display() {
    assert_eq!(TreeType::Phylogram.to_string(), "Phylogram");
    assert_eq!(TreeType::Neither.to_string(), "Neither");
}

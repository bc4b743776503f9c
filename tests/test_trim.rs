use nwkit::Tree;
use nwkit::newick::{parse_file, parse_str, to_newick};
use nwkit::ops::{DepthMode, Trimmer};

const CATARRHINI: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catarrhini.nw");

fn catarrhini() -> Tree {
    parse_file(CATARRHINI).unwrap().remove(0)
}

fn trimmed(trimmer: Trimmer, newick: &str) -> String {
    let mut tree = parse_str(newick).unwrap();
    trimmer.trim(&mut tree).unwrap();
    assert!(tree.is_valid());
    to_newick(&tree)
}

#[test]
fn test_trim_by_distance() {
    let mut tree = catarrhini();
    let report = Trimmer::new(20.0).trim(&mut tree).unwrap();

    assert_eq!(
        to_newick(&tree),
        "((Hominidae:10,Hylobates:10):10,(Cercopithecinae:10,(Simias:5,Colobus:5)Colobinae:5)Cercopithecidae:10);"
    );
    assert_eq!(report.trimmed.len(), 5);
    assert_eq!(report.num_discarded, 10);
    assert!(tree.is_valid());
    assert_eq!(tree.num_nodes(), 9);
}

#[test]
fn test_no_leaf_deeper_than_threshold() {
    let mut tree = catarrhini();
    Trimmer::new(33.3).trim(&mut tree).unwrap();
    for node in tree.nodes() {
        let distance = tree.distance_from_root(node.index()).unwrap();
        assert!(distance <= 33.3 + 1e-9, "{} at {distance}", node.label());
    }
}

#[test]
fn test_trim_by_ancestors() {
    let mut tree = catarrhini();
    let report = Trimmer::new(3.0)
        .with_mode(DepthMode::Ancestors)
        .trim(&mut tree)
        .unwrap();

    // Nodes with four ancestors become leaves, lengths stay as they are
    assert_eq!(
        to_newick(&tree),
        "((((Gorilla:16,Hominini:10)Homininae:15,Pongo:30)Hominidae:15,Hylobates:20):10,\
         (((Macaca:10,Papio:10):20,Cercopithecus:10)Cercopithecinae:25,(Simias:10,Colobus:7)Colobinae:5)Cercopithecidae:10);"
    );
    let labels: Vec<_> = report.trimmed.iter().map(|&i| tree[i].label()).collect();
    assert_eq!(labels, ["Gorilla", "Hominini", "Macaca", "Papio"]);
    assert_eq!(report.num_discarded, 2);
}

#[test]
fn test_node_at_threshold_is_kept() {
    assert_eq!(trimmed(Trimmer::new(1.0), "(A:1,B:2);"), "(A:1,B:1);");
    assert_eq!(
        trimmed(Trimmer::new(1.0).with_mode(DepthMode::Ancestors), "(((A,B)Y)X,C);"),
        "((Y)X,C);"
    );
}

#[test]
fn test_missing_lengths_count_as_zero() {
    assert_eq!(trimmed(Trimmer::new(0.5), "((A,B)X:1,C);"), "(X:0.5,C);");
    assert_eq!(trimmed(Trimmer::new(0.5), "((A,B)X,C);"), "((A,B)X,C);");
}

#[test]
fn test_shortened_lengths_are_formatted() {
    assert_eq!(trimmed(Trimmer::new(0.2), "(A:0.3,B:0.1);"), "(A:0.2,B:0.1);");
}

#[test]
fn test_shallow_tree_is_unchanged() {
    let mut tree = catarrhini();
    let before = to_newick(&tree);
    let report = Trimmer::new(100.0).trim(&mut tree).unwrap();
    assert!(report.trimmed.is_empty());
    assert_eq!(to_newick(&tree), before);
}

#[test]
fn test_trimming_twice() {
    let mut tree = parse_str("((A:1,B:3)X:2,C:1);").unwrap();
    Trimmer::new(2.5).trim(&mut tree).unwrap();
    assert_eq!(to_newick(&tree), "((A:0.5,B:0.5)X:2,C:1);");

    let report = Trimmer::new(2.5).trim(&mut tree).unwrap();
    assert!(report.trimmed.is_empty());

    Trimmer::new(1.0).trim(&mut tree).unwrap();
    assert_eq!(to_newick(&tree), "(X:1,C:1);");
}

#[test]
fn test_accessors() {
    let trimmer = Trimmer::new(4.0).with_mode(DepthMode::Ancestors);
    assert_eq!(trimmer.threshold(), 4.0);
    assert_eq!(trimmer.mode(), DepthMode::Ancestors);
    assert_eq!(Trimmer::new(4.0).mode(), DepthMode::Distance);
}

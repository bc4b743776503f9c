//! Removes nodes by label.

mod common;

use anyhow::Context;
use common::{finish, init_logging, parse_command_line, usage_error};
use nwkit::newick::to_newick;
use nwkit::ops::{InnerNodes, PruneMode, Pruner, Removal};
use nwkit::pipeline::{open_input, process_stream};
use std::io::{self, BufWriter};
use std::process::ExitCode;

const USAGE: &str = "nw_prune [-hsv] [-i t|a] <newick trees filename|-> <label> [label+]";

const HELP: &str = "\
Removes nodes by label

Synopsis
--------
nw_prune [-hsv] [-i t|a] <newick trees filename|-> <label> [label+]

Input
-----
The first argument is the name of a file that contains Newick trees, or '-'
(in which case trees are read from standard input). The remaining arguments
are labels.

Output
------
Removes all nodes whose labels are passed on the command line, together with
their descendants, and prints out the modified tree. If removing a node causes
its parent to have only one child (as is always the case in strictly binary
trees), the parent is spliced out and the remaining child is attached to its
grandparent, preserving length.

Only labeled nodes are considered for pruning. The root is never pruned.

Options
-------
    -h: print this message and exit
    -i <t|a>: changes the handling of inner nodes in reverse mode (see -v).
       If argument is 't' (text), inner nodes whose label is not passed get
       pruned if the label is text (i.e., not numeric). If argument is 'a'
       (all), any inner node not passed is pruned, provided its label is not
       empty. Pruned inner nodes are spliced out; their children stay.
    -s: splice: remove only the node itself, attaching its children to its
        parent (with summed lengths) instead of removing its descendants.
    -v: reverse: prune nodes whose labels are NOT passed on the command line.
        A passed node keeps its whole subtree. Inner nodes are not pruned,
        unless -i is also set.

Assumptions and Limitations
---------------------------
Labels are assumed to be unique.

Examples
--------
# Remove humans and gorilla
$ nw_prune data/catarrhini Homo Gorilla

# Remove humans, chimp, and gorilla, using the clade's label
$ nw_prune data/catarrhini Homininae

# Keep great apes and Colobines
$ nw_prune -v data/catarrhini Gorilla Pan Homo Pongo Simias Colobus

# Same, using clade labels
$ nw_prune -v -i t data/catarrhini Hominidae Colobinae
";

fn main() -> ExitCode {
    init_logging();

    let command_line = match parse_command_line(std::env::args().skip(1), "hi:sv") {
        Ok(command_line) => command_line,
        Err(msg) => return usage_error(&msg, USAGE),
    };
    if command_line.has('h') {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }
    let Some((input, labels)) = command_line.positionals.split_first() else {
        return usage_error("expected a tree file and at least one label", USAGE);
    };
    if labels.is_empty() {
        return usage_error("expected at least one label", USAGE);
    }

    let inner_nodes = match command_line.value('i') {
        None => InnerNodes::Keep,
        Some("t") => InnerNodes::Text,
        Some("a") => InnerNodes::All,
        Some(other) => return usage_error(&format!("wrong argument to -i: '{other}'"), USAGE),
    };
    let mode = if command_line.has('v') {
        PruneMode::Reverse
    } else {
        PruneMode::Direct
    };
    let removal = if command_line.has('s') {
        Removal::Splice
    } else {
        Removal::Clade
    };

    finish(run(input, labels, mode, inner_nodes, removal))
}

fn run(
    input: &str,
    labels: &[String],
    mode: PruneMode,
    inner_nodes: InnerNodes,
    removal: Removal,
) -> anyhow::Result<()> {
    let pruner = Pruner::new(labels)
        .context("could not index labels")?
        .with_mode(mode)
        .with_inner_nodes(inner_nodes)
        .with_removal(removal);
    let trees = open_input(input).with_context(|| format!("cannot read '{input}'"))?;

    let mut out = BufWriter::new(io::stdout().lock());
    process_stream(trees, &mut out, |mut tree| {
        pruner.prune(&mut tree)?;
        Ok(Some(to_newick(&tree)))
    })
    .with_context(|| format!("pruning trees from '{input}' failed"))?;
    Ok(())
}

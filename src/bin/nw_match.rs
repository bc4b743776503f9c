//! Prints the trees that match a pattern tree.

mod common;

use anyhow::Context;
use common::{finish, init_logging, parse_command_line, usage_error};
use nwkit::newick::to_newick;
use nwkit::ops::SubgraphMatcher;
use nwkit::pipeline::{open_input, process_stream};
use std::io::{self, BufWriter};
use std::process::ExitCode;

const USAGE: &str = "nw_match [-hv] <target trees filename|-> <pattern>";

const HELP: &str = "\
Matches trees to a pattern tree

Synopsis
--------
nw_match [-hv] <target trees filename|-> <pattern>

Input
-----
The first argument is the name of a file containing the target trees, or '-'
(in which case the trees are read on standard input). The second argument is
the pattern tree, in Newick.

Output
------
Prints each target tree in which the pattern is a subgraph: the target,
restricted to the pattern's leaf labels, has the pattern's topology. Trees are
printed as read.

Options
-------
    -h: print this message and exit
    -v: print the trees that do NOT match the pattern

Limits & Assumptions
--------------------
Only leaf labels are considered. Labels are assumed unique in all trees.

Example
-------
# Trees in which Tamias is closer to Homo than it is to Vulpes:
$ nw_match data/vrt_gen.nw '((Tamias,Homo),Vulpes);'
";

fn main() -> ExitCode {
    init_logging();

    let command_line = match parse_command_line(std::env::args().skip(1), "hv") {
        Ok(command_line) => command_line,
        Err(msg) => return usage_error(&msg, USAGE),
    };
    if command_line.has('h') {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }
    let [input, pattern] = command_line.positionals.as_slice() else {
        return usage_error("expected a target tree file and a pattern", USAGE);
    };

    finish(run(input, pattern, command_line.has('v')))
}

fn run(input: &str, pattern: &str, reverse: bool) -> anyhow::Result<()> {
    let matcher = SubgraphMatcher::from_newick(pattern)
        .with_context(|| format!("could not parse pattern tree '{pattern}'"))?
        .with_reverse(reverse);
    let trees = open_input(input).with_context(|| format!("cannot read '{input}'"))?;

    let mut out = BufWriter::new(io::stdout().lock());
    process_stream(trees, &mut out, |tree| {
        Ok(matcher.is_match(&tree)?.then(|| to_newick(&tree)))
    })
    .with_context(|| format!("matching trees from '{input}' failed"))?;
    Ok(())
}

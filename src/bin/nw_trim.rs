//! Trims trees at a given depth.

mod common;

use anyhow::Context;
use common::{finish, init_logging, parse_command_line, usage_error};
use nwkit::newick::to_newick;
use nwkit::ops::{DepthMode, Trimmer};
use nwkit::pipeline::{open_input, process_stream};
use std::io::{self, BufWriter};
use std::process::ExitCode;

const USAGE: &str = "nw_trim [-ah] <newick trees filename|-> <depth>";

const HELP: &str = "\
Trims a tree at a certain depth.

Synopsis
--------
nw_trim [-ah] <newick trees filename|-> <depth>

Input
-----
The first argument is the name of a file that contains Newick trees, or '-'
(in which case trees are read from standard input). The second argument is
the depth at which the tree will be cut.

Output
------
Returns a tree whose depth is at most that passed as second argument.
Leaves are shortened but keep their label. Inner nodes are shortened and
their children are discarded.

Options
-------
    -a: the depth is expressed in number of ancestors, not distance.
        Cut nodes are not shortened in this mode.
    -h: print this message and exit

Examples
--------
# Cut tree at depth 20
$ nw_trim data/catarrhini 20

# Cut tree at 3 ancestors or more
$ nw_trim -a data/catarrhini 3
";

fn main() -> ExitCode {
    init_logging();

    let command_line = match parse_command_line(std::env::args().skip(1), "ah") {
        Ok(command_line) => command_line,
        Err(msg) => return usage_error(&msg, USAGE),
    };
    if command_line.has('h') {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }
    let [input, depth] = command_line.positionals.as_slice() else {
        return usage_error("expected a tree file and a depth", USAGE);
    };
    let Ok(threshold) = depth.parse::<f64>() else {
        return usage_error(&format!("depth is not a number: '{depth}'"), USAGE);
    };
    let mode = if command_line.has('a') {
        DepthMode::Ancestors
    } else {
        DepthMode::Distance
    };

    finish(run(input, Trimmer::new(threshold).with_mode(mode)))
}

fn run(input: &str, trimmer: Trimmer) -> anyhow::Result<()> {
    let trees = open_input(input).with_context(|| format!("cannot read '{input}'"))?;

    let mut out = BufWriter::new(io::stdout().lock());
    process_stream(trees, &mut out, |mut tree| {
        trimmer.trim(&mut tree)?;
        Ok(Some(to_newick(&tree)))
    })
    .with_context(|| format!("trimming trees from '{input}' failed"))?;
    Ok(())
}

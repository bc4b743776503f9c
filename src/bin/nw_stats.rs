//! Prints statistics about trees.

mod common;

use anyhow::Context;
use common::{finish, init_logging, parse_command_line, usage_error};
use log::warn;
use nwkit::ops::{StatsFormat, TreeProperties};
use nwkit::pipeline::{open_input, process_stream};
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

const USAGE: &str = "nw_stats [-hH] [-f l|c] <newick trees filename|->";

const HELP: &str = "\
Prints statistics about trees

Synopsis
--------
nw_stats [-hH] [-f l|c] <newick trees filename|->

Input
-----
Argument is the name of a file that contains Newick trees, or '-' (in which
case trees are read from standard input).

Output
------
Prints information about each tree in the input: type (Cladogram, Phylogram,
or Neither), number of nodes, number of leaves, and number of dichotomies
(nodes with exactly two children).

Options
-------
    -h: print this message and exit
    -f <l|c>: format in lines (l), one per tree, or columns (c). Default is c.
    -H: suppress the header line of the line format.

Examples
--------
# default statistics:
$ nw_stats data/catarrhini.nw
";

fn main() -> ExitCode {
    init_logging();

    let command_line = match parse_command_line(std::env::args().skip(1), "f:hH") {
        Ok(command_line) => command_line,
        Err(msg) => return usage_error(&msg, USAGE),
    };
    if command_line.has('h') {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }
    let [input] = command_line.positionals.as_slice() else {
        return usage_error("expected a tree file", USAGE);
    };

    let format = match command_line.value('f') {
        Some("l" | "L") => StatsFormat::Line,
        Some("c" | "C") | None => StatsFormat::Column,
        Some(other) => {
            warn!("wrong argument to option -f: '{other}', using columns");
            StatsFormat::Column
        }
    };

    finish(run(input, format, !command_line.has('H')))
}

fn run(input: &str, format: StatsFormat, headers: bool) -> anyhow::Result<()> {
    let trees = open_input(input).with_context(|| format!("cannot read '{input}'"))?;

    let mut out = BufWriter::new(io::stdout().lock());
    if let Some(header) = format.header().filter(|_| headers) {
        writeln!(out, "{header}")?;
    }
    process_stream(trees, &mut out, |tree| {
        Ok(Some(format.render(&TreeProperties::of(&tree))))
    })
    .with_context(|| format!("reading trees from '{input}' failed"))?;
    Ok(())
}

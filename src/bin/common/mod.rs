//! Argument handling and process setup shared by the command-line tools.

#![allow(dead_code)]

use std::process::ExitCode;

/// Options and positional arguments of a command line.
#[derive(Debug, Default)]
pub struct CommandLine {
    /// Options in the order given, with their value if they take one
    pub options: Vec<(char, Option<String>)>,
    pub positionals: Vec<String>,
}

impl CommandLine {
    /// Returns whether option `name` was given.
    pub fn has(&self, name: char) -> bool {
        self.options.iter().any(|(c, _)| *c == name)
    }

    /// Returns the value of the last occurrence of option `name`.
    pub fn value(&self, name: char) -> Option<&str> {
        self.options
            .iter()
            .rev()
            .find(|(c, _)| *c == name)
            .and_then(|(_, v)| v.as_deref())
    }
}

/// Splits `args` (without the program name) in getopt manner.
///
/// `spec` lists the option letters; a letter followed by `:` takes a value,
/// either attached (`-ia`) or as next argument (`-i a`). Options may be
/// grouped (`-vc`). `--` ends the options, and `-` alone is a positional.
pub fn parse_command_line<I>(args: I, spec: &str) -> Result<CommandLine, String>
where
    I: IntoIterator<Item = String>,
{
    let mut command_line = CommandLine::default();
    let mut args = args.into_iter();
    let mut only_positionals = false;

    while let Some(arg) = args.next() {
        if only_positionals || arg == "-" || !arg.starts_with('-') {
            command_line.positionals.push(arg);
            continue;
        }
        if arg == "--" {
            only_positionals = true;
            continue;
        }

        let letters: Vec<char> = arg[1..].chars().collect();
        let mut i = 0;
        while i < letters.len() {
            let letter = letters[i];
            let Some(position) = spec.find(letter).filter(|_| letter != ':') else {
                return Err(format!("unknown option '-{letter}'"));
            };
            let takes_value = spec[position + 1..].starts_with(':');
            if !takes_value {
                command_line.options.push((letter, None));
                i += 1;
                continue;
            }

            let attached: String = letters[i + 1..].iter().collect();
            let value = if attached.is_empty() {
                args.next()
                    .ok_or_else(|| format!("option '-{letter}' requires an argument"))?
            } else {
                attached
            };
            command_line.options.push((letter, Some(value)));
            break;
        }
    }
    Ok(command_line)
}

/// Installs the logger; `RUST_LOG` selects verbosity, warnings by default.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

/// Prints a usage error and returns the failure code.
pub fn usage_error(message: &str, usage: &str) -> ExitCode {
    eprintln!("{message}");
    eprintln!("Usage: {usage}");
    ExitCode::FAILURE
}

/// Reports the outcome of a tool run and returns its exit code.
pub fn finish(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_grouped_and_valued_options() {
        let parsed = parse_command_line(args("-vs -i t trees.nw Homo Pan"), "hi:sv").unwrap();
        assert!(parsed.has('v'));
        assert!(parsed.has('s'));
        assert_eq!(parsed.value('i'), Some("t"));
        assert_eq!(parsed.positionals, ["trees.nw", "Homo", "Pan"]);
    }

    #[test]
    fn test_attached_value_and_stdin() {
        let parsed = parse_command_line(args("-fl - "), "f:hH").unwrap();
        assert_eq!(parsed.value('f'), Some("l"));
        assert_eq!(parsed.positionals, ["-"]);
    }

    #[test]
    fn test_unknown_option_and_missing_value() {
        assert!(parse_command_line(args("-x trees.nw"), "hv").is_err());
        assert!(parse_command_line(args("-i"), "hi:v").is_err());
    }

    #[test]
    fn test_negative_number_after_double_dash() {
        let parsed = parse_command_line(args("-a -- trees.nw -3"), "ah").unwrap();
        assert!(parsed.has('a'));
        assert_eq!(parsed.positionals, ["trees.nw", "-3"]);
    }
}

use crate::tools::{Session, diagnostics::report_io_error};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

pub const USAGE: &str = "\
Register calculator

USAGE:
    regcalc [FILE]

Reads commands from FILE, or from standard input until `quit`.

COMMANDS:
    <register> <add|subtract|multiply> <value>
    print <register>
    quit
";

#[derive(Debug, PartialEq, Eq)]
pub struct Options {
    pub input: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    Run(Options),
    Help,
}

pub fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let mut input = None;
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Invocation::Help),
            flag if flag.starts_with('-') => return Err(format!("Unexpected argument: {flag}")),
            path if input.is_none() => input = Some(PathBuf::from(path)),
            extra => return Err(format!("Unexpected argument: {extra}")),
        }
    }
    Ok(Invocation::Run(Options { input }))
}

/// Runs the command line `args` (program name excluded) and returns the
/// process exit status. `stdin` is only read when no input file is given.
pub fn run<R: BufRead, W: Write>(args: &[String], stdin: R, stdout: &mut W) -> i32 {
    let options = match parse_args(args) {
        Ok(Invocation::Run(options)) => options,
        Ok(Invocation::Help) => {
            return match writeln!(stdout, "{USAGE}") {
                Ok(()) => 0,
                Err(err) => {
                    eprintln!("Failed to write usage: {err}");
                    1
                }
            };
        }
        Err(message) => {
            eprintln!("{message}\n\n{USAGE}");
            return 1;
        }
    };

    let result = match &options.input {
        Some(path) => {
            let file = match File::open(path) {
                Ok(file) => file,
                Err(err) => {
                    report_io_error(path, &err);
                    return 1;
                }
            };
            Session::new(path.display().to_string())
                .run(BufReader::new(file), stdout)
                .map_err(|err| report_io_error(path, &err))
        }
        None => Session::new("stdin")
            .run(stdin, stdout)
            .map_err(|err| eprintln!("Failed to process standard input: {err}")),
    };

    if result.is_ok() { 0 } else { 1 }
}

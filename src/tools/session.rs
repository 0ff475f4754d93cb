use crate::{
    language::{ast::Command, command::normalize, errors::CommandError, parse_line},
    runtime::{Interpreter, error::RuntimeError},
    tools::diagnostics::{emit_command_error, report_eval_diagnostic, report_runtime_error},
};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Defined,
    Printed(i64),
    Skipped,
    Quit,
}

/// Feeds input lines into one [`Interpreter`].
pub struct Session {
    interpreter: Interpreter,
    origin: String,
}

impl Session {
    /// `origin` names the input in diagnostics, e.g. a file path or `stdin`.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            interpreter: Interpreter::new(),
            origin: origin.into(),
        }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn execute_line(&mut self, line: &str) -> Result<Outcome, SessionError> {
        match parse_line(line)? {
            Command::Define {
                register,
                instruction,
            } => {
                self.interpreter.push_instruction(&register, instruction);
                Ok(Outcome::Defined)
            }
            Command::Print { register } => {
                let value = self.interpreter.print_register(&register)?;
                Ok(Outcome::Printed(value))
            }
            Command::Quit => Ok(Outcome::Quit),
            Command::Blank => Ok(Outcome::Skipped),
        }
    }

    /// Runs every line of `input` until `quit` or end of input. Printed
    /// values go to `output`; everything else is reported on stderr and the
    /// line is skipped.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let outcome = self.execute_line(&line);
            let origin = format!("{}:{}", self.origin, index + 1);

            for diagnostic in self.interpreter.take_diagnostics() {
                report_eval_diagnostic(&origin, &diagnostic);
            }

            match outcome {
                Ok(Outcome::Printed(value)) => {
                    writeln!(output, "{value}")?;
                    output.flush()?;
                }
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Defined | Outcome::Skipped) => {}
                Err(SessionError::Command(err)) => {
                    emit_command_error(&origin, &normalize(&line), &err);
                }
                Err(SessionError::Runtime(err)) => report_runtime_error(&origin, &err),
            }
        }
        output.flush()
    }
}

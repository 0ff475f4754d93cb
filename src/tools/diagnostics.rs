use crate::{
    language::errors::CommandError,
    runtime::{EvalDiagnostic, error::RuntimeError},
};
use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, Clone)]
#[error("{message}")]
#[diagnostic(code(regcalc::command))]
pub struct CommandDiagnostic {
    #[source_code]
    src: NamedSource<String>,
    #[label("{label}")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
    message: String,
    label: String,
}

impl CommandDiagnostic {
    pub fn from_error(src: NamedSource<String>, err: CommandError) -> Self {
        Self {
            src,
            span: err.to_source_span(),
            help: err.help.clone(),
            message: err.message.clone(),
            label: err.label,
        }
    }
}

/// Renders a rejected line. `line` must be the normalized text the spans of
/// `err` point into.
pub fn emit_command_error(origin: &str, line: &str, err: &CommandError) {
    let src = NamedSource::new(origin, line.to_string());
    let diagnostic = CommandDiagnostic::from_error(src, err.clone());
    eprintln!("{:?}", Report::new(diagnostic));
}

/// `origin` is the input position of the command that failed, e.g. `stdin:4`.
pub fn runtime_error_message(origin: &str, error: &RuntimeError) -> String {
    format!("{origin}: Runtime error: {error}")
}

pub fn eval_diagnostic_message(origin: &str, diagnostic: &EvalDiagnostic) -> String {
    format!(
        "{origin}: Runtime error while evaluating `{}`: {}",
        diagnostic.register, diagnostic.error
    )
}

pub fn report_runtime_error(origin: &str, error: &RuntimeError) {
    eprintln!("{}", runtime_error_message(origin, error));
}

pub fn report_eval_diagnostic(origin: &str, diagnostic: &EvalDiagnostic) {
    eprintln!("{}", eval_diagnostic_message(origin, diagnostic));
}

pub fn report_io_error(path: &Path, error: &std::io::Error) {
    eprintln!("Failed to access {}: {}", path.display(), error);
}

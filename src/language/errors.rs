use miette::SourceSpan;
use std::ops::Range;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct CommandError {
    pub message: String,
    pub label: String,
    pub span: Range<usize>,
    pub help: Option<String>,
}

impl CommandError {
    pub fn new(message: impl Into<String>, span: Range<usize>) -> Self {
        let message = message.into();
        Self {
            label: message.clone(),
            message,
            span,
            help: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn to_source_span(&self) -> SourceSpan {
        (self.span.start, self.span.end.saturating_sub(self.span.start)).into()
    }
}

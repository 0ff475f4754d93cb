use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("The register `{name}` could not be found")]
    RegisterNotFound { name: String },
    #[error("Invalid operation `{operation}`")]
    InvalidOperation { operation: String },
    #[error("Invalid operand `{operand}`: {reason}")]
    InvalidOperand { operand: String, reason: String },
}

pub mod error;
pub mod interpreter;
pub mod register;
pub mod store;

pub use interpreter::{EvalDiagnostic, Interpreter};

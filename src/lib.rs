pub mod language;
pub mod runtime;
pub mod tools;

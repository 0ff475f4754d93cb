pub mod ast;
pub mod command;
pub mod errors;

pub use command::parse_line;

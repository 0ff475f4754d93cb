pub mod cli;
pub mod diagnostics;
pub mod session;

pub use session::Session;

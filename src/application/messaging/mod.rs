//! Message handling - Command parsing and dispatching

pub mod dispatcher;
pub mod parser;

#[cfg(test)]
mod tests;

pub use dispatcher::{CommandDispatcher, Outcome};
pub use parser::{AddArgs, CommandParser};

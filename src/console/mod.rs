pub mod command;
pub mod presenter;
pub mod runner;

pub use command::{ConsoleCommand, ParseCommandError};
pub use runner::{Console, ConsoleError};

use std::str::FromStr;

use snafu::prelude::*;

use crate::domain::entity::TaskRef;

/// A line typed into the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Start(Option<TaskRef>),
    Pause,
    Resume,
    Stop,
    Skip,
    Status,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let keyword = words.next().context(EmptySnafu)?;

        let command = match keyword.to_ascii_lowercase().as_str() {
            "start" => {
                let task = words.next().map(|id| {
                    let title = words.collect::<Vec<_>>().join(" ");
                    TaskRef::new(id, (!title.is_empty()).then_some(title))
                });
                return Ok(Self::Start(task));
            }
            "pause" => Self::Pause,
            "resume" => Self::Resume,
            "stop" => Self::Stop,
            "skip" => Self::Skip,
            "status" => Self::Status,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => {
                return UnknownSnafu {
                    keyword: keyword.to_owned(),
                }
                .fail()
            }
        };

        ensure!(
            words.next().is_none(),
            UnexpectedArgumentSnafu {
                keyword: keyword.to_owned()
            }
        );
        Ok(command)
    }
}

/// An error type of parsing a [`ConsoleCommand`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseCommandError {
    #[snafu(display("Type a command, or `help` to list them"))]
    Empty,
    #[snafu(display("Unknown command `{keyword}`, type `help` to list commands"))]
    Unknown { keyword: String },
    #[snafu(display("`{keyword}` takes no arguments"))]
    UnexpectedArgument { keyword: String },
}

use std::io::Error as IoError;
use std::sync::Arc;

use snafu::prelude::*;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tokio::sync::broadcast::error::RecvError;

use crate::console::command::ConsoleCommand;
use crate::console::presenter::{render_event, render_snapshot, HELP};
use crate::domain::engine::TimerPort;

/// A line-based front end that turns typed commands into intents and prints
/// what the timer reports back.
pub struct Console<R, W> {
    timer: Arc<dyn TimerPort>,
    input: Lines<R>,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a new [`Console`].
    pub fn new(timer: Arc<dyn TimerPort>, input: R, output: W) -> Self {
        Self {
            timer,
            input: input.lines(),
            output,
        }
    }

    /// Handle input until `quit` or the end of input, then shut the timer
    /// down.
    ///
    /// # Errors
    ///
    /// This function will return an error if reading input or writing output
    /// fails.
    #[tracing::instrument(skip(self))]
    pub async fn run(&mut self) -> Result<(), ConsoleError> {
        let mut events = self.timer.events();
        self.write_line(&render_snapshot(&self.timer.snapshot()))
            .await?;

        loop {
            tokio::select! {
                biased;
                event = events.recv() => match event {
                    Ok(event) => self.write_line(&render_event(&event)).await?,
                    Err(RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "Console fell behind on events");
                    }
                    Err(RecvError::Closed) => break,
                },
                line = self.input.next_line() => {
                    let Some(line) = line.context(ReadSnafu)? else {
                        break;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }

                    match line.parse::<ConsoleCommand>() {
                        Ok(ConsoleCommand::Quit) => break,
                        Ok(command) => self.dispatch(command).await?,
                        Err(err) => self.write_line(&err.to_string()).await?,
                    }
                },
            }
        }

        tracing::info!("Console closed, shutting down timer");
        self.timer.shutdown().await;
        self.output.flush().await.context(WriteSnafu)
    }

    async fn dispatch(&mut self, command: ConsoleCommand) -> Result<(), ConsoleError> {
        tracing::debug!(?command, "Dispatching command");
        match command {
            ConsoleCommand::Start(task) => self.timer.start(task).await,
            ConsoleCommand::Pause => self.timer.pause().await,
            ConsoleCommand::Resume => self.timer.resume().await,
            ConsoleCommand::Stop => self.timer.stop().await,
            ConsoleCommand::Skip => self.timer.skip_break().await,
            ConsoleCommand::Status | ConsoleCommand::Quit => {}
            ConsoleCommand::Help => return self.write_line(HELP).await,
        }
        self.write_line(&render_snapshot(&self.timer.snapshot()))
            .await
    }

    async fn write_line(&mut self, line: &str) -> Result<(), ConsoleError> {
        self.output
            .write_all(format!("{line}\n").as_bytes())
            .await
            .context(WriteSnafu)
    }
}

/// An error type for the console loop.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ConsoleError {
    #[snafu(display("Could not read a command"))]
    Read { source: IoError },
    #[snafu(display("Could not write to the console"))]
    Write { source: IoError },
}

use tokio::sync::{broadcast, watch};

use crate::domain::entity::{ActiveSession, DomainEvent, TaskRef, TimerSnapshot};

/// A public port through which a presentation layer drives the timer and
/// observes it.
///
/// Intents that do not apply to the current phase are ignored.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TimerPort: Send + Sync + 'static {
    /// Start a focus phase, optionally linked to a task. Ignored while a
    /// session exists.
    async fn start(&self, task: Option<TaskRef>);

    /// Suspend the running countdown.
    async fn pause(&self);

    /// Continue a paused countdown from where it stopped.
    async fn resume(&self);

    /// Cancel the session without emitting any event.
    async fn stop(&self);

    /// End the current break early.
    async fn skip_break(&self);

    /// Cancel any countdown and stop the engine for good.
    async fn shutdown(&self);

    /// The latest snapshot.
    fn snapshot(&self) -> TimerSnapshot;

    /// A stream of snapshots that always holds the latest one.
    fn state(&self) -> watch::Receiver<TimerSnapshot>;

    /// A stream of the active session.
    fn session(&self) -> watch::Receiver<Option<ActiveSession>>;

    /// Events emitted after this call.
    fn events(&self) -> broadcast::Receiver<DomainEvent>;
}

use std::sync::Mutex;

use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Sender as OneshotSender};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::domain::entity::{ActiveSession, DomainEvent, TaskRef, TimerSnapshot};

/// Intents a [`WorkerRoutine`] handles, one at a time.
///
/// [`WorkerRoutine`]: super::routine::WorkerRoutine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start(Option<TaskRef>),
    Pause,
    Resume,
    Stop,
    SkipBreak,
    Shutdown,
}

/// An [`Intent`] paired with the channel acknowledging it has been applied.
#[derive(Debug)]
pub struct Command {
    pub intent: Intent,
    pub responder: OneshotSender<()>,
}

/// The receiving ends of everything a [`WorkerRoutine`] publishes.
///
/// [`WorkerRoutine`]: super::routine::WorkerRoutine
#[derive(Debug)]
pub struct Observers {
    pub state: watch::Receiver<TimerSnapshot>,
    pub session: watch::Receiver<Option<ActiveSession>>,
    pub events: broadcast::Receiver<DomainEvent>,
}

/// Handle that controls a [`WorkerRoutine`].
///
/// Every intent waits until the worker has applied it, so once a call returns
/// its effect is visible in [`WorkerHandle::snapshot`].
///
/// [`WorkerRoutine`]: super::routine::WorkerRoutine
#[derive(Debug)]
pub struct WorkerHandle {
    requester: Sender<Command>,
    observers: Observers,
    routine: Mutex<Option<JoinHandle<()>>>,
}

impl WorkerHandle {
    /// Creates a new [`WorkerHandle`].
    pub fn new(requester: Sender<Command>, observers: Observers, routine: JoinHandle<()>) -> Self {
        Self {
            requester,
            observers,
            routine: Mutex::new(Some(routine)),
        }
    }

    /// Send [`Intent::Start`] to the background worker.
    pub async fn start(&self, task: Option<TaskRef>) {
        self.request(Intent::Start(task)).await
    }

    /// Send [`Intent::Pause`] to the background worker.
    pub async fn pause(&self) {
        self.request(Intent::Pause).await
    }

    /// Send [`Intent::Resume`] to the background worker.
    pub async fn resume(&self) {
        self.request(Intent::Resume).await
    }

    /// Send [`Intent::Stop`] to the background worker and cancel the
    /// countdown.
    pub async fn stop(&self) {
        self.request(Intent::Stop).await
    }

    /// Send [`Intent::SkipBreak`] to the background worker.
    pub async fn skip_break(&self) {
        self.request(Intent::SkipBreak).await
    }

    /// Stop the background worker and wait for it to exit. Later intents are
    /// ignored.
    pub async fn shutdown(&self) {
        self.request(Intent::Shutdown).await;

        let routine = self.take_routine();
        if let Some(routine) = routine {
            if let Err(err) = routine.await {
                if !err.is_cancelled() {
                    tracing::error!(err = %err, "Worker exited abnormally");
                }
            }
        }
    }

    /// Returns the latest published snapshot.
    pub fn snapshot(&self) -> TimerSnapshot {
        *self.observers.state.borrow()
    }

    /// Returns a receiver that always holds the latest snapshot.
    pub fn state(&self) -> watch::Receiver<TimerSnapshot> {
        self.observers.state.clone()
    }

    /// Returns a receiver that always holds the current session.
    pub fn session(&self) -> watch::Receiver<Option<ActiveSession>> {
        self.observers.session.clone()
    }

    /// Subscribe to events emitted from now on.
    pub fn events(&self) -> broadcast::Receiver<DomainEvent> {
        self.observers.events.resubscribe()
    }

    async fn request(&self, intent: Intent) {
        let (responder, acknowledged) = oneshot::channel();
        let command = Command {
            intent: intent.clone(),
            responder,
        };

        if self.requester.send(command).await.is_err() {
            tracing::debug!(?intent, "Worker is shut down, ignoring intent");
            return;
        }

        if acknowledged.await.is_err() {
            tracing::debug!(?intent, "Worker exited before acknowledging intent");
        }
    }

    fn take_routine(&self) -> Option<JoinHandle<()>> {
        match self.routine.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        if let Some(routine) = self.take_routine() {
            routine.abort();
        }
    }
}

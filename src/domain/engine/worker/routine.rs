use std::sync::Arc;

use tokio::sync::mpsc::Receiver;
use tokio::sync::{broadcast, watch};
use tokio::task::{JoinHandle, JoinSet};

use crate::domain::engine::worker::handle::Command;
use crate::domain::engine::worker::state::WorkerState;
use crate::domain::entity::{ActiveSession, DomainEvent, NoticeMessages, TimerPolicy, TimerSnapshot};
use crate::domain::repository::ProfileRepository;

/// A type that stores configurations required by [`WorkerRoutine`]
/// initialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerConfig {
    pub policy: TimerPolicy,
    pub messages: NoticeMessages,
}

/// The sending ends of the state, session and event channels.
#[derive(Debug, Clone)]
pub struct Outbox {
    pub state: watch::Sender<TimerSnapshot>,
    pub session: watch::Sender<Option<ActiveSession>>,
    pub events: broadcast::Sender<DomainEvent>,
}

impl Outbox {
    /// Replace the latest snapshot.
    pub fn publish(&self, snapshot: TimerSnapshot) {
        self.state.send_replace(snapshot);
    }

    /// Replace the current session.
    pub fn publish_session(&self, session: Option<ActiveSession>) {
        self.session.send_replace(session);
    }

    /// Broadcast an event to current subscribers. Nobody listening is not an
    /// error.
    pub fn emit(&self, event: DomainEvent) {
        tracing::debug!(?event, "Emitting event");
        let _ = self.events.send(event);
    }
}

/// A [`WorkerContext`] stores all objects relevant to the [`WorkerRoutine`]
/// and the business logic.
pub struct WorkerContext {
    pub config: WorkerConfig,
    pub commands: Receiver<Command>,
    pub outbox: Outbox,
    pub profiles: Arc<dyn ProfileRepository>,
    /// Focus phases completed since the worker started.
    pub cycles: u32,
    /// Points awards still in flight. Dropping the set aborts them.
    pub awards: JoinSet<()>,
}

impl WorkerContext {
    /// The snapshot shown while no session exists.
    pub fn idle_snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::idle(self.config.policy.focus, self.cycles)
    }
}

/// A type responsible for the engine's main business logic. A
/// [`WorkerRoutine`] runs on background, receiving [`Command`]s from
/// [`WorkerHandle`].
///
/// [`WorkerHandle`]: super::WorkerHandle
pub struct WorkerRoutine {
    context: WorkerContext,
    state: WorkerState,
}

impl WorkerRoutine {
    /// Spawn a running [`WorkerRoutine`] on background.
    pub fn spawn(
        config: WorkerConfig,
        commands: Receiver<Command>,
        outbox: Outbox,
        profiles: Arc<dyn ProfileRepository>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut worker = Self {
                context: WorkerContext {
                    config,
                    commands,
                    outbox,
                    profiles,
                    cycles: 0,
                    awards: JoinSet::new(),
                },
                state: WorkerState::new(),
            };
            worker.run().await;
        })
    }

    /// Main part of its business logic.
    async fn run(&mut self) {
        tracing::info!("Focus worker started");
        while !self.state.is_stopped() {
            self.state.run(&mut self.context).await;
        }
        if !self.context.awards.is_empty() {
            tracing::debug!(
                pending = self.context.awards.len(),
                "Cancelling pending awards"
            );
            self.context.awards.shutdown().await;
        }
        tracing::info!(cycles = self.context.cycles, "Focus worker stopped");
    }
}

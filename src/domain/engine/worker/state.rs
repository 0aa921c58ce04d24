use std::sync::Arc;

use snafu::prelude::*;
use tokio::task::JoinSet;
use tokio::time::{Duration, Interval};
use tracing::Instrument;

use crate::domain::engine::reward::{award_points, AbortedSnafu};
use crate::domain::engine::worker::handle::{Command, Intent};
use crate::domain::engine::worker::routine::WorkerContext;
use crate::domain::entity::{ActiveSession, DomainEvent, SessionPhase, TaskRef, TimerSnapshot};
use crate::tracing_report;

/// Interval between two decrements of a running countdown.
const TICK: Duration = Duration::from_secs(1);

#[derive(Debug)]
#[repr(transparent)]
pub struct WorkerState {
    inner: Option<WorkerStateInner>,
}

impl WorkerState {
    /// Creates a new [`WorkerState`].
    pub fn new() -> Self {
        Self {
            inner: Some(WorkerStateInner::new()),
        }
    }

    /// Do the business logic based on its inner state.
    pub async fn run(&mut self, context: &mut WorkerContext) {
        self.inner = match self.inner.take() {
            Some(inner) => Some(inner.run(context).await),
            None => unreachable!("`WorkerState`'s inner should not be `None`"),
        };
    }

    /// Returns `true` if is stopped of this [`WorkerState`].
    pub fn is_stopped(&self) -> bool {
        matches!(self.inner, Some(WorkerStateInner::Stopped(_)))
    }
}

/// Actual implementation of running state of [`WorkerRoutine`].
///
/// [`WorkerRoutine`]: super::routine::WorkerRoutine
#[derive(Debug)]
enum WorkerStateInner {
    Idle(IdleState),
    Counting(CountingState),
    Paused(PausedState),
    Stopped(StoppedState),
}

impl WorkerStateInner {
    fn new() -> Self {
        Self::Idle(IdleState)
    }

    async fn run(self, context: &mut WorkerContext) -> Self {
        match self {
            Self::Idle(state) => state.run(context).await,
            Self::Counting(state) => state.run(context).await,
            Self::Paused(state) => state.run(context).await,
            Self::Stopped(state) => state.into(),
        }
    }
}

impl From<IdleState> for WorkerStateInner {
    fn from(value: IdleState) -> Self {
        Self::Idle(value)
    }
}

impl From<CountingState> for WorkerStateInner {
    fn from(value: CountingState) -> Self {
        Self::Counting(value)
    }
}

impl From<PausedState> for WorkerStateInner {
    fn from(value: PausedState) -> Self {
        Self::Paused(value)
    }
}

impl From<StoppedState> for WorkerStateInner {
    fn from(value: StoppedState) -> Self {
        Self::Stopped(value)
    }
}

/// A state which indicates that no session exists and the worker waits for a
/// start.
#[derive(Debug)]
struct IdleState;

impl IdleState {
    async fn run(self, context: &mut WorkerContext) -> WorkerStateInner {
        let Some(Command { intent, responder }) = context.commands.recv().await else {
            return StoppedState.into();
        };

        let next = match intent {
            Intent::Start(task) => self.handle_start(context, task).await,
            Intent::Shutdown => StoppedState.into(),
            intent => {
                tracing::debug!(?intent, "No session running, ignoring intent");
                self.into()
            }
        };
        let _ = responder.send(());
        next
    }

    async fn handle_start(
        self,
        context: &mut WorkerContext,
        task: Option<TaskRef>,
    ) -> WorkerStateInner {
        let policy = context.config.policy;
        let session = ActiveSession::focusing(task, policy.focus, policy.short_break);
        let snapshot = TimerSnapshot::focus(policy.focus, context.cycles);

        tracing::info!(
            task = session.task.as_ref().map(|task| task.id.as_str()),
            minutes = policy.focus.minutes(),
            "Focus session started"
        );

        context.outbox.publish_session(Some(session.clone()));
        context.outbox.publish(snapshot);

        CountingState {
            session,
            snapshot,
            ticker: spawn_ticker().await,
        }
        .into()
    }
}

/// A state which indicates that a focus or break countdown is ticking.
#[derive(Debug)]
struct CountingState {
    session: ActiveSession,
    snapshot: TimerSnapshot,
    ticker: Interval,
}

impl CountingState {
    async fn run(mut self, context: &mut WorkerContext) -> WorkerStateInner {
        tokio::select! {
            _ = self.ticker.tick() => self.handle_tick(context).await,
            command = context.commands.recv() => {
                let Some(Command { intent, responder }) = command else {
                    return StoppedState.into();
                };

                let next = match intent {
                    Intent::Pause => self.handle_pause(context),
                    Intent::Stop => stop_session(context, self.session),
                    Intent::SkipBreak if self.snapshot.is_break => {
                        skip_break(context, self.session)
                    }
                    Intent::Shutdown => StoppedState.into(),
                    intent => {
                        tracing::debug!(?intent, "Countdown running, ignoring intent");
                        self.into()
                    }
                };
                let _ = responder.send(());
                next
            },
        }
    }

    async fn handle_tick(self, context: &mut WorkerContext) -> WorkerStateInner {
        let snapshot = self.snapshot.decremented();
        tracing::trace!(remaining = snapshot.remaining_seconds, "Tick");
        context.outbox.publish(snapshot);

        if !snapshot.is_elapsed() {
            return CountingState { snapshot, ..self }.into();
        }

        if snapshot.is_break {
            self.finish_break(context)
        } else {
            self.finish_focus(context).await
        }
    }

    fn finish_break(self, context: &mut WorkerContext) -> WorkerStateInner {
        let message = context.config.messages.break_ended.text().to_owned();
        context.outbox.emit(DomainEvent::BreakEnded { message });

        tracing::info!(phase = %SessionPhase::Completed, "Break ended");
        context.outbox.publish_session(None);
        context.outbox.publish(context.idle_snapshot());

        IdleState.into()
    }

    async fn finish_focus(self, context: &mut WorkerContext) -> WorkerStateInner {
        let policy = context.config.policy;
        context.cycles = context.cycles.saturating_add(1);
        let cycles = context.cycles;

        let points = policy.points_for(self.session.has_task());
        context.outbox.emit(DomainEvent::SessionCompleted {
            points_earned: points,
            total_cycles_so_far: cycles,
        });

        let break_duration = policy.break_after(cycles);
        let session = ActiveSession {
            break_duration,
            phase: SessionPhase::OnBreak,
            focus_completed: self.session.focus_completed.saturating_add(1),
            ..self.session
        };
        context.outbox.emit(DomainEvent::BreakStarted {
            break_minutes: break_duration.minutes(),
        });

        tracing::info!(
            cycles,
            points,
            break_minutes = break_duration.minutes(),
            "Focus phase completed, break started"
        );

        let snapshot = TimerSnapshot::on_break(break_duration, cycles);
        context.outbox.publish_session(Some(session.clone()));
        context.outbox.publish(snapshot);

        spawn_award(context, points);

        CountingState {
            session,
            snapshot,
            ticker: spawn_ticker().await,
        }
        .into()
    }

    fn handle_pause(self, context: &mut WorkerContext) -> WorkerStateInner {
        let snapshot = self.snapshot.paused(true);
        let session = ActiveSession {
            phase: SessionPhase::Paused,
            ..self.session
        };

        tracing::info!(remaining = snapshot.remaining_seconds, "Countdown paused");
        context.outbox.publish_session(Some(session.clone()));
        context.outbox.publish(snapshot);

        PausedState { session, snapshot }.into()
    }
}

/// A state which indicates that the countdown is suspended. The remaining
/// time is kept in the snapshot for resuming.
#[derive(Debug)]
struct PausedState {
    session: ActiveSession,
    snapshot: TimerSnapshot,
}

impl PausedState {
    async fn run(self, context: &mut WorkerContext) -> WorkerStateInner {
        let Some(Command { intent, responder }) = context.commands.recv().await else {
            return StoppedState.into();
        };

        let next = match intent {
            Intent::Resume => self.handle_resume(context).await,
            Intent::Stop => stop_session(context, self.session),
            Intent::SkipBreak if self.snapshot.is_break => skip_break(context, self.session),
            Intent::Shutdown => StoppedState.into(),
            intent => {
                tracing::debug!(?intent, "Countdown paused, ignoring intent");
                self.into()
            }
        };
        let _ = responder.send(());
        next
    }

    async fn handle_resume(self, context: &mut WorkerContext) -> WorkerStateInner {
        let snapshot = self.snapshot.paused(false);
        let phase = if snapshot.is_break {
            SessionPhase::OnBreak
        } else {
            SessionPhase::Focusing
        };
        let session = ActiveSession {
            phase,
            ..self.session
        };

        tracing::info!(remaining = snapshot.remaining_seconds, "Countdown resumed");
        context.outbox.publish_session(Some(session.clone()));
        context.outbox.publish(snapshot);

        CountingState {
            session,
            snapshot,
            ticker: spawn_ticker().await,
        }
        .into()
    }
}

/// A state which indicates that [`WorkerRoutine`] should stop running.
///
/// [`WorkerRoutine`]: super::routine::WorkerRoutine
#[derive(Debug)]
struct StoppedState;

/// Cancel the session silently and return to idle.
fn stop_session(context: &mut WorkerContext, session: ActiveSession) -> WorkerStateInner {
    let session = ActiveSession {
        phase: SessionPhase::Cancelled,
        ..session
    };
    tracing::info!(phase = %session.phase, "Session stopped");

    context.outbox.publish_session(None);
    context.outbox.publish(context.idle_snapshot());

    IdleState.into()
}

/// Drop the break, return to idle and acknowledge it with a notice.
fn skip_break(context: &mut WorkerContext, session: ActiveSession) -> WorkerStateInner {
    tracing::info!(
        focus_completed = session.focus_completed,
        "Break skipped"
    );

    context.outbox.publish_session(None);
    context.outbox.publish(context.idle_snapshot());

    let message = context.config.messages.break_skipped.text().to_owned();
    context.outbox.emit(DomainEvent::Notice { message });

    IdleState.into()
}

/// Credit the points on a separate task owned by the worker. A failure,
/// including a panic inside the store, only produces a fallback notice.
fn spawn_award(context: &mut WorkerContext, points: u32) {
    while let Some(res) = context.awards.try_join_next() {
        if let Err(err) = res {
            tracing::debug!(err = %err, "Award task ended abnormally");
        }
    }

    let profiles = Arc::clone(&context.profiles);
    let events = context.outbox.events.clone();
    let fallback = context.config.messages.points_fallback.text().to_owned();

    let span = tracing::info_span!("award", points);
    context.awards.spawn(
        async move {
            let mut attempt = JoinSet::new();
            attempt.spawn(
                async move { award_points(profiles.as_ref(), points).await }
                    .in_current_span(),
            );
            let Some(res) = attempt.join_next().await else {
                return;
            };

            match res.context(AbortedSnafu).and_then(|res| res) {
                Ok(balance) => tracing::info!(balance, "Points awarded"),
                Err(err) => {
                    tracing_report!(err, "Could not award points");
                    let _ = events.send(DomainEvent::Notice { message: fallback });
                }
            }
        }
        .instrument(span),
    );
}

async fn spawn_ticker() -> Interval {
    let mut ticker = tokio::time::interval(TICK);
    ticker.tick().await;
    ticker
}

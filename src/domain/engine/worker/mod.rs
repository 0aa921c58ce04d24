mod handle;
mod routine;
mod state;

pub use handle::WorkerHandle;
pub use routine::WorkerConfig;

use std::sync::Arc;

use snafu::prelude::*;
use tokio::sync::{broadcast, watch};

use crate::domain::entity::{NoticeMessages, TimerPolicy, TimerSnapshot};
use crate::domain::repository::{
    DurationRepository, GetDurationError, GetMessageError, GetScoreError, MessageRepository,
    ProfileRepository, ScoreRepository,
};

use handle::Observers;
use routine::{Outbox, WorkerRoutine};

/// Number of events a lagging subscriber may fall behind before it starts
/// missing the oldest ones.
const EVENT_CAPACITY: usize = 16;

/// Spawn the background worker that owns the countdown.
pub fn spawn(config: WorkerConfig, profiles: Arc<dyn ProfileRepository>) -> WorkerHandle {
    let (requester, commands) = tokio::sync::mpsc::channel(1);
    let (state, state_rx) = watch::channel(TimerSnapshot::idle(config.policy.focus, 0));
    let (session, session_rx) = watch::channel(None);
    let (events, events_rx) = broadcast::channel(EVENT_CAPACITY);

    let outbox = Outbox {
        state,
        session,
        events,
    };
    let observers = Observers {
        state: state_rx,
        session: session_rx,
        events: events_rx,
    };

    let routine = WorkerRoutine::spawn(config, commands, outbox, profiles);
    WorkerHandle::new(requester, observers, routine)
}

/// Read the policy and messages the worker runs with from repositories.
///
/// # Errors
///
/// This function will return an error if any repository fails or holds an
/// invalid value.
pub async fn load_config(
    duration_repository: Arc<dyn DurationRepository>,
    score_repository: Arc<dyn ScoreRepository>,
    message_repository: Arc<dyn MessageRepository>,
) -> Result<WorkerConfig, LoadWorkerConfigError> {
    let focus = duration_repository
        .focus_duration()
        .await
        .context(DurationConfigSnafu { key: "focus" })?;
    let short_break = duration_repository
        .short_break_duration()
        .await
        .context(DurationConfigSnafu { key: "short_break" })?;
    let long_break = duration_repository
        .long_break_duration()
        .await
        .context(DurationConfigSnafu { key: "long_break" })?;
    let long_break_interval = duration_repository
        .long_break_interval()
        .await
        .context(DurationConfigSnafu {
            key: "long_break_interval",
        })?;
    let base_points = score_repository
        .base_points()
        .await
        .context(ScoreConfigSnafu { key: "base" })?;
    let task_bonus_points = score_repository
        .task_bonus_points()
        .await
        .context(ScoreConfigSnafu { key: "task_bonus" })?;
    let break_ended = message_repository
        .break_ended_message()
        .await
        .context(MessageConfigSnafu { key: "break_ended" })?;
    let break_skipped = message_repository
        .break_skipped_message()
        .await
        .context(MessageConfigSnafu {
            key: "break_skipped",
        })?;
    let points_fallback = message_repository
        .points_fallback_message()
        .await
        .context(MessageConfigSnafu {
            key: "points_fallback",
        })?;

    Ok(WorkerConfig {
        policy: TimerPolicy {
            focus,
            short_break,
            long_break,
            long_break_interval,
            base_points,
            task_bonus_points,
        },
        messages: NoticeMessages {
            break_ended,
            break_skipped,
            points_fallback,
        },
    })
}

/// An error for loading the worker's configuration.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum LoadWorkerConfigError {
    #[snafu(display("Could not load duration configuration for {key} from repository"))]
    DurationConfig {
        key: &'static str,
        source: GetDurationError,
    },
    #[snafu(display("Could not load score configuration for {key} from repository"))]
    ScoreConfig {
        key: &'static str,
        source: GetScoreError,
    },
    #[snafu(display("Could not load message configuration for {key} from repository"))]
    MessageConfig {
        key: &'static str,
        source: GetMessageError,
    },
}

use std::sync::Arc;

use snafu::prelude::*;
use tokio::sync::{broadcast, watch};

use crate::domain::engine::inbound::TimerPort;
use crate::domain::engine::worker::{self, LoadWorkerConfigError, WorkerConfig, WorkerHandle};
use crate::domain::entity::{ActiveSession, DomainEvent, TaskRef, TimerSnapshot};
use crate::domain::repository::{
    DurationRepository, MessageRepository, ProfileRepository, ScoreRepository,
};

/// Entrance to the focus timer, owning the background worker.
///
/// Dropping the engine aborts the countdown. Call [`TimerPort::shutdown`] to
/// stop it and wait for the worker to exit.
#[derive(Debug)]
pub struct FocusEngine {
    worker: WorkerHandle,
}

impl FocusEngine {
    /// Spawn an engine running with the given policy. Must be called within a
    /// Tokio runtime.
    pub fn new(config: WorkerConfig, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self {
            worker: worker::spawn(config, profiles),
        }
    }

    /// Initialize the engine by injecting external repositories.
    ///
    /// # Errors
    ///
    /// This function will return an error if the configuration can not be
    /// loaded.
    pub async fn setup(
        duration_repository: Arc<dyn DurationRepository>,
        score_repository: Arc<dyn ScoreRepository>,
        message_repository: Arc<dyn MessageRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Result<FocusEngine, SetupEngineError> {
        let config = worker::load_config(duration_repository, score_repository, message_repository)
            .await
            .context(ConfigSnafu)?;
        Ok(Self::new(config, profiles))
    }
}

#[async_trait::async_trait]
impl TimerPort for FocusEngine {
    async fn start(&self, task: Option<TaskRef>) {
        self.worker.start(task).await
    }

    async fn pause(&self) {
        self.worker.pause().await
    }

    async fn resume(&self) {
        self.worker.resume().await
    }

    async fn stop(&self) {
        self.worker.stop().await
    }

    async fn skip_break(&self) {
        self.worker.skip_break().await
    }

    async fn shutdown(&self) {
        self.worker.shutdown().await
    }

    fn snapshot(&self) -> TimerSnapshot {
        self.worker.snapshot()
    }

    fn state(&self) -> watch::Receiver<TimerSnapshot> {
        self.worker.state()
    }

    fn session(&self) -> watch::Receiver<Option<ActiveSession>> {
        self.worker.session()
    }

    fn events(&self) -> broadcast::Receiver<DomainEvent> {
        self.worker.events()
    }
}

/// An error for initializing the engine.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum SetupEngineError {
    #[snafu(display("Could not load the engine configuration"))]
    Config { source: LoadWorkerConfigError },
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::sync::broadcast::error::{RecvError, TryRecvError};
    use tokio::time::Duration;

    use crate::adapter::repository::MemoryProfileStore;
    use crate::domain::repository::ProfileRepositoryError;
    use crate::domain::entity::{LongBreakInterval, PhaseDuration, Profile, TimerPolicy};

    #[tokio::test(start_paused = true)]
    async fn focus_completes_then_break_is_skipped() {
        let profiles = Arc::new(MemoryProfileStore::with_profile(Profile::new("u1", "Ada")));
        let engine = FocusEngine::new(WorkerConfig::default(), profiles.clone());
        let mut events = engine.events();

        engine.start(None).await;
        assert_eq!(engine.snapshot().remaining_seconds, 1500);

        assert_eq!(
            events.recv().await.unwrap(),
            DomainEvent::SessionCompleted {
                points_earned: 25,
                total_cycles_so_far: 1,
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            DomainEvent::BreakStarted { break_minutes: 5 }
        );

        let snapshot = engine.snapshot();
        assert!(snapshot.is_break);
        assert_eq!(snapshot.total_seconds, 300);
        assert_eq!(snapshot.remaining_seconds, 300);
        assert_eq!(snapshot.cycle_count, 1);

        engine.skip_break().await;
        assert!(matches!(
            events.recv().await,
            Ok(DomainEvent::Notice { message }) if message.starts_with("Break skipped")
        ));

        let snapshot = engine.snapshot();
        assert!(!snapshot.is_running);
        assert!(!snapshot.is_break);
        assert_eq!(snapshot.cycle_count, 1);
        assert!(engine.session().borrow().is_none());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(profiles.points(), Some(25));

        engine.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn linked_task_cycles_escalate_break() {
        let profiles = Arc::new(MemoryProfileStore::with_profile(Profile::new("u1", "Ada")));
        let engine = FocusEngine::new(short_config(), profiles.clone());
        let mut events = engine.events();
        let task = TaskRef::new("a1", Some("Essay".to_owned()));

        engine.start(Some(task.clone())).await;
        assert_eq!(
            events.recv().await.unwrap(),
            DomainEvent::SessionCompleted {
                points_earned: 35,
                total_cycles_so_far: 1,
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            DomainEvent::BreakStarted { break_minutes: 1 }
        );
        assert!(matches!(
            events.recv().await,
            Ok(DomainEvent::BreakEnded { .. })
        ));
        assert_eq!(engine.snapshot(), TimerSnapshot::idle(minutes(1), 1));

        engine.start(Some(task)).await;
        assert_eq!(
            events.recv().await.unwrap(),
            DomainEvent::SessionCompleted {
                points_earned: 35,
                total_cycles_so_far: 2,
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            DomainEvent::BreakStarted { break_minutes: 2 }
        );

        engine.stop().await;
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(profiles.points(), Some(70));
        assert_eq!(engine.snapshot().cycle_count, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_resets_without_events() {
        let engine = FocusEngine::new(WorkerConfig::default(), Arc::new(MemoryProfileStore::new()));
        let mut events = engine.events();

        engine.start(None).await;
        tokio::time::sleep(Duration::from_millis(4500)).await;
        assert_eq!(engine.snapshot().remaining_seconds, 1496);

        engine.stop().await;
        engine.stop().await;

        let snapshot = engine.snapshot();
        assert_eq!(snapshot, TimerSnapshot::default());
        assert_eq!(snapshot.total_seconds, 1500);
        assert_eq!(snapshot.remaining_seconds, 1500);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(engine.snapshot(), TimerSnapshot::default());
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_during_break_is_silent() {
        let profiles = Arc::new(MemoryProfileStore::with_profile(Profile::new("u1", "Ada")));
        let engine = FocusEngine::new(short_config(), profiles);
        let mut events = engine.events();

        engine.start(None).await;
        events.recv().await.unwrap();
        events.recv().await.unwrap();
        assert!(engine.snapshot().is_break);

        engine.stop().await;
        assert_eq!(engine.snapshot(), TimerSnapshot::idle(minutes(1), 1));

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_holds_remaining_time() {
        let engine = FocusEngine::new(WorkerConfig::default(), Arc::new(MemoryProfileStore::new()));
        let mut state = engine.state();

        engine.start(None).await;
        tokio::time::sleep(Duration::from_millis(3500)).await;
        let before = engine.snapshot();
        assert_eq!(before.remaining_seconds, 1497);

        engine.pause().await;
        let paused = engine.snapshot();
        assert!(paused.is_paused);
        assert!(paused.is_running);
        assert_eq!(paused.remaining_seconds, 1497);

        engine.pause().await;
        assert_eq!(engine.snapshot(), paused);

        let _ = state.borrow_and_update();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(!state.has_changed().unwrap());
        assert_eq!(engine.snapshot().remaining_seconds, 1497);

        engine.resume().await;
        engine.resume().await;
        let resumed = engine.snapshot();
        assert!(!resumed.is_paused);
        assert_eq!(resumed.remaining_seconds, before.remaining_seconds);
        assert_eq!(resumed.total_seconds, before.total_seconds);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(engine.snapshot().remaining_seconds, 1496);
    }

    #[tokio::test(start_paused = true)]
    async fn remaining_time_never_increases() {
        let engine = FocusEngine::new(short_config(), Arc::new(MemoryProfileStore::new()));
        let mut state = engine.state();

        engine.start(None).await;
        let mut last = state.borrow_and_update().remaining_seconds;
        for _ in 0..59 {
            state.changed().await.unwrap();
            let snapshot = *state.borrow_and_update();
            assert!(snapshot.remaining_seconds < last);
            assert!(snapshot.remaining_seconds <= snapshot.total_seconds);
            last = snapshot.remaining_seconds;
        }
        assert_eq!(last, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_intents_are_ignored() {
        let engine = FocusEngine::new(WorkerConfig::default(), Arc::new(MemoryProfileStore::new()));
        let mut events = engine.events();

        engine.pause().await;
        engine.resume().await;
        engine.skip_break().await;
        engine.stop().await;
        assert_eq!(engine.snapshot(), TimerSnapshot::default());

        engine.start(Some(TaskRef::new("a1", None))).await;
        engine.skip_break().await;
        engine.start(None).await;
        let session = engine.session().borrow().clone().unwrap();
        assert!(session.has_task());
        assert!(!engine.snapshot().is_break);

        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_award_still_completes() {
        let engine = FocusEngine::new(short_config(), Arc::new(MemoryProfileStore::new()));
        let mut events = engine.events();

        engine.start(None).await;
        assert_eq!(
            events.recv().await.unwrap(),
            DomainEvent::SessionCompleted {
                points_earned: 25,
                total_cycles_so_far: 1,
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            DomainEvent::BreakStarted { break_minutes: 1 }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            DomainEvent::Notice {
                message: "Points saved locally".to_owned()
            }
        );
        assert!(engine.snapshot().is_break);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_ends_the_worker() {
        let engine = FocusEngine::new(WorkerConfig::default(), Arc::new(MemoryProfileStore::new()));
        let mut events = engine.events();

        engine.start(None).await;
        engine.shutdown().await;
        engine.start(None).await;
        engine.stop().await;

        assert!(matches!(events.recv().await, Err(RecvError::Closed)));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_engine_cancels_the_countdown() {
        let engine = FocusEngine::new(WorkerConfig::default(), Arc::new(MemoryProfileStore::new()));
        let mut events = engine.events();

        engine.start(None).await;
        drop(engine);

        assert!(matches!(events.recv().await, Err(RecvError::Closed)));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_award() {
        let engine = FocusEngine::new(short_config(), Arc::new(SlowFailingProfiles));
        let mut events = engine.events();

        engine.start(None).await;
        assert!(matches!(
            events.recv().await,
            Ok(DomainEvent::SessionCompleted { .. })
        ));
        assert!(matches!(
            events.recv().await,
            Ok(DomainEvent::BreakStarted { .. })
        ));

        engine.shutdown().await;
        assert!(matches!(events.recv().await, Err(RecvError::Closed)));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_engine_cancels_pending_award() {
        let engine = FocusEngine::new(short_config(), Arc::new(SlowFailingProfiles));
        let mut events = engine.events();

        engine.start(None).await;
        assert!(matches!(
            events.recv().await,
            Ok(DomainEvent::SessionCompleted { .. })
        ));
        assert!(matches!(
            events.recv().await,
            Ok(DomainEvent::BreakStarted { .. })
        ));

        drop(engine);
        assert!(matches!(events.recv().await, Err(RecvError::Closed)));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_at_completion_applies_one_outcome() {
        let profiles = Arc::new(MemoryProfileStore::with_profile(Profile::new("u1", "Ada")));
        let engine = FocusEngine::new(short_config(), profiles.clone());
        let mut events = engine.events();

        engine.start(None).await;
        tokio::time::sleep(Duration::from_secs(60)).await;
        engine.stop().await;
        tokio::time::sleep(Duration::from_millis(10)).await;

        let mut received = Vec::new();
        while let Ok(event) = events.try_recv() {
            received.push(event);
        }

        // A stop handled after completion cancels the break that followed it.
        let snapshot = engine.snapshot();
        assert!(!snapshot.is_running);
        assert!(engine.session().borrow().is_none());
        if received.is_empty() {
            assert_eq!(snapshot, TimerSnapshot::idle(minutes(1), 0));
            assert_eq!(profiles.points(), Some(0));
        } else {
            assert_eq!(
                received,
                vec![
                    DomainEvent::SessionCompleted {
                        points_earned: 25,
                        total_cycles_so_far: 1,
                    },
                    DomainEvent::BreakStarted { break_minutes: 1 },
                ]
            );
            assert_eq!(snapshot, TimerSnapshot::idle(minutes(1), 1));
            assert_eq!(profiles.points(), Some(25));
        }

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn setup_with_invalid_config_fails() {
        use crate::domain::repository::duration::MockDurationRepository;
        use crate::domain::repository::message::MockMessageRepository;
        use crate::domain::repository::score::MockScoreRepository;

        let mut duration = MockDurationRepository::new();
        duration
            .expect_focus_duration()
            .returning(|| whatever!("missing"));

        let res = FocusEngine::setup(
            Arc::new(duration),
            Arc::new(MockScoreRepository::new()),
            Arc::new(MockMessageRepository::new()),
            Arc::new(MemoryProfileStore::new()),
        )
        .await;

        assert!(matches!(res, Err(SetupEngineError::Config { .. })));
    }

    struct SlowFailingProfiles;

    #[async_trait::async_trait]
    impl ProfileRepository for SlowFailingProfiles {
        async fn current_profile(&self) -> Result<Option<Profile>, ProfileRepositoryError> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            whatever!("store unreachable")
        }

        async fn save_profile(&self, _profile: Profile) -> Result<(), ProfileRepositoryError> {
            Ok(())
        }
    }

    fn minutes(value: u32) -> PhaseDuration {
        PhaseDuration::try_new(value).unwrap()
    }

    fn short_config() -> WorkerConfig {
        WorkerConfig {
            policy: TimerPolicy {
                focus: minutes(1),
                short_break: minutes(1),
                long_break: minutes(2),
                long_break_interval: LongBreakInterval::try_new(2).unwrap(),
                ..TimerPolicy::default()
            },
            ..WorkerConfig::default()
        }
    }
}

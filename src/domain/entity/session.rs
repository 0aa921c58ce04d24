use crate::domain::entity::duration::PhaseDuration;
use crate::domain::entity::phase::SessionPhase;

/// The assignment a session is linked to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRef {
    pub id: String,
    pub title: Option<String>,
}

impl TaskRef {
    pub fn new(id: impl Into<String>, title: Option<String>) -> Self {
        Self {
            id: id.into(),
            title,
        }
    }
}

/// The session currently owned by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub task: Option<TaskRef>,
    pub focus: PhaseDuration,
    pub break_duration: PhaseDuration,
    pub phase: SessionPhase,
    pub focus_completed: u32,
}

impl ActiveSession {
    /// Creates a session that starts focusing right away.
    pub fn focusing(
        task: Option<TaskRef>,
        focus: PhaseDuration,
        break_duration: PhaseDuration,
    ) -> Self {
        Self {
            task,
            focus,
            break_duration,
            phase: SessionPhase::Focusing,
            focus_completed: 0,
        }
    }

    /// Returns `true` if the session is linked to a task.
    pub fn has_task(&self) -> bool {
        self.task.is_some()
    }
}

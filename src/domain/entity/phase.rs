use std::fmt::{Display, Formatter, Result as FmtResult};

/// Where a session is in its focus/break cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Focusing,
    OnBreak,
    Paused,
    Completed,
    Cancelled,
}

impl Display for SessionPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Focusing => f.write_str("Focusing"),
            Self::OnBreak => f.write_str("On break"),
            Self::Paused => f.write_str("Paused"),
            Self::Completed => f.write_str("Completed"),
            Self::Cancelled => f.write_str("Cancelled"),
        }
    }
}

/// A one-shot notification of a phase boundary. Events are broadcast to the
/// subscribers present at emission time and never replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEvent {
    SessionCompleted {
        points_earned: u32,
        total_cycles_so_far: u32,
    },
    BreakStarted {
        break_minutes: u32,
    },
    BreakEnded {
        message: String,
    },
    Notice {
        message: String,
    },
}

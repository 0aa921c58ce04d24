use crate::domain::entity::duration::PhaseDuration;
use crate::domain::entity::phase::SessionPhase;

/// An immutable view of timer progress, published on every tick and
/// transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerSnapshot {
    pub total_seconds: u32,
    pub remaining_seconds: u32,
    pub is_running: bool,
    pub is_paused: bool,
    pub is_break: bool,
    pub cycle_count: u32,
    pub progress: f32,
}

impl TimerSnapshot {
    /// The snapshot shown while no session exists: a full focus phase, not
    /// running.
    pub fn idle(focus: PhaseDuration, cycle_count: u32) -> Self {
        Self {
            is_running: false,
            ..Self::fresh(focus, false, cycle_count)
        }
    }

    /// The first snapshot of a running focus phase.
    pub fn focus(duration: PhaseDuration, cycle_count: u32) -> Self {
        Self::fresh(duration, false, cycle_count)
    }

    /// The first snapshot of a running break phase.
    pub fn on_break(duration: PhaseDuration, cycle_count: u32) -> Self {
        Self::fresh(duration, true, cycle_count)
    }

    fn fresh(duration: PhaseDuration, is_break: bool, cycle_count: u32) -> Self {
        let total = duration.seconds();
        Self {
            total_seconds: total,
            remaining_seconds: total,
            is_running: true,
            is_paused: false,
            is_break,
            cycle_count,
            progress: 1.0,
        }
    }

    /// Returns the snapshot one second later. Remaining time never drops
    /// below zero.
    pub fn decremented(self) -> Self {
        let remaining = self.remaining_seconds.saturating_sub(1);
        Self {
            remaining_seconds: remaining,
            progress: ratio(remaining, self.total_seconds),
            ..self
        }
    }

    /// Returns a copy with the pause flag set.
    pub fn paused(self, is_paused: bool) -> Self {
        Self { is_paused, ..self }
    }

    /// Returns `true` once the countdown has reached zero.
    pub fn is_elapsed(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Derives the phase from the flags.
    pub fn phase(&self) -> SessionPhase {
        match (self.is_running, self.is_paused, self.is_break) {
            (false, _, _) => SessionPhase::Idle,
            (true, true, _) => SessionPhase::Paused,
            (true, false, true) => SessionPhase::OnBreak,
            (true, false, false) => SessionPhase::Focusing,
        }
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::idle(PhaseDuration::DEFAULT_FOCUS, 0)
    }
}

fn ratio(remaining: u32, total: u32) -> f32 {
    if total == 0 {
        return 0.0;
    }
    (remaining as f32 / total as f32).clamp(0.0, 1.0)
}

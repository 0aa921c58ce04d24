use crate::domain::entity::duration::{LongBreakInterval, PhaseDuration};

/// Tuning values for phase lengths, break escalation and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerPolicy {
    pub focus: PhaseDuration,
    pub short_break: PhaseDuration,
    pub long_break: PhaseDuration,
    pub long_break_interval: LongBreakInterval,
    pub base_points: u32,
    pub task_bonus_points: u32,
}

impl TimerPolicy {
    /// Points earned for one completed focus phase.
    pub fn points_for(&self, linked_task: bool) -> u32 {
        let bonus = if linked_task { self.task_bonus_points } else { 0 };
        self.base_points.saturating_add(bonus)
    }

    /// The break that follows the `cycles`-th completed focus phase.
    pub fn break_after(&self, cycles: u32) -> PhaseDuration {
        if self.long_break_interval.is_long_break_after(cycles) {
            self.long_break
        } else {
            self.short_break
        }
    }
}

impl Default for TimerPolicy {
    fn default() -> Self {
        Self {
            focus: PhaseDuration::DEFAULT_FOCUS,
            short_break: PhaseDuration::DEFAULT_SHORT_BREAK,
            long_break: PhaseDuration::DEFAULT_LONG_BREAK,
            long_break_interval: LongBreakInterval::DEFAULT,
            base_points: 25,
            task_bonus_points: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy() {
        let policy = TimerPolicy::default();
        assert_eq!(policy.focus.minutes(), 25);
        assert_eq!(policy.short_break.minutes(), 5);
        assert_eq!(policy.long_break.minutes(), 15);
        assert_eq!(policy.long_break_interval.get(), 4);
    }

    #[test]
    fn points_formula() {
        let policy = TimerPolicy::default();
        assert_eq!(policy.points_for(true), 35);
        assert_eq!(policy.points_for(false), 25);
    }

    #[test]
    fn break_escalation() {
        let policy = TimerPolicy::default();
        for cycles in 1..=12 {
            let expected = if cycles % 4 == 0 { 15 } else { 5 };
            assert_eq!(policy.break_after(cycles).minutes(), expected, "cycle {cycles}");
        }
    }
}

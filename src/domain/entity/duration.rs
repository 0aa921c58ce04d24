use std::num::NonZeroU32;

use snafu::prelude::*;

const fn non_zero(value: u32) -> NonZeroU32 {
    match NonZeroU32::new(value) {
        Some(value) => value,
        None => panic!("constant must be non-zero"),
    }
}

/// The configured length of one focus or break phase, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PhaseDuration(NonZeroU32);

impl PhaseDuration {
    pub const DEFAULT_FOCUS: Self = Self(non_zero(25));
    pub const DEFAULT_SHORT_BREAK: Self = Self(non_zero(5));
    pub const DEFAULT_LONG_BREAK: Self = Self(non_zero(15));

    /// Try to create a [`PhaseDuration`] from a number of minutes.
    ///
    /// # Errors
    ///
    /// This function will return an error if the integer is zero.
    pub fn try_new(minutes: u32) -> Result<Self, TryNewPhaseDurationError> {
        let minutes = NonZeroU32::new(minutes).context(ZeroSnafu)?;
        Ok(Self(minutes))
    }

    /// Returns the length in minutes.
    pub fn minutes(&self) -> u32 {
        self.0.get()
    }

    /// Returns the length in seconds, the unit the countdown works in.
    pub fn seconds(&self) -> u32 {
        self.0.get().saturating_mul(60)
    }
}

impl TryFrom<u32> for PhaseDuration {
    type Error = TryNewPhaseDurationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

/// An error type of creating a [`PhaseDuration`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum TryNewPhaseDurationError {
    #[snafu(display("Duration must be greater than zero minutes"))]
    #[non_exhaustive]
    Zero,
}

/// How many focus phases complete before a break becomes a long one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongBreakInterval(NonZeroU32);

impl LongBreakInterval {
    pub const DEFAULT: Self = Self(non_zero(4));

    /// Try to create a [`LongBreakInterval`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the interval is zero.
    pub fn try_new(cycles: u32) -> Result<Self, TryNewLongBreakIntervalError> {
        let cycles = NonZeroU32::new(cycles).context(ZeroIntervalSnafu)?;
        Ok(Self(cycles))
    }

    /// Returns the number of focus phases in one long-break period.
    pub fn get(&self) -> u32 {
        self.0.get()
    }

    /// Returns `true` if the break following the given completed cycle is a
    /// long one.
    pub fn is_long_break_after(&self, cycles: u32) -> bool {
        cycles % self.0.get() == 0
    }
}

impl TryFrom<u32> for LongBreakInterval {
    type Error = TryNewLongBreakIntervalError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

/// An error type of creating a [`LongBreakInterval`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum TryNewLongBreakIntervalError {
    #[snafu(display("Long break interval must be at least one session"))]
    #[non_exhaustive]
    ZeroInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_duration_try_new() {
        let duration = PhaseDuration::try_new(25).unwrap();
        assert_eq!(duration.minutes(), 25);
        assert_eq!(duration.seconds(), 1500);
        assert_eq!(
            PhaseDuration::try_new(0),
            Err(TryNewPhaseDurationError::Zero),
        );
    }

    #[test]
    fn phase_duration_try_from() {
        assert_eq!(5.try_into(), Ok(PhaseDuration::try_new(5).unwrap()));
        assert_eq!(
            0.try_into(),
            Err::<PhaseDuration, TryNewPhaseDurationError>(TryNewPhaseDurationError::Zero)
        );
    }

    #[test]
    fn long_break_interval_boundary() {
        let interval = LongBreakInterval::try_new(4).unwrap();
        let long: Vec<u32> = (1..=12)
            .filter(|cycles| interval.is_long_break_after(*cycles))
            .collect();
        assert_eq!(long, vec![4, 8, 12]);
        assert_eq!(
            LongBreakInterval::try_new(0),
            Err(TryNewLongBreakIntervalError::ZeroInterval),
        );
    }
}

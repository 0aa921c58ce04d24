use std::error::Error as StdError;

use snafu::prelude::*;

use crate::domain::entity::duration::{
    LongBreakInterval, PhaseDuration, TryNewLongBreakIntervalError, TryNewPhaseDurationError,
};

/// An abstract interface for accessing phase durations and the break cadence.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DurationRepository: Send + Sync + 'static {
    /// Get duration of a focus phase.
    ///
    /// # Errors
    ///
    /// This function will return an error if failed to get the duration.
    async fn focus_duration(&self) -> Result<PhaseDuration, GetDurationError>;

    /// Get duration of a regular break.
    ///
    /// # Errors
    ///
    /// This function will return an error if failed to get the duration.
    async fn short_break_duration(&self) -> Result<PhaseDuration, GetDurationError>;

    /// Get duration of the break granted every few focus phases.
    ///
    /// # Errors
    ///
    /// This function will return an error if failed to get the duration.
    async fn long_break_duration(&self) -> Result<PhaseDuration, GetDurationError>;

    /// Get how many focus phases make up one long-break period.
    ///
    /// # Errors
    ///
    /// This function will return an error if failed to get the interval.
    async fn long_break_interval(&self) -> Result<LongBreakInterval, GetDurationError>;
}

/// An error type of accessing the repository of [`PhaseDuration`]s.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum GetDurationError {
    #[snafu(display("Could not create an invalid duration"))]
    #[non_exhaustive]
    Invalid { source: TryNewPhaseDurationError },
    #[snafu(display("Could not create an invalid long break interval"))]
    #[non_exhaustive]
    InvalidInterval {
        source: TryNewLongBreakIntervalError,
    },
    #[snafu(whatever, display("Load duration failed: {message}"))]
    #[non_exhaustive]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duration_repository_get() {
        let mock = init_mock();

        assert_eq!(
            mock.focus_duration().await.unwrap(),
            PhaseDuration::try_new(25).unwrap()
        );
        assert!(matches!(
            mock.long_break_interval().await,
            Err(GetDurationError::InvalidInterval { .. })
        ));
        assert!(mock.short_break_duration().await.is_err());
    }

    fn init_mock() -> MockDurationRepository {
        let mut mock = MockDurationRepository::new();
        mock.expect_focus_duration()
            .returning(|| Ok(PhaseDuration::try_new(25).unwrap()));
        mock.expect_short_break_duration()
            .returning(|| whatever!("error"));
        mock.expect_long_break_interval().returning(|| {
            LongBreakInterval::try_new(0).context(InvalidIntervalSnafu)
        });
        mock
    }
}

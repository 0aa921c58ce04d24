use std::error::Error as StdError;

use snafu::prelude::*;

/// An abstract interface for accessing the scoring policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ScoreRepository: Send + Sync + 'static {
    /// Get the points every completed focus phase earns.
    ///
    /// # Errors
    ///
    /// This function will return an error if failed to get the value.
    async fn base_points(&self) -> Result<u32, GetScoreError>;

    /// Get the extra points for a focus phase linked to a task.
    ///
    /// # Errors
    ///
    /// This function will return an error if failed to get the value.
    async fn task_bonus_points(&self) -> Result<u32, GetScoreError>;
}

/// An error type of accessing the scoring policy.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum GetScoreError {
    #[snafu(whatever, display("Load score failed: {message}"))]
    #[non_exhaustive]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

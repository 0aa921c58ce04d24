use std::error::Error as StdError;

use snafu::prelude::*;

use crate::domain::entity::Profile;

/// The store that holds the signed-in user's point balance.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProfileRepository: Send + Sync + 'static {
    /// Get the profile of the signed-in user, or `None` without one.
    ///
    /// # Errors
    ///
    /// This function will return an error if the store is unreachable.
    async fn current_profile(&self) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Persist the profile, replacing the stored one.
    ///
    /// # Errors
    ///
    /// This function will return an error if the store is unreachable.
    async fn save_profile(&self, profile: Profile) -> Result<(), ProfileRepositoryError>;
}

/// An error type of accessing the [`ProfileRepository`].
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ProfileRepositoryError {
    #[snafu(whatever, display("Profile store failed: {message}"))]
    #[non_exhaustive]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

use snafu::prelude::*;

use crate::domain::repository::{ProfileRepository, ProfileRepositoryError};

/// Credit `points` to the signed-in user's profile.
///
/// # Errors
///
/// This function will return an error if there is no signed-in profile or the
/// store fails to load or save it.
pub async fn award_points(
    profiles: &dyn ProfileRepository,
    points: u32,
) -> Result<u32, AwardPointsError> {
    let profile = profiles
        .current_profile()
        .await
        .context(LoadSnafu)?
        .context(NoProfileSnafu)?;

    let profile = profile.credited(points);
    let balance = profile.points;
    profiles.save_profile(profile).await.context(SaveSnafu)?;
    Ok(balance)
}

/// An error type of awarding points after a completed focus phase.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum AwardPointsError {
    #[snafu(display("No signed-in profile to credit"))]
    NoProfile,
    #[snafu(display("Could not load the current profile"))]
    Load { source: ProfileRepositoryError },
    #[snafu(display("Could not save the credited profile"))]
    Save { source: ProfileRepositoryError },
    #[snafu(display("Points award task aborted"))]
    Aborted { source: tokio::task::JoinError },
}

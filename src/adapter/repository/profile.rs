use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use snafu::prelude::*;

use crate::domain::entity::Profile;
use crate::domain::repository::{ProfileRepository, ProfileRepositoryError};

/// A [`ProfileRepository`] that keeps the profile in memory.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profile: Mutex<Option<Profile>>,
}

impl MemoryProfileStore {
    /// Creates a store without a signed-in profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `profile`.
    pub fn with_profile(profile: Profile) -> Self {
        Self {
            profile: Mutex::new(Some(profile)),
        }
    }

    /// Returns the stored point balance, if any.
    pub fn points(&self) -> Option<u32> {
        self.lock().as_ref().map(|profile| profile.points)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Profile>> {
        self.profile
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl ProfileRepository for MemoryProfileStore {
    async fn current_profile(&self) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(self.lock().clone())
    }

    async fn save_profile(&self, profile: Profile) -> Result<(), ProfileRepositoryError> {
        *self.lock() = Some(profile);
        Ok(())
    }
}

/// A [`ProfileRepository`] persisting the profile as a JSON file. A missing
/// file means nobody is signed in.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    /// Creates a new [`JsonProfileStore`].
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `profile` unless a profile file already exists. Returns `true`
    /// if a new file was created.
    ///
    /// # Errors
    ///
    /// This function will return an error if the file can not be inspected or
    /// written.
    pub async fn ensure(&self, profile: Profile) -> Result<bool, ProfileRepositoryError> {
        let exists = whatever!(
            tokio::fs::try_exists(&self.path).await,
            "Could not inspect {}",
            self.path.display()
        );
        if exists {
            return Ok(false);
        }

        self.save_profile(profile).await?;
        Ok(true)
    }
}

#[async_trait::async_trait]
impl ProfileRepository for JsonProfileStore {
    async fn current_profile(&self) -> Result<Option<Profile>, ProfileRepositoryError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            res => whatever!(res, "Could not read {}", self.path.display()),
        };

        let profile = whatever!(
            serde_json::from_str(&content),
            "Could not parse profile in {}",
            self.path.display()
        );
        Ok(Some(profile))
    }

    async fn save_profile(&self, profile: Profile) -> Result<(), ProfileRepositoryError> {
        let content = whatever!(
            serde_json::to_string_pretty(&profile),
            "Could not serialize profile {}",
            profile.id
        );

        whatever!(
            tokio::fs::write(&self.path, content).await,
            "Could not write {}",
            self.path.display()
        );
        tracing::debug!(path = %self.path.display(), points = profile.points, "Saved profile");
        Ok(())
    }
}

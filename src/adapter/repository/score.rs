use std::sync::Arc;

use crate::adapter::config::Configuration;
use crate::domain::repository::{GetScoreError, ScoreRepository};

/// A [`ScoreRepository`] implementation which reads configuration files.
pub struct ScoreConfiguration {
    config: Arc<Configuration>,
}

impl ScoreConfiguration {
    /// Creates a new [`ScoreConfiguration`].
    pub fn new(config: Arc<Configuration>) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl ScoreRepository for ScoreConfiguration {
    async fn base_points(&self) -> Result<u32, GetScoreError> {
        Ok(self.config.points.base)
    }

    async fn task_bonus_points(&self) -> Result<u32, GetScoreError> {
        Ok(self.config.points.task_bonus)
    }
}

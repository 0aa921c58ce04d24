use std::sync::Arc;

use crate::adapter::config::Configuration;
use crate::domain::entity::{LongBreakInterval, PhaseDuration};
use crate::domain::repository::{DurationRepository, GetDurationError};

/// A [`DurationRepository`] implementation which reads configuration files.
pub struct DurationConfiguration {
    config: Arc<Configuration>,
}

impl DurationConfiguration {
    /// Creates a new [`DurationConfiguration`].
    pub fn new(config: Arc<Configuration>) -> Self {
        Self { config }
    }

    fn phase(minutes: u32) -> Result<PhaseDuration, GetDurationError> {
        PhaseDuration::try_new(minutes).map_err(|err| GetDurationError::Invalid { source: err })
    }
}

#[async_trait::async_trait]
impl DurationRepository for DurationConfiguration {
    async fn focus_duration(&self) -> Result<PhaseDuration, GetDurationError> {
        Self::phase(self.config.duration.focus)
    }

    async fn short_break_duration(&self) -> Result<PhaseDuration, GetDurationError> {
        Self::phase(self.config.duration.short_break)
    }

    async fn long_break_duration(&self) -> Result<PhaseDuration, GetDurationError> {
        Self::phase(self.config.duration.long_break)
    }

    async fn long_break_interval(&self) -> Result<LongBreakInterval, GetDurationError> {
        LongBreakInterval::try_new(self.config.duration.long_break_interval)
            .map_err(|err| GetDurationError::InvalidInterval { source: err })
    }
}

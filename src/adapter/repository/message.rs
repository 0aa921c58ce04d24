use std::sync::Arc;

use crate::adapter::config::Configuration;
use crate::domain::entity::NoticeMessage;
use crate::domain::repository::{GetMessageError, MessageRepository};

/// A [`MessageRepository`] implementation which reads configuration files.
pub struct MessageConfiguration {
    config: Arc<Configuration>,
}

impl MessageConfiguration {
    /// Creates a new [`MessageConfiguration`].
    pub fn new(config: Arc<Configuration>) -> Self {
        Self { config }
    }

    fn message(text: &str) -> Result<NoticeMessage, GetMessageError> {
        NoticeMessage::try_new(text.to_owned())
            .map_err(|err| GetMessageError::Invalid { source: err })
    }
}

#[async_trait::async_trait]
impl MessageRepository for MessageConfiguration {
    async fn break_ended_message(&self) -> Result<NoticeMessage, GetMessageError> {
        Self::message(&self.config.message.break_ended)
    }

    async fn break_skipped_message(&self) -> Result<NoticeMessage, GetMessageError> {
        Self::message(&self.config.message.break_skipped)
    }

    async fn points_fallback_message(&self) -> Result<NoticeMessage, GetMessageError> {
        Self::message(&self.config.message.points_fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn read_messages() {
        let mut config = Configuration::default();
        config.message.points_fallback = String::new();
        let repository = MessageConfiguration::new(Arc::new(config));

        assert_eq!(
            repository.break_ended_message().await.unwrap().text(),
            "Break's over! Ready to focus again?"
        );
        assert!(matches!(
            repository.points_fallback_message().await,
            Err(GetMessageError::Invalid { .. })
        ));
    }
}

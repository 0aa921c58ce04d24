use std::error::Error as StdError;

use snafu::prelude::*;

use crate::domain::entity::message::{NoticeMessage, TryNewNoticeMessageError};

/// An abstract interface for accessing the texts of textual events.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MessageRepository: Send + Sync + 'static {
    /// Get the message sent when a break runs out.
    ///
    /// # Errors
    ///
    /// This function will return an error if failed to get the message.
    async fn break_ended_message(&self) -> Result<NoticeMessage, GetMessageError>;

    /// Get the message sent when the user skips a break.
    ///
    /// # Errors
    ///
    /// This function will return an error if failed to get the message.
    async fn break_skipped_message(&self) -> Result<NoticeMessage, GetMessageError>;

    /// Get the message sent when awarding points fails.
    ///
    /// # Errors
    ///
    /// This function will return an error if failed to get the message.
    async fn points_fallback_message(&self) -> Result<NoticeMessage, GetMessageError>;
}

/// An error type of accessing the repository of [`NoticeMessage`]s.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum GetMessageError {
    #[snafu(display("Could not create an invalid message"))]
    #[non_exhaustive]
    Invalid { source: TryNewNoticeMessageError },
    #[snafu(whatever, display("Load message failed: {message}"))]
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
    async fn message_repository_get() {
        let mock = init_mock();
        assert_eq!(
            mock.break_ended_message().await.unwrap(),
            NoticeMessage::try_new("over".into()).unwrap()
        );
        assert!(matches!(
            mock.break_skipped_message().await,
            Err(GetMessageError::Invalid { .. })
        ));
    }

    fn init_mock() -> MockMessageRepository {
        let mut mock = MockMessageRepository::new();
        mock.expect_break_ended_message()
            .return_once(|| Ok(NoticeMessage::try_new("over".into()).unwrap()));
        mock.expect_break_skipped_message()
            .return_once(|| NoticeMessage::try_new(String::new()).context(InvalidSnafu));
        mock
    }
}

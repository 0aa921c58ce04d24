use snafu::prelude::*;

/// Text carried by a [`DomainEvent`] that is shown to the user.
///
/// [`DomainEvent`]: crate::domain::entity::DomainEvent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeMessage(String);

impl NoticeMessage {
    /// Try to create a [`NoticeMessage`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the text is empty.
    pub fn try_new(text: String) -> Result<Self, TryNewNoticeMessageError> {
        ensure!(!text.trim().is_empty(), EmptySnafu);
        Ok(Self(text))
    }

    /// Returns the text of this [`NoticeMessage`].
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl From<NoticeMessage> for String {
    fn from(value: NoticeMessage) -> Self {
        value.0
    }
}

/// An error type of creating a [`NoticeMessage`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum TryNewNoticeMessageError {
    #[snafu(display("Notice message must be non-empty"))]
    #[non_exhaustive]
    Empty,
}

/// The messages the engine attaches to its textual events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeMessages {
    pub break_ended: NoticeMessage,
    pub break_skipped: NoticeMessage,
    pub points_fallback: NoticeMessage,
}

impl Default for NoticeMessages {
    fn default() -> Self {
        Self {
            break_ended: NoticeMessage("Break's over! Ready to focus again?".to_owned()),
            break_skipped: NoticeMessage("Break skipped. Start when you're ready!".to_owned()),
            points_fallback: NoticeMessage("Points saved locally".to_owned()),
        }
    }
}

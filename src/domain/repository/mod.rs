pub mod duration;
pub mod message;
pub mod profile;
pub mod score;

pub use duration::{DurationRepository, GetDurationError};
pub use message::{GetMessageError, MessageRepository};
pub use profile::{ProfileRepository, ProfileRepositoryError};
pub use score::{GetScoreError, ScoreRepository};

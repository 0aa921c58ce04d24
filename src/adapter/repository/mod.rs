mod duration;
mod message;
mod profile;
mod score;

pub use duration::DurationConfiguration;
pub use message::MessageConfiguration;
pub use profile::{JsonProfileStore, MemoryProfileStore};
pub use score::ScoreConfiguration;

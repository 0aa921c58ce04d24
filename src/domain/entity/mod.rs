pub mod duration;
pub mod event;
pub mod message;
pub mod phase;
pub mod policy;
pub mod profile;
pub mod session;
pub mod snapshot;

pub use duration::{LongBreakInterval, PhaseDuration};
pub use event::DomainEvent;
pub use message::{NoticeMessage, NoticeMessages};
pub use phase::SessionPhase;
pub use policy::TimerPolicy;
pub use profile::Profile;
pub use session::{ActiveSession, TaskRef};
pub use snapshot::TimerSnapshot;

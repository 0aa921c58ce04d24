pub mod inbound;
pub mod reward;

mod app;
mod worker;

pub use app::{FocusEngine, SetupEngineError};
pub use inbound::TimerPort;
pub use worker::{LoadWorkerConfigError, WorkerConfig as EngineConfig};

pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{run_mix, run_mix_reported};
pub use types::{MixStage, NoOpReporter, ProgressReporter};

pub mod clock;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod run_loop;
pub mod sampler;
pub mod state;

pub use clock::{Clock, ManualClock, MonotonicClock, WallClock};
pub use command::{Command, Frequency};
pub use dispatch::{Dispatcher, Outcome, UnknownPolicy};
pub use error::{ConfigError, RunError};
pub use run_loop::{
    CommandCounts, FrequencyLoop, RunConfig, RunReport, Sleeper, StopReason, ThreadSleeper,
};
pub use sampler::{BucketedSampler, ClockSampler, Sampler, ScriptedSampler};
pub use state::ProcessState;

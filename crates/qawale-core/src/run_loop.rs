use crate::command::Command;
use crate::dispatch::{Dispatcher, Outcome, UnknownPolicy};
use crate::error::{ConfigError, RunError};
use crate::sampler::Sampler;
use crate::state::ProcessState;
use log::{debug, info};
use serde::Serialize;
use std::io::Write;
use std::thread;
use std::time::Duration;

pub const DEFAULT_ITERATIONS: u64 = 10;
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    /// `None` runs until END is dispatched.
    pub iterations: Option<u64>,
    pub delay: Duration,
    pub unknown: UnknownPolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: Some(DEFAULT_ITERATIONS),
            delay: DEFAULT_DELAY,
            unknown: UnknownPolicy::Ignore,
        }
    }
}

impl RunConfig {
    /// Validate raw command-line values. An iteration count of 0 means
    /// unbounded.
    pub fn new(iterations: i64, delay_secs: f64) -> Result<Self, ConfigError> {
        if iterations < 0 {
            return Err(ConfigError::NegativeIterations(iterations));
        }
        if !delay_secs.is_finite() {
            return Err(ConfigError::NonFiniteDelay(delay_secs));
        }
        if delay_secs < 0.0 {
            return Err(ConfigError::NegativeDelay(delay_secs));
        }
        let delay = Duration::try_from_secs_f64(delay_secs)
            .map_err(|_| ConfigError::DelayTooLarge(delay_secs))?;

        Ok(Self {
            iterations: (iterations > 0).then_some(iterations as u64),
            delay,
            unknown: UnknownPolicy::Ignore,
        })
    }

    pub fn unbounded(delay: Duration) -> Self {
        Self {
            iterations: None,
            delay,
            ..Self::default()
        }
    }

    pub fn bounded(iterations: u64, delay: Duration) -> Self {
        Self {
            iterations: Some(iterations),
            delay,
            ..Self::default()
        }
    }

    pub fn with_unknown_policy(mut self, unknown: UnknownPolicy) -> Self {
        self.unknown = unknown;
        self
    }
}

/// Blocking wait between iterations.
pub trait Sleeper {
    fn sleep(&mut self, delay: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, delay: Duration) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    BudgetExhausted,
    EndReceived,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommandCounts {
    pub start: u64,
    pub print: u64,
    pub add: u64,
    pub subtract: u64,
    pub end: u64,
}

impl CommandCounts {
    fn record(&mut self, command: Command) {
        let slot = match command {
            Command::Start => &mut self.start,
            Command::Print => &mut self.print,
            Command::Add => &mut self.add,
            Command::Subtract => &mut self.subtract,
            Command::End => &mut self.end,
        };
        *slot += 1;
    }

    pub fn total(&self) -> u64 {
        self.start + self.print + self.add + self.subtract + self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub iterations: u64,
    pub commands: CommandCounts,
    pub unknown_frequencies: u64,
    pub final_memory: i64,
    pub stop_reason: StopReason,
}

/// Sample, dispatch, wait; repeated until the budget runs out or END shows up.
pub struct FrequencyLoop<S: Sampler, Z: Sleeper = ThreadSleeper> {
    sampler: S,
    sleeper: Z,
    dispatcher: Dispatcher,
    config: RunConfig,
}

impl<S: Sampler> FrequencyLoop<S, ThreadSleeper> {
    pub fn new(sampler: S, config: RunConfig) -> Self {
        Self::with_sleeper(sampler, ThreadSleeper, config)
    }
}

impl<S: Sampler, Z: Sleeper> FrequencyLoop<S, Z> {
    pub fn with_sleeper(sampler: S, sleeper: Z, config: RunConfig) -> Self {
        Self {
            sampler,
            sleeper,
            dispatcher: Dispatcher::new(config.unknown),
            config,
        }
    }

    /// Execute one run, writing command text to `out`. State starts fresh on
    /// every call.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<RunReport, RunError> {
        let mut state = ProcessState::new();
        let mut commands = CommandCounts::default();
        let mut unknown_frequencies = 0u64;
        let mut completed = 0u64;

        let stop_reason = loop {
            if let Some(limit) = self.config.iterations {
                if completed >= limit {
                    break StopReason::BudgetExhausted;
                }
            }

            let freq = self.sampler.sample();
            let outcome = self.dispatcher.dispatch(freq, &mut state);
            completed += 1;

            match &outcome {
                Outcome::Executed { command, .. } => {
                    debug!("iteration {completed}: {freq} -> {command}");
                    commands.record(*command);
                }
                Outcome::Unknown { .. } => {
                    debug!("iteration {completed}: {freq} -> no command");
                    unknown_frequencies += 1;
                }
            }

            if let Some(line) = outcome.line() {
                writeln!(out, "{line}")?;
                out.flush()?;
            }

            if !state.is_running() {
                break StopReason::EndReceived;
            }

            self.sleeper.sleep(self.config.delay);
        };

        info!(
            "run stopped after {completed} iterations ({stop_reason:?}), memory = {}",
            state.memory()
        );

        Ok(RunReport {
            iterations: completed,
            commands,
            unknown_frequencies,
            final_memory: state.memory(),
            stop_reason,
        })
    }
}

use crate::runtime::config::{ClockKind, RuntimeConfig, SamplingMode};
use crate::runtime::logging::init_tracing;
use anyhow::{Context, Result};
use clap::Parser;
use qawale_core::command::END_FREQ;
use qawale_core::{
    BucketedSampler, Clock, ClockSampler, Frequency, FrequencyLoop, MonotonicClock, RunError,
    RunReport, Sampler, ScriptedSampler, WallClock,
};
use std::io::{self, Write};
use tracing::{info, warn};

enum SystemClock {
    Wall(WallClock),
    Monotonic(MonotonicClock),
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        match self {
            Self::Wall(c) => c.now_ms(),
            Self::Monotonic(c) => c.now_ms(),
        }
    }
}

enum SignalSource {
    Raw(ClockSampler<SystemClock>),
    Bucketed(BucketedSampler<SystemClock>),
    Replay(ScriptedSampler),
}

impl SignalSource {
    /// Clock-driven sources stay in `[0, 1000)` and so can never produce END.
    /// A replay ends only if its sequence carries END's frequency.
    fn can_end(&self) -> bool {
        match self {
            Self::Replay(s) => s.contains(END_FREQ),
            Self::Raw(_) | Self::Bucketed(_) => false,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::Raw(_) => "clock",
            Self::Bucketed(_) => "bucketed clock",
            Self::Replay(_) => "replay",
        }
    }
}

impl Sampler for SignalSource {
    fn sample(&mut self) -> Frequency {
        match self {
            Self::Raw(s) => s.sample(),
            Self::Bucketed(s) => s.sample(),
            Self::Replay(s) => s.sample(),
        }
    }
}

fn build_signal_source(config: &RuntimeConfig) -> SignalSource {
    if let Some(replay) = &config.replay {
        return SignalSource::Replay(replay.clone());
    }

    let clock = match config.clock {
        ClockKind::Wall => SystemClock::Wall(WallClock),
        ClockKind::Monotonic => SystemClock::Monotonic(MonotonicClock::new()),
    };
    match config.sampling {
        SamplingMode::Raw => SignalSource::Raw(ClockSampler::new(clock)),
        SamplingMode::Bucketed => SignalSource::Bucketed(BucketedSampler::new(clock)),
    }
}

pub fn run_from_args() -> Result<()> {
    let config = RuntimeConfig::parse();
    run(config)
}

pub fn run(config: RuntimeConfig) -> Result<()> {
    init_tracing(config.json_logs);

    let run_config = config
        .run_config()
        .context("invalid run configuration")?;
    let source = build_signal_source(&config);

    if run_config.iterations.is_none() && !source.can_end() {
        warn!(
            source = source.describe(),
            "Unbounded run on a signal that never yields END, stop with Ctrl-C"
        );
    }

    info!(
        iterations = ?run_config.iterations,
        delay_ms = run_config.delay.as_millis() as u64,
        source = source.describe(),
        unknown = ?run_config.unknown,
        "Starting frequency loop"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut frequency_loop = FrequencyLoop::new(source, run_config);
    let report = match frequency_loop.run(&mut out) {
        Ok(report) => report,
        Err(err) if is_closed_output(&err) => {
            info!("stdout closed by reader, stopping run");
            return Ok(());
        }
        Err(err) => return Err(err).context("frequency loop aborted"),
    };

    log_report(&report);

    if config.summary_json {
        let summary = serde_json::to_string(&report).context("failed to encode run report")?;
        match writeln!(out, "{summary}") {
            Err(err) if err.kind() != io::ErrorKind::BrokenPipe => {
                return Err(err).context("failed to write run report");
            }
            _ => {}
        }
    }

    Ok(())
}

/// A reader that goes away (`qawale | head -1`) ends the run normally.
fn is_closed_output(err: &RunError) -> bool {
    match err {
        RunError::Output(io_err) => io_err.kind() == io::ErrorKind::BrokenPipe,
    }
}

fn log_report(report: &RunReport) {
    info!(
        iterations = report.iterations,
        commands = report.commands.total(),
        unknown_frequencies = report.unknown_frequencies,
        final_memory = report.final_memory,
        stop_reason = ?report.stop_reason,
        "Run complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> RuntimeConfig {
        RuntimeConfig::try_parse_from(std::iter::once("qawale").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn replay_takes_precedence_over_clock_options() {
        let source = build_signal_source(&config(&["--replay", "1000", "--sampling", "bucketed"]));
        assert!(matches!(source, SignalSource::Replay(_)));
        assert!(source.can_end());
    }

    #[test]
    fn replay_without_end_cannot_end() {
        let source = build_signal_source(&config(&["--replay", "200,600"]));
        assert!(matches!(source, SignalSource::Replay(_)));
        assert!(!source.can_end());
    }

    #[test]
    fn only_broken_pipe_counts_as_closed_output() {
        let closed = RunError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        let denied = RunError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(is_closed_output(&closed));
        assert!(!is_closed_output(&denied));
    }

    #[test]
    fn clock_sources_cannot_end() {
        let raw = build_signal_source(&config(&["--clock", "monotonic"]));
        assert!(matches!(raw, SignalSource::Raw(_)));
        assert!(!raw.can_end());

        let mut bucketed = build_signal_source(&config(&["--sampling", "bucketed"]));
        assert!(!bucketed.can_end());
        let freq = bucketed.sample().value();
        assert!(freq == 500 || freq == 100, "unexpected bucket {freq}");
    }

    #[test]
    fn raw_clock_samples_stay_below_cycle() {
        let mut source = build_signal_source(&config(&[]));
        for _ in 0..100 {
            assert!(source.sample().value() < 1000);
        }
    }
}

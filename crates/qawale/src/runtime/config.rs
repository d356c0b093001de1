use clap::{Parser, ValueEnum};
use qawale_core::{ConfigError, RunConfig, ScriptedSampler, UnknownPolicy};

const AFTER_HELP: &str = r#"ENVIRONMENT VARIABLES:
    RUST_LOG                Set log filter (e.g., RUST_LOG=debug,qawale_core=trace)

EXAMPLES:
    # Run 10 iterations, one second apart (default)
    qawale

    # Check the frequency every half second, 20 times
    qawale -n 20 -d 0.5

    # Replay a fixed signal until END is dispatched
    qawale -n 0 -d 0 --replay 200,600,600,1000
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClockKind {
    /// Milliseconds since the Unix epoch
    Wall,
    /// Milliseconds since process start
    Monotonic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SamplingMode {
    /// Use the clock reading modulo 1000 directly
    Raw,
    /// Collapse the reading into the legacy 500/300/100 buckets
    Bucketed,
}

/// Qawale - Frequency based programming language
#[derive(Debug, Clone, Parser)]
#[command(name = "qawale", version, after_help = AFTER_HELP)]
pub struct RuntimeConfig {
    /// Number of iterations to run (0 = run until END)
    #[arg(short = 'n', long, default_value_t = 10, allow_negative_numbers = true)]
    pub iterations: i64,

    /// Delay between frequency checks in seconds
    #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub delay: f64,

    /// Time source for frequency sampling
    #[arg(long, value_enum, default_value_t = ClockKind::Wall)]
    pub clock: ClockKind,

    /// How clock readings become frequencies
    #[arg(long, value_enum, default_value_t = SamplingMode::Raw)]
    pub sampling: SamplingMode,

    /// Print a notice for frequencies that map to no command
    #[arg(long)]
    pub report_unknown: bool,

    /// Replay a comma-separated frequency list instead of reading the clock
    #[arg(long, value_name = "FREQS")]
    pub replay: Option<ScriptedSampler>,

    /// Output logs in JSON format
    #[arg(long)]
    pub json_logs: bool,

    /// Print the run report as a JSON line on stdout when the run ends
    #[arg(long)]
    pub summary_json: bool,
}

impl RuntimeConfig {
    pub fn run_config(&self) -> Result<RunConfig, ConfigError> {
        let unknown = if self.report_unknown {
            UnknownPolicy::Report
        } else {
            UnknownPolicy::Ignore
        };
        Ok(RunConfig::new(self.iterations, self.delay)?.with_unknown_policy(unknown))
    }
}

use thiserror::Error;

/// Rejected run configuration. Raised before any iteration runs.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("iteration count must be non-negative (got {0})")]
    NegativeIterations(i64),

    #[error("delay must be non-negative seconds (got {0})")]
    NegativeDelay(f64),

    #[error("delay must be a finite number of seconds (got {0})")]
    NonFiniteDelay(f64),

    #[error("delay of {0} seconds is too large")]
    DelayTooLarge(f64),

    #[error("replay sequence must contain at least one frequency")]
    EmptyReplay,

    #[error("invalid frequency in replay sequence: {0:?}")]
    InvalidFrequency(String),
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to write console output")]
    Output(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn output_error_keeps_io_cause_out_of_message() {
        let err = RunError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert_eq!(err.to_string(), "failed to write console output");
        assert_eq!(err.source().map(|e| e.to_string()).as_deref(), Some("pipe closed"));
    }
}

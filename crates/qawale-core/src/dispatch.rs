use crate::command::{Command, Frequency, ADD_AMOUNT, SUBTRACT_AMOUNT};
use crate::state::ProcessState;

/// What to do with a frequency that is not bound to any command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownPolicy {
    #[default]
    Ignore,
    /// Emit `Unknown frequency: {freq}`.
    Report,
}

/// Result of dispatching one frequency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Executed { command: Command, line: String },
    Unknown { freq: Frequency, notice: Option<String> },
}

impl Outcome {
    pub fn command(&self) -> Option<Command> {
        match self {
            Outcome::Executed { command, .. } => Some(*command),
            Outcome::Unknown { .. } => None,
        }
    }

    /// Console text produced by the dispatch, if any.
    pub fn line(&self) -> Option<&str> {
        match self {
            Outcome::Executed { line, .. } => Some(line.as_str()),
            Outcome::Unknown { notice, .. } => notice.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    unknown: UnknownPolicy,
}

impl Dispatcher {
    pub fn new(unknown: UnknownPolicy) -> Self {
        Self { unknown }
    }

    /// Apply the command bound to `freq` to `state`. Unmapped values leave
    /// `state` untouched.
    pub fn dispatch(&self, freq: Frequency, state: &mut ProcessState) -> Outcome {
        let Some(command) = Command::from_frequency(freq) else {
            let notice = match self.unknown {
                UnknownPolicy::Ignore => None,
                UnknownPolicy::Report => Some(format!("Unknown frequency: {freq}")),
            };
            return Outcome::Unknown { freq, notice };
        };

        let line = match command {
            Command::Start => "Program started...".to_string(),
            Command::Print => format!("Memory: {}", state.memory()),
            Command::Add => {
                let memory = state.add(ADD_AMOUNT);
                format!("Added {ADD_AMOUNT}. New memory value: {memory}")
            }
            Command::Subtract => {
                let memory = state.subtract(SUBTRACT_AMOUNT);
                format!("Subtracted {SUBTRACT_AMOUNT}. New memory value: {memory}")
            }
            Command::End => {
                state.stop();
                "Program ended.".to_string()
            }
        };

        Outcome::Executed { command, line }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatch(state: &mut ProcessState, raw: u32) -> Outcome {
        Dispatcher::default().dispatch(Frequency(raw), state)
    }

    #[test]
    fn print_after_init_reports_zero() {
        let mut state = ProcessState::new();
        let outcome = dispatch(&mut state, 400);
        assert_eq!(outcome.line(), Some("Memory: 0"));
        assert_eq!(outcome.command(), Some(Command::Print));
    }

    #[test]
    fn add_then_subtract_prints_each_snapshot() {
        let mut state = ProcessState::new();
        let added = dispatch(&mut state, 600);
        let subtracted = dispatch(&mut state, 800);
        assert_eq!(added.line(), Some("Added 10. New memory value: 10"));
        assert_eq!(subtracted.line(), Some("Subtracted 5. New memory value: 5"));
        assert_eq!(state.memory(), 5);
    }

    #[test]
    fn subtract_can_go_negative() {
        let mut state = ProcessState::new();
        let outcome = dispatch(&mut state, 800);
        assert_eq!(outcome.line(), Some("Subtracted 5. New memory value: -5"));
    }

    #[test]
    fn start_and_end_lines() {
        let mut state = ProcessState::new();
        assert_eq!(dispatch(&mut state, 200).line(), Some("Program started..."));
        assert!(state.is_running());
        assert_eq!(dispatch(&mut state, 1000).line(), Some("Program ended."));
        assert!(!state.is_running());
    }

    #[test]
    fn unknown_is_silent_by_default() {
        let mut state = ProcessState::new();
        let outcome = dispatch(&mut state, 123);
        assert_eq!(
            outcome,
            Outcome::Unknown {
                freq: Frequency(123),
                notice: None
            }
        );
        assert_eq!(outcome.line(), None);
        assert_eq!(state, ProcessState::new());
    }

    #[test]
    fn unknown_is_reported_when_asked() {
        let mut state = ProcessState::new();
        let outcome = Dispatcher::new(UnknownPolicy::Report).dispatch(Frequency(500), &mut state);
        assert_eq!(outcome.line(), Some("Unknown frequency: 500"));
        assert_eq!(state, ProcessState::new());
    }
}

use serde::Serialize;
use std::fmt;

/// A sampled signal value. Clock samplers stay within `[0, 1000)`; injected
/// samplers may produce anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Frequency(pub u32);

impl Frequency {
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for Frequency {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

pub const START_FREQ: Frequency = Frequency(200);
pub const PRINT_FREQ: Frequency = Frequency(400);
pub const ADD_FREQ: Frequency = Frequency(600);
pub const SUBTRACT_FREQ: Frequency = Frequency(800);
pub const END_FREQ: Frequency = Frequency(1000);

pub const ADD_AMOUNT: i64 = 10;
pub const SUBTRACT_AMOUNT: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Start,
    Print,
    Add,
    Subtract,
    End,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::Start,
        Command::Print,
        Command::Add,
        Command::Subtract,
        Command::End,
    ];

    /// Exact-match lookup; anything off the five bound values is `None`.
    pub fn from_frequency(freq: Frequency) -> Option<Self> {
        match freq {
            START_FREQ => Some(Command::Start),
            PRINT_FREQ => Some(Command::Print),
            ADD_FREQ => Some(Command::Add),
            SUBTRACT_FREQ => Some(Command::Subtract),
            END_FREQ => Some(Command::End),
            _ => None,
        }
    }

    pub fn frequency(self) -> Frequency {
        match self {
            Command::Start => START_FREQ,
            Command::Print => PRINT_FREQ,
            Command::Add => ADD_FREQ,
            Command::Subtract => SUBTRACT_FREQ,
            Command::End => END_FREQ,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Start => "START",
            Command::Print => "PRINT",
            Command::Add => "ADD",
            Command::Subtract => "SUBTRACT",
            Command::End => "END",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

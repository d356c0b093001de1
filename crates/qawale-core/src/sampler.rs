use crate::clock::Clock;
use crate::command::Frequency;
use crate::error::ConfigError;
use std::str::FromStr;

/// Cycle length of a clock-driven signal, in milliseconds.
pub const CYCLE_MS: u64 = 1000;

// Legacy bucket values. Note the middle bucket is unreachable: anything below
// 300 is already below 500.
pub const LOW_FREQ_BUCKET: u32 = 500;
pub const MID_FREQ_BUCKET: u32 = 300;
pub const HIGH_FREQ_BUCKET: u32 = 100;

/// Produces the frequency for the current instant.
pub trait Sampler {
    fn sample(&mut self) -> Frequency;
}

impl<S: Sampler + ?Sized> Sampler for &mut S {
    fn sample(&mut self) -> Frequency {
        (**self).sample()
    }
}

fn cycle_position(clock: &impl Clock) -> u32 {
    (clock.now_ms() % CYCLE_MS) as u32
}

/// Raw `now_ms % 1000`. Never yields END's bound value.
#[derive(Debug, Clone, Default)]
pub struct ClockSampler<C: Clock> {
    clock: C,
}

impl<C: Clock> ClockSampler<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> Sampler for ClockSampler<C> {
    fn sample(&mut self) -> Frequency {
        Frequency(cycle_position(&self.clock))
    }
}

/// Collapses the cycle position into one of three buckets. None of the bucket
/// values is bound to a command, so this source never triggers anything.
#[derive(Debug, Clone, Default)]
pub struct BucketedSampler<C: Clock> {
    clock: C,
}

impl<C: Clock> BucketedSampler<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> Sampler for BucketedSampler<C> {
    fn sample(&mut self) -> Frequency {
        let position = cycle_position(&self.clock);
        let bucket = if position < LOW_FREQ_BUCKET {
            LOW_FREQ_BUCKET
        } else if position < MID_FREQ_BUCKET {
            MID_FREQ_BUCKET
        } else {
            HIGH_FREQ_BUCKET
        };
        Frequency(bucket)
    }
}

/// Replays a fixed sequence, starting over once it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedSampler {
    sequence: Vec<Frequency>,
    cursor: usize,
}

impl ScriptedSampler {
    pub fn new<I, F>(sequence: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = F>,
        F: Into<Frequency>,
    {
        let sequence: Vec<Frequency> = sequence.into_iter().map(Into::into).collect();
        if sequence.is_empty() {
            return Err(ConfigError::EmptyReplay);
        }
        Ok(Self {
            sequence,
            cursor: 0,
        })
    }

    /// Always yields `freq`.
    pub fn constant(freq: impl Into<Frequency>) -> Self {
        Self {
            sequence: vec![freq.into()],
            cursor: 0,
        }
    }

    pub fn contains(&self, freq: Frequency) -> bool {
        self.sequence.contains(&freq)
    }

    /// Number of samples taken so far.
    pub fn samples_taken(&self) -> usize {
        self.cursor
    }
}

impl Sampler for ScriptedSampler {
    fn sample(&mut self) -> Frequency {
        let freq = self.sequence[self.cursor % self.sequence.len()];
        self.cursor += 1;
        freq
    }
}

/// Parses a comma-separated list such as `200,600,600,1000`.
impl FromStr for ScriptedSampler {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sequence = s
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| {
                item.parse::<u32>()
                    .map(Frequency)
                    .map_err(|_| ConfigError::InvalidFrequency(item.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(sequence)
    }
}

use std::{fmt::Display, str::FromStr};
use rand::Rng;
use crate::Error;


/// Highest number of draws a single [`BasicDice`] may request.
pub const MAX_COUNT: u32 = 10_000;

/// Range used when the notation names no dice at all, or `d` without a range.
pub const DEFAULT_RANGE: (i64, i64) = (1, 100);


/// Checks a requested draw count against `1..=MAX_COUNT`.
pub(crate) fn validate_count(count: u64) -> Result<u32, Error> {
    if count == 0 {
        return Err(Error::ZeroValue);
    }

    u32::try_from(count)
        .ok()
        .filter(|count| *count <= MAX_COUNT)
        .ok_or(Error::LimitExceeded(MAX_COUNT))
}


/// Strategy used to produce draws when a roll is solved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SolveMode {
    /// Independent uniform draws in the inclusive range.
    #[default]
    Random,
    /// Every draw is the range end.
    Max,
    /// Every draw is the range start.
    Min,
}

impl Display for SolveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self {
            SolveMode::Random => "random",
            SolveMode::Max => "max",
            SolveMode::Min => "min",
        };

        write!(f, "{mode}")
    }
}

impl FromStr for SolveMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(SolveMode::Random),
            "max" => Ok(SolveMode::Max),
            "min" => Ok(SolveMode::Min),
            other => Err(Error::InvalidSolveMode(other.into())),
        }
    }
}


/// A homogeneous draw specification: `count` integers from `start..=end`.
///
/// The range is always ordered; a reversed range is swapped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBasicDice"))]
pub struct BasicDice {
    count: u32,
    start: i64,
    end: i64
}

/// Unchecked wire form of [`BasicDice`], validated through [`BasicDice::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBasicDice {
    count: u64,
    start: i64,
    end: i64
}

#[cfg(feature = "serde")]
impl TryFrom<RawBasicDice> for BasicDice {
    type Error = Error;

    fn try_from(raw: RawBasicDice) -> Result<Self, Self::Error> {
        BasicDice::new(raw.count, raw.start, raw.end)
    }
}

impl BasicDice {
    /// Creates a new draw specification.
    ///
    /// # Errors
    /// - [`Error::ZeroValue`] if `count` is 0.
    /// - [`Error::LimitExceeded`] if `count` is above [`MAX_COUNT`].
    ///
    /// # Examples
    /// ```
    /// use rollplayer::{BasicDice, Error};
    ///
    /// let dice = BasicDice::new(3, 20, 1).unwrap();
    /// assert_eq!((dice.start(), dice.end()), (1, 20));
    ///
    /// assert_eq!(BasicDice::new(10_001, 1, 6), Err(Error::LimitExceeded(10_000)));
    /// ```
    pub fn new(count: u64, start: i64, end: i64) -> Result<Self, Error> {
        let count = validate_count(count)?;
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        Ok(Self { count, start, end })
    }

    /// A single draw from `1..=end` (or `end..=1` when `end < 1`).
    pub fn single(end: i64) -> Self {
        let (start, end) = if end < 1 { (end, 1) } else { (1, end) };
        Self { count: 1, start, end }
    }

    /// Number of draws.
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Inclusive lower bound.
    pub const fn start(&self) -> i64 {
        self.start
    }

    /// Inclusive upper bound.
    pub const fn end(&self) -> i64 {
        self.end
    }

    /// Produces `count` draws according to `mode`.
    ///
    /// Only [`SolveMode::Random`] consumes randomness from `rng`.
    pub fn draw<R: Rng>(&self, mode: SolveMode, rng: &mut R) -> Vec<f64> {
        let count = self.count as usize;

        match mode {
            SolveMode::Random => (0..count)
                .map(|_| rng.random_range(self.start..=self.end) as f64)
                .collect(),
            SolveMode::Max => vec![self.end as f64; count],
            SolveMode::Min => vec![self.start as f64; count],
        }
    }

    /// Generates `count` random draws using the thread-local generator.
    pub fn generate_values(&self) -> Vec<f64> {
        self.draw(SolveMode::Random, &mut rand::rng())
    }
}

impl Default for BasicDice {
    fn default() -> Self {
        let (start, end) = DEFAULT_RANGE;
        Self { count: 1, start, end }
    }
}

impl Display for BasicDice {
    /// Formats the dice as explicit-range notation.
    ///
    /// # Examples
    /// ```
    /// use rollplayer::BasicDice;
    ///
    /// assert_eq!(BasicDice::new(4, 1, 6).unwrap().to_string(), "4d1:6");
    /// assert_eq!(BasicDice::default().to_string(), "1d1:100");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}:{}", self.count, self.start, self.end)
    }
}

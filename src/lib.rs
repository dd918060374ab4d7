//! Dice notation for chat roll commands.
//!
//! Notation such as `4d6 + 2 i1:*2` is parsed into a [`UnifiedDice`], solved
//! into a [`RollResult`] and rendered as titled text sections with a [`Format`].
//!
//! ```
//! use rollplayer::{Format, SolveMode};
//!
//! let result = rollplayer::roll("3d6+2", SolveMode::Max).unwrap();
//! assert_eq!(result.values(), &[8.0, 8.0, 8.0]);
//!
//! let sections = result.render(&Format::sum());
//! assert_eq!(sections[0].1, "24");
//! assert_eq!(sections[1].1, "18");
//! ```
#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]


#[cfg(test)]
mod roll_test_strategies;

mod error;
mod operation;
mod dice;
mod bonus;
mod unified;
mod roll;
mod format;
mod parser;

pub use error::{Error, ArithmeticFault};
pub use operation::Operation;
pub use dice::{BasicDice, SolveMode, MAX_COUNT};
pub use bonus::{Bonus, TargetedBonus, Modifier};
pub use unified::UnifiedDice;
pub use roll::{RollResult, format_number, normalize, INTEGER_EPSILON};
pub use format::{Format, FormatType, Threshold, Comparison};
pub use parser::{ParserError, Parser, parse_notation};


/// Parses `input` and solves it under `mode` in one step.
///
/// # Errors
/// Returns [`Error::ParserError`] for invalid notation and
/// [`Error::Arithmetic`] when a modifier faults.
///
/// # Examples
/// ```
/// use rollplayer::{roll, Error, SolveMode};
///
/// let result = roll("2d10i1:+5", SolveMode::Min).unwrap();
/// assert_eq!(result.values(), &[6.0, 1.0]);
///
/// assert!(matches!(roll("2d6/0", SolveMode::Random), Err(Error::Arithmetic(_))));
/// assert!(matches!(roll("2d6 +", SolveMode::Random), Ok(_)));
/// assert!(matches!(roll("2d6 % 3", SolveMode::Random), Err(Error::ParserError(_))));
/// ```
pub fn roll(input: &str, mode: SolveMode) -> Result<RollResult, Error> {
    let dice = parse_notation(input)?;
    Ok(dice.solve(mode)?)
}

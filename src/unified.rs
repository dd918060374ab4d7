use std::{fmt::Display, str::FromStr};
use rand::Rng;
use tracing::trace;
use crate::{BasicDice, Bonus, Error, Modifier, RollResult, SolveMode, TargetedBonus};
use crate::parser::{parse_notation, ParserError};


/// A fully parsed roll: one draw specification plus its modifiers.
///
/// Solving applies every uniform [`Bonus`] in order, then every
/// [`TargetedBonus`] in order, regardless of where they appeared in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedDice {
    source: String,
    dice: BasicDice,
    bonuses: Vec<Bonus>,
    targeted: Vec<TargetedBonus>
}

impl UnifiedDice {
    /// Assembles a roll from already-built parts.
    pub fn new(
        source: impl Into<String>,
        dice: BasicDice,
        bonuses: Vec<Bonus>,
        targeted: Vec<TargetedBonus>
    ) -> Self {
        Self { source: source.into(), dice, bonuses, targeted }
    }

    /// Parses dice notation. Same as [`crate::parse_notation`].
    ///
    /// # Errors
    /// See [`crate::Parser::parse`].
    pub fn parse(input: &str) -> Result<Self, ParserError> {
        parse_notation(input)
    }

    /// The text this roll was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The draw specification.
    pub fn dice(&self) -> &BasicDice {
        &self.dice
    }

    /// Uniform bonuses, in source order.
    pub fn bonuses(&self) -> &[Bonus] {
        &self.bonuses
    }

    /// Targeted bonuses, in source order.
    pub fn targeted_bonuses(&self) -> &[TargetedBonus] {
        &self.targeted
    }

    /// All modifiers in application order: uniform bonuses first, then targeted ones.
    pub fn modifiers(&self) -> impl Iterator<Item = Modifier<'_>> {
        self.bonuses.iter()
            .map(Modifier::Uniform)
            .chain(self.targeted.iter().map(Modifier::Targeted))
    }

    /// Draws the dice under `mode` and applies every modifier.
    ///
    /// # Errors
    /// Returns [`Error::Arithmetic`] if a modifier divides by zero or produces
    /// a non-finite value. No partial result is returned.
    ///
    /// # Examples
    /// ```
    /// use rollplayer::{UnifiedDice, SolveMode};
    ///
    /// let dice = UnifiedDice::parse("3d6+2").unwrap();
    /// let result = dice.solve(SolveMode::Max).unwrap();
    ///
    /// assert_eq!(result.values(), &[8.0, 8.0, 8.0]);
    /// assert_eq!(result.original_values(), &[6.0, 6.0, 6.0]);
    /// ```
    pub fn solve(&self, mode: SolveMode) -> Result<RollResult, Error> {
        self.solve_with_rng(mode, &mut rand::rng())
    }

    /// Like [`UnifiedDice::solve`], drawing randomness from `rng`.
    ///
    /// # Errors
    /// See [`UnifiedDice::solve`].
    pub fn solve_with_rng<R: Rng>(&self, mode: SolveMode, rng: &mut R) -> Result<RollResult, Error> {
        trace!(%mode, count = self.dice.count(), source = %self.source, "solving roll");

        let original = self.dice.draw(mode, rng);
        let values = self.modifiers()
            .try_fold(original.clone(), |values, modifier| modifier.apply(&values))?;

        Ok(RollResult::new(self.source.clone(), values, original))
    }
}

impl FromStr for UnifiedDice {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_notation(s)
    }
}

impl Display for UnifiedDice {
    /// Formats the roll as canonical notation with an explicit range.
    ///
    /// # Examples
    /// ```
    /// use rollplayer::UnifiedDice;
    ///
    /// let dice: UnifiedDice = "4d6 + 1 i2,1:*2".parse().unwrap();
    /// assert_eq!(dice.to_string(), "4d1:6+1i1,2:*2");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dice)?;

        for bonus in &self.bonuses {
            write!(f, "{bonus}")?;
        }

        let targeted: Vec<String> = self.targeted.iter()
            .map(ToString::to_string)
            .collect();

        write!(f, "{}", targeted.join(";"))
    }
}

use std::{collections::BTreeSet, fmt::Display};
use crate::{Error, Operation};
use crate::parser::{Parser, ParserError};
use crate::roll::format_number;


/// A single operator and value applied uniformly to every draw.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bonus {
    operation: Operation,
    value: f64
}

impl Bonus {
    /// Creates a new uniform bonus.
    pub fn new(operation: Operation, value: f64) -> Self {
        Self { operation, value }
    }

    /// The operator applied to each draw.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The right-hand operand.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns a new sequence where every element is `element <op> value`.
    ///
    /// # Errors
    /// Returns [`Error::Arithmetic`] on division by zero or a non-finite result.
    ///
    /// # Examples
    /// ```
    /// use rollplayer::{Bonus, Operation};
    ///
    /// let bonus = Bonus::new(Operation::Add, 2.0);
    /// assert_eq!(bonus.apply(&[1.0, 2.0, 3.0]).unwrap(), vec![3.0, 4.0, 5.0]);
    /// ```
    pub fn apply(&self, values: &[f64]) -> Result<Vec<f64>, Error> {
        values.iter()
            .map(|value| self.operation.apply(*value, self.value).map_err(Error::from))
            .collect()
    }

    /// Parses a run of concatenated `<operator><number>` segments, such as `+2*3`.
    ///
    /// A number with no preceding operator is dropped, as is an operator with no
    /// number after it. Back-to-back operators keep the last one.
    ///
    /// # Errors
    /// Returns a [`ParserError`] on characters outside the bonus grammar.
    ///
    /// # Examples
    /// ```
    /// use rollplayer::{Bonus, Operation};
    ///
    /// let bonuses = Bonus::parse("+2*1.5").unwrap();
    /// assert_eq!(bonuses, vec![
    ///     Bonus::new(Operation::Add, 2.0),
    ///     Bonus::new(Operation::Multiply, 1.5),
    /// ]);
    /// ```
    pub fn parse(input: &str) -> Result<Vec<Bonus>, ParserError> {
        Parser::new(input)?.parse_bonuses_only()
    }
}

impl Display for Bonus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.operation, format_number(self.value))
    }
}


/// An ordered sequence of operations applied only to specific 1-based draw positions.
///
/// Each operation compounds on the result of the previous one. Positions outside
/// the set, and positions past the end of the draw, are never touched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTargetedBonus"))]
pub struct TargetedBonus {
    positions: BTreeSet<usize>,
    operations: Vec<(Operation, f64)>
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTargetedBonus {
    positions: Vec<usize>,
    operations: Vec<(Operation, f64)>
}

#[cfg(feature = "serde")]
impl TryFrom<RawTargetedBonus> for TargetedBonus {
    type Error = Error;

    fn try_from(raw: RawTargetedBonus) -> Result<Self, Self::Error> {
        TargetedBonus::new(raw.positions, raw.operations)
    }
}

impl TargetedBonus {
    /// Creates a new targeted bonus.
    ///
    /// # Errors
    /// Returns [`Error::InvalidModifier`] if there are no positions, a position is 0,
    /// or there are no operations.
    ///
    /// # Examples
    /// ```
    /// use rollplayer::{TargetedBonus, Operation};
    ///
    /// let bonus = TargetedBonus::new([1], vec![(Operation::Add, 1.0), (Operation::Multiply, 2.0)]).unwrap();
    /// assert_eq!(bonus.apply(&[1.0, 2.0, 3.0]).unwrap(), vec![4.0, 2.0, 3.0]);
    ///
    /// assert!(TargetedBonus::new([0], vec![(Operation::Add, 1.0)]).is_err());
    /// ```
    pub fn new<I>(positions: I, operations: Vec<(Operation, f64)>) -> Result<Self, Error>
    where
        I: IntoIterator<Item = usize>
    {
        let positions: BTreeSet<usize> = positions.into_iter().collect();

        if positions.is_empty() {
            return Err(Error::InvalidModifier("targeted bonus has no positions".into()));
        }

        if positions.contains(&0) {
            return Err(Error::InvalidModifier("positions are 1-based".into()));
        }

        if operations.is_empty() {
            return Err(Error::InvalidModifier("targeted bonus has no operations".into()));
        }

        Ok(Self { positions, operations })
    }

    /// The targeted 1-based positions, ascending.
    pub fn positions(&self) -> &BTreeSet<usize> {
        &self.positions
    }

    /// The operations, in application order.
    pub fn operations(&self) -> &[(Operation, f64)] {
        &self.operations
    }

    /// Applies every operation in order to the targeted positions.
    ///
    /// # Errors
    /// Returns [`Error::Arithmetic`] on division by zero or a non-finite result.
    pub fn apply(&self, values: &[f64]) -> Result<Vec<f64>, Error> {
        let mut working = values.to_vec();

        for (operation, operand) in &self.operations {
            for position in &self.positions {
                if let Some(value) = working.get_mut(position - 1) {
                    *value = operation.apply(*value, *operand)?;
                }
            }
        }

        Ok(working)
    }

    /// Parses one or more `i<idx>,<idx>:<op><val>...` segments separated by `;`.
    ///
    /// # Errors
    /// Returns a [`ParserError`] when a segment is missing its `:`, has a
    /// non-integer or zero index, or an operator without a value.
    ///
    /// # Examples
    /// ```
    /// use rollplayer::{TargetedBonus, Operation};
    ///
    /// let targeted = TargetedBonus::parse("i1,3:+5;i2:*2").unwrap();
    /// assert_eq!(targeted.len(), 2);
    /// assert_eq!(targeted[0].positions().iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    /// assert_eq!(targeted[1].operations(), &[(Operation::Multiply, 2.0)]);
    /// ```
    pub fn parse(input: &str) -> Result<Vec<TargetedBonus>, ParserError> {
        Parser::new(input)?.parse_targeted_only()
    }
}

impl Display for TargetedBonus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let positions: Vec<String> = self.positions.iter()
            .map(ToString::to_string)
            .collect();

        write!(f, "i{}:", positions.join(","))?;

        for (operation, value) in &self.operations {
            write!(f, "{operation}{}", format_number(*value))?;
        }

        Ok(())
    }
}


/// A modifier applied to a draw sequence during solving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modifier<'a> {
    /// Applied to every draw.
    Uniform(&'a Bonus),
    /// Applied to selected draw positions.
    Targeted(&'a TargetedBonus),
}

impl Modifier<'_> {
    /// Applies the modifier, producing a new sequence of the same length.
    ///
    /// # Errors
    /// Returns [`Error::Arithmetic`] on division by zero or a non-finite result.
    pub fn apply(&self, values: &[f64]) -> Result<Vec<f64>, Error> {
        match self {
            Modifier::Uniform(bonus) => bonus.apply(values),
            Modifier::Targeted(bonus) => bonus.apply(values),
        }
    }
}

impl Display for Modifier<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Modifier::Uniform(bonus) => write!(f, "{bonus}"),
            Modifier::Targeted(bonus) => write!(f, "{bonus}"),
        }
    }
}

use std::{fmt::Display, str::FromStr};
use crate::error::ArithmeticFault;


/// One of the five arithmetic operators a modifier can apply to a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Operation {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `**`
    Power,
}

impl Operation {
    /// Every operation, in symbol-length order.
    pub const ALL: [Operation; 5] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Power,
    ];

    /// The canonical symbol used in dice notation.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
            Operation::Power => "**",
        }
    }

    /// Applies the operation as `lhs <op> rhs` over real numbers.
    ///
    /// # Errors
    /// - [`ArithmeticFault::DivisionByZero`] when dividing by zero.
    /// - [`ArithmeticFault::NonFinite`] when the result is infinite or NaN
    ///   (overflowing powers, `0 ** -1`, fractional powers of negatives).
    ///
    /// # Examples
    /// ```
    /// use rollplayer::Operation;
    ///
    /// assert_eq!(Operation::Power.apply(2.0, 3.0), Ok(8.0));
    /// assert!(Operation::Divide.apply(1.0, 0.0).is_err());
    /// ```
    pub fn apply(&self, lhs: f64, rhs: f64) -> Result<f64, ArithmeticFault> {
        use Operation as Op;
        let result = match self {
            Op::Add => lhs + rhs,
            Op::Subtract => lhs - rhs,
            Op::Multiply => lhs * rhs,
            Op::Divide => {
                if rhs == 0.0 {
                    return Err(ArithmeticFault::DivisionByZero);
                }
                lhs / rhs
            },
            Op::Power => lhs.powf(rhs),
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(ArithmeticFault::NonFinite { op: *self, lhs, rhs })
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL.into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| format!("unknown operation `{s}`"))
    }
}

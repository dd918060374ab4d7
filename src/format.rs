use std::{fmt::Display, str::FromStr};
use crate::Error;


/// How a [`crate::RollResult`] body is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FormatType {
    /// Comma-separated values, followed by the sum when there is more than one.
    #[default]
    Default,
    /// Only the sum.
    Sum,
    /// Comma-separated values.
    List,
    /// Comma-separated rows of [`Format::format_args`] values each.
    ListSplit,
}

impl FormatType {
    /// Looks up a format type by name, falling back to [`FormatType::List`]
    /// for names it doesn't know.
    ///
    /// # Examples
    /// ```
    /// use rollplayer::FormatType;
    ///
    /// assert_eq!(FormatType::from_name("sum"), FormatType::Sum);
    /// assert_eq!(FormatType::from_name("list-split"), FormatType::ListSplit);
    /// assert_eq!(FormatType::from_name("fancy"), FormatType::List);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "default" => FormatType::Default,
            "sum" => FormatType::Sum,
            "list_split" | "listsplit" | "split" => FormatType::ListSplit,
            _ => FormatType::List,
        }
    }
}


/// A comparison used by [`Threshold`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Comparison {
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `=`, also parsed from `==`
    Equal,
    /// `!=`
    NotEqual,
}

impl Comparison {
    const SYMBOLS: [(&'static str, Comparison); 7] = [
        (">=", Comparison::GreaterOrEqual),
        ("<=", Comparison::LessOrEqual),
        ("!=", Comparison::NotEqual),
        ("==", Comparison::Equal),
        (">", Comparison::Greater),
        ("<", Comparison::Less),
        ("=", Comparison::Equal),
    ];

    /// The symbol used when displaying a threshold.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Comparison::Greater => ">",
            Comparison::GreaterOrEqual => ">=",
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
            Comparison::Equal => "=",
            Comparison::NotEqual => "!=",
        }
    }

    /// Evaluates `left <comparison> right`.
    pub fn compare(&self, left: f64, right: f64) -> bool {
        match self {
            Comparison::Greater => left > right,
            Comparison::GreaterOrEqual => left >= right,
            Comparison::Less => left < right,
            Comparison::LessOrEqual => left <= right,
            Comparison::Equal => left == right,
            Comparison::NotEqual => left != right,
        }
    }
}


/// A per-value predicate used to emphasize values when rendering.
///
/// Thresholds never filter or change values; passing values are only bolded.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Threshold {
    comparison: Comparison,
    value: f64
}

impl Threshold {
    /// Creates a new threshold.
    pub fn new(comparison: Comparison, value: f64) -> Self {
        Self { comparison, value }
    }

    /// How values are compared.
    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    /// The value compared against.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Whether `value` passes the threshold.
    pub fn passes(&self, value: f64) -> bool {
        self.comparison.compare(value, self.value)
    }

    /// Evaluates [`Threshold::passes`] for every value, in order.
    pub fn passing(&self, values: &[f64]) -> Vec<bool> {
        values.iter().map(|value| self.passes(*value)).collect()
    }
}

impl FromStr for Threshold {
    type Err = Error;

    /// Parses thresholds such as `>=15`, `<3` or `=20`.
    ///
    /// # Examples
    /// ```
    /// use rollplayer::{Threshold, Comparison};
    ///
    /// let threshold: Threshold = ">= 15".parse().unwrap();
    /// assert_eq!(threshold, Threshold::new(Comparison::GreaterOrEqual, 15.0));
    /// assert!(threshold.passes(15.0));
    /// assert!(!threshold.passes(14.5));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let (comparison, rest) = Comparison::SYMBOLS.iter()
            .find_map(|(symbol, comparison)| {
                trimmed.strip_prefix(symbol).map(|rest| (*comparison, rest))
            })
            .ok_or_else(|| Error::InvalidThreshold(s.into()))?;

        let value: f64 = rest.trim().parse()
            .map_err(|_| Error::InvalidThreshold(s.into()))?;

        if !value.is_finite() {
            return Err(Error::InvalidThreshold(s.into()));
        }

        Ok(Self { comparison, value })
    }
}

impl Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.comparison.symbol(), self.value)
    }
}


/// Display configuration supplied per render call.
///
/// # Examples
/// ```
/// use rollplayer::{Format, FormatType};
///
/// let format = Format::list_split(10)
///     .threshold(">=20".parse().unwrap())
///     .icon(":d20:");
///
/// assert_eq!(format.format_type, FormatType::ListSplit);
/// assert_eq!(format.format_args, 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Format {
    /// Body layout.
    pub format_type: FormatType,
    /// Row length for [`FormatType::ListSplit`]; ignored otherwise.
    pub format_args: usize,
    /// Values passing this are bolded.
    pub threshold: Option<Threshold>,
    /// Prefix for rendered titles, such as a custom emoji.
    pub icon: String
}

impl Format {
    /// A format with the given layout and no threshold or icon.
    pub fn new(format_type: FormatType) -> Self {
        Self { format_type, ..Self::default() }
    }

    /// Shorthand for [`FormatType::Sum`].
    pub fn sum() -> Self {
        Self::new(FormatType::Sum)
    }

    /// Shorthand for [`FormatType::List`].
    pub fn list() -> Self {
        Self::new(FormatType::List)
    }

    /// Shorthand for [`FormatType::ListSplit`] with rows of `row_length` values.
    pub fn list_split(row_length: usize) -> Self {
        Self { format_args: row_length, ..Self::new(FormatType::ListSplit) }
    }

    /// Sets the threshold.
    pub fn threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Sets the title icon.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

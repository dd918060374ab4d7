use std::fmt::Display;
use crate::{Format, FormatType, Threshold};


/// Values closer than this to an integer are displayed as that integer.
pub const INTEGER_EPSILON: f64 = 1e-9;

/// Row length of the boxed [`RollResult`] summary.
const SUMMARY_ROW: usize = 20;


/// Snaps `value` to its nearest integer when within [`INTEGER_EPSILON`] of it.
pub fn normalize(value: f64) -> f64 {
    let rounded = value.round();

    if (value - rounded).abs() < INTEGER_EPSILON {
        // `+ 0.0` turns -0 into 0
        rounded + 0.0
    } else {
        value
    }
}

/// Formats a value for display after [`normalize`].
///
/// # Examples
/// ```
/// use rollplayer::format_number;
///
/// assert_eq!(format_number(5.0), "5");
/// assert_eq!(format_number(5.0000000001), "5");
/// assert_eq!(format_number(5.1), "5.1");
/// assert_eq!(format_number(-0.0), "0");
/// ```
pub fn format_number(value: f64) -> String {
    normalize(value).to_string()
}


/// The outcome of solving a [`crate::UnifiedDice`].
///
/// Holds the final values alongside the draws as they were before any
/// modifier, and renders both as titled text sections.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollResult {
    source: String,
    values: Vec<f64>,
    original: Vec<f64>
}

impl RollResult {
    /// Creates a new `RollResult`.
    ///
    /// This is typically used internally when solving a roll.
    pub fn new(source: impl Into<String>, values: Vec<f64>, original: Vec<f64>) -> Self {
        Self { source: source.into(), values, original }
    }

    /// The notation the roll was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Values after every modifier.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Values as drawn, before any modifier.
    pub fn original_values(&self) -> &[f64] {
        &self.original
    }

    /// Whether any modifier changed the outcome.
    pub fn is_modified(&self) -> bool {
        self.values != self.original
    }

    /// Sum of the final values.
    ///
    /// # Examples
    /// ```
    /// use rollplayer::RollResult;
    ///
    /// let result = RollResult::new("3d6", vec![1.0, 2.5, 3.0], vec![1.0, 2.0, 3.0]);
    /// assert_eq!(result.total(), 6.5);
    /// ```
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Renders the result as `(title, body)` pairs.
    ///
    /// The first pair holds the final values. A second pair with the unmodified
    /// draws follows only when a modifier changed the outcome.
    ///
    /// # Examples
    /// ```
    /// use rollplayer::{Format, RollResult};
    ///
    /// let result = RollResult::new("2d6+1", vec![4.0, 7.0], vec![3.0, 6.0]);
    /// let sections = result.render(&Format::default());
    ///
    /// assert_eq!(sections, vec![
    ///     ("You rolled a 2d6+1 and got...".to_string(), "4, 7 (sum: 11)".to_string()),
    ///     ("You rolled a 2d6+1 and without modifiers got...".to_string(), "3, 6 (sum: 9)".to_string()),
    /// ]);
    /// ```
    pub fn render(&self, format: &Format) -> Vec<(String, String)> {
        let mut sections = vec![(
            title(&format.icon, &format!("You rolled a {} and got...", self.source)),
            body(&self.values, format)
        )];

        if self.is_modified() {
            sections.push((
                title(&format.icon, &format!("You rolled a {} and without modifiers got...", self.source)),
                body(&self.original, format)
            ));
        }

        sections
    }
}

impl Display for RollResult {
    /// A boxed summary of the final values, in rows of 20, with their sum.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = split_rows(&format_values(&self.values, None), SUMMARY_ROW, "\n┃ ");
        write!(f, "┏━━━━ {} ━━━━ \n┃ {rows}\n┃ sum: {}", self.source, format_sum(&self.values))
    }
}


fn title(icon: &str, text: &str) -> String {
    if icon.is_empty() {
        text.to_string()
    } else {
        format!("{icon} {text}")
    }
}

fn body(values: &[f64], format: &Format) -> String {
    let threshold = format.threshold.as_ref();

    match format.format_type {
        FormatType::Default => {
            let list = format_values(values, threshold).join(", ");
            if values.len() > 1 {
                format!("{list} (sum: {})", format_sum(values))
            } else {
                list
            }
        },
        FormatType::Sum => format_sum(values),
        FormatType::List => format_values(values, threshold).join(", "),
        FormatType::ListSplit => split_rows(&format_values(values, threshold), format.format_args, "\n"),
    }
}

fn format_values(values: &[f64], threshold: Option<&Threshold>) -> Vec<String> {
    values.iter()
        .map(|value| {
            let value = normalize(*value);
            match threshold {
                Some(threshold) if threshold.passes(value) => format!("**{value}**"),
                _ => value.to_string()
            }
        })
        .collect()
}

fn format_sum(values: &[f64]) -> String {
    format_number(values.iter().sum())
}

fn split_rows(values: &[String], row_length: usize, separator: &str) -> String {
    if row_length == 0 {
        return values.join(", ");
    }

    values.chunks(row_length)
        .map(|row| row.join(", "))
        .collect::<Vec<_>>()
        .join(separator)
}

use crate::Error as RollError;


/// A failure to lex or parse dice notation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParserError {
    /// Wraps another error with the lexer position it was found at.
    #[error("At position {0} - {1}")]
    AtPosition(usize, Box<ParserError>),

    /// A character outside the notation alphabet.
    #[error("Invalid token: {0}")]
    Token(char),

    /// A malformed decimal literal.
    #[error("Invalid number: {0}")]
    Number(String),

    /// A roll index of 0.
    #[error("Zero value is not accepted")]
    ZeroValue,

    /// A letter run that is neither `d`, `i` nor a dice count.
    #[error("Invalid identifier: {0}")]
    Identifier(String),

    /// A range bound that is not an `i64` integer.
    #[error("Invalid dice range: {0}")]
    Range(String),

    /// A roll index that is not a positive integer.
    #[error("Invalid roll index: {0}")]
    Index(String),

    /// A token other than the one the grammar requires.
    #[error("Expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: String
    },

    /// Trailing input after a complete notation.
    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),

    /// A model validation failure raised while parsing.
    #[error("Roll error - {0}")]
    RollError(#[from] Box<RollError>),
}

impl ParserError {
    /// The underlying error, without its position.
    pub fn err(&self) -> &Self {
        match self {
            ParserError::AtPosition(_, err) => err.as_ref(),
            other => other
        }
    }

    /// The lexer position, if known.
    pub fn pos(&self) -> Option<&usize> {
        match self {
            ParserError::AtPosition(position, _) => Some(position),
            _ => None
        }
    }

    /// Attaches `position` unless a position is already attached.
    pub fn at_pos(self, position: usize) -> Self {
        match self {
            ParserError::AtPosition(_, _) => self,
            other => ParserError::AtPosition(position, Box::new(other))
        }
    }

    /// The model validation failure behind this error, such as
    /// [`RollError::LimitExceeded`], if any.
    pub fn roll_error(&self) -> Option<&RollError> {
        match self.err() {
            ParserError::RollError(err) => Some(err.as_ref()),
            _ => None
        }
    }
}

impl From<RollError> for ParserError {
    fn from(value: RollError) -> Self {
        ParserError::RollError(Box::new(value))
    }
}

pub type Result<T> = std::result::Result<T, ParserError>;

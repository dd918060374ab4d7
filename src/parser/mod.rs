mod error;
mod lexer;
mod parse;

#[cfg(test)]
pub(crate) mod str_test_strategies;

pub use error::ParserError;
pub(crate) use lexer::{Lexer, Token};
pub use parse::{Parser, parse_notation};

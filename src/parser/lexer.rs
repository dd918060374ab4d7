use crate::Operation;
use crate::parser::error::*;


#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Token {
    Integer(u64),
    Decimal(f64),
    Operator(Operation),
    /// Letters running straight into a `d`, read as a non-numeric dice count.
    Word,
    Dice,
    Index,
    Colon,
    Semicolon,
    Comma,
    Eof,
}

impl Token {
    /// Numeric value of an `Integer` or `Decimal` token.
    pub fn number(&self) -> Option<f64> {
        match self {
            Token::Integer(n) => Some(*n as f64),
            Token::Decimal(n) => Some(*n),
            _ => None
        }
    }
}


#[derive(Debug)]
pub(crate) struct Lexer {
    input: Vec<char>,
    pub position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let Some(&ch) = self.input.get(self.position) else {
            return Ok(Token::Eof);
        };

        match ch {
            '+' => self.single(Token::Operator(Operation::Add)),
            '-' => self.single(Token::Operator(Operation::Subtract)),
            '/' => self.single(Token::Operator(Operation::Divide)),
            '*' => {
                self.position += 1;
                if self.input.get(self.position) == Some(&'*') {
                    self.position += 1;
                    Ok(Token::Operator(Operation::Power))
                } else {
                    Ok(Token::Operator(Operation::Multiply))
                }
            }
            ':' => self.single(Token::Colon),
            ';' => self.single(Token::Semicolon),
            ',' => self.single(Token::Comma),
            '0'..='9' | '.' => self.read_number(),
            'a'..='z' | 'A'..='Z' => self.read_letter(),
            _ => Err(ParserError::Token(ch))
        }
    }

    fn single(&mut self, token: Token) -> Result<Token> {
        self.position += 1;
        Ok(token)
    }

    fn skip_whitespace(&mut self) {
        while self.position < self.input.len() && self.input[self.position].is_whitespace() {
            self.position += 1;
        }
    }

    fn read_number(&mut self) -> Result<Token> {
        let start = self.position;
        while self.position < self.input.len()
            && (self.input[self.position].is_ascii_digit() || self.input[self.position] == '.')
        {
            self.position += 1;
        }

        let number_str: String = self.input[start..self.position].iter().collect();

        if number_str.contains('.') {
            return match number_str.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Token::Decimal(n)),
                _ => Err(ParserError::Number(number_str)),
            };
        }

        // saturate; the dice count limit rejects anything this large
        match number_str.parse::<u64>() {
            Ok(n) => Ok(Token::Integer(n)),
            Err(_) => Ok(Token::Integer(u64::MAX)),
        }
    }

    fn read_letter(&mut self) -> Result<Token> {
        let ch = self.input[self.position];
        self.position += 1;

        match ch {
            'd' => Ok(Token::Dice),
            'i' => Ok(Token::Index),
            _ => {
                let start = self.position - 1;
                while self.position < self.input.len()
                    && self.input[self.position].is_alphabetic()
                    && self.input[self.position] != 'd'
                {
                    self.position += 1;
                }

                if self.input.get(self.position) == Some(&'d') {
                    return Ok(Token::Word);
                }

                let identifier: String = self.input[start..self.position].iter().collect();
                Err(ParserError::Identifier(identifier))
            }
        }
    }
}

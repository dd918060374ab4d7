use std::num::IntErrorKind;
use tracing::debug;
use crate::{BasicDice, Bonus, Operation, TargetedBonus, UnifiedDice};
use crate::dice::{validate_count, DEFAULT_RANGE};
use crate::parser::error::*;
use crate::parser::{Lexer, Token};


/// A recursive-descent parser for dice notation strings.
///
/// The grammar, over the lexer's tokens:
///
/// ```text
/// notation := integer                       -- shorthand for 1d<integer>
///           | dice? bonuses targeted* EOF
/// dice     := count? 'd' (int (':' int)?)?
/// count    := (number | word | ':' | ',' | ';')+ -- anything but one integer counts as 1
/// bonuses  := (operator+ number?)*
/// targeted := 'i' int (',' int)* ':' (operator number)+ ';'*
/// ```
#[derive(Debug)]
pub struct Parser {
    source: String,
    lexer: Lexer,
    current: Token,
    peek: Token
}

impl Parser {
    /// Creates a new `Parser` instance for the given input string.
    ///
    /// # Errors
    /// Returns a [`ParserError::AtPosition`] if one of the first two tokens
    /// cannot be lexed.
    ///
    /// # Examples
    /// ```
    /// use rollplayer::{Parser, ParserError};
    ///
    /// assert!(Parser::new("3d6 + 2").is_ok());
    ///
    /// let err = Parser::new("% 2").unwrap_err();
    /// assert!(matches!(err.err(), ParserError::Token('%')));
    /// ```
    pub fn new(input: &str) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token().map_err(|err| err.at_pos(lexer.position))?;
        let peek = lexer.next_token().map_err(|err| err.at_pos(lexer.position))?;

        Ok(Self { source: input.into(), lexer, current, peek })
    }

    /// Parses the entire input into a [`UnifiedDice`].
    ///
    /// Input that is a plain integer `N` is shorthand for `1d1:N`. Empty input,
    /// or input naming no dice, rolls the default `1d1:100`.
    ///
    /// # Errors
    /// Returns a `ParserError` wrapped with [`ParserError::at_pos()`] on any
    /// syntax error. A dice count above the limit surfaces as a
    /// [`ParserError::RollError`] holding [`crate::Error::LimitExceeded`].
    ///
    /// # Examples
    /// ```
    /// use rollplayer::{Parser, Error};
    ///
    /// let dice = Parser::new("4d6+1").unwrap().parse().unwrap();
    /// assert_eq!(dice.dice().count(), 4);
    /// assert_eq!(dice.bonuses().len(), 1);
    ///
    /// let err = Parser::new("20000d6").unwrap().parse().unwrap_err();
    /// assert_eq!(err.roll_error(), Some(&Error::LimitExceeded(10_000)));
    /// ```
    pub fn parse(&mut self) -> Result<UnifiedDice> {
        if let Some(end) = self.plain_integer()? {
            debug!(source = %self.source, "plain integer, rolling a single die");
            return Ok(UnifiedDice::new(self.source.clone(), BasicDice::single(end), Vec::new(), Vec::new()));
        }

        self.parse_notation()
            .map_err(|err| err.at_pos(self.lexer.position))
    }

    pub(crate) fn parse_bonuses_only(&mut self) -> Result<Vec<Bonus>> {
        let bonuses = self.skip_stray_number()
            .and_then(|_| self.parse_bonuses());

        bonuses
            .and_then(|bonuses| self.expect_eof().map(|_| bonuses))
            .map_err(|err| err.at_pos(self.lexer.position))
    }

    pub(crate) fn parse_targeted_only(&mut self) -> Result<Vec<TargetedBonus>> {
        let targeted = self.parse_targeted();

        targeted
            .and_then(|targeted| self.expect_eof().map(|_| targeted))
            .map_err(|err| err.at_pos(self.lexer.position))
    }

    fn plain_integer(&self) -> Result<Option<i64>> {
        match self.source.trim().parse::<i64>() {
            Ok(end) => Ok(Some(end)),
            Err(err) if matches!(err.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                Err(ParserError::Range(self.source.trim().into()))
            },
            Err(_) => Ok(None)
        }
    }

    fn parse_notation(&mut self) -> Result<UnifiedDice> {
        let dice = self.parse_dice()?;
        let bonuses = self.parse_bonuses()?;
        let targeted = self.parse_targeted()?;
        self.expect_eof()?;

        let dice = UnifiedDice::new(self.source.clone(), dice.unwrap_or_default(), bonuses, targeted);
        debug!(source = %self.source, notation = %dice, "parsed dice notation");

        Ok(dice)
    }

    fn next_token(&mut self) -> Result<()> {
        self.current = self.peek;
        self.peek = self.lexer.next_token()?;

        Ok(())
    }

    fn expect(&mut self, token: Token, expected: &'static str) -> Result<()> {
        if self.current != token {
            return Err(unexpected(expected, self.current));
        }

        self.next_token()
    }

    fn expect_eof(&self) -> Result<()> {
        match self.current {
            Token::Eof => Ok(()),
            other => Err(ParserError::UnexpectedToken(format!("{other:?}")))
        }
    }

    fn skip_stray_number(&mut self) -> Result<()> {
        if let Some(value) = self.current.number() {
            debug!(value, "number without an operator dropped");
            self.next_token()?;
        }

        Ok(())
    }

    fn parse_dice(&mut self) -> Result<Option<BasicDice>> {
        let mut count_part = Vec::new();
        while matches!(
            self.current,
            Token::Integer(_) | Token::Decimal(_) | Token::Word | Token::Colon | Token::Comma | Token::Semicolon
        ) {
            count_part.push(self.current);
            self.next_token()?;
        }

        if self.current != Token::Dice {
            return match count_part.as_slice() {
                [] => Ok(None),
                [number] if number.number().is_some() => {
                    debug!(?number, "number without an operator dropped");
                    Ok(None)
                },
                _ => Err(unexpected("`d`", self.current))
            };
        }

        let count = match count_part.as_slice() {
            [] => 1,
            [Token::Integer(n)] => *n,
            other => {
                debug!(count = ?other, "non-numeric dice count, rolling a single die");
                1
            }
        };

        validate_count(count)?;
        self.next_token()?;

        let (start, end) = match self.current {
            Token::Integer(_) | Token::Decimal(_) => self.parse_range()?,
            _ => DEFAULT_RANGE
        };

        Ok(Some(BasicDice::new(count, start, end)?))
    }

    fn parse_range(&mut self) -> Result<(i64, i64)> {
        let first = self.parse_range_bound()?;

        if self.current != Token::Colon {
            return Ok((1, first));
        }

        self.next_token()?;
        let end = self.parse_range_bound()?;

        Ok((first, end))
    }

    fn parse_range_bound(&mut self) -> Result<i64> {
        let bound = match self.current {
            Token::Integer(n) => i64::try_from(n).map_err(|_| ParserError::Range(n.to_string()))?,
            Token::Decimal(n) => return Err(ParserError::Range(n.to_string())),
            other => return Err(unexpected("range bound", other))
        };

        self.next_token()?;
        Ok(bound)
    }

    fn parse_bonuses(&mut self) -> Result<Vec<Bonus>> {
        let mut bonuses = Vec::new();

        while let Token::Operator(mut operation) = self.current {
            self.next_token()?;

            while let Token::Operator(next) = self.current {
                operation = next;
                self.next_token()?;
            }

            match self.current.number() {
                Some(value) => {
                    bonuses.push(Bonus::new(operation, value));
                    self.next_token()?;
                },
                None => debug!(%operation, "operator without a value dropped")
            }
        }

        Ok(bonuses)
    }

    fn parse_targeted(&mut self) -> Result<Vec<TargetedBonus>> {
        let mut targeted = Vec::new();

        while self.current == Token::Index {
            targeted.push(self.parse_targeted_segment()?);

            while self.current == Token::Semicolon {
                self.next_token()?;
            }
        }

        Ok(targeted)
    }

    fn parse_targeted_segment(&mut self) -> Result<TargetedBonus> {
        self.expect(Token::Index, "`i`")?;

        let mut positions = vec![self.parse_position()?];
        while self.current == Token::Comma {
            self.next_token()?;
            positions.push(self.parse_position()?);
        }

        self.expect(Token::Colon, "`:`")?;
        let operations = self.parse_operations()?;

        Ok(TargetedBonus::new(positions, operations)?)
    }

    fn parse_position(&mut self) -> Result<usize> {
        let position = match self.current {
            Token::Integer(0) => return Err(ParserError::ZeroValue),
            Token::Integer(n) => usize::try_from(n).map_err(|_| ParserError::Index(n.to_string()))?,
            Token::Decimal(n) => return Err(ParserError::Index(n.to_string())),
            other => return Err(unexpected("roll index", other))
        };

        self.next_token()?;
        Ok(position)
    }

    fn parse_operations(&mut self) -> Result<Vec<(Operation, f64)>> {
        let mut operations = Vec::new();

        while let Token::Operator(operation) = self.current {
            self.next_token()?;

            let value = self.current.number()
                .ok_or_else(|| unexpected("number", self.current))?;

            operations.push((operation, value));
            self.next_token()?;
        }

        if operations.is_empty() {
            return Err(unexpected("operator", self.current));
        }

        Ok(operations)
    }
}

fn unexpected(expected: &'static str, found: Token) -> ParserError {
    ParserError::Expected { expected, found: format!("{found:?}") }
}


/// Parses a dice notation string into a [`UnifiedDice`].
/// This is a convenience function that creates a [`Parser`] and calls its `parse` method.
///
/// # Errors
/// Returns a `ParserError` if any syntax errors are encountered during parsing,
/// or if the dice count is over the limit.
///
/// Get a reference to the wrapped error with [`ParserError::err()`].
/// Get the position at which the error was found with [`ParserError::pos()`].
///
/// # Examples
/// ```
/// use rollplayer::parse_notation;
///
/// let dice = parse_notation("2d10i1:+5").unwrap();
/// assert_eq!(dice.targeted_bonuses().len(), 1);
/// ```
pub fn parse_notation(input: &str) -> Result<UnifiedDice> {
    Parser::new(input)?.parse()
}


#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use super::*;
    use crate::Error;
    use crate::parser::str_test_strategies::*;


    fn positions(bonus: &TargetedBonus) -> Vec<usize> {
        bonus.positions().iter().copied().collect()
    }

    proptest! {
        #[test]
        fn test_complex_notation(input in notation_strategy()) {
            let result = parse_notation(&input);
            prop_assert!(result.is_ok(), "{input}: {result:?}");
        }

        #[test]
        fn test_plain_integer(n in -10_000i64..=10_000) {
            let dice = parse_notation(&n.to_string()).unwrap();

            prop_assert_eq!(dice.dice(), &BasicDice::single(n));
            prop_assert!(dice.bonuses().is_empty());
            prop_assert!(dice.targeted_bonuses().is_empty());
        }

        #[test]
        fn test_count_limit(count in 1u64..=30_000, sides in 1u64..=100) {
            let result = parse_notation(&format!("{count}d{sides}"));

            if count > 10_000 {
                let err = result.unwrap_err();
                prop_assert_eq!(err.roll_error(), Some(&Error::LimitExceeded(10_000)));
            } else {
                prop_assert_eq!(result.unwrap().dice().count() as u64, count);
            }
        }

        #[test]
        fn test_reversed_range(count in 1u64..=100, a in 0u64..=1000, b in 0u64..=1000) {
            let dice = parse_notation(&format!("{count}d{a}:{b}")).unwrap();
            let dice = dice.dice();

            prop_assert_eq!(dice.start() as u64, a.min(b));
            prop_assert_eq!(dice.end() as u64, a.max(b));
        }

        #[test]
        fn test_display_parses_back(input in notation_strategy()) {
            let dice = parse_notation(&input).unwrap();
            let reparsed = parse_notation(&dice.to_string()).unwrap();

            prop_assert_eq!(dice.dice(), reparsed.dice());
            prop_assert_eq!(dice.bonuses(), reparsed.bonuses());
            prop_assert_eq!(dice.targeted_bonuses(), reparsed.targeted_bonuses());
        }

        #[test]
        fn test_bonus_chain_is_ordered(values in prop::collection::vec((operator_strategy(), 1u32..=100), 1..8)) {
            let notation: String = values.iter()
                .map(|(op, value)| format!("{op}{value}"))
                .collect();

            let dice = parse_notation(&format!("2d6{notation}")).unwrap();
            let expected: Vec<Bonus> = values.iter()
                .map(|(op, value)| Bonus::new(op.parse().unwrap(), *value as f64))
                .collect();

            prop_assert_eq!(dice.bonuses(), expected.as_slice());
        }
    }

    #[test]
    fn test_dice_shapes() {
        let cases = [
            ("d20", (1, 1, 20)),
            ("3d6", (3, 1, 6)),
            ("d5:10", (1, 5, 10)),
            ("2d10:5", (2, 5, 10)),
            ("d", (1, 1, 100)),
            ("4d", (4, 1, 100)),
            ("2.5d6", (1, 1, 6)),
            (" 3 d 6 ", (3, 1, 6)),
        ];

        for (input, (count, start, end)) in cases {
            let dice = parse_notation(input).unwrap();
            assert_eq!(dice.dice(), &BasicDice::new(count, start, end).unwrap(), "{input}");
            assert!(dice.bonuses().is_empty(), "{input}");
        }
    }

    #[test]
    fn test_non_numeric_count() {
        let cases = [
            ("xd6", 6),
            ("ad20", 20),
            ("abcd8", 8),
            (":d6", 6),
            ("1,2d4", 4),
            ("2.5d12", 12),
        ];

        for (input, end) in cases {
            let dice = parse_notation(input).unwrap();
            assert_eq!(dice.dice(), &BasicDice::new(1, 1, end).unwrap(), "{input}");
        }

        let dice = parse_notation("xd6+2").unwrap();
        assert_eq!(dice.bonuses(), &[Bonus::new(Operation::Add, 2.0)]);

        let err = parse_notation(":5+3").unwrap_err();
        assert!(matches!(err.err(), ParserError::Expected { expected: "`d`", .. }), "{err:?}");
    }

    #[test]
    fn test_default_dice() {
        for input in ["", "   ", "7+5", "2.5"] {
            let dice = parse_notation(input).unwrap();
            assert_eq!(dice.dice(), &BasicDice::default(), "{input}");
        }

        let dice = parse_notation("7+5").unwrap();
        assert_eq!(dice.bonuses(), &[Bonus::new(Operation::Add, 5.0)]);
    }

    #[test]
    fn test_uniform_bonus() {
        let dice = parse_notation("3d6+2").unwrap();

        assert_eq!(dice.dice(), &BasicDice::new(3, 1, 6).unwrap());
        assert_eq!(dice.bonuses(), &[Bonus::new(Operation::Add, 2.0)]);
        assert!(dice.targeted_bonuses().is_empty());
        assert_eq!(dice.source(), "3d6+2");
    }

    #[test]
    fn test_bonus_operators() {
        let dice = parse_notation("d6-1*2/4**2+0.5").unwrap();

        assert_eq!(dice.bonuses(), &[
            Bonus::new(Operation::Subtract, 1.0),
            Bonus::new(Operation::Multiply, 2.0),
            Bonus::new(Operation::Divide, 4.0),
            Bonus::new(Operation::Power, 2.0),
            Bonus::new(Operation::Add, 0.5),
        ]);
    }

    #[test]
    fn test_dangling_operators() {
        assert!(parse_notation("3d6+").unwrap().bonuses().is_empty());
        assert_eq!(
            parse_notation("3d6*-2").unwrap().bonuses(),
            &[Bonus::new(Operation::Subtract, 2.0)]
        );
        assert!(parse_notation("3d6+i1:+1").unwrap().bonuses().is_empty());
    }

    #[test]
    fn test_targeted_bonus() {
        let dice = parse_notation("2d10i1:+5").unwrap();

        assert_eq!(dice.dice(), &BasicDice::new(2, 1, 10).unwrap());
        assert!(dice.bonuses().is_empty());
        assert_eq!(dice.targeted_bonuses().len(), 1);
        assert_eq!(positions(&dice.targeted_bonuses()[0]), vec![1]);
        assert_eq!(dice.targeted_bonuses()[0].operations(), &[(Operation::Add, 5.0)]);
    }

    #[test]
    fn test_mixed_modifiers() {
        let dice = parse_notation("4d8+1i1,3:+5-2;i2:*2;").unwrap();

        assert_eq!(dice.bonuses(), &[Bonus::new(Operation::Add, 1.0)]);

        let targeted = dice.targeted_bonuses();
        assert_eq!(targeted.len(), 2);
        assert_eq!(positions(&targeted[0]), vec![1, 3]);
        assert_eq!(targeted[0].operations(), &[(Operation::Add, 5.0), (Operation::Subtract, 2.0)]);
        assert_eq!(positions(&targeted[1]), vec![2]);
        assert_eq!(targeted[1].operations(), &[(Operation::Multiply, 2.0)]);
    }

    #[test]
    fn test_targeted_without_semicolons() {
        let dice = parse_notation("3d6i1:+1i2:+2").unwrap();
        assert_eq!(dice.targeted_bonuses().len(), 2);
    }

    #[test]
    fn test_zero_count() {
        let err = parse_notation("0d6").unwrap_err();
        assert_eq!(err.roll_error(), Some(&Error::ZeroValue));
    }

    #[test]
    fn test_huge_count_literal() {
        let err = parse_notation("99999999999999999999999d6").unwrap_err();
        assert_eq!(err.roll_error(), Some(&Error::LimitExceeded(10_000)));
    }

    #[test]
    fn test_huge_plain_integer() {
        let err = parse_notation("99999999999999999999999").unwrap_err();
        assert!(matches!(err, ParserError::Range(_)));
    }

    #[test]
    fn test_malformed_segments() {
        let cases: [(&str, fn(&ParserError) -> bool); 9] = [
            ("3d6x", |e| matches!(e, ParserError::Identifier(_))),
            ("3d6 % 2", |e| matches!(e, ParserError::Token('%'))),
            ("3d6.5", |e| matches!(e, ParserError::Range(_))),
            ("3d6 6", |e| matches!(e, ParserError::UnexpectedToken(_))),
            ("3d6+2d4", |e| matches!(e, ParserError::UnexpectedToken(_))),
            ("3d6i1+5", |e| matches!(e, ParserError::Expected { expected: "`:`", .. })),
            ("3d6i0:+5", |e| matches!(e, ParserError::ZeroValue)),
            ("3d6i1:", |e| matches!(e, ParserError::Expected { expected: "operator", .. })),
            ("3d6i1:+", |e| matches!(e, ParserError::Expected { expected: "number", .. })),
        ];

        for (input, check) in cases {
            let err = parse_notation(input).unwrap_err();
            assert!(check(err.err()), "{input}: {err:?}");
            assert!(err.pos().is_some(), "{input}: {err:?}");
        }
    }

    #[test]
    fn test_limit_checked_before_range() {
        let err = parse_notation("20000d6.5").unwrap_err();
        assert_eq!(err.roll_error(), Some(&Error::LimitExceeded(10_000)));
    }

    #[test]
    fn test_parser_fields() {
        let mut parser = Parser::new("2d4").unwrap();
        assert_eq!(parser.current, Token::Integer(2));
        assert_eq!(parser.peek, Token::Dice);

        let dice = parser.parse().unwrap();
        assert_eq!(dice.dice(), &BasicDice::new(2, 1, 4).unwrap());
    }
}

//! Token-level grammar rules built on [`nom`].
//!
//! Rules here skip any whitespace (newlines included) before each token, so a grammar written
//! with them reads like a PEG with insignificant whitespace:
//!
//! ```
//! use aoc_framework::grammar::{keyword, list_of, number, parse_all};
//! use nom::sequence::{pair, preceded};
//!
//! // Scores = "scores" ":" ListOf<number, ",">
//! let scores = preceded(pair(keyword("scores"), keyword(":")), list_of(number::<u32>(), ","));
//!
//! let parsed = parse_all(scores, "scores: 3, 17,\n  40\n").unwrap();
//! assert_eq!(parsed, vec![3, 17, 40]);
//! ```
//!
//! [`parse_all`] runs a rule over a whole input and reports where it stopped matching.

use std::str::FromStr;

use nom::{IResult, Parser};
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, multispace0};
use nom::combinator::all_consuming;
use nom::error::ErrorKind;
use nom::multi::{separated_list0, separated_list1};
use nom::sequence::{preceded, terminated};
use thiserror::Error;

/// The error type produced by every rule in this module.
pub type RuleError<'a> = nom::error::Error<&'a str>;

/// How many characters of unmatched input to quote in a [`GrammarError`].
const EXCERPT_LENGTH: usize = 24;

/// Input did not match a grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("input does not match grammar at line {line}, column {column}: {expected}, found {found}")]
pub struct GrammarError {
    /// One-based line where matching stopped.
    pub line: usize,
    /// One-based column (in characters) where matching stopped.
    pub column: usize,
    /// What the rule that stopped was looking for.
    pub expected: String,
    /// An excerpt of the input at that position.
    pub found: String,
}

impl GrammarError {
    /// Locate `remaining`, a suffix of `input`, as a line and column.
    fn at(input: &str, remaining: &str, kind: ErrorKind) -> Self {
        let offset = input.len().saturating_sub(remaining.len());
        let consumed = &input[..offset];
        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map_or(0, |index| index + 1);
        let column = consumed[line_start..].chars().count() + 1;

        let rest_of_line = remaining.lines().next().unwrap_or_default();
        let found = if rest_of_line.is_empty() {
            "end of line".to_string()
        } else {
            format!("{:?}", rest_of_line.chars().take(EXCERPT_LENGTH).collect::<String>())
        };

        Self {
            line,
            column,
            expected: describe(kind),
            found,
        }
    }
}

fn describe(kind: ErrorKind) -> String {
    match kind {
        ErrorKind::Eof => "expected end of input".to_string(),
        ErrorKind::Tag => "expected a keyword or delimiter".to_string(),
        ErrorKind::Digit => "expected a number".to_string(),
        ErrorKind::MapRes => "expected a number within range".to_string(),
        ErrorKind::Many1 | ErrorKind::SeparatedList => "expected at least one item".to_string(),
        other => format!("expected {other:?}"),
    }
}

/// A rule that skips leading whitespace, then applies `rule`.
pub fn token<'a, O, P>(rule: P) -> impl Parser<&'a str, Output = O, Error = RuleError<'a>>
where
    P: Parser<&'a str, Output = O, Error = RuleError<'a>>,
{
    preceded(multispace0, rule)
}

/// A rule matching exactly `literal` after optional whitespace.
pub fn keyword<'a>(
    literal: &'static str,
) -> impl Parser<&'a str, Output = &'a str, Error = RuleError<'a>> {
    token(tag(literal))
}

/// A rule matching a run of decimal digits after optional whitespace.
///
/// Digits that do not fit `N` fail the whole parse, so enclosing repetitions cannot stop early
/// and hide the cause.
pub fn number<'a, N>() -> impl Parser<&'a str, Output = N, Error = RuleError<'a>>
where
    N: FromStr,
{
    |input: &'a str| -> IResult<&'a str, N, RuleError<'a>> {
        let (rest, digits) = token(digit1).parse(input)?;
        let value = digits.parse::<N>().map_err(|_| {
            let at_digits = &input[input.len() - rest.len() - digits.len()..];
            nom::Err::Failure(RuleError::new(at_digits, ErrorKind::MapRes))
        })?;
        Ok((rest, value))
    }
}

/// Zero or more `item`s separated by `separator`.
///
/// A separator not followed by an item is left unconsumed.
pub fn list_of<'a, O, P>(
    item: P,
    separator: &'static str,
) -> impl Parser<&'a str, Output = Vec<O>, Error = RuleError<'a>>
where
    P: Parser<&'a str, Output = O, Error = RuleError<'a>>,
{
    separated_list0(keyword(separator), item)
}

/// One or more `item`s separated by `separator`.
pub fn non_empty_list_of<'a, O, P>(
    item: P,
    separator: &'static str,
) -> impl Parser<&'a str, Output = Vec<O>, Error = RuleError<'a>>
where
    P: Parser<&'a str, Output = O, Error = RuleError<'a>>,
{
    separated_list1(keyword(separator), item)
}

/// Match `rule` against the whole of `input`; only whitespace may follow the match.
///
/// # Errors
///
/// A [`GrammarError`] locating where `rule` stopped matching.
pub fn parse_all<'a, O, P>(rule: P, input: &'a str) -> Result<O, GrammarError>
where
    P: Parser<&'a str, Output = O, Error = RuleError<'a>>,
{
    match all_consuming(terminated(rule, multispace0)).parse(input) {
        Ok((_, output)) => Ok(output),
        Err(nom::Err::Error(error) | nom::Err::Failure(error)) => {
            Err(GrammarError::at(input, error.input, error.code))
        }
        // complete parsers never ask for more input; treat it as running off the end
        Err(nom::Err::Incomplete(_)) => Err(GrammarError::at(input, "", ErrorKind::Eof)),
    }
}

#[cfg(test)]
mod tests {
    use nom::multi::many1;
    use nom::sequence::preceded;

    use super::*;

    #[test]
    fn list_ignores_whitespace_between_tokens() -> Result<(), GrammarError> {
        let numbers = parse_all(list_of(number::<u8>(), ","), " 1 ,2,\n\t3 ")?;
        assert_eq!(numbers, vec![1, 2, 3]);
        Ok(())
    }

    #[test]
    fn list_may_be_empty() -> Result<(), GrammarError> {
        let numbers = parse_all(list_of(number::<u8>(), ";"), "  \n")?;
        assert!(numbers.is_empty());
        Ok(())
    }

    #[test]
    fn non_empty_list_rejects_empty_input() {
        let Err(error) = parse_all(non_empty_list_of(number::<u8>(), ";"), "") else {
            panic!("an empty list should not match");
        };
        assert_eq!((error.line, error.column), (1, 1));
    }

    #[test]
    fn trailing_separator_is_reported() {
        let Err(error) = parse_all(list_of(number::<u8>(), ","), "1, 2,") else {
            panic!("a dangling separator should not match");
        };
        assert_eq!((error.line, error.column), (1, 5));
        assert_eq!(error.expected, "expected end of input");
        assert_eq!(error.found, r#"",""#);
    }

    #[test]
    fn number_out_of_range_fails() {
        let Err(error) = parse_all(number::<u8>(), "256") else {
            panic!("256 does not fit a u8");
        };
        assert_eq!(error.expected, "expected a number within range");
    }

    #[test]
    fn number_out_of_range_stops_repetition() {
        let rule = many1(preceded(keyword("item"), number::<u8>()));
        let Err(error) = parse_all(rule, "item 1
item 300
item 3") else {
            panic!("300 does not fit a u8");
        };
        assert_eq!((error.line, error.column), (2, 6));
        assert_eq!(error.expected, "expected a number within range");
        assert_eq!(error.found, r#""300""#);
    }

    #[test]
    fn locates_errors_on_later_lines() {
        let rule = many1(preceded(keyword("item"), number::<u16>()));
        let Err(error) = parse_all(rule, "item 1\nitem 2\n  itme 3") else {
            panic!("misspelled keyword should not match");
        };
        assert_eq!((error.line, error.column), (3, 3));
        assert_eq!(error.found, r#""itme 3""#);
    }
}

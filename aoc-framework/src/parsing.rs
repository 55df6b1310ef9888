//! Line-oriented parsing helpers and their errors.

use std::str::FromStr;

use thiserror::Error;

use crate::{DynamicError, DynamicResult};

/// Parsing a string failed; keeps the offending string for the message.
#[derive(Error, Debug)]
#[error("failed to parse string: {string:?}")]
pub struct ParseContextError<E>
where
    E: std::error::Error,
{
    /// The string that was being parsed.
    string: String,
    source: E,
}

/// [`str::parse`], with errors wrapped in a [`ParseContextError`].
///
/// # Errors
///
/// A [`ParseContextError`] holding `string` and sourcing [`F::Err`][FromStr::Err].
///
/// # Examples
///
/// ```
/// use aoc_framework::parsing::parse_with_context;
///
/// assert_eq!(parse_with_context::<u8>("42").unwrap(), 42);
///
/// let error = parse_with_context::<u8>("4x2").unwrap_err();
/// assert_eq!(error.to_string(), r#"failed to parse string: "4x2""#);
/// ```
pub fn parse_with_context<F>(string: &str) -> Result<F, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: std::error::Error,
{
    string.parse::<F>().map_err(|source| ParseContextError {
        string: string.to_string(),
        source,
    })
}

/// A line of input failed to parse.
#[derive(Error, Debug)]
#[error("failure parsing line {}", .line_index.saturating_add(1))]
pub struct InvalidLine {
    /// Zero based; displayed one based.
    line_index: usize,
    source: DynamicError,
}

impl InvalidLine {
    /// The one-based number of the line that failed.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_index.saturating_add(1)
    }
}

/// Parse each line of `input` with `parser`, which also receives the zero-based line index.
///
/// # Errors
///
/// Each item is an [`InvalidLine`] sourcing the parser's error when that line fails.
///
/// # Examples
///
/// ```
/// use aoc_framework::parsing::{parse_input_lines, parse_with_context};
///
/// let parsed: Result<Vec<u8>, _> =
///     parse_input_lines("1\n2\nthree", |_, line| Ok(parse_with_context(line)?)).collect();
/// assert_eq!(parsed.unwrap_err().line_number(), 3);
/// ```
pub fn parse_input_lines<T, F>(
    input: &str,
    parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    F: FnMut(usize, &str) -> DynamicResult<T>,
{
    parse_lines_with_offset(input, 0, parser)
}

/// Like [`parse_input_lines`], for a slice starting `offset` lines into the original input.
///
/// The offset is added to the index passed to `parser` and to any [`InvalidLine`] reported.
///
/// # Errors
///
/// Each item is an [`InvalidLine`] sourcing the parser's error when that line fails.
pub fn parse_lines_with_offset<T, F>(
    input: &str,
    offset: usize,
    mut parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    F: FnMut(usize, &str) -> DynamicResult<T>,
{
    input.lines().enumerate().map(move |(index, line)| {
        let line_index = index.saturating_add(offset);
        parser(line_index, line).map_err(|source| InvalidLine { line_index, source })
    })
}

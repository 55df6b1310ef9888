//! Traits and helpers shared by every Advent of Code day.
//!
//! A day is split into an optional parse step and one or two parts:
//!
//! - [`ParseData`] turns the raw puzzle text into a day-specific structure.
//! - [`Solution<PartOne>`] and [`Solution<PartTwo>`] compute the answers.
//! - [`runner`] drives those steps and reports them through an output handler.
//!
//! Parsing helpers live in [`parsing`] (line oriented) and [`grammar`] (token oriented).
//!
//! # Examples
//!
//! ## Solving straight from the input text
//!
//! ```
//! use aoc_framework::{DynamicResult, PartOne, Solution};
//!
//! struct CountLines;
//!
//! impl Solution<PartOne> for CountLines {
//!     type Input = str;
//!     type Output = usize;
//!
//!     fn solve(input: &str) -> DynamicResult<usize> {
//!         Ok(input.lines().count())
//!     }
//! }
//!
//! assert_eq!(CountLines::solve("a\nb\nc").unwrap(), 3);
//! ```
//!
//! ## Solving from parsed data
//!
//! ```
//! use aoc_framework::parsing::{parse_input_lines, parse_with_context};
//! use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
//!
//! struct Depths(Vec<u32>);
//!
//! impl ParseData for Depths {
//!     fn parse(input: &str) -> DynamicResult<Self> {
//!         let depths = parse_input_lines(input, |_, line| Ok(parse_with_context(line)?))
//!             .collect::<Result<_, _>>()?;
//!         Ok(Self(depths))
//!     }
//! }
//!
//! struct Sonar;
//!
//! impl Solution<PartOne> for Sonar {
//!     type Input = Depths;
//!     type Output = u32;
//!
//!     fn solve(input: &Depths) -> DynamicResult<u32> {
//!         Ok(input.0.iter().sum())
//!     }
//! }
//!
//! impl Solution<PartTwo> for Sonar {
//!     type Input = Depths;
//!     type Output = u32;
//!
//!     fn solve(input: &Depths) -> DynamicResult<u32> {
//!         Ok(input.0.iter().copied().max().unwrap_or(0))
//!     }
//! }
//!
//! let depths = Depths::parse("199\n200\n208").unwrap();
//! assert_eq!(<Sonar as Solution<PartOne>>::solve(&depths).unwrap(), 607);
//! assert_eq!(<Sonar as Solution<PartTwo>>::solve(&depths).unwrap(), 208);
//! ```

#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;
use std::fmt::Display;

pub mod grammar;
pub mod parsing;
pub mod runner;

mod private {
    /// Keeps [`Part`][super::Part] implementable only by the markers in this crate.
    pub trait Sealed {}
}

/// A boxed error of any kind, as returned by parse steps and solutions.
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// A result whose error is a [`DynamicError`].
pub type DynamicResult<T> = Result<T, DynamicError>;

/// Which half of a day's puzzle is being solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    One,
    Two,
}

impl PartKind {
    /// The one-based part number, as the puzzle text counts them.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Part {}", self.number())
    }
}

/// Marker for a puzzle part, used as the generic parameter of [`Solution`].
pub trait Part: private::Sealed {
    /// The [`PartKind`] this marker stands for.
    fn kind() -> PartKind;
}

/// Marks a [`Solution`] for part one.
pub struct PartOne;
impl private::Sealed for PartOne {}
impl Part for PartOne {
    fn kind() -> PartKind {
        PartKind::One
    }
}

/// Marks a [`Solution`] for part two.
pub struct PartTwo;
impl private::Sealed for PartTwo {}
impl Part for PartTwo {
    fn kind() -> PartKind {
        PartKind::Two
    }
}

/// A solver for one [`Part`] of a day.
///
/// One type commonly implements both `Solution<PartOne>` and `Solution<PartTwo>` over the same
/// [`Solution::Input`].
pub trait Solution<P: Part> {
    /// What the solver reads: `str` for the raw text, or a [`ParseData`] type.
    type Input: ?Sized;

    /// The answer type.
    type Output: Display;

    /// Compute the answer for `input`.
    ///
    /// # Errors
    ///
    /// Invalid input or arithmetic overflow, as a [`DynamicError`].
    fn solve(input: &Self::Input) -> DynamicResult<Self::Output>;
}

/// Data built by parsing the raw puzzle text once, shared by both parts.
pub trait ParseData {
    /// Parse the puzzle text.
    ///
    /// # Errors
    ///
    /// Any parse failure, as a [`DynamicError`].
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_kind_displays_its_number() {
        assert_eq!(PartKind::One.to_string(), "Part 1");
        assert_eq!(PartKind::Two.to_string(), "Part 2");
        assert_eq!(PartTwo::kind().number(), 2);
    }
}

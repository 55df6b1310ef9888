//! Solutions implemented for Advent of Code 2023.
//!
//! [`run_day`] runs a solution chosen by its day number.
//!
//! To add a day:
//! 1. Write the solution in a submodule `dayNN`.
//! 2. Implement [`SolutionRunner`] for [`AdventOfCode2023<DAY>`] in that submodule, normally with
//!    [`#[solution_runner]`][aoc_framework::runner::solution_runner].
//! 3. Declare the submodule and add a match arm to [`run_day`].

#![warn(clippy::dbg_macro, clippy::print_stderr, clippy::print_stdout)]

use aoc_framework::DynamicResult;
use aoc_framework::runner::{OutputHandler, SolutionRunner};
use thiserror::Error;

mod day01;
mod day02;
mod day03;

/// Solutions, one type per day.
///
/// ```ignore
/// // in day01.rs
/// #[solution_runner(name = "Day 1: Trebuchet?!", part_one = Day01, part_two = Day01)]
/// impl super::AdventOfCode2023<1> {}
/// ```
struct AdventOfCode2023<const DAY: u8>;

/// There is no solution for the requested day.
#[derive(Error, Debug)]
#[error("no solution available for day {0}")]
pub struct DayNotAvailable(u8);

/// The days that have a solution, in order.
pub const AVAILABLE_DAYS: [u8; 3] = [1, 2, 3];

/// Run the solution for `day`.
///
/// # Errors
///
/// [`DayNotAvailable`] for a day without a solution, otherwise whatever the solution returns.
pub fn run_day(
    day: u8,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()> {
    match day {
        1 => AdventOfCode2023::<1>::run(input, handler, timed),
        2 => AdventOfCode2023::<2>::run(input, handler, timed),
        3 => AdventOfCode2023::<3>::run(input, handler, timed),
        _ => Err(DayNotAvailable(day).into()),
    }
}

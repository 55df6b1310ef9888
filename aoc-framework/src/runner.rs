//! Running a day's parse step and parts, reporting progress to an [`OutputHandler`].
//!
//! Days normally get their [`SolutionRunner`] from the [`#[solution_runner]`][solution_runner]
//! attribute:
//!
//! ```
//! # use aoc_framework::runner::solution_runner;
//! # use aoc_framework::{DynamicResult, PartOne, Solution};
//! #
//! struct Day01;
//!
//! impl Solution<PartOne> for Day01 {
//!     type Input = str;
//!     /* ... */
//! #    type Output = usize;
//! #    fn solve(_input: &Self::Input) -> DynamicResult<usize> {
//! #        Ok(0)
//! #    }
//! }
//!
//! #[solution_runner(name = "Day 1", part_one = Day01)]
//! impl Day01 {}
//! ```

use std::fmt::Display;
use std::time::{Duration, Instant};

use crate::{DynamicResult, ParseData, Part, PartKind, PartOne, PartTwo, Solution};

pub use aoc_framework_macros::solution_runner;

/// Receives the events of running a solution.
pub trait OutputHandler {
    /// The solution is starting; `name` is its display name.
    fn solution_name(&mut self, name: &str);

    /// Parsing the input is starting.
    fn parse_start(&mut self);

    /// Parsing finished, taking `duration_opt` when timed.
    fn parse_end(&mut self, duration_opt: Option<Duration>);

    /// A part is starting.
    fn part_start(&mut self, part: PartKind);

    /// A part produced `output`, taking `duration_opt` when timed.
    fn part_output(&mut self, part: PartKind, output: &dyn Display, duration_opt: Option<Duration>);
}

/// Evaluate `step`, measuring how long it took when `timed`.
fn measure<T>(timed: bool, step: impl FnOnce() -> T) -> (T, Option<Duration>) {
    if timed {
        let start = Instant::now();
        let result = step();
        (result, Some(start.elapsed()))
    } else {
        (step(), None)
    }
}

fn run_part<S, P>(
    input: &S::Input,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    P: Part,
    S: Solution<P>,
{
    let part = P::kind();
    handler.part_start(part);
    let (result, duration_opt) = measure(timed, || S::solve(input));
    let output = result.inspect_err(|error| tracing::debug!(%part, %error, "part failed"))?;
    tracing::debug!(%part, ?duration_opt, "part solved");
    handler.part_output(part, &output, duration_opt);
    Ok(())
}

fn run_parse<D: ParseData>(
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<D> {
    handler.parse_start();
    let (result, duration_opt) = measure(timed, || D::parse(input));
    let parsed = result.inspect_err(|error| tracing::debug!(%error, "parsing failed"))?;
    tracing::debug!(?duration_opt, "input parsed");
    handler.parse_end(duration_opt);
    Ok(parsed)
}

fn start(name: &str, input: &str, handler: &mut dyn OutputHandler) {
    tracing::debug!(name, input_bytes = input.len(), "running solution");
    handler.solution_name(name);
}

/// Run part one of a solution that reads the raw input.
///
/// # Errors
///
/// The solution's error, if any.
pub fn solve_half_solution<S1>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    S1: Solution<PartOne, Input = str>,
{
    start(name, input, handler);
    run_part::<S1, PartOne>(input, handler, timed)
}

/// Run both parts of a solution that reads the raw input.
///
/// # Errors
///
/// The first error from part one or part two; part two does not run if part one fails.
pub fn solve_full_solution<S1, S2>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    S1: Solution<PartOne, Input = str>,
    S2: Solution<PartTwo, Input = str>,
{
    start(name, input, handler);
    run_part::<S1, PartOne>(input, handler, timed)?;
    run_part::<S2, PartTwo>(input, handler, timed)
}

/// Parse the input into `D`, then run part one on it.
///
/// # Errors
///
/// The parse error or the solution's error.
pub fn solve_parsed_half_solution<D, S1>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    D: ParseData,
    S1: Solution<PartOne, Input = D>,
{
    start(name, input, handler);
    let parsed = run_parse::<D>(input, handler, timed)?;
    run_part::<S1, PartOne>(&parsed, handler, timed)
}

/// Parse the input into `D` once, then run both parts on it.
///
/// # Errors
///
/// The parse error, or the first error from part one or part two.
pub fn solve_parsed_full_solution<D, S1, S2>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    D: ParseData,
    S1: Solution<PartOne, Input = D>,
    S2: Solution<PartTwo, Input = D>,
{
    start(name, input, handler);
    let parsed = run_parse::<D>(input, handler, timed)?;
    run_part::<S1, PartOne>(&parsed, handler, timed)?;
    run_part::<S2, PartTwo>(&parsed, handler, timed)
}

/// A runnable day, usually implemented by [`#[solution_runner]`][solution_runner].
pub trait SolutionRunner {
    /// Run the day on `input`, reporting to `handler` and timing each step when `timed`.
    ///
    /// # Errors
    ///
    /// The first parse or solution error.
    fn run(input: &str, handler: &mut dyn OutputHandler, timed: bool) -> DynamicResult<()>;
}

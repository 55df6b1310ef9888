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
#![deny(clippy::unwrap_used)]

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Error, Result};
use aoc_framework::PartKind;
use aoc_framework::runner::OutputHandler;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

mod monoid;
mod solutions;

/// Advent of Code 2023 puzzle solver.
#[derive(Parser, Debug)]
struct Cli {
    /// The day's solution to run (e.g. 1, 2, etc).
    #[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
    day: u8,

    /// Read this file instead of the day's default input.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Directory holding default inputs, named `dayNN.txt`.
    #[arg(long, value_name = "DIR", env = "AOC_INPUTS_DIR", default_value = "inputs")]
    inputs_dir: PathBuf,

    /// Measure and print the durations of parsing and solving parts.
    #[arg(short, long, action = ArgAction::SetTrue)]
    timed: bool,

    /// Minimum duration (in milliseconds) required to print timing.
    /// 0 = always print.
    #[arg(long, value_name = "NUMBER", default_value_t)]
    min_timing_ms: u64,
}

/// Log to stderr, filtered by `RUST_LOG` (warnings and errors when unset).
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// The default input path for `day` under `inputs_dir`.
fn default_input_path(inputs_dir: &Path, day: u8) -> PathBuf {
    inputs_dir.join(format!("day{day:02}.txt"))
}

/// Read the default input file for a day.
fn get_default_input(inputs_dir: &Path, day: u8) -> Result<String> {
    let path = default_input_path(inputs_dir, day);
    tracing::debug!(path = %path.display(), "reading default input");

    fs::read_to_string(&path).with_context(|| {
        format!(
            "default input file missing: {}\n\n\
            please create the file or provide the input file argument",
            path.display()
        )
    })
}

/// Read the given input file.
fn get_input(input_file: &Path) -> Result<String> {
    tracing::debug!(path = %input_file.display(), "reading input");
    fs::read_to_string(input_file)
        .with_context(|| format!("could not read input file at: {}", input_file.display()))
}

/// Prints solution events to stdout.
struct CliOutputHandler {
    /// Durations shorter than this are not printed.
    min_duration: Duration,
}

impl CliOutputHandler {
    fn new(min_duration: Duration) -> Self {
        Self { min_duration }
    }

    /// Scale `duration` to the largest unit it reaches, down to nanoseconds.
    fn format_duration(duration: Duration) -> String {
        const UNITS: [(f64, &str); 3] =
            [(1.0, "seconds"), (1e3, "milliseconds"), (1e6, "microseconds")];

        if duration < Duration::from_micros(1) {
            return format!("{} nanoseconds", duration.as_nanos());
        }
        let seconds = duration.as_secs_f64();
        let (scale, unit) = UNITS
            .into_iter()
            .find(|&(scale, _)| seconds * scale >= 1.0)
            .unwrap_or(UNITS[2]);
        format!("{:.3} {unit}", seconds * scale)
    }

    /// The printed duration, when there is one that reaches the minimum.
    fn displayed_duration(&self, duration: Option<Duration>) -> Option<String> {
        duration
            .filter(|duration| *duration >= self.min_duration)
            .map(Self::format_duration)
    }
}

impl OutputHandler for CliOutputHandler {
    fn solution_name(&mut self, name: &str) {
        println!("= {name} =");
    }

    fn parse_start(&mut self) {}

    fn parse_end(&mut self, duration: Option<Duration>) {
        if let Some(duration) = self.displayed_duration(duration) {
            println!("Input parsed in {duration}");
        }
    }

    fn part_start(&mut self, part: PartKind) {
        println!("-- {part} --");
    }

    fn part_output(&mut self, _part: PartKind, output: &dyn Display, duration: Option<Duration>) {
        match self.displayed_duration(duration) {
            Some(duration) => println!("{output} ({duration})"),
            None => println!("{output}"),
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Cli::parse();
    tracing::debug!(?args, "parsed arguments");

    let input_str = args.input.as_deref().map_or_else(
        || get_default_input(&args.inputs_dir, args.day),
        get_input,
    )?;
    let mut handler = CliOutputHandler::new(Duration::from_millis(args.min_timing_ms));
    solutions::run_day(args.day, &input_str, &mut handler, args.timed).map_err(|dyn_error| {
        let is_unavailable = dyn_error.is::<solutions::DayNotAvailable>();
        let anyhow_error = Error::from_boxed(dyn_error);
        if is_unavailable {
            anyhow_error.context(format!(
                "solutions are available for days {:?}",
                solutions::AVAILABLE_DAYS
            ))
        } else {
            anyhow_error.context("failed to run solution")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_input_is_zero_padded() {
        let path = default_input_path(Path::new("inputs"), 3);
        assert_eq!(path, Path::new("inputs").join("day03.txt"));
    }

    #[test]
    fn formats_durations_by_magnitude() {
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_millis(1500)),
            "1.500 seconds"
        );
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_micros(2500)),
            "2.500 milliseconds"
        );
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_nanos(12)),
            "12 nanoseconds"
        );
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_nanos(4200)),
            "4.200 microseconds"
        );
    }

    #[test]
    fn filters_short_durations() {
        let handler = CliOutputHandler::new(Duration::from_millis(5));
        assert_eq!(
            handler.displayed_duration(Some(Duration::from_millis(1))),
            None
        );
        assert_eq!(handler.displayed_duration(None), None);
        assert!(
            handler
                .displayed_duration(Some(Duration::from_millis(6)))
                .is_some()
        );
    }

    #[test]
    fn cli_reads_day_and_flags() {
        let cli = Cli::parse_from(["aoc-2023", "2", "--timed", "--inputs-dir", "puzzles"]);
        assert_eq!(cli.day, 2);
        assert!(cli.timed);
        assert_eq!(cli.inputs_dir, PathBuf::from("puzzles"));
    }

    #[test]
    fn cli_rejects_day_out_of_range() {
        assert!(Cli::try_parse_from(["aoc-2023", "26"]).is_err());
    }
}

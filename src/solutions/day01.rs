use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use regex::Regex;
use thiserror::Error;

#[solution_runner(name = "Day 1: Trebuchet?!", part_one = Day01, part_two = Day01)]
impl super::AdventOfCode2023<1> {}

#[derive(Error, Debug)]
enum Day01Error {
    #[error("no digits found in line: {0:?}")]
    NoDigitInLine(String),
    #[error("calibration values overflowed while summing")]
    SumOverflow,
}

/*
Input is a calibration document: one line per calibration value, with the value hidden among
other characters.

For part 1, the calibration value of a line is the two-digit number made from the first and the
last digit in the line (the same digit twice if there's only one). The answer is the sum of all
calibration values.
*/

type CalibrationValue = u8;

/// All the ASCII digits of `line`, in order.
fn extract_digits(line: &str) -> String {
    line.chars().filter(char::is_ascii_digit).collect()
}

/// The first and last characters of `string`, or `None` if it's empty.
fn extremal_characters(string: &str) -> Option<(char, char)> {
    let mut chars = string.chars();
    let first = chars.next()?;
    Some((first, chars.next_back().unwrap_or(first)))
}

/// The first and last digits of `line` as a two-character string.
fn extremal_digits(line: &str) -> Option<String> {
    let (first, last) = extremal_characters(&extract_digits(line))?;
    Some([first, last].iter().collect())
}

/// The number encoded by the first and last digits of `line`.
fn calibration_value(line: &str) -> DynamicResult<CalibrationValue> {
    let digits =
        extremal_digits(line).ok_or_else(|| Day01Error::NoDigitInLine(line.to_owned()))?;
    Ok(parse_with_context(&digits)?)
}

/// Sum the calibration values of the non-empty lines of `input`, reading each line through
/// `rewrite` first.
fn calibration_sum(input: &str, rewrite: impl Fn(&str) -> String) -> DynamicResult<u32> {
    let values: Vec<CalibrationValue> = parse_input_lines(input, |_, line| {
        // blank lines contribute nothing
        Ok(if line.trim().is_empty() {
            0
        } else {
            calibration_value(&rewrite(line))?
        })
    })
    .collect::<Result<_, _>>()?;

    let sum = values
        .into_iter()
        .map(u32::from)
        .checked_sum()
        .ok_or(Day01Error::SumOverflow)?;
    Ok(sum)
}

struct Day01;

impl Solution<PartOne> for Day01 {
    type Input = str;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        calibration_sum(input, str::to_owned)
    }
}

/*
For part 2, digits may also be spelled out as words ("one" through "nine"). Words can overlap, as
in "eightwo", and both count: the "two" here is still the last digit.

Spelled words are rewritten to digits one at a time, earliest first. Only the first letter of a
word is replaced, so any later word sharing its letters stays readable ("xtwone3four" becomes
"x2w1ne34our").
*/

const SPELLED_DIGITS: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Rewrites spelled-out digits in calibration lines.
struct SpelledDigits {
    /// Matches any spelled-out digit.
    word_re: Regex,
}

impl SpelledDigits {
    fn new() -> Result<Self, regex::Error> {
        let word_re = Regex::new(&SPELLED_DIGITS.join("|"))?;
        Ok(Self { word_re })
    }

    fn remain_in(&self, string: &str) -> bool {
        self.word_re.is_match(string)
    }

    /// Replace the first letter of the earliest spelled-out digit with the digit itself.
    fn first_to_digit(&self, string: &str) -> String {
        let Some(word) = self.word_re.find(string) else {
            return string.to_owned();
        };
        let digit = SPELLED_DIGITS
            .iter()
            .zip('1'..='9')
            .find_map(|(spelled, digit)| (*spelled == word.as_str()).then_some(digit))
            .unwrap_or_default();

        let mut rewritten = String::with_capacity(string.len());
        rewritten.push_str(&string[..word.start()]);
        rewritten.push(digit);
        // spelled digits are ASCII, so skipping one byte skips the first letter
        rewritten.push_str(&string[word.start() + 1..]);
        rewritten
    }

    fn all_to_digits(&self, string: &str) -> String {
        fixed_point(|s| self.first_to_digit(s), |s| self.remain_in(s))(string)
    }
}

/// Build a function that keeps applying `worker` to a string while `work_to_do` holds for it.
///
/// `worker` must eventually make `work_to_do` false, or the built function never returns.
fn fixed_point<'f>(
    worker: impl Fn(&str) -> String + 'f,
    work_to_do: impl Fn(&str) -> bool + 'f,
) -> impl Fn(&str) -> String + 'f {
    move |string| {
        let mut current = string.to_owned();
        while work_to_do(&current) {
            current = worker(&current);
        }
        current
    }
}

impl Solution<PartTwo> for Day01 {
    type Input = str;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let spelled_digits = SpelledDigits::new()?;
        calibration_sum(input, |line| spelled_digits.all_to_digits(line))
    }
}

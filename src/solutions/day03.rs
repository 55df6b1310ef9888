use std::collections::{HashMap, HashSet};
use std::ops::Range;

use aoc_framework::parsing::parse_input_lines;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use nalgebra::Point2;

use crate::monoid::{Any, CheckedProduct, FoldMap};

#[solution_runner(name = "Day 3: Gear Ratios", parsed = Schematic, part_one = Day03, part_two = Day03)]
impl super::AdventOfCode2023<3> {}

#[derive(thiserror::Error, Debug)]
enum Day03Error {
    /// The length of the line does not match the first line's length.
    #[error("expected line length matching first line ({first_length}), found {found}")]
    MismatchedLineLength { first_length: usize, found: usize },

    #[error("number starting at {0} is too large")]
    NumberTooLarge(Point2<usize>),

    #[error("sum of {0} overflowed")]
    SumOverflow(&'static str),

    #[error("gear ratio at {0} overflowed")]
    GearRatioOverflow(Point2<usize>),
}

/*
Input is an engine schematic: a grid of characters. Runs of digits read left-to-right form
numbers, `.` is empty space, and anything else is a symbol.
*/

/// What a single grid cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GridItem {
    Empty,
    Digit(u32),
    Symbol(char),
}

impl From<char> for GridItem {
    fn from(character: char) -> Self {
        match character {
            '.' => Self::Empty,
            _ => character
                .to_digit(10)
                .map_or(Self::Symbol(character), Self::Digit),
        }
    }
}

/// A rectangular grid of [`GridItem`]s, with `(0, 0)` at the top left.
///
/// Points are `(x, y)`: `x` is the column and `y` the row.
#[derive(Debug)]
struct Grid {
    width: usize,
    height: usize,
    /// Row-major.
    cells: Vec<GridItem>,
}

impl Grid {
    /// Trailing blank lines are ignored; any other line must match the first line's length.
    fn parse(input: &str) -> DynamicResult<Self> {
        let input = input.trim_end_matches(['\n', '\r']);
        let mut first_length = None;
        let rows: Vec<Vec<GridItem>> = parse_input_lines(input, |_, line| {
            let length = line.chars().count();
            match first_length {
                None => first_length = Some(length),
                Some(first_length) if first_length != length => {
                    return Err(Day03Error::MismatchedLineLength {
                        first_length,
                        found: length,
                    }
                    .into());
                }
                Some(_) => {}
            }
            Ok(line.chars().map(GridItem::from).collect())
        })
        .collect::<Result<_, _>>()?;

        Ok(Self {
            width: first_length.unwrap_or(0),
            height: rows.len(),
            cells: rows.into_iter().flatten().collect(),
        })
    }

    fn get(&self, point: Point2<usize>) -> Option<GridItem> {
        (point.x < self.width && point.y < self.height)
            .then(|| self.cells[point.y * self.width + point.x])
    }

    /// The in-bounds points around `point`, diagonals included.
    fn neighbors(&self, point: Point2<usize>) -> impl Iterator<Item = Point2<usize>> + '_ {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&offset| offset != (0, 0))
            .filter_map(move |(dx, dy)| {
                let x = point.x.checked_add_signed(dx)?;
                let y = point.y.checked_add_signed(dy)?;
                let neighbor = Point2::new(x, y);
                self.get(neighbor).map(|_| neighbor)
            })
    }

    /// Every point with its item, row by row.
    fn items(&self) -> impl Iterator<Item = (Point2<usize>, GridItem)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Point2::new(x, y)))
            .zip(self.cells.iter().copied())
    }
}

type PartNumber = u32;

/// A number found in the grid.
#[derive(Debug, PartialEq, Eq)]
struct SchematicNumber {
    value: PartNumber,
    row: usize,
    columns: Range<usize>,
}

impl SchematicNumber {
    fn points(&self) -> impl Iterator<Item = Point2<usize>> + '_ {
        self.columns.clone().map(|x| Point2::new(x, self.row))
    }
}

/// Group each row's runs of digits into numbers.
fn scan_numbers(grid: &Grid) -> Result<Vec<SchematicNumber>, Day03Error> {
    let mut numbers = Vec::new();
    // (start column, value) of the run being read
    let mut current: Option<(usize, PartNumber)> = None;

    for (point, item) in grid.items() {
        if point.x == 0
            && let Some((start, value)) = current.take()
        {
            numbers.push(SchematicNumber {
                value,
                row: point.y - 1,
                columns: start..grid.width,
            });
        }

        match (item, current) {
            (GridItem::Digit(digit), None) => {
                current = Some((point.x, digit));
            }
            (GridItem::Digit(digit), Some((start, value))) => {
                let value = value
                    .checked_mul(10)
                    .and_then(|value| value.checked_add(digit))
                    .ok_or(Day03Error::NumberTooLarge(Point2::new(start, point.y)))?;
                current = Some((start, value));
            }
            (_, Some((start, value))) => {
                numbers.push(SchematicNumber {
                    value,
                    row: point.y,
                    columns: start..point.x,
                });
                current = None;
            }
            (_, None) => {}
        }
    }

    if let Some((start, value)) = current {
        numbers.push(SchematicNumber {
            value,
            row: grid.height - 1,
            columns: start..grid.width,
        });
    }

    Ok(numbers)
}

struct Schematic {
    grid: Grid,
    numbers: Vec<SchematicNumber>,
}

impl ParseData for Schematic {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let grid = Grid::parse(input)?;
        let numbers = scan_numbers(&grid)?;
        Ok(Self { grid, numbers })
    }
}

/*
For part 1, sum the part numbers: the numbers with a symbol next to any of their digits, diagonals
included.
*/

impl Schematic {
    fn is_part_number(&self, number: &SchematicNumber) -> bool {
        number
            .points()
            .flat_map(|point| self.grid.neighbors(point))
            .fold_map(|neighbor| {
                Any(matches!(
                    self.grid.get(neighbor),
                    Some(GridItem::Symbol(_))
                ))
            })
            .0
    }

    fn part_numbers(&self) -> impl Iterator<Item = PartNumber> + '_ {
        self.numbers
            .iter()
            .filter(|number| self.is_part_number(number))
            .map(|number| number.value)
    }
}

struct Day03;

impl Solution<PartOne> for Day03 {
    type Input = Schematic;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let sum = input
            .part_numbers()
            .checked_sum()
            .ok_or(Day03Error::SumOverflow("part numbers"))?;
        Ok(sum)
    }
}

/*
For part 2, a gear is a `*` next to exactly two numbers, and its ratio is the product of those two
numbers. Sum all gear ratios.
*/

type GearRatio = u64;

impl Schematic {
    fn gear_ratios(&self) -> Result<Vec<GearRatio>, Day03Error> {
        let number_at: HashMap<Point2<usize>, usize> = self
            .numbers
            .iter()
            .enumerate()
            .flat_map(|(index, number)| number.points().map(move |point| (point, index)))
            .collect();

        let mut ratios = Vec::new();
        for (point, item) in self.grid.items() {
            if item != GridItem::Symbol('*') {
                continue;
            }

            let adjacent: HashSet<usize> = self
                .grid
                .neighbors(point)
                .filter_map(|neighbor| number_at.get(&neighbor).copied())
                .collect();
            if adjacent.len() == 2 {
                let ratio = adjacent
                    .into_iter()
                    .map(|index| GearRatio::from(self.numbers[index].value))
                    .checked_product()
                    .ok_or(Day03Error::GearRatioOverflow(point))?;
                ratios.push(ratio);
            }
        }
        Ok(ratios)
    }
}

impl Solution<PartTwo> for Day03 {
    type Input = Schematic;
    type Output = GearRatio;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let sum = input
            .gear_ratios()?
            .into_iter()
            .checked_sum()
            .ok_or(Day03Error::SumOverflow("gear ratios"))?;
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"467..114..
...*......
..35..633.
......#...
617*......
.....+.58.
..592.....
......755.
...$.*....
.664.598..
";

    #[test]
    fn reads_grid_items() -> DynamicResult<()> {
        let grid = Grid::parse(EXAMPLE_INPUT)?;
        assert_eq!((grid.width, grid.height), (10, 10));
        assert_eq!(grid.get(Point2::new(0, 0)), Some(GridItem::Digit(4)));
        assert_eq!(grid.get(Point2::new(3, 1)), Some(GridItem::Symbol('*')));
        assert_eq!(grid.get(Point2::new(4, 0)), Some(GridItem::Empty));
        assert_eq!(grid.get(Point2::new(10, 0)), None);
        Ok(())
    }

    #[test]
    fn rejects_ragged_grid() {
        let Err(error) = Grid::parse("...\n....\n") else {
            panic!("lines of different lengths should be rejected");
        };
        assert_eq!(error.to_string(), "failure parsing line 2");
    }

    #[test]
    fn ignores_trailing_blank_lines() -> DynamicResult<()> {
        let schematic = Schematic::parse("467..\n...*.\n\n")?;
        assert_eq!((schematic.grid.width, schematic.grid.height), (5, 2));
        assert_eq!(schematic.numbers.len(), 1);

        let Err(error) = Grid::parse("...\n\n...\n") else {
            panic!("a blank line inside the grid should be rejected");
        };
        assert_eq!(error.to_string(), "failure parsing line 2");
        Ok(())
    }

    #[test]
    fn rejects_number_too_large() {
        let Err(error) = Schematic::parse("..99999999999.\n..............") else {
            panic!("number should overflow");
        };
        assert!(matches!(
            error.downcast_ref::<Day03Error>(),
            Some(Day03Error::NumberTooLarge(start)) if *start == Point2::new(2, 0)
        ));
    }

    #[test]
    fn neighbors_stay_in_bounds() -> DynamicResult<()> {
        let grid = Grid::parse("123\n456\n789")?;

        let corner: HashSet<_> = grid.neighbors(Point2::new(0, 0)).collect();
        let expected: HashSet<_> = [(1, 0), (0, 1), (1, 1)]
            .into_iter()
            .map(|(x, y)| Point2::new(x, y))
            .collect();
        assert_eq!(corner, expected);

        let centre: Vec<_> = grid.neighbors(Point2::new(1, 1)).collect();
        assert_eq!(centre.len(), 8);
        assert!(!centre.contains(&Point2::new(1, 1)));
        Ok(())
    }

    #[test]
    fn scans_numbers_including_row_ends() -> DynamicResult<()> {
        let grid = Grid::parse("..12\n7.*.\n.305")?;
        let numbers = scan_numbers(&grid)?;
        let expected = vec![
            SchematicNumber {
                value: 12,
                row: 0,
                columns: 2..4,
            },
            SchematicNumber {
                value: 7,
                row: 1,
                columns: 0..1,
            },
            SchematicNumber {
                value: 305,
                row: 2,
                columns: 1..4,
            },
        ];
        assert_eq!(numbers, expected);
        Ok(())
    }

    #[test]
    fn gear_needs_exactly_two_numbers() -> DynamicResult<()> {
        let schematic = Schematic::parse("2.3\n.*.\n..4")?;
        assert!(schematic.gear_ratios()?.is_empty());

        let schematic = Schematic::parse("22.\n.*.\n..4")?;
        assert_eq!(schematic.gear_ratios()?, vec![88]);
        Ok(())
    }

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Schematic::parse(EXAMPLE_INPUT)?;
        let result = <Day03 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 4361);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Schematic::parse(EXAMPLE_INPUT)?;
        let result = <Day03 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 467_835);
        Ok(())
    }
}

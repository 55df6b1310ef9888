use std::array;
use std::convert::identity;

use aoc_framework::grammar::{RuleError, keyword, list_of, number, parse_all, token};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::{map, value};
use nom::multi::many1;
use nom::sequence::{pair, preceded, separated_pair};

use crate::monoid::{All, CheckedProduct, FoldMap, Max, Monoid, Sum};

#[solution_runner(name = "Day 2: Cube Conundrum", parsed = Games, part_one = Day02, part_two = Day02)]
impl super::AdventOfCode2023<2> {}

#[derive(thiserror::Error, Debug)]
enum Day02Error {
    #[error("sum of game IDs overflowed")]
    IdSumOverflow,

    #[error("sum of powers overflowed")]
    PowerSumOverflow,
}

/*
Input is a record of games played with a bag of red, green and blue cubes. In each round of a game,
a handful of cubes is taken from the bag, shown, and put back.

Each game is written as its ID, a colon, and a semicolon-separated list of rounds. A round is a
comma-separated list of a count and a colour:

    Games  = Game+
    Game   = "Game" number ":" Rounds
    Rounds = ListOf<Round, ";">
    Round  = ListOf<Cubes, ",">
    Cubes  = number colour
    colour = "red" | "blue" | "green"

Whitespace between tokens, line breaks included, is insignificant.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Colour {
    Red,
    Green,
    Blue,
}

impl Colour {
    const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Position of this colour's count in a [`CubeSet`].
    fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

type CubeCount = u32;

/// A count of cubes for each colour: a round's handful, or what the bag holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct CubeSet {
    counts: [CubeCount; 3],
}

impl CubeSet {
    const fn new(red: CubeCount, green: CubeCount, blue: CubeCount) -> Self {
        Self {
            counts: [red, green, blue],
        }
    }

    /// Collect `(count, colour)` pairs, with absent colours counting zero.
    ///
    /// A colour listed twice keeps its last count.
    fn from_handful(handful: &[(CubeCount, Colour)]) -> Self {
        let mut set = Self::default();
        for &(count, colour) in handful {
            set.counts[colour.index()] = count;
        }
        set
    }

    fn count(&self, colour: Colour) -> CubeCount {
        self.counts[colour.index()]
    }

    /// Whether this set holds at least as many cubes of every colour as `candidate`.
    fn could_provide(&self, candidate: &Self) -> bool {
        let All(enough) = Colour::ALL
            .into_iter()
            .fold_map(|colour| All(candidate.count(colour) <= self.count(colour)));
        enough
    }

    /// The smallest set that could provide both this set and `other`.
    fn minimum_required_with(self, other: Self) -> Self {
        self.concat(other)
    }

    /// The product of the three counts, `None` on overflow.
    fn power(&self) -> Option<u64> {
        self.counts.iter().map(|&count| u64::from(count)).checked_product()
    }
}

/// Sets combine by taking the larger count of each colour.
impl Monoid for CubeSet {
    fn empty() -> Self {
        Self::default()
    }

    fn concat(self, other: Self) -> Self {
        Self {
            counts: array::from_fn(|index| {
                Max(self.counts[index]).concat(Max(other.counts[index])).0
            }),
        }
    }
}

type GameId = u32;

#[derive(Debug)]
struct Game {
    id: GameId,
    rounds: Vec<CubeSet>,
}

impl Game {
    /// Whether every round could have been drawn from a bag holding `supply`.
    fn could_be_played_with(&self, supply: &CubeSet) -> bool {
        self.rounds
            .iter()
            .fold_map(|round| All(supply.could_provide(round)))
            .0
    }

    /// The fewest cubes of each colour the bag must have held for this game.
    fn minimum_cube_supply(&self) -> CubeSet {
        self.rounds.iter().copied().fold_map(identity)
    }
}

fn colour<'a>() -> impl Parser<&'a str, Output = Colour, Error = RuleError<'a>> {
    token(alt((
        value(Colour::Red, tag("red")),
        value(Colour::Blue, tag("blue")),
        value(Colour::Green, tag("green")),
    )))
}

fn cubes<'a>() -> impl Parser<&'a str, Output = (CubeCount, Colour), Error = RuleError<'a>> {
    pair(number::<CubeCount>(), colour())
}

fn game<'a>() -> impl Parser<&'a str, Output = Game, Error = RuleError<'a>> {
    let rounds = list_of(list_of(cubes(), ","), ";");
    map(
        preceded(keyword("Game"), separated_pair(number::<GameId>(), keyword(":"), rounds)),
        |(id, handfuls): (GameId, Vec<Vec<(CubeCount, Colour)>>)| Game {
            id,
            rounds: handfuls
                .iter()
                .map(|handful| CubeSet::from_handful(handful))
                .collect(),
        },
    )
}

struct Games(Vec<Game>);

impl ParseData for Games {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        Ok(Self(parse_all(many1(game()), input)?))
    }
}

/*
For part 1, find which games are possible if the bag held only 12 red, 13 green and 14 blue cubes,
and sum their IDs.
*/

const BAG_CONTENTS: CubeSet = CubeSet::new(12, 13, 14);

fn sum_ids_of_possible_games(games: &[Game], supply: &CubeSet) -> Option<GameId> {
    games
        .iter()
        .filter(|game| game.could_be_played_with(supply))
        .fold_map(|game| Sum::of(game.id))
        .0
}

struct Day02;

impl Solution<PartOne> for Day02 {
    type Input = Games;
    type Output = GameId;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(sum_ids_of_possible_games(&input.0, &BAG_CONTENTS).ok_or(Day02Error::IdSumOverflow)?)
    }
}

/*
For part 2, find the fewest cubes of each colour that make each game possible. The power of a set
of cubes is the product of its counts; sum the powers of every game's minimum set.
*/

fn power_sum_of_minimum_supplies(games: &[Game]) -> Option<u64> {
    games
        .iter()
        .fold_map(|game| Sum(game.minimum_cube_supply().power()))
        .0
}

impl Solution<PartTwo> for Day02 {
    type Input = Games;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(power_sum_of_minimum_supplies(&input.0).ok_or(Day02Error::PowerSumOverflow)?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const EXAMPLE_INPUT: &str = r"Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
";

    const SCATTERED_GAMES: &str =
        "Game 17: 3 red, 2 green, 4 blue; 2 red, 4 green, 17 blue \n Game 42: 2 green, 6 blue";

    #[test]
    fn builds_games_regardless_of_layout() -> DynamicResult<()> {
        let games = Games::parse(SCATTERED_GAMES)?;
        let ids: Vec<_> = games.0.iter().map(|game| game.id).collect();
        assert_eq!(ids, vec![17, 42]);
        assert_eq!(
            games.0[0].rounds,
            vec![CubeSet::new(3, 2, 4), CubeSet::new(2, 4, 17)]
        );
        Ok(())
    }

    #[test]
    fn recognises_possible_games() -> DynamicResult<()> {
        let games = Games::parse(SCATTERED_GAMES)?;
        assert!(!games.0[0].could_be_played_with(&BAG_CONTENTS));
        assert!(games.0[1].could_be_played_with(&BAG_CONTENTS));
        Ok(())
    }

    #[test]
    fn game_with_empty_round_is_possible() -> DynamicResult<()> {
        let games = Games::parse("Game 9:")?;
        assert_eq!(games.0[0].rounds, vec![CubeSet::empty()]);
        assert!(games.0[0].could_be_played_with(&CubeSet::empty()));
        Ok(())
    }

    #[test]
    fn repeated_colour_keeps_last_count() -> DynamicResult<()> {
        let games = Games::parse("Game 1: 2 red, 5 red")?;
        assert_eq!(games.0[0].rounds, vec![CubeSet::new(5, 0, 0)]);

        let games = Games::parse("Game 3: 1 red; 2 blue, 4 green, 3 blue")?;
        assert_eq!(
            games.0[0].rounds,
            vec![CubeSet::new(1, 0, 0), CubeSet::new(0, 4, 3)]
        );
        Ok(())
    }

    #[test]
    fn reports_where_record_stops_matching() {
        let Err(error) = Games::parse("Game 1: 3 blue\nGame 2: 4 purple") else {
            panic!("unknown colour should be rejected");
        };
        let message = error.to_string();
        assert!(message.contains("line 2"), "unexpected message: {message}");
    }

    #[test]
    fn reports_game_id_out_of_range() {
        let Err(error) = Games::parse("Game 1: 1 red\nGame 99999999999: 2 blue") else {
            panic!("game id does not fit");
        };
        let message = error.to_string();
        assert!(
            message.contains("line 2, column 6: expected a number within range"),
            "unexpected message: {message}"
        );
    }

    #[test]
    fn calculates_powers() {
        assert_eq!(CubeSet::new(4, 2, 6).power(), Some(48));
        assert_eq!(CubeSet::new(1, 3, 4).power(), Some(12));
    }

    #[test]
    fn makes_minimum_sets() {
        let combined = CubeSet::new(4, 2, 6).minimum_required_with(CubeSet::new(7, 1, 6));
        assert_eq!(combined, CubeSet::new(7, 2, 6));
    }

    #[test]
    fn finds_minimum_cube_supplies() -> DynamicResult<()> {
        let games = Games::parse(EXAMPLE_INPUT)?;
        let supplies: Vec<_> = games.0.iter().map(Game::minimum_cube_supply).collect();
        assert_eq!(
            supplies,
            vec![
                CubeSet::new(4, 2, 6),
                CubeSet::new(1, 3, 4),
                CubeSet::new(20, 13, 6),
                CubeSet::new(14, 3, 15),
                CubeSet::new(6, 3, 2),
            ]
        );
        Ok(())
    }

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Games::parse(EXAMPLE_INPUT)?;
        let result = <Day02 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 8);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Games::parse(EXAMPLE_INPUT)?;
        let result = <Day02 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 2286);
        Ok(())
    }

    #[test]
    #[ignore = "needs the puzzle input at inputs/day02.txt"]
    fn solves_problem_set() -> DynamicResult<()> {
        let parsed = Games::parse(&fs::read_to_string("inputs/day02.txt")?)?;
        assert_eq!(<Day02 as Solution<PartOne>>::solve(&parsed)?, 2447);
        assert_eq!(<Day02 as Solution<PartTwo>>::solve(&parsed)?, 56322);
        Ok(())
    }
}

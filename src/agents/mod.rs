//! Agents for TicTacToe.

mod bot;
mod human;

pub mod heuristic;
pub mod minimax;
pub mod random;

pub use bot::BotAgent;
pub use human::{parse_coordinates, HumanAgent, InputError};

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::debug;

use crate::board_game::{Coord, Sign};
use crate::error::{GameError, Result};
use crate::marks::MarkAllocator;
use crate::tictactoe::Grid;

/// An agent that will choose a valid move given a snapshot of the board. Self is mutable because
/// bots own the random number generator they draw from.
///
/// `input` and `output` are the console of the game; only human agents read from it.
pub trait TicTacToeAgent {
    /// The mark this agent plays, fixed for its lifetime.
    fn sign(&self) -> Sign;

    fn opponent_sign(&self) -> Sign {
        self.sign().opponent()
    }

    /// Return an empty cell of `grid` to play.
    fn choose_move(
        &mut self,
        grid: &Grid,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<Coord>;
}

/// How strong a bot plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Random empty cell.
    Easy,
    /// Takes a win, else blocks, else random.
    Medium,
    /// Full minimax search.
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

/// Who sits at one side of the board, as named on the command line: `user`, `easy`, `medium`
/// or `hard`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum PlayerKind {
    User,
    Easy,
    Medium,
    Hard,
}

impl PlayerKind {
    /// `None` for a human player.
    pub fn difficulty(self) -> Option<Difficulty> {
        match self {
            PlayerKind::User => None,
            PlayerKind::Easy => Some(Difficulty::Easy),
            PlayerKind::Medium => Some(Difficulty::Medium),
            PlayerKind::Hard => Some(Difficulty::Hard),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.difficulty() {
            Some(difficulty) => write!(f, "{}", difficulty),
            None => write!(f, "user"),
        }
    }
}

impl FromStr for PlayerKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<PlayerKind> {
        match s {
            "user" => Ok(PlayerKind::User),
            "easy" => Ok(PlayerKind::Easy),
            "medium" => Ok(PlayerKind::Medium),
            "hard" => Ok(PlayerKind::Hard),
            _ => Err(GameError::UnknownPlayer(s.to_string())),
        }
    }
}

/// Take the next free mark from `marks` and build the agent for `kind`. Bots are seeded with
/// `seed` when given, from OS entropy otherwise.
pub fn build_agent(
    kind: PlayerKind,
    marks: &mut MarkAllocator,
    seed: Option<u64>,
) -> Result<Box<dyn TicTacToeAgent>> {
    let sign = marks.allocate()?;
    debug!(%kind, %sign, "building agent");
    Ok(match kind.difficulty() {
        None => Box::new(HumanAgent::new(sign)),
        Some(difficulty) => Box::new(BotAgent::new(sign, difficulty, seed)),
    })
}

#[test]
fn test_player_kind_from_str() {
    assert_eq!("user".parse::<PlayerKind>().unwrap(), PlayerKind::User);
    assert_eq!("easy".parse::<PlayerKind>().unwrap(), PlayerKind::Easy);
    assert_eq!("medium".parse::<PlayerKind>().unwrap(), PlayerKind::Medium);
    assert_eq!("hard".parse::<PlayerKind>().unwrap(), PlayerKind::Hard);
    assert!(matches!(
        "expert".parse::<PlayerKind>(),
        Err(GameError::UnknownPlayer(_))
    ));
    assert_eq!(PlayerKind::Medium.to_string(), "medium");
}

#[test]
fn test_build_agent_assigns_marks_once() {
    let mut marks = MarkAllocator::new();
    let first = build_agent(PlayerKind::Hard, &mut marks, Some(0)).unwrap();
    let second = build_agent(PlayerKind::User, &mut marks, None).unwrap();
    assert_eq!(first.sign(), Sign::X);
    assert_eq!(first.opponent_sign(), Sign::O);
    assert_eq!(second.sign(), Sign::O);
    assert_eq!(second.opponent_sign(), Sign::X);

    assert!(matches!(
        build_agent(PlayerKind::Easy, &mut marks, None),
        Err(GameError::TooManyPlayers)
    ));

    marks.reset();
    let third = build_agent(PlayerKind::Easy, &mut marks, None).unwrap();
    assert_eq!(third.sign(), Sign::X);
}

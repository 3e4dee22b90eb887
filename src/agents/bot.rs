//! Computer player: one of the three strategies, picked by difficulty.

use std::io::{BufRead, Write};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, instrument};

use crate::agents::{heuristic, minimax, random, Difficulty, TicTacToeAgent};
use crate::board_game::{Coord, Sign};
use crate::error::{GameError, Result};
use crate::tictactoe::Grid;

#[derive(Clone, Debug)]
pub struct BotAgent {
    sign: Sign,
    difficulty: Difficulty,
    rng: StdRng,
}

impl BotAgent {
    pub fn new(sign: Sign, difficulty: Difficulty, seed: Option<u64>) -> BotAgent {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        BotAgent {
            sign,
            difficulty,
            rng,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Run the strategy without touching the console.
    #[instrument(level = "debug", skip(self, grid), fields(sign = %self.sign, board = %grid.encode()))]
    pub fn pick_move(&mut self, grid: &Grid) -> Option<Coord> {
        let choice = match self.difficulty {
            Difficulty::Easy => random::choose_move(grid, &mut self.rng),
            Difficulty::Medium => heuristic::choose_move(grid, self.sign, &mut self.rng),
            Difficulty::Hard => minimax::choose_move(grid, self.sign),
        };
        debug!(?choice, "bot decided");
        choice
    }
}

impl TicTacToeAgent for BotAgent {
    fn sign(&self) -> Sign {
        self.sign
    }

    fn choose_move(
        &mut self,
        grid: &Grid,
        _input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<Coord> {
        writeln!(output, "Making move level \"{}\"", self.difficulty)?;
        self.pick_move(grid).ok_or(GameError::NoLegalMove)
    }
}

#[test]
fn test_bots_pick_empty_cells() {
    let grid: Grid = "X_O_X_O__".parse().unwrap();
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard].iter() {
        let mut bot = BotAgent::new(Sign::X, *difficulty, Some(3));
        let rc = bot.pick_move(&grid).unwrap();
        assert!(grid.get(rc).is_empty(), "{:?} bot picked {:?}", difficulty, rc);
    }
}

#[test]
fn test_seeded_bots_repeat_themselves() {
    let grid = Grid::new();
    let mut first = BotAgent::new(Sign::O, Difficulty::Easy, Some(42));
    let mut second = BotAgent::new(Sign::O, Difficulty::Easy, Some(42));
    for _ in 0..10 {
        assert_eq!(first.pick_move(&grid), second.pick_move(&grid));
    }
}

#[test]
fn test_bot_announces_level() {
    let grid: Grid = "XX_OO____".parse().unwrap();
    let mut bot = BotAgent::new(Sign::X, Difficulty::Hard, None);
    let mut input: &[u8] = b"";
    let mut output = Vec::new();
    assert_eq!(bot.choose_move(&grid, &mut input, &mut output).unwrap(), (0, 2));
    assert_eq!(String::from_utf8(output).unwrap(), "Making move level \"hard\"\n");

    let full: Grid = "XOXXOOOXX".parse().unwrap();
    let mut output = Vec::new();
    assert!(matches!(
        bot.choose_move(&full, &mut input, &mut output),
        Err(GameError::NoLegalMove)
    ));
}

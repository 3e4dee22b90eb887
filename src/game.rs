//! Turn controller: two agents taking turns on one board.

use std::io::{BufRead, Write};

use tracing::{debug, info, instrument};

use crate::agents::{build_agent, PlayerKind, TicTacToeAgent};
use crate::board_game::{GameState, Sign};
use crate::config::Settings;
use crate::error::{GameError, Result};
use crate::marks::MarkAllocator;
use crate::tictactoe::TicTacToeBoard;

/// Where the controller is between turns. `Evaluating` only lasts between applying a move and
/// looking at the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    AwaitingMove(Sign),
    Evaluating,
    Finished(Option<Sign>),
}

/// "X wins", "O wins" or "Draw".
pub fn outcome_message(winner: Option<Sign>) -> String {
    match winner {
        Some(sign) => format!("{} wins", sign),
        None => "Draw".to_string(),
    }
}

/// One game: the board, both agents, and the console human agents read from and everybody
/// prints to.
pub struct TicTacToe<R, W> {
    players: [Box<dyn TicTacToeAgent>; 2],
    // index into players
    current: usize,
    board: TicTacToeBoard,
    state: TurnState,
    input: R,
    output: W,
    show_board: bool,
}

impl<R: BufRead, W: Write> TicTacToe<R, W> {
    /// The two agents must play different marks. Whoever holds X moves first.
    pub fn new(
        player1: Box<dyn TicTacToeAgent>,
        player2: Box<dyn TicTacToeAgent>,
        input: R,
        output: W,
    ) -> Result<Self> {
        if player1.sign() == player2.sign() {
            return Err(GameError::SameSign(player1.sign()));
        }
        let current = if player1.sign() == Sign::X { 0 } else { 1 };
        Ok(TicTacToe {
            players: [player1, player2],
            current,
            board: TicTacToeBoard::new(),
            state: TurnState::AwaitingMove(Sign::X),
            input,
            output,
            show_board: true,
        })
    }

    /// Start from an existing position instead of an empty board. X still moves first.
    pub fn with_board(mut self, board: TicTacToeBoard) -> Self {
        self.board = board;
        self
    }

    /// Print the board after every move (the default) or not.
    pub fn show_board(mut self, show: bool) -> Self {
        self.show_board = show;
        self
    }

    pub fn board(&self) -> &TicTacToeBoard {
        &self.board
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Sign of the agent whose turn it is.
    pub fn current_sign(&self) -> Sign {
        self.players[self.current].sign()
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Ask the current agent for a move, apply it, hand the turn to the other agent and
    /// report whether the game is over.
    pub fn play_turn(&mut self) -> Result<GameState> {
        if let TurnState::Finished(_) = self.state {
            return Err(GameError::GameOver);
        }

        let grid = self.board.grid();
        let player = &mut self.players[self.current];
        let sign = player.sign();
        let (row, col) = player.choose_move(&grid, &mut self.input, &mut self.output)?;
        self.board.apply_move(row, col, sign)?;
        debug!(%sign, row, col, "turn played");

        if self.show_board {
            writeln!(self.output, "{}", self.board)?;
        }

        self.current = 1 - self.current;
        self.state = TurnState::Evaluating;
        let game_state = self.board.evaluate();
        self.state = match game_state {
            GameState::Ended(_) => TurnState::Finished(game_state.winner()),
            GameState::Ongoing => TurnState::AwaitingMove(self.current_sign()),
        };
        Ok(game_state)
    }

    /// Play turns until the game ends. `None` means a draw.
    #[instrument(skip(self))]
    pub fn play(&mut self) -> Result<Option<Sign>> {
        if self.show_board {
            writeln!(self.output, "{}", self.board)?;
        }
        loop {
            let game_state = self.play_turn()?;
            if game_state.finished() {
                let winner = game_state.winner();
                info!(outcome = %outcome_message(winner), board = %self.board.encode(), "game over");
                return Ok(winner);
            }
        }
    }
}

/// Build both agents from `marks` and play one full game on a fresh board.
pub fn play_game<R: BufRead, W: Write>(
    kinds: (PlayerKind, PlayerKind),
    marks: &mut MarkAllocator,
    settings: &Settings,
    input: R,
    output: W,
) -> Result<Option<Sign>> {
    info!(player1 = %kinds.0, player2 = %kinds.1, "starting game");
    let player1 = build_agent(kinds.0, marks, settings.seed)?;
    let player2 = build_agent(kinds.1, marks, settings.seed.map(|s| s.wrapping_add(1)))?;
    let mut game =
        TicTacToe::new(player1, player2, input, output)?.show_board(settings.show_board);
    game.play()
}

#[cfg(test)]
use crate::agents::{BotAgent, Difficulty};
#[cfg(test)]
use std::io;

#[cfg(test)]
fn bot(sign: Sign, difficulty: Difficulty, seed: u64) -> Box<dyn TicTacToeAgent> {
    Box::new(BotAgent::new(sign, difficulty, Some(seed)))
}

#[test]
fn test_turns_alternate() {
    let mut game = TicTacToe::new(
        bot(Sign::X, Difficulty::Easy, 1),
        bot(Sign::O, Difficulty::Easy, 2),
        io::empty(),
        io::sink(),
    )
    .unwrap();
    assert_eq!(game.current_sign(), Sign::X);
    assert_eq!(game.state(), TurnState::AwaitingMove(Sign::X));

    assert_eq!(game.play_turn().unwrap(), GameState::Ongoing);
    assert_eq!(game.current_sign(), Sign::O);
    assert_eq!(game.state(), TurnState::AwaitingMove(Sign::O));
    assert_eq!(game.board().empty_cells().len(), 8);

    assert_eq!(game.play_turn().unwrap(), GameState::Ongoing);
    assert_eq!(game.current_sign(), Sign::X);
    assert_eq!(game.board().empty_cells().len(), 7);
}

#[test]
fn test_x_moves_first_whatever_the_order() {
    let game = TicTacToe::new(
        bot(Sign::O, Difficulty::Easy, 1),
        bot(Sign::X, Difficulty::Easy, 2),
        io::empty(),
        io::sink(),
    )
    .unwrap();
    assert_eq!(game.current_sign(), Sign::X);

    let same = TicTacToe::new(
        bot(Sign::X, Difficulty::Easy, 1),
        bot(Sign::X, Difficulty::Easy, 2),
        io::empty(),
        io::sink(),
    );
    assert!(matches!(same, Err(GameError::SameSign(Sign::X))));
}

#[test]
fn test_turn_switches_on_final_move() {
    let board = TicTacToeBoard::decode("XX_OO____").unwrap();
    let mut game = TicTacToe::new(
        bot(Sign::X, Difficulty::Medium, 1),
        bot(Sign::O, Difficulty::Medium, 2),
        io::empty(),
        io::sink(),
    )
    .unwrap()
    .with_board(board);

    let game_state = game.play_turn().unwrap();
    assert_eq!(game_state.as_pair(), (true, Some(Sign::X)));
    assert_eq!(game.state(), TurnState::Finished(Some(Sign::X)));
    assert_eq!(game.current_sign(), Sign::O);
    assert!(matches!(game.play_turn(), Err(GameError::GameOver)));
}

#[test]
fn test_play_prints_boards() {
    let mut game = TicTacToe::new(
        bot(Sign::X, Difficulty::Hard, 0),
        bot(Sign::O, Difficulty::Hard, 0),
        io::empty(),
        Vec::new(),
    )
    .unwrap()
    .with_board(TicTacToeBoard::decode("XOXOX_O__").unwrap());

    // X wins on the \ diagonal straight away
    assert_eq!(game.play().unwrap(), Some(Sign::X));
    let printed = String::from_utf8(game.output().clone()).unwrap();
    assert_eq!(printed.matches("---------\n|").count(), 2);
    assert!(printed.contains("Making move level \"hard\""));
    assert!(printed.ends_with("| O   X |\n---------\n"));
}

#[test]
fn test_outcome_message() {
    assert_eq!(outcome_message(Some(Sign::X)), "X wins");
    assert_eq!(outcome_message(Some(Sign::O)), "O wins");
    assert_eq!(outcome_message(None), "Draw");
}

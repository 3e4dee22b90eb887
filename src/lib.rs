//! Tic-tac-toe engine: the board, human and computer agents (random, one-ply lookahead and full
//! minimax), and the controller that takes them through a game.

pub mod agents;
pub mod board_game;
pub mod config;
pub mod error;
pub mod game;
pub mod marks;
pub mod menu;
pub mod tictactoe;

pub use agents::{build_agent, BotAgent, Difficulty, HumanAgent, PlayerKind, TicTacToeAgent};
pub use board_game::{Cell, Coord, EndState, GameState, Sign};
pub use config::{Cli, Settings};
pub use error::{GameError, Result};
pub use game::{outcome_message, play_game, TicTacToe, TurnState};
pub use marks::MarkAllocator;
pub use tictactoe::{Grid, TicTacToeBoard};

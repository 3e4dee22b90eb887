use std::io;

use crate::board_game::{Coord, Sign};

pub type Result<T> = std::result::Result<T, GameError>;

/// Errors that stop a command or a game.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Too many players")]
    TooManyPlayers,

    #[error("both players play {0}")]
    SameSign(Sign),

    #[error("unknown player type: {0}")]
    UnknownPlayer(String),

    #[error("Bad parameters!")]
    BadParameters,

    #[error("invalid board encoding {encoding:?}: {reason}")]
    InvalidEncoding { encoding: String, reason: String },

    #[error("cell {0:?} is already taken")]
    CellTaken(Coord),

    #[error("cell {0:?} is out of range")]
    OutOfRange(Coord),

    #[error("no legal move left on the board")]
    NoLegalMove,

    #[error("the game is already finished")]
    GameOver,

    #[error("input closed while waiting for a move")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[test]
fn test_game_error_display() {
    assert_eq!(GameError::TooManyPlayers.to_string(), "Too many players");
    assert_eq!(GameError::BadParameters.to_string(), "Bad parameters!");
    assert_eq!(
        GameError::CellTaken((1, 2)).to_string(),
        "cell (1, 2) is already taken"
    );
    assert_eq!(
        GameError::UnknownPlayer("impossible".to_string()).to_string(),
        "unknown player type: impossible"
    );
}

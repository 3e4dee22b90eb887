//! Types shared by the tic-tac-toe board, the agents and the turn controller.

use std::fmt;

use EndState::{Draw, Winner};
use GameState::{Ended, Ongoing};
use Sign::{O, X};

/// Width (and height) of the board.
pub const SIZE: usize = 3;

/// Character used for an empty cell in the compact string encoding.
pub const FILLER: char = '_';

/// A (row, col) pair, both 0-based.
pub type Coord = (usize, usize);

/// Every line that can hold three in a row, in the order they are scanned: the three columns,
/// the three rows, then the `\` and `/` diagonals.
pub const LINES: [[Coord; SIZE]; 8] = [
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// The mark a player puts on the board. X always moves first.
#[derive(Eq, Hash, Clone, Copy, Debug, PartialEq, PartialOrd, Ord)]
pub enum Sign {
    X,
    O,
}

impl Sign {
    pub fn opponent(self) -> Sign {
        match self {
            X => O,
            O => X,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            X => 'X',
            O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Sign> {
        match c {
            'X' => Some(X),
            'O' => Some(O),
            _ => None,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Represents a single cell of the tic-tac-toe board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Full(Sign),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Character used by the string encoding.
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => FILLER,
            Cell::Full(sign) => sign.to_char(),
        }
    }
}

/// Did the game end in a draw or was there a winner?
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndState {
    Winner(Sign),
    Draw,
}

/// Has the game ended or is it ongoing?
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Ended(EndState),
    Ongoing,
}

impl GameState {
    pub fn finished(self) -> bool {
        matches!(self, Ended(_))
    }

    /// `None` both while the game is ongoing and when it ended in a draw.
    pub fn winner(self) -> Option<Sign> {
        match self {
            Ended(Winner(sign)) => Some(sign),
            Ended(Draw) | Ongoing => None,
        }
    }

    /// The `(finished, winner)` pair.
    pub fn as_pair(self) -> (bool, Option<Sign>) {
        (self.finished(), self.winner())
    }
}

#[test]
fn test_opponent() {
    assert_eq!(X.opponent(), O);
    assert_eq!(O.opponent(), X);
    assert_eq!(X.opponent().opponent(), X);
}

#[test]
fn test_game_state_pair() {
    assert_eq!(Ongoing.as_pair(), (false, None));
    assert_eq!(Ended(Draw).as_pair(), (true, None));
    assert_eq!(Ended(Winner(O)).as_pair(), (true, Some(O)));
}

#[test]
fn test_lines_cover_every_cell() {
    let mut seen = [[0; SIZE]; SIZE];
    for line in LINES.iter() {
        for &(r, c) in line.iter() {
            seen[r][c] += 1;
        }
    }
    // corners sit on 3 lines, edges on 2, the centre on 4
    assert_eq!(seen, [[3, 2, 3], [2, 4, 2], [3, 2, 3]]);
}

#[test]
fn test_default_cell_is_empty() {
    assert_eq!(Cell::default(), Cell::Empty);
    assert!(Cell::default().is_empty());
    assert_eq!(Cell::default().to_char(), FILLER);
}

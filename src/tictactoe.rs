//! Tic Tac Toe board: the raw 3x3 grid and the live board that tracks its empty cells.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::board_game;
use crate::error::{GameError, Result};

use board_game::Cell::{Empty, Full};
use board_game::EndState::{Draw, Winner};
use board_game::GameState::{Ended, Ongoing};
use board_game::{Cell, Coord, GameState, Sign, FILLER, LINES, SIZE};

/// A snapshot of the 3x3 cells, addressed by (row, col). This is what agents get to look at.
/// Search code owns its own copy and is free to set and clear cells on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [[Cell; SIZE]; SIZE],
}

impl Grid {
    pub fn new() -> Grid {
        Grid::default()
    }

    pub fn from_cells(cells: [[Cell; SIZE]; SIZE]) -> Grid {
        Grid { cells }
    }

    pub fn get(&self, (row, col): Coord) -> Cell {
        self.cells[row][col]
    }

    pub fn set(&mut self, (row, col): Coord, sign: Sign) {
        self.cells[row][col] = Full(sign);
    }

    /// Put a cell back to empty. Only search backtracking should need this.
    pub fn clear(&mut self, (row, col): Coord) {
        self.cells[row][col] = Empty;
    }

    pub fn rows(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.cells
    }

    pub fn in_range((row, col): Coord) -> bool {
        row < SIZE && col < SIZE
    }

    /// Empty coordinates in row-major order.
    pub fn empty_cells(&self) -> Vec<Coord> {
        let mut empty = Vec::with_capacity(SIZE * SIZE);
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    empty.push((r, c));
                }
            }
        }
        empty
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    /// The cells of one line, in the line's own order.
    pub fn line(&self, line: &[Coord; SIZE]) -> [Cell; SIZE] {
        [self.get(line[0]), self.get(line[1]), self.get(line[2])]
    }

    /// Scan all 8 lines (columns, rows, diagonals) for three identical marks. With no winning
    /// line, a board without empty cells is a draw, anything else is still ongoing.
    pub fn evaluate(&self) -> GameState {
        for line in LINES.iter() {
            if let [Full(a), Full(b), Full(c)] = self.line(line) {
                if a == b && b == c {
                    return Ended(Winner(a));
                }
            }
        }

        if self.is_full() {
            return Ended(Draw);
        }

        Ongoing
    }

    /// Row-major, 9 characters, `_` for empty cells.
    pub fn encode(&self) -> String {
        self.cells.iter().flatten().map(|cell| cell.to_char()).collect()
    }
}

impl FromStr for Grid {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Grid> {
        let invalid = |reason: &str| GameError::InvalidEncoding {
            encoding: s.to_string(),
            reason: reason.to_string(),
        };

        let chars: Vec<char> = s.chars().collect();
        if chars.len() != SIZE * SIZE {
            return Err(invalid("expected 9 characters"));
        }

        let mut grid = Grid::new();
        for (i, &ch) in chars.iter().enumerate() {
            match ch {
                FILLER | ' ' => (),
                _ => match Sign::from_char(ch) {
                    Some(sign) => grid.set((i / SIZE, i % SIZE), sign),
                    None => return Err(invalid("cells must be 'X', 'O' or '_'")),
                },
            }
        }
        Ok(grid)
    }
}

/// The live game board: the grid plus the set of its empty cells, which is updated on every
/// move instead of being recomputed.
#[derive(Clone, PartialEq, Eq)]
pub struct TicTacToeBoard {
    grid: Grid,
    // always equal to grid.empty_cells()
    empty_cells: BTreeSet<Coord>,
}

impl fmt::Debug for TicTacToeBoard {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "TicTacToeBoard {{ cells: [{}], empty: {} }}",
            self.grid.encode(),
            self.empty_cells.len()
        )
    }
}

/// Framed, human readable view of the board:
///
/// ---------
/// | X O   |
/// |   X   |
/// |     O |
/// ---------
impl fmt::Display for TicTacToeBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "---------")?;
        for row in self.grid.rows().iter() {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Empty => " ".to_string(),
                    Full(sign) => sign.to_string(),
                })
                .collect();
            writeln!(f, "| {} |", cells.join(" "))?;
        }
        write!(f, "---------")
    }
}

impl Default for TicTacToeBoard {
    fn default() -> Self {
        TicTacToeBoard::new()
    }
}

impl TicTacToeBoard {
    /// Return a new, empty board.
    pub fn new() -> TicTacToeBoard {
        TicTacToeBoard::from_grid(Grid::new())
    }

    pub fn from_grid(grid: Grid) -> TicTacToeBoard {
        let mut board = TicTacToeBoard {
            grid,
            empty_cells: BTreeSet::new(),
        };
        board.recompute_empty_cells();
        board
    }

    /// Build a board from its 9 character encoding, e.g. `"XX_O_____"`.
    pub fn decode(encoding: &str) -> Result<TicTacToeBoard> {
        Ok(TicTacToeBoard::from_grid(encoding.parse()?))
    }

    pub fn encode(&self) -> String {
        self.grid.encode()
    }

    /// A copy of the cells, for agents and display.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn empty_cells(&self) -> &BTreeSet<Coord> {
        &self.empty_cells
    }

    /// Rebuild the empty cell set from the grid.
    pub fn recompute_empty_cells(&mut self) {
        self.empty_cells = self.grid.empty_cells().into_iter().collect();
    }

    /// Place `sign` at (row, col). The cell must be in range and empty.
    #[instrument(level = "debug", skip(self))]
    pub fn apply_move(&mut self, row: usize, col: usize, sign: Sign) -> Result<()> {
        if !Grid::in_range((row, col)) {
            return Err(GameError::OutOfRange((row, col)));
        }
        if !self.empty_cells.remove(&(row, col)) {
            return Err(GameError::CellTaken((row, col)));
        }
        self.grid.set((row, col), sign);
        debug!(board = %self.encode(), "move applied");
        Ok(())
    }

    pub fn evaluate(&self) -> GameState {
        self.grid.evaluate()
    }
}

impl FromStr for TicTacToeBoard {
    type Err = GameError;

    fn from_str(s: &str) -> Result<TicTacToeBoard> {
        TicTacToeBoard::decode(s)
    }
}

#[cfg(test)]
use board_game::Sign::{O, X};

#[test]
fn test_evaluate_rows_columns_diagonals() {
    for line in LINES.iter() {
        let mut grid = Grid::new();
        for &rc in line.iter() {
            grid.set(rc, O);
        }
        assert_eq!(grid.evaluate(), Ended(Winner(O)), "line {:?}", line);
    }

    let board = TicTacToeBoard::decode("XOO_X_O_X").unwrap();
    assert_eq!(board.evaluate().as_pair(), (true, Some(X)));
    let board = TicTacToeBoard::decode("XXOOOOX_X").unwrap();
    assert_eq!(board.evaluate().as_pair(), (true, Some(O)));
}

#[test]
fn test_evaluate_draw_and_ongoing() {
    let board = TicTacToeBoard::decode("XOXXOOOXX").unwrap();
    assert_eq!(board.evaluate(), Ended(Draw));
    assert!(board.empty_cells().is_empty());

    // one empty cell and no line yet
    let board = TicTacToeBoard::decode("XOXXOOOX_").unwrap();
    assert_eq!(board.evaluate(), Ongoing);
    assert_eq!(TicTacToeBoard::new().evaluate(), Ongoing);

    // full board whose last cell completes a line is a win, not a draw
    let board = TicTacToeBoard::decode("XOXOXOOXX").unwrap();
    assert_eq!(board.evaluate(), Ended(Winner(X)));
}

#[test]
fn test_apply_move_keeps_empty_cells_in_sync() {
    let mut board = TicTacToeBoard::new();
    assert_eq!(board.empty_cells().len(), SIZE * SIZE);

    board.apply_move(1, 1, X).unwrap();
    board.apply_move(0, 2, O).unwrap();
    assert_eq!(board.empty_cells().len(), SIZE * SIZE - 2);
    assert!(!board.empty_cells().contains(&(1, 1)));
    assert!(!board.empty_cells().contains(&(0, 2)));
    assert_eq!(board.grid().get((1, 1)), Full(X));

    let expected: BTreeSet<Coord> = board.grid().empty_cells().into_iter().collect();
    assert_eq!(board.empty_cells(), &expected);

    assert!(matches!(board.apply_move(1, 1, O), Err(GameError::CellTaken((1, 1)))));
    assert!(matches!(board.apply_move(3, 0, O), Err(GameError::OutOfRange((3, 0)))));
    assert_eq!(board.empty_cells().len(), SIZE * SIZE - 2);
}

#[test]
fn test_encode_decode() {
    let board = TicTacToeBoard::decode("XX_O_____").unwrap();
    assert_eq!(board.encode(), "XX_O_____");
    assert_eq!(board.grid().get((0, 1)), Full(X));
    assert_eq!(board.grid().get((1, 0)), Full(O));
    assert_eq!(board.empty_cells().len(), 6);

    let again = TicTacToeBoard::decode(&board.encode()).unwrap();
    assert_eq!(again, board);

    // spaces are accepted as filler too
    assert_eq!(TicTacToeBoard::decode("XX O     ").unwrap(), board);

    assert!(TicTacToeBoard::decode("XX_O____").is_err());
    assert!(TicTacToeBoard::decode("XX_O_____X").is_err());
    assert!(TicTacToeBoard::decode("XX_Q_____").is_err());
}

#[test]
fn test_display() {
    let board: TicTacToeBoard = "XO__X___O".parse().unwrap();
    assert_eq!(
        board.to_string(),
        "---------\n| X O   |\n|   X   |\n|     O |\n---------"
    );
}

#[test]
fn test_recompute_empty_cells() {
    let mut board = TicTacToeBoard::decode("X___O____").unwrap();
    let before = board.empty_cells().clone();
    board.recompute_empty_cells();
    assert_eq!(board.empty_cells(), &before);
    assert_eq!(before.len(), 7);
}

#[test]
fn test_every_encoding() {
    let symbols = ['X', 'O', FILLER];
    for mut n in 0..3usize.pow(9) {
        let mut encoding = String::with_capacity(SIZE * SIZE);
        for _ in 0..SIZE * SIZE {
            encoding.push(symbols[n % 3]);
            n /= 3;
        }

        let board = TicTacToeBoard::decode(&encoding).unwrap();
        assert_eq!(board.encode(), encoding);
        assert_eq!(TicTacToeBoard::decode(&board.encode()).unwrap(), board);

        let expected: BTreeSet<Coord> = board.grid().empty_cells().into_iter().collect();
        assert_eq!(board.empty_cells(), &expected, "{}", encoding);
        let filler_count = encoding.chars().filter(|&ch| ch == FILLER).count();
        assert_eq!(board.empty_cells().len(), filler_count, "{}", encoding);

        // count completed lines straight from the string
        let chars: Vec<char> = encoding.chars().collect();
        let completed: Vec<char> = LINES
            .iter()
            .map(|line| line.iter().map(|&(r, c)| chars[r * SIZE + c]).collect::<Vec<_>>())
            .filter(|cells| cells[0] != FILLER && cells.iter().all(|&ch| ch == cells[0]))
            .map(|cells| cells[0])
            .collect();

        let expected = match completed.as_slice() {
            [] if filler_count == 0 => Ended(Draw),
            [] => Ongoing,
            [mark] => Ended(Winner(Sign::from_char(*mark).unwrap())),
            // several completed lines can't come out of a real game
            _ => continue,
        };
        assert_eq!(board.evaluate(), expected, "{}", encoding);
    }
}

//! Agent controlled by whoever types at the console.

use std::io::{BufRead, Write};
use std::num::IntErrorKind;

use tracing::warn;

use crate::agents::TicTacToeAgent;
use crate::board_game::{Coord, Sign, SIZE};
use crate::error::{GameError, Result};
use crate::tictactoe::Grid;

/// Why a line typed by the user is not a playable move. All of these just prompt again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("You should enter numbers!")]
    NotNumbers,

    #[error("Coordinates should be from 1 to 3!")]
    OutOfRange,

    #[error("This cell is occupied! Choose another one!")]
    Occupied,
}

/// Parse `"<row> <col>"` (1-based, whitespace separated) into a 0-based move on `grid`.
pub fn parse_coordinates(text: &str, grid: &Grid) -> std::result::Result<Coord, InputError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(InputError::NotNumbers);
    }
    let row = parse_axis(parts[0])?;
    let col = parse_axis(parts[1])?;

    let valid = 1..=SIZE as i64;
    let (row, col) = match (row, col) {
        (Some(row), Some(col)) if valid.contains(&row) && valid.contains(&col) => (row, col),
        _ => return Err(InputError::OutOfRange),
    };

    let rc = (row as usize - 1, col as usize - 1);
    if !grid.get(rc).is_empty() {
        return Err(InputError::Occupied);
    }
    Ok(rc)
}

/// An integer, or `None` when it is an integer too large to represent (still a number, just
/// out of range).
fn parse_axis(token: &str) -> std::result::Result<Option<i64>, InputError> {
    match token.parse::<i64>() {
        Ok(n) => Ok(Some(n)),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Ok(None),
            _ => Err(InputError::NotNumbers),
        },
    }
}

/// An agent controlled by the user running the program.
#[derive(Clone, Debug)]
pub struct HumanAgent {
    sign: Sign,
}

impl HumanAgent {
    pub fn new(sign: Sign) -> HumanAgent {
        HumanAgent { sign }
    }
}

impl TicTacToeAgent for HumanAgent {
    fn sign(&self) -> Sign {
        self.sign
    }

    /// Keep asking until the user types an empty cell. Blocks on `input`; running out of input
    /// is the only way out without a move.
    fn choose_move(
        &mut self,
        grid: &Grid,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<Coord> {
        loop {
            write!(output, "Enter the coordinates:")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(GameError::InputClosed);
            }

            match parse_coordinates(&line, grid) {
                Ok(rc) => return Ok(rc),
                Err(err) => {
                    warn!(sign = %self.sign, input = line.trim(), %err, "move rejected");
                    writeln!(output, "{}", err)?;
                }
            }
        }
    }
}

#[test]
fn test_parse_coordinates() {
    let grid: Grid = "X________".parse().unwrap();
    assert_eq!(parse_coordinates("1 2", &grid), Ok((0, 1)));
    assert_eq!(parse_coordinates("  3   3 \n", &grid), Ok((2, 2)));

    assert_eq!(parse_coordinates("a b", &grid), Err(InputError::NotNumbers));
    assert_eq!(parse_coordinates("12", &grid), Err(InputError::NotNumbers));
    assert_eq!(parse_coordinates("1 2 3", &grid), Err(InputError::NotNumbers));
    assert_eq!(parse_coordinates("", &grid), Err(InputError::NotNumbers));

    assert_eq!(parse_coordinates("0 1", &grid), Err(InputError::OutOfRange));
    assert_eq!(parse_coordinates("4 1", &grid), Err(InputError::OutOfRange));
    assert_eq!(parse_coordinates("-1 2", &grid), Err(InputError::OutOfRange));
    assert_eq!(
        parse_coordinates("99999999999999999999 1", &grid),
        Err(InputError::OutOfRange)
    );
    assert_eq!(
        parse_coordinates("2 -99999999999999999999", &grid),
        Err(InputError::OutOfRange)
    );
    // a non-number anywhere still wins over an overflowing one
    assert_eq!(
        parse_coordinates("99999999999999999999 x", &grid),
        Err(InputError::NotNumbers)
    );

    assert_eq!(parse_coordinates("1 1", &grid), Err(InputError::Occupied));
}

#[test]
fn test_human_reprompts_until_valid() {
    let grid: Grid = "X________".parse().unwrap();
    let mut agent = HumanAgent::new(Sign::O);
    let mut input: &[u8] = b"one two\n5 5\n1 1\n2 2\n";
    let mut output = Vec::new();

    let rc = agent.choose_move(&grid, &mut input, &mut output).unwrap();
    assert_eq!(rc, (1, 1));

    let printed = String::from_utf8(output).unwrap();
    assert_eq!(printed.matches("Enter the coordinates:").count(), 4);
    assert!(printed.contains("You should enter numbers!"));
    assert!(printed.contains("Coordinates should be from 1 to 3!"));
    assert!(printed.contains("This cell is occupied! Choose another one!"));
}

#[test]
fn test_human_input_closed() {
    let grid = Grid::new();
    let mut agent = HumanAgent::new(Sign::X);
    let mut input: &[u8] = b"nope\n";
    let mut output = Vec::new();

    assert!(matches!(
        agent.choose_move(&grid, &mut input, &mut output),
        Err(GameError::InputClosed)
    ));
}

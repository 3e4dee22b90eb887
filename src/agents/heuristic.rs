//! Medium bot: look one move ahead. Win if possible, otherwise block the opponent's win,
//! otherwise play randomly.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::agents::random;
use crate::board_game::{Cell, Coord, Sign, LINES, SIZE};
use crate::tictactoe::Grid;

/// Empty cells that would complete a line of three for `sign`: lines holding two `sign` marks
/// and one empty cell. A line with one mark of each player is never completable.
pub fn winning_moves(grid: &Grid, sign: Sign) -> Vec<Coord> {
    let mut moves = Vec::new();
    for line in LINES.iter() {
        let cells = grid.line(line);
        let own = cells.iter().filter(|&&cell| cell == Cell::Full(sign)).count();
        let empty: Vec<Coord> = line
            .iter()
            .zip(cells.iter())
            .filter(|(_, cell)| cell.is_empty())
            .map(|(&rc, _)| rc)
            .collect();

        if own == SIZE - 1 && empty.len() == 1 && !moves.contains(&empty[0]) {
            moves.push(empty[0]);
        }
    }
    moves
}

pub fn choose_move<R: Rng + ?Sized>(grid: &Grid, sign: Sign, rng: &mut R) -> Option<Coord> {
    if let Some(&rc) = winning_moves(grid, sign).choose(rng) {
        debug!(%sign, ?rc, "taking the win");
        return Some(rc);
    }
    if let Some(&rc) = winning_moves(grid, sign.opponent()).choose(rng) {
        debug!(%sign, ?rc, "blocking");
        return Some(rc);
    }
    random::choose_move(grid, rng)
}

#[cfg(test)]
use rand::{rngs::StdRng, SeedableRng};
#[cfg(test)]
use Sign::{O, X};

#[test]
fn test_winning_moves() {
    let grid: Grid = "XX_O_____".parse().unwrap();
    assert_eq!(winning_moves(&grid, X), vec![(0, 2)]);
    assert!(winning_moves(&grid, O).is_empty());

    // column, then both diagonals
    let grid: Grid = "O___O_O__".parse().unwrap();
    assert_eq!(winning_moves(&grid, O), vec![(1, 0), (2, 2), (0, 2)]);

    let grid: Grid = "_XX_X____".parse().unwrap();
    assert_eq!(winning_moves(&grid, X), vec![(2, 1), (0, 0), (2, 0)]);

    // (0, 0) completes both column 0 and row 0 but is listed once
    let grid: Grid = "_XXX__X__".parse().unwrap();
    assert_eq!(winning_moves(&grid, X), vec![(0, 0), (1, 1)]);
}

#[test]
fn test_mixed_lines_are_not_winning_moves() {
    let grid: Grid = "XO_OX____".parse().unwrap();
    // row 0 is X O _, row 1 is O X _: neither completes for anyone
    let x_moves = winning_moves(&grid, X);
    assert_eq!(x_moves, vec![(2, 2)]);
    assert!(winning_moves(&grid, O).is_empty());
}

#[test]
fn test_takes_win_before_block() {
    let grid: Grid = "XX_O_____".parse().unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..20 {
        assert_eq!(choose_move(&grid, X, &mut rng), Some((0, 2)));
    }

    // both can win: take our own win
    let grid: Grid = "XX_OO____".parse().unwrap();
    for _ in 0..20 {
        assert_eq!(choose_move(&grid, X, &mut rng), Some((0, 2)));
        assert_eq!(choose_move(&grid, O, &mut rng), Some((1, 2)));
    }
}

#[test]
fn test_blocks_opponent() {
    let grid: Grid = "OO_X____X".parse().unwrap();
    assert!(winning_moves(&grid, X).is_empty());
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..20 {
        assert_eq!(choose_move(&grid, X, &mut rng), Some((0, 2)));
    }
}

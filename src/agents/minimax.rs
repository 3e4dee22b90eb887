//! Hard bot: exhaustive minimax over the rest of the game. See
//! https://en.wikipedia.org/wiki/Minimax
//!
//! No pruning and no depth limit, every terminal position below the current one is visited.

use crate::board_game::{Coord, GameState, Sign};
use crate::tictactoe::Grid;

pub const WIN_SCORE: i32 = 10;
pub const LOSS_SCORE: i32 = -10;
pub const DRAW_SCORE: i32 = 0;

/// A move together with the score of the subtree below it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scored {
    pub coord: Coord,
    pub score: i32,
}

/// Best move for `sign` (to move) and its score. Works on its own copy of the grid; `None` if
/// the game is already over.
pub fn search(mut grid: Grid, sign: Sign) -> Option<Scored> {
    if grid.evaluate().finished() {
        return None;
    }
    best_child(&mut grid, sign, sign)
}

pub fn choose_move(grid: &Grid, sign: Sign) -> Option<Coord> {
    search(*grid, sign).map(|best| best.coord)
}

/// Score of a finished game from the searching player's side.
fn terminal_score(state: GameState, me: Sign) -> i32 {
    match state.winner() {
        Some(winner) if winner == me => WIN_SCORE,
        Some(_) => LOSS_SCORE,
        None => DRAW_SCORE,
    }
}

fn minimax(grid: &mut Grid, me: Sign, mover: Sign) -> i32 {
    let state = grid.evaluate();
    if state.finished() {
        return terminal_score(state, me);
    }
    // an unfinished grid always has an empty cell
    best_child(grid, me, mover).map_or(DRAW_SCORE, |best| best.score)
}

/// Try every empty cell for `mover`, recurse, then take the cell back. `me` maximizes, the
/// opponent minimizes; on equal scores the first cell in row-major order is kept.
fn best_child(grid: &mut Grid, me: Sign, mover: Sign) -> Option<Scored> {
    let maximizing = mover == me;
    let mut best: Option<Scored> = None;

    for rc in grid.empty_cells() {
        grid.set(rc, mover);
        let score = minimax(grid, me, mover.opponent());
        grid.clear(rc);

        let improves = match best {
            None => true,
            Some(b) if maximizing => score > b.score,
            Some(b) => score < b.score,
        };
        if improves {
            best = Some(Scored { coord: rc, score });
        }
    }

    best
}

#[cfg(test)]
use Sign::{O, X};

#[test]
fn test_empty_board_is_a_draw() {
    let best = search(Grid::new(), X).unwrap();
    assert_eq!(best.score, DRAW_SCORE);
    // every opening scores 0, so the first cell is kept
    assert_eq!(best.coord, (0, 0));
}

#[test]
fn test_takes_forced_win() {
    let grid: Grid = "XX_OO____".parse().unwrap();
    let best = search(grid, X).unwrap();
    assert_eq!(best, Scored { coord: (0, 2), score: WIN_SCORE });

    // (0, 2) blocks X and forks: X must take (1, 2), then O completes the / diagonal at
    // (2, 0). Same score as winning at (1, 2) at once, and it comes first.
    let best = search(grid, O).unwrap();
    assert_eq!(best, Scored { coord: (0, 2), score: WIN_SCORE });

    let mut after = grid;
    after.set((0, 2), O);
    after.set((1, 2), X);
    assert_eq!(search(after, O), Some(Scored { coord: (2, 0), score: WIN_SCORE }));
}

#[test]
fn test_blocks_when_losing_otherwise() {
    let grid: Grid = "OO_X____X".parse().unwrap();
    assert_eq!(choose_move(&grid, X), Some((0, 2)));
}

#[test]
fn test_lost_position_scores_loss() {
    // O threatens (0, 2), (2, 1) and (2, 2) at once, X can only stop one
    let grid: Grid = "OO_XOXX__".parse().unwrap();
    assert_eq!(grid.evaluate(), GameState::Ongoing);
    let best = search(grid, X).unwrap();
    assert_eq!(best.score, LOSS_SCORE);
}

#[test]
fn test_search_leaves_grid_untouched() {
    let grid: Grid = "X___O____".parse().unwrap();
    let before = grid;
    let rc = choose_move(&grid, X).unwrap();
    assert_eq!(grid, before);
    assert!(grid.get(rc).is_empty());
}

#[test]
fn test_finished_game_has_no_move() {
    let won: Grid = "XXXOO____".parse().unwrap();
    assert_eq!(search(won, O), None);
    let drawn: Grid = "XOXXOOOXX".parse().unwrap();
    assert_eq!(choose_move(&drawn, X), None);
}

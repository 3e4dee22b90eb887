//! Easy bot: any empty cell, uniformly at random.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board_game::Coord;
use crate::tictactoe::Grid;

/// `None` only if the grid has no empty cell.
pub fn choose_move<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Coord> {
    grid.empty_cells().choose(rng).copied()
}

#[test]
fn test_random_move_is_empty_cell() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let grid: Grid = "XOX_O_X_O".parse().unwrap();
    let empty = grid.empty_cells();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let rc = choose_move(&grid, &mut rng).unwrap();
        assert!(empty.contains(&rc), "{:?} is not empty", rc);
    }

    let full: Grid = "XOXXOOOXX".parse().unwrap();
    assert_eq!(choose_move(&full, &mut rng), None);
}

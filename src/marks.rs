//! Hands out the two marks to the two players of a game.

use tracing::debug;

use crate::board_game::Sign;
use crate::error::{GameError, Result};

/// Pool of the marks not yet given to a player. Each game needs a fresh (or reset) allocator:
/// the first player gets X, the second gets O, and a third request fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkAllocator {
    // popped from the back, so X goes first
    remaining: Vec<Sign>,
}

impl Default for MarkAllocator {
    fn default() -> Self {
        MarkAllocator::new()
    }
}

impl MarkAllocator {
    pub fn new() -> MarkAllocator {
        MarkAllocator {
            remaining: vec![Sign::O, Sign::X],
        }
    }

    pub fn allocate(&mut self) -> Result<Sign> {
        let sign = self.remaining.pop().ok_or(GameError::TooManyPlayers)?;
        debug!(%sign, "mark allocated");
        Ok(sign)
    }

    /// Give both marks back to the pool.
    pub fn reset(&mut self) {
        *self = MarkAllocator::new();
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

#[test]
fn test_allocates_each_mark_once() {
    let mut marks = MarkAllocator::new();
    let first = marks.allocate().unwrap();
    let second = marks.allocate().unwrap();
    assert_eq!(first, Sign::X);
    assert_eq!(second, Sign::O);
    assert_eq!(first.opponent(), second);
    assert_eq!(marks.remaining(), 0);
}

#[test]
fn test_third_player_is_rejected_until_reset() {
    let mut marks = MarkAllocator::new();
    marks.allocate().unwrap();
    marks.allocate().unwrap();
    assert!(matches!(marks.allocate(), Err(GameError::TooManyPlayers)));
    assert!(matches!(marks.allocate(), Err(GameError::TooManyPlayers)));

    marks.reset();
    assert_eq!(marks.remaining(), 2);
    assert_eq!(marks.allocate().unwrap(), Sign::X);
}

use rand::Rng;

use crate::config::Board;
use crate::snake::{Cell, Snake};

/// Food currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub cell: Cell,
}

impl Food {
    /// Creates food at a fixed `cell`.
    #[must_use]
    pub fn at(cell: Cell) -> Self {
        Self { cell }
    }

    /// Spawns food in a cell not occupied by the snake.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, board: Board, snake: &Snake) -> Self {
        Self::at(spawn_cell(rng, board, snake))
    }
}

/// Draws uniform cells over the whole board until one is off the snake.
///
/// Does not return if the snake covers every cell.
#[must_use]
pub fn spawn_cell<R: Rng + ?Sized>(rng: &mut R, board: Board, snake: &Snake) -> Cell {
    let size = i32::from(board.tile_count());
    loop {
        let cell = Cell::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if !snake.occupies(cell) {
            return cell;
        }
    }
}

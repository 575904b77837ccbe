//! Greedy one-step autopilot.
//!
//! The planner only looks one cell ahead: it prefers steps that close the
//! larger of the two offsets to the food and falls back to any safe step.
//! Safety is judged against the body as it is before the tick, so the cell
//! the tail is about to leave still counts as occupied.

use std::cmp::Reverse;

use crate::config::Board;
use crate::input::{Direction, Velocity};
use crate::snake::{Cell, Snake};

/// A candidate step and its ranking.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Candidate {
    direction: Direction,
    priority: u8,
}

/// Returns true when stepping in `direction` neither reverses `current`,
/// leaves the board, nor lands on any current snake cell.
#[must_use]
pub fn can_move(board: Board, snake: &Snake, current: Velocity, direction: Direction) -> bool {
    if current.is_reversed_by(direction) {
        return false;
    }

    let next = snake.head().offset(Velocity::from(direction));
    board.contains(next) && !snake.occupies(next)
}

/// Picks the next direction toward `food`, or `None` when boxed in.
#[must_use]
pub fn plan_move(board: Board, snake: &Snake, food: Cell, current: Velocity) -> Option<Direction> {
    let head = snake.head();
    let dir_x = food.x - head.x;
    let dir_y = food.y - head.y;
    let safe = |direction: Direction| can_move(board, snake, current, direction);

    let mut candidates = Vec::with_capacity(4);

    let horizontal = match dir_x.signum() {
        1 => Some(Direction::Right),
        -1 => Some(Direction::Left),
        _ => None,
    };
    if let Some(direction) = horizontal.filter(|direction| safe(*direction)) {
        candidates.push(Candidate {
            direction,
            priority: if dir_x.abs() > dir_y.abs() { 2 } else { 1 },
        });
    }

    let vertical = match dir_y.signum() {
        1 => Some(Direction::Down),
        -1 => Some(Direction::Up),
        _ => None,
    };
    if let Some(direction) = vertical.filter(|direction| safe(*direction)) {
        candidates.push(Candidate {
            direction,
            priority: if dir_y.abs() > dir_x.abs() { 2 } else { 1 },
        });
    }

    if candidates.is_empty() {
        candidates.extend(
            Direction::SCAN_ORDER
                .into_iter()
                .filter(|direction| safe(*direction))
                .map(|direction| Candidate {
                    direction,
                    priority: 0,
                }),
        );
    }

    // Stable sort: equal priorities keep insertion order.
    candidates.sort_by_key(|candidate| Reverse(candidate.priority));
    candidates.first().map(|candidate| candidate.direction)
}

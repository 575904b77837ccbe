use std::collections::HashSet;

use autopilot_snake::config::Board;
use autopilot_snake::food::Food;
use autopilot_snake::game::{DeathReason, GameState, GameStatus, TickOutcome};
use autopilot_snake::input::{Direction, Velocity};
use autopilot_snake::snake::{Cell, Snake};

#[test]
fn first_keypress_launches_and_moves_one_cell() {
    let mut state = GameState::new_with_seed(Board::default(), 0, 42);
    assert_eq!(state.snake.head(), Cell::new(10, 10));
    assert_eq!(state.status, GameStatus::Idle);

    state.change_direction(Direction::Right);
    assert_eq!(state.pending_velocity(), Velocity::from(Direction::Right));
    assert_eq!(state.status, GameStatus::Running);

    state.tick();
    assert_eq!(state.snake.head(), Cell::new(11, 10));
    assert_eq!(state.snake.len(), 1);
}

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let mut state = GameState::new_with_seed(Board::new(8), 0, 42);
    state.snake = Snake::from_segments(vec![Cell::new(5, 5), Cell::new(4, 5)]).expect("non-empty");
    state.set_velocity(Velocity::from(Direction::Right));
    state.status = GameStatus::Running;
    state.food = Food::at(Cell::new(6, 5));

    assert_eq!(state.tick(), TickOutcome::Ate { new_high_score: true });
    assert_eq!(state.score, 1);
    let segments: Vec<Cell> = state.snake.segments().copied().collect();
    assert_eq!(segments, vec![Cell::new(6, 5), Cell::new(5, 5), Cell::new(4, 5)]);
    assert!(!state.snake.occupies(state.food.cell));

    state.food = Food::at(Cell::new(0, 0));
    assert_eq!(state.tick(), TickOutcome::Moved);
    assert_eq!(state.snake.head(), Cell::new(7, 5));

    assert_eq!(state.tick(), TickOutcome::Crashed(DeathReason::Wall));
    assert_eq!(state.status, GameStatus::GameOver);
    assert_eq!(state.tick(), TickOutcome::Skipped);
}

#[test]
fn left_edge_is_a_wall() {
    let mut state = GameState::new_with_seed(Board::default(), 0, 1);
    state.snake = Snake::new(Cell::new(0, 5));
    state.set_velocity(Velocity::from(Direction::Left));
    state.status = GameStatus::Running;

    assert_eq!(state.tick(), TickOutcome::Crashed(DeathReason::Wall));
}

#[test]
fn autopilot_runs_keep_every_invariant() {
    for seed in 0..8 {
        let mut state = GameState::new_with_seed(Board::new(12), 0, seed);
        state.toggle_autopilot();

        let mut previous_len = state.snake.len();
        let mut previous_score = state.score;

        for _ in 0..2_000 {
            let outcome = state.tick();
            if state.status == GameStatus::GameOver {
                assert!(matches!(outcome, TickOutcome::Crashed(_)));
                break;
            }

            let len = state.snake.len();
            assert!(len == previous_len || len == previous_len + 1);
            assert!(state.score >= previous_score);
            assert!(state.high_score >= state.score);

            let unique: HashSet<Cell> = state.snake.segments().copied().collect();
            assert_eq!(unique.len(), len, "snake overlaps itself");
            assert!(!state.snake.occupies(state.food.cell));

            previous_len = len;
            previous_score = state.score;
        }
    }
}

#[test]
fn high_score_survives_restarts() {
    let mut state = GameState::new_with_seed(Board::default(), 0, 3);
    state.snake = Snake::new(Cell::new(5, 5));
    state.set_velocity(Velocity::from(Direction::Right));
    state.status = GameStatus::Running;
    state.food = Food::at(Cell::new(6, 5));
    state.tick();
    assert_eq!(state.high_score, 1);

    state.restart();
    assert_eq!(state.score, 0);
    assert_eq!(state.high_score, 1);
    assert_eq!(state.status, GameStatus::Idle);
}

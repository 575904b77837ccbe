use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    Board, CELL_WIDTH, GLYPH_EMPTY, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, THEME, Theme,
};
use crate::game::{GameState, GameStatus};
use crate::input::{Direction, Velocity};
use crate::snake::Cell;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, hud_info: &HudInfo) {
    let area = frame.area();
    let [board_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(area);

    let play_area = centered_board(board_area, state.board());
    let block = Block::bordered().border_style(Style::new().fg(THEME.grid));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_grid(frame, inner, state.board(), &THEME);
    render_food(frame, inner, state, &THEME);
    render_snake(frame, inner, state, &THEME);
    render_hud(frame, hud_area, state, hud_info);

    match state.status {
        GameStatus::Idle => render_start_menu(frame, play_area, state.high_score),
        GameStatus::Paused => {
            render_pause_menu(frame, play_area, state.score, state.autopilot());
        }
        GameStatus::GameOver => {
            render_game_over_menu(frame, play_area, state.score, state.death_reason);
        }
        GameStatus::Running => {}
    }
}

fn centered_board(area: Rect, board: Board) -> Rect {
    let width = board.tile_count().saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = board.tile_count().saturating_add(2);

    let [_, column, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, board_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(column);

    board_area
}

fn render_grid(frame: &mut Frame<'_>, inner: Rect, board: Board, theme: &Theme) {
    let style = Style::new().fg(theme.grid).bg(theme.play_bg);
    let buffer = frame.buffer_mut();

    for y in 0..i32::from(board.tile_count()) {
        for x in 0..i32::from(board.tile_count()) {
            if let Some((column, row)) = logical_to_terminal(inner, board, Cell::new(x, y)) {
                buffer.set_string(column, row, GLYPH_EMPTY, style);
            }
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, state.board(), state.food.cell) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food).bg(theme.play_bg));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let head = state.snake.head();
    let buffer = frame.buffer_mut();

    for segment in state.snake.segments().skip(1) {
        let Some((x, y)) = logical_to_terminal(inner, state.board(), *segment) else {
            continue;
        };
        buffer.set_string(
            x,
            y,
            GLYPH_SNAKE_BODY,
            Style::new().fg(theme.snake_body).bg(theme.play_bg),
        );
    }

    if let Some((x, y)) = logical_to_terminal(inner, state.board(), head) {
        buffer.set_string(
            x,
            y,
            head_glyph(state.current_velocity()),
            Style::new()
                .fg(theme.snake_head)
                .bg(theme.snake_eye)
                .add_modifier(Modifier::BOLD),
        );
    }
}

/// Head glyph facing the direction of travel; a stationary snake looks down.
fn head_glyph(velocity: Velocity) -> &'static str {
    match velocity.direction() {
        Some(Direction::Up) => GLYPH_SNAKE_HEAD_UP,
        Some(Direction::Left) => GLYPH_SNAKE_HEAD_LEFT,
        Some(Direction::Right) => GLYPH_SNAKE_HEAD_RIGHT,
        Some(Direction::Down) | None => GLYPH_SNAKE_HEAD_DOWN,
    }
}

fn logical_to_terminal(inner: Rect, board: Board, cell: Cell) -> Option<(u16, u16)> {
    if !board.contains(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

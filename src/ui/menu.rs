use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::THEME;
use crate::game::DeathReason;
use crate::ui::hud::autopilot_label;

/// Columns of padding between the overlay border and its widest line.
const OVERLAY_PADDING: u16 = 2;

/// Draws the start hint over the board.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, high_score: u32) {
    let lines = vec![
        Line::from("SNAKE").style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("High score: {high_score}")),
        Line::from(""),
        Line::from("Press a direction to go"),
        Line::from("[Space] Start  [I] Autopilot"),
    ];

    render_overlay(frame, area, " start ", lines);
}

/// Draws the pause overlay with the current score and the keys that
/// leave it.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, score: u32, autopilot: bool) {
    let lines = vec![
        Line::from("PAUSED").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(format!("Score: {score} · {}", autopilot_label(autopilot))),
        Line::from(""),
        Line::from("[Space]/[P] Resume"),
        Line::from("[I] Autopilot  [+]/[-] Speed"),
        Line::from("[R] Restart  [Q] Quit"),
    ];

    render_overlay(frame, area, " paused ", lines);
}

/// Draws the game-over overlay with the final score.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    death_reason: Option<DeathReason>,
) {
    let lines = vec![
        Line::from("GAME OVER").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from(format!("Final score: {score}")),
        Line::from(death_reason_text(death_reason)),
        Line::from(""),
        Line::from("[Space]/[R] Play again"),
    ];

    render_overlay(frame, area, " game over ", lines);
}

fn death_reason_text(reason: Option<DeathReason>) -> &'static str {
    match reason {
        Some(DeathReason::Wall) => "Cause: hit wall",
        Some(DeathReason::SelfCollision) => "Cause: hit yourself",
        None => "",
    }
}

fn render_overlay(frame: &mut Frame<'_>, area: Rect, title: &'static str, lines: Vec<Line<'_>>) {
    let overlay = overlay_area(area, &lines);
    frame.render_widget(Clear, overlay);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(THEME.overlay_fg))
            .block(Block::bordered().title(title)),
        overlay,
    );
}

/// Box that fits `lines` plus border and padding, centered on `area` and
/// never larger than it.
fn overlay_area(area: Rect, lines: &[Line<'_>]) -> Rect {
    let text_width = lines.iter().map(Line::width).max().unwrap_or(0);
    let text_width = u16::try_from(text_width).unwrap_or(u16::MAX);
    let text_height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

    let width = text_width
        .saturating_add(2 * OVERLAY_PADDING + 2)
        .min(area.width);
    let height = text_height.saturating_add(2).min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::text::Line;

    use crate::game::DeathReason;

    use super::{death_reason_text, overlay_area, render_pause_menu};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn overlay_fits_its_text_and_stays_centered() {
        let area = Rect::new(2, 1, 42, 22);
        let lines = [Line::from("GAME OVER"), Line::from("Final score: 120")];

        let overlay = overlay_area(area, &lines);

        assert_eq!(overlay.width, 16 + 6);
        assert_eq!(overlay.height, 4);
        assert_eq!(overlay.x - area.x, area.right() - overlay.right());
    }

    #[test]
    fn overlay_is_clipped_to_a_tiny_area() {
        let area = Rect::new(0, 0, 8, 3);
        let lines = vec![Line::from("[Space]/[P] Resume"); 5];

        let overlay = overlay_area(area, &lines);

        assert_eq!(overlay, area);
    }

    #[test]
    fn pause_overlay_lists_resume_and_quit_keys() {
        let mut terminal =
            Terminal::new(TestBackend::new(42, 12)).expect("test terminal should build");

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_pause_menu(frame, area, 7, true);
            })
            .expect("drawing should not fail");

        let text = screen_text(&terminal);
        assert!(text.contains("Score: 7"));
        assert!(text.contains("Autopilot: on"));
        assert!(text.contains("[Space]/[P] Resume"));
        assert!(text.contains("[Q] Quit"));
    }

    #[test]
    fn death_reason_text_names_the_cause() {
        assert_eq!(death_reason_text(Some(DeathReason::Wall)), "Cause: hit wall");
        assert_eq!(death_reason_text(None), "");
    }
}

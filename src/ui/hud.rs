use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::{THEME, speed_label};
use crate::game::GameState;

/// Values shown by the HUD that do not live in [`GameState`].
#[derive(Debug, Clone)]
pub struct HudInfo {
    pub tick_interval_ms: u64,
}

/// Renders the two HUD rows into `area`.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, info: &HudInfo) {
    let [score_area, controls_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(score_line(
            state.score,
            state.high_score,
            info.tick_interval_ms,
            state.autopilot(),
        ))
        .alignment(Alignment::Center),
        score_area,
    );

    frame.render_widget(
        Paragraph::new(Line::from(
            "arrows/WASD move · space start/pause · r restart · i autopilot · +/- speed · q quit",
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray)),
        controls_area,
    );
}

/// Text of the autopilot toggle.
#[must_use]
pub fn autopilot_label(enabled: bool) -> &'static str {
    if enabled { "Autopilot: on" } else { "Autopilot" }
}

fn score_line(score: u32, high_score: u32, interval_ms: u64, autopilot: bool) -> Line<'static> {
    let value = Style::default().fg(THEME.hud_value).add_modifier(Modifier::BOLD);
    let autopilot_style = if autopilot {
        Style::default().fg(THEME.hud_accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Line::from(vec![
        Span::raw("Score: "),
        Span::styled(score.to_string(), value),
        Span::raw(" │ Hi: "),
        Span::styled(high_score.to_string(), value),
        Span::raw(" │ Speed: "),
        Span::styled(format!("{} ({interval_ms} ms)", speed_label(interval_ms)), value),
        Span::raw(" │ "),
        Span::styled(autopilot_label(autopilot), autopilot_style),
    ])
}

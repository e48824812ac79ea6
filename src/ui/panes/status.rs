//! Status bar: step counter, current move, keybindings and the run badge

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// How the recorded parse ended, as far as the status bar cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Accepted,
    Rejected,
    Truncated,
}

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub current_step: usize,
    pub total_steps: usize,
    pub run_state: RunState,
    pub is_playing: bool,
}

const KEYBINDINGS: &[(&str, &str)] = &[
    (" ←/→ ", " step "),
    (" 1-9 ", " skip "),
    (" ⎵ ", " play "),
    (" ↵ / ⌫ ", " end/start "),
    (" ⇥ ", " focus "),
    (" q ", " quit "),
];

fn badge(label: &'static str, color: Color) -> Span<'static> {
    Span::styled(
        label,
        Style::default()
            .bg(color)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )
}

/// Label shown at the right edge, if any.
fn indicator(data: &StatusRenderData<'_>) -> Option<(&'static str, Color)> {
    let at_end = data.current_step + 1 >= data.total_steps;
    if data.is_playing {
        Some((" ▶ PLAYING ", DEFAULT_THEME.secondary))
    } else if at_end {
        Some(match data.run_state {
            RunState::Accepted => (" ACCEPTED ", DEFAULT_THEME.success),
            RunState::Rejected => (" SYNTAX ERROR ", DEFAULT_THEME.error),
            RunState::Truncated => (" HISTORY FULL ", DEFAULT_THEME.secondary),
        })
    } else if data.current_step == 0 {
        Some((" START ", DEFAULT_THEME.primary))
    } else {
        None
    }
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData<'_>) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let bar = Style::default().bg(DEFAULT_THEME.current_line_bg);
    let dim = bar.fg(DEFAULT_THEME.comment);
    let failed = data.run_state == RunState::Rejected && data.current_step + 1 >= data.total_steps;

    // A truncated history may have stopped before the run finished.
    let total = match data.run_state {
        RunState::Truncated => format!("{}+", data.total_steps),
        _ => data.total_steps.to_string(),
    };
    let counter_color = if failed {
        DEFAULT_THEME.error
    } else {
        DEFAULT_THEME.primary
    };

    let left = Line::from(vec![
        Span::styled(
            format!(" Move {}/{} ", data.current_step + 1, total),
            Style::default()
                .bg(counter_color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", dim),
        Span::styled(
            data.message.to_string(),
            bar.fg(if failed {
                DEFAULT_THEME.error
            } else {
                DEFAULT_THEME.fg
            }),
        ),
    ]);
    frame.render_widget(Paragraph::new(left).style(bar), halves[0]);

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let mut right: Vec<Span> = Vec::with_capacity(KEYBINDINGS.len() * 2 + 2);
    for (i, (key, action)) in KEYBINDINGS.iter().enumerate() {
        if i > 0 {
            right.push(Span::styled("│", dim));
        }
        right.push(Span::styled(*key, key_style));
        right.push(Span::styled(*action, bar.fg(DEFAULT_THEME.fg)));
    }
    if let Some((label, color)) = indicator(&data) {
        right.push(Span::styled("│", dim));
        right.push(badge(label, color));
    }

    frame.render_widget(
        Paragraph::new(Line::from(right))
            .style(bar)
            .alignment(Alignment::Right),
        halves[1],
    );
}

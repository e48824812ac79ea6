//! Token input pane: consumed tokens dimmed, the lookahead highlighted

use super::utils::{border_style, follow_selection, visible_height};
use crate::parser::lexer::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding},
    Frame,
};

/// Render the input pane. The view scrolls just enough to keep the
/// lookahead visible.
pub fn render_input_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    cursor: usize,
    is_error: bool,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Input ({}/{}) ", cursor.min(tokens.len()), tokens.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused))
        .padding(Padding::new(1, 0, 0, 0));

    let items: Vec<ListItem> = tokens
        .iter()
        .enumerate()
        .map(|(index, token)| {
            let position = format!("{:>3}:{:<3} ", token.location.line, token.location.column);
            let style = if index == cursor && is_error {
                Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else if index == cursor {
                Style::default()
                    .bg(DEFAULT_THEME.lookahead_bg)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else if index < cursor {
                Style::default().fg(DEFAULT_THEME.comment)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            ListItem::new(Line::from(vec![
                Span::styled(position, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(token.to_string(), style),
            ]))
        })
        .collect();

    let height = visible_height(area.height);
    follow_selection(scroll_offset, cursor.min(items.len().saturating_sub(1)), height);

    let visible_items: Vec<ListItem> = items.into_iter().skip(*scroll_offset).take(height).collect();
    frame.render_widget(List::new(visible_items).block(block), area);
}

//! Parser stack pane, top of stack first

use super::utils::{border_style, clamp_scroll, visible_height};
use crate::grammar::Symbol;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    stack: &[Symbol],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Parser Stack ({}) ", stack.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if stack.is_empty() {
        let paragraph = Paragraph::new("(empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let all_items: Vec<ListItem> = stack
        .iter()
        .rev()
        .enumerate()
        .map(|(depth, symbol)| {
            let marker = if depth == 0 { "▶ " } else { "  " };
            let mut style = match symbol {
                Symbol::NonTerminal(_) => Style::default().fg(DEFAULT_THEME.non_terminal),
                Symbol::Terminal(_) => Style::default().fg(DEFAULT_THEME.fg),
            };
            if depth == 0 {
                style = style.add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(symbol.to_string(), style),
            ]))
        })
        .collect();

    let height = visible_height(area.height);
    clamp_scroll(scroll_offset, all_items.len(), height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

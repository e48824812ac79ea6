//! Production trace pane

use super::utils::{border_style, clamp_scroll, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the first `applied` entries of `trace`; the newest is
/// highlighted. Pass `usize::MAX` as the offset to stick to the bottom.
pub fn render_trace_pane(
    frame: &mut Frame,
    area: Rect,
    trace: &[String],
    applied: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Production Trace ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let applied = applied.min(trace.len());
    if applied == 0 {
        let paragraph = Paragraph::new("(no productions applied)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let items: Vec<ListItem> = trace[..applied]
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i + 1 == applied {
                Style::default()
                    .fg(DEFAULT_THEME.applied_production)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            ListItem::new(format!("{:3}. {}", i + 1, entry)).style(style)
        })
        .collect();

    let height = visible_height(area.height);
    clamp_scroll(scroll_offset, items.len(), height);

    let visible_items: Vec<ListItem> = items.into_iter().skip(*scroll_offset).take(height).collect();
    frame.render_widget(List::new(visible_items).block(block), area);
}

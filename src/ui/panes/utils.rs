//! Border and scroll helpers shared by the panes

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Rows available inside a bordered block, at least 1.
pub(crate) fn visible_height(area_height: u16) -> usize {
    area_height.saturating_sub(2).max(1) as usize
}

/// Clamp `offset` so the last page is never scrolled past.
pub(crate) fn clamp_scroll(offset: &mut usize, total_items: usize, visible_height: usize) {
    if total_items > visible_height {
        *offset = (*offset).min(total_items - visible_height);
    } else {
        *offset = 0;
    }
}

/// Adjust `offset` just enough for row `selected` to be visible.
pub(crate) fn follow_selection(offset: &mut usize, selected: usize, visible_height: usize) {
    if selected < *offset {
        *offset = selected;
    } else if selected >= *offset + visible_height {
        *offset = selected + 1 - visible_height;
    }
}

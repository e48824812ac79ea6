//! Source code pane rendering with token highlighting
//!
//! Lines are colored from the lexer's own token stream, so what is
//! highlighted is exactly what the parser sees. Text between tokens
//! (whitespace and comments) is dimmed.
//!
//! # Features
//!
//! - Keyword, literal and identifier coloring by token category
//! - The lookahead token is shown as a block; red when the parse failed there
//! - The lookahead's line stays at a fixed row while stepping

use crate::grammar::{Terminal, TokenCategory};
use crate::parser::lexer::Token;
use super::utils::{border_style, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn token_style(terminal: Terminal) -> Style {
    match terminal.category() {
        TokenCategory::ReservedWord => match terminal {
            Terminal::Int | Terminal::Float => Style::default().fg(DEFAULT_THEME.type_name),
            _ => Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD),
        },
        TokenCategory::Directive => Style::default().fg(DEFAULT_THEME.secondary),
        TokenCategory::StringLiteral => Style::default().fg(DEFAULT_THEME.string),
        TokenCategory::Number => Style::default().fg(DEFAULT_THEME.number),
        TokenCategory::Symbol => match terminal {
            Terminal::LBrace | Terminal::RBrace | Terminal::LParen | Terminal::RParen => {
                Style::default().fg(DEFAULT_THEME.primary)
            }
            _ => Style::default().fg(DEFAULT_THEME.fg),
        },
        TokenCategory::Identifier | TokenCategory::End => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Highlight one source line using the tokens that start on it.
fn highlight_line(
    line: &str,
    line_number: usize,
    tokens: &[Token],
    cursor: usize,
    is_error: bool,
) -> Line<'static> {
    let chars: Vec<char> = line.chars().collect();
    let gap_style = Style::default().fg(DEFAULT_THEME.comment);
    let mut spans = Vec::new();
    let mut column = 0; // 0-based position in `chars`

    for (index, token) in tokens.iter().enumerate() {
        if token.location.line != line_number || token.is_end_marker() {
            continue;
        }

        let start = (token.location.column - 1).min(chars.len());
        let end = (start + token.width()).min(chars.len());
        if start > column {
            spans.push(Span::styled(
                chars[column..start].iter().collect::<String>(),
                gap_style,
            ));
        }

        let mut style = token_style(token.terminal);
        if index == cursor {
            style = if is_error {
                Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .bg(DEFAULT_THEME.lookahead_bg)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            };
        }
        spans.push(Span::styled(
            chars[start..end].iter().collect::<String>(),
            style,
        ));
        column = end;
    }

    if column < chars.len() {
        spans.push(Span::styled(
            chars[column..].iter().collect::<String>(),
            gap_style,
        ));
    }

    Line::from(spans)
}

/// Scroll state for the source pane
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Data needed to render the source pane
pub struct SourceRenderData<'a> {
    pub source_code: &'a str,
    pub tokens: &'a [Token],
    /// Index of the lookahead token
    pub cursor: usize,
    pub is_error: bool,
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: SourceRenderData<'_>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let lines: Vec<&str> = data.source_code.lines().collect();
    let total_lines = lines.len();
    let current_line = data
        .tokens
        .get(data.cursor)
        .map(|t| t.location.line)
        .unwrap_or(0);

    let visible_height = visible_height(area.height);

    // Initialize target_line_row to center if not set, then clamp it into view
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target visual row
    if current_line > 0 && current_line <= total_lines {
        let target_line_idx = current_line - 1;
        scroll_state.offset = target_line_idx.saturating_sub(target_row);

        if total_lines > visible_height {
            let max_scroll = total_lines - visible_height;
            scroll_state.offset = scroll_state.offset.min(max_scroll);
        } else {
            scroll_state.offset = 0;
        }
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let num_style = if is_current && data.is_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment) // Line numbers
            };

            let mut content = highlight_line(line, line_num, data.tokens, data.cursor, data.is_error);
            if is_current {
                for span in &mut content.spans {
                    if span.style.bg.is_none() {
                        span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                    }
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn text(line: &Line<'_>) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_spans_follow_tokens() {
        let source = "  cout << x; // done";
        let tokens = Lexer::new(source).tokenize().unwrap();
        let line = highlight_line(source, 1, &tokens, 2, false);
        assert_eq!(
            text(&line),
            vec!["  ", "cout", " ", "<<", " ", "x", ";", " // done"]
        );
        assert_eq!(line.spans[5].style.bg, Some(DEFAULT_THEME.lookahead_bg));
    }

    #[test]
    fn test_error_token_is_red() {
        let source = "x = ;";
        let tokens = Lexer::new(source).tokenize().unwrap();
        let line = highlight_line(source, 1, &tokens, 2, true);
        assert_eq!(line.spans.last().unwrap().content, ";");
        assert_eq!(line.spans.last().unwrap().style.bg, Some(DEFAULT_THEME.error));
    }
}

//! Main TUI application state and logic

use super::panes::{self, RunState, SourceRenderData, SourceScrollState, StatusRenderData};
use crate::parser::lexer::Token;
use crate::snapshot::{Outcome, Recording, Snapshot};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use crate::config::{PLAY_TOGGLE_DEBOUNCE_MS, POLL_INTERVAL_MS};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Stack,
    Input,
    Trace,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> trace -> stack -> input)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Trace,
            FocusedPane::Trace => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Input,
            FocusedPane::Input => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Input,
            FocusedPane::Trace => FocusedPane::Source,
            FocusedPane::Stack => FocusedPane::Trace,
            FocusedPane::Input => FocusedPane::Stack,
        }
    }
}

/// The main application state
pub struct App {
    /// Recorded parse being viewed
    pub recording: Recording,

    /// Token stream the parse ran over
    pub tokens: Vec<Token>,

    /// Rendered production of each trace entry
    pub trace_lines: Vec<String>,

    /// The source code being parsed
    pub source_code: String,

    /// Index of the snapshot on screen
    pub position: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: SourceScrollState,
    pub stack_scroll: usize,
    pub input_scroll: usize,
    pub trace_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Delay between moves in play mode
    pub play_interval: Duration,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(
        recording: Recording,
        tokens: Vec<Token>,
        trace_lines: Vec<String>,
        source_code: String,
        play_interval: Duration,
    ) -> Self {
        let mut app = App {
            recording,
            tokens,
            trace_lines,
            source_code,
            position: 0,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState {
                offset: 0,
                target_line_row: None, // Will be set to center on first render
            },
            stack_scroll: 0,
            input_scroll: 0,
            trace_scroll: 0,
            should_quit: false,
            status_message: String::new(),
            is_playing: false,
            play_interval,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        };
        app.refresh_status();
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= self.play_interval {
                if !self.step_forward() {
                    self.is_playing = false;
                    self.status_message = format!("Playback complete: {}", self.outcome_text());
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    pub fn total_steps(&self) -> usize {
        self.recording.snapshots.len()
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.recording.snapshots.get(self.position)
    }

    fn is_at_end(&self) -> bool {
        self.position + 1 >= self.total_steps()
    }

    /// True on the last snapshot of a rejected parse.
    fn shows_error(&self) -> bool {
        self.is_at_end() && self.recording.error().is_some()
    }

    fn run_state(&self) -> RunState {
        match self.recording.outcome {
            Outcome::Accepted => RunState::Accepted,
            Outcome::Rejected(_) => RunState::Rejected,
            Outcome::Truncated => RunState::Truncated,
        }
    }

    fn outcome_text(&self) -> String {
        match &self.recording.outcome {
            Outcome::Accepted => "input accepted".to_string(),
            Outcome::Rejected(error) => format!("error at {}: {}", error.location(), error),
            Outcome::Truncated => "step history limit reached".to_string(),
        }
    }

    fn refresh_status(&mut self) {
        self.status_message = if self.is_at_end() && !self.is_playing {
            self.outcome_text()
        } else {
            self.current()
                .map(|s| s.action.clone())
                .unwrap_or_default()
        };
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Create layout: 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Trace (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        // Right column: Stack (top) | Input (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let is_error = self.shows_error();
        let (stack, cursor, applied) = match self.recording.snapshots.get(self.position) {
            Some(snapshot) => (snapshot.stack.as_slice(), snapshot.cursor, snapshot.trace_len),
            None => (&[][..], 0, 0),
        };

        panes::render_source_pane(
            frame,
            left_rows[0],
            SourceRenderData {
                source_code: &self.source_code,
                tokens: &self.tokens,
                cursor,
                is_error,
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_trace_pane(
            frame,
            left_rows[1],
            &self.trace_lines,
            applied,
            self.focused_pane == FocusedPane::Trace,
            &mut self.trace_scroll,
        );

        panes::render_stack_pane(
            frame,
            right_rows[0],
            stack,
            self.focused_pane == FocusedPane::Stack,
            &mut self.stack_scroll,
        );

        panes::render_input_pane(
            frame,
            right_rows[1],
            &self.tokens,
            cursor,
            is_error,
            self.focused_pane == FocusedPane::Input,
            &mut self.input_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                current_step: self.position,
                total_steps: self.total_steps(),
                run_state: self.run_state(),
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let stepped = (0..n).take_while(|_| self.step_forward()).count();
                self.refresh_status();
                if !self.is_at_end() {
                    self.status_message = format!("Stepped forward {} step(s)", stepped);
                }
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                if !self.step_backward() {
                    self.status_message = "Cannot step backward: at start".to_string();
                }
            }
            KeyCode::Right => {
                self.is_playing = false;
                if !self.step_forward() {
                    self.status_message =
                        format!("Cannot step forward: {}", self.outcome_text());
                }
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Stack => self.stack_scroll = self.stack_scroll.saturating_sub(1),
                FocusedPane::Input => self.input_scroll = self.input_scroll.saturating_sub(1),
                FocusedPane::Trace => self.trace_scroll = self.trace_scroll.saturating_sub(1),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling down makes the current line move up visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Stack => self.stack_scroll = self.stack_scroll.saturating_add(1),
                FocusedPane::Input => self.input_scroll = self.input_scroll.saturating_add(1),
                FocusedPane::Trace => self.trace_scroll = self.trace_scroll.saturating_add(1),
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (debounced to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(PLAY_TOGGLE_DEBOUNCE_MS)
                {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(self.play_interval)
                            .unwrap_or_else(Instant::now);
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                // Jump to end of the recorded parse
                self.is_playing = false;
                self.jump_to(self.total_steps().saturating_sub(1));
            }
            KeyCode::Backspace => {
                // Jump to start of the recorded parse
                self.is_playing = false;
                self.jump_to(0);
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    fn jump_to(&mut self, position: usize) {
        self.position = position.min(self.total_steps().saturating_sub(1));
        self.after_move();
    }

    /// Step forward one move; false at the end of the history
    fn step_forward(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.position += 1;
        self.after_move();
        true
    }

    /// Step backward one move; false at the start
    fn step_backward(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        self.after_move();
        true
    }

    fn after_move(&mut self) {
        self.stack_scroll = 0;
        // Auto-scroll trace to bottom
        self.trace_scroll = usize::MAX;
        self.refresh_status();
    }
}

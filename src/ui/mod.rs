//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI steps through a recorded parse one automaton move at a time and is
//! organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, play mode
//! - **[`panes`]**: stateless render functions for each visible pane (source,
//!   parser stack, token input, production trace, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`Recording`] and call [`App::run`] to start the event loop.
//!
//! [`Recording`]: crate::snapshot::Recording
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;

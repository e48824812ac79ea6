//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code with token highlighting and the lookahead marked
//! - [`stack`]: The parser stack, top first
//! - [`input`]: The token stream with the cursor position
//! - [`trace`]: Productions applied so far
//! - [`status`]: Status bar with keybindings and parse state
//! - `utils`: Border and scrolling helpers shared by the list panes
//!
//! Each pane module exports a stateless `render_*` function; scroll state
//! is owned by the app and passed in.

mod utils;

pub mod input;
pub mod source;
pub mod stack;
pub mod status;
pub mod trace;

pub use input::render_input_pane;
pub use source::{render_source_pane, SourceRenderData, SourceScrollState};
pub use stack::render_stack_pane;
pub use status::{render_status_bar, RunState, StatusRenderData};
pub use trace::render_trace_pane;

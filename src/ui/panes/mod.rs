//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`structure`]: the canonical structure, with the current step's targets marked
//! - [`steps`]: the queued steps, the cursor and the in-flight frame counter
//! - [`status`]: status bar with keybindings and playback state
//! - `utils`: pane borders and target styling shared by the panes
//!
//! Each pane exports a stateless `render_*` function. The panes only read
//! engine state; they never drive playback.

mod utils;

pub mod status;
pub mod steps;
pub mod structure;

pub use status::{render_status_bar, StatusRenderData};
pub use steps::{render_steps_pane, StepsRenderData};
pub use structure::render_structure_pane;
pub use utils::Focus;

//! Playback engine
//!
//! - [`playback`]: the transport state machine ([`PlaybackEngine`])
//! - [`events`]: notifications and per-call outcomes
//! - [`easing`]: interpolation curves for visual treatments
//!
//! # Execution Model
//!
//! Scheduling is cooperative and single-threaded. The engine never blocks:
//! the driver (the TUI loop, headless mode or a test) calls
//! [`PlaybackEngine::advance`] and waits for the returned delay before
//! calling again. Pausing and stopping are observed between calls, so step
//! `i` always completes before step `i + 1` begins.

pub mod easing;
pub mod events;
pub mod playback;

pub use events::{FrameSample, PlaybackEvent, StepOutcome};
pub use playback::{PlaybackEngine, PlaybackState, DEFAULT_FRAMES_PER_STEP};

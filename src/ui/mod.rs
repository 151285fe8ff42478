//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, playback driving
//! - **[`panes`]**: stateless render functions for each visible pane (structure,
//!   step list, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with an
//! [`AppConfig`] and call [`App::run`] to start the event loop. The UI reads
//! engine state and drains its events; it never mutates a structure itself.
//!
//! [`AppConfig`]: crate::config::AppConfig
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;

//! Main TUI application state and logic

use crate::config::AppConfig;
use crate::engine::{PlaybackEngine, PlaybackEvent, PlaybackState};
use crate::generators::{generate, Operation};
use crate::structures::StructureKind;
use crate::ui::panes::{
    render_status_bar, render_steps_pane, render_structure_pane, Focus, StatusRenderData,
    StepsRenderData,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Speed multipliers reachable with `+` / `-`
const MIN_SPEED: f32 = 0.125;
const MAX_SPEED: f32 = 8.0;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Structure,
    Steps,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Structure => FocusedPane::Steps,
            FocusedPane::Steps => FocusedPane::Structure,
        }
    }
}

/// The main application state
pub struct App {
    pub engine: PlaybackEngine,

    pub config: AppConfig,

    /// Structure currently shown
    pub kind: StructureKind,

    /// Operation whose steps are queued
    pub operation: Option<Operation>,

    pub focused_pane: FocusedPane,

    pub steps_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Earliest time the engine may be advanced again
    pub next_advance: Instant,
}

impl App {
    pub fn new(config: AppConfig, kind: StructureKind) -> Self {
        let engine = PlaybackEngine::new(config.initial_structure(kind))
            .with_frames_per_step(config.playback.frames_per_step)
            .with_speed(config.playback.speed);
        App {
            engine,
            config,
            kind,
            operation: None,
            focused_pane: FocusedPane::Structure,
            steps_scroll: 0,
            should_quit: false,
            status_message: String::from("Pick an operation with 1-9"),
            next_advance: Instant::now(),
        }
    }

    /// Queue `operation` right away (used for `--operation` on the command line)
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.select(operation);
        self
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Drive playback; a paused engine still finishes its in-flight step
            let mut timeout = Duration::from_millis(50);
            if self.engine.is_playing() || self.engine.in_flight_step().is_some() {
                let now = Instant::now();
                if now >= self.next_advance {
                    let outcome = self.engine.advance();
                    self.next_advance = now + outcome.delay();
                    self.consume_events();
                }
                timeout = timeout.min(self.next_advance.saturating_duration_since(Instant::now()));
            }

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        // Structure (left) | Steps (right)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // The step being animated, or else the one just finished
        let shown = self
            .engine
            .in_flight_step()
            .or_else(|| {
                self.engine
                    .current_step()
                    .checked_sub(1)
                    .and_then(|i| self.engine.steps().get(i))
            });
        let focus = Focus {
            step: shown,
            sample: self.engine.current_frame(),
        };

        render_structure_pane(
            frame,
            columns[0],
            self.engine.structure(),
            focus,
            self.focused_pane == FocusedPane::Structure,
        );

        render_steps_pane(
            frame,
            columns[1],
            StepsRenderData {
                steps: self.engine.steps(),
                cursor: self.engine.current_step(),
                sample: self.engine.current_frame(),
            },
            self.focused_pane == FocusedPane::Steps,
            &mut self.steps_scroll,
        );

        let operation = self.operation.as_ref().map(Operation::name);
        render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                current_step: self.engine.current_step(),
                total_steps: self.engine.total_steps(),
                state: self.engine.state(),
                speed: self.engine.speed(),
                operation,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => match self.engine.state() {
                PlaybackState::Playing => {
                    self.engine.pause();
                    self.status_message = "Paused".to_string();
                }
                PlaybackState::Paused => {
                    self.engine.resume();
                    self.status_message = "Playing...".to_string();
                }
                _ => {
                    if self.engine.is_finished() && self.engine.total_steps() > 0 {
                        self.engine.reset();
                    }
                    self.engine.play();
                    self.next_advance = Instant::now();
                    self.status_message = "Playing...".to_string();
                }
            },
            KeyCode::Right => {
                self.engine.step_forward();
                self.consume_events();
            }
            KeyCode::Char('s') => {
                self.engine.stop();
                self.status_message = "Stopped".to_string();
            }
            KeyCode::Char('r') => {
                self.engine.reset();
                self.steps_scroll = 0;
                self.status_message = "Reset to the first step".to_string();
            }
            KeyCode::Char('c') => {
                self.engine.clear();
                self.operation = None;
                self.steps_scroll = 0;
                self.status_message = "Queue cleared".to_string();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.set_speed(self.engine.speed() * 2.0);
            }
            KeyCode::Char('-') => {
                self.set_speed(self.engine.speed() / 2.0);
            }
            KeyCode::Tab => {
                self.switch_structure(self.kind.next());
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Char(c @ '1'..='9') => {
                let choice = c as usize - '1' as usize;
                let operations = self.config.operations(self.engine.structure());
                match operations.into_iter().nth(choice) {
                    Some(operation) => self.select(operation),
                    None => {
                        self.status_message = format!("No operation {} for {}", c, self.kind);
                    }
                }
            }
            _ => {}
        }
    }

    /// Generate `operation` against the current structure and queue it
    fn select(&mut self, operation: Operation) {
        self.engine.clear();
        self.steps_scroll = 0;
        match generate(
            self.engine.structure(),
            &operation,
            &self.config.generate_options(),
        ) {
            Ok(steps) => {
                self.status_message = format!("{}: {} steps, space to play", operation, steps.len());
                self.engine.enqueue(steps);
                self.operation = Some(operation);
            }
            Err(e) => {
                log::warn!("generation failed: {}", e);
                self.status_message = format!("Error: {}", e);
                self.operation = None;
            }
        }
    }

    fn switch_structure(&mut self, kind: StructureKind) {
        self.kind = kind;
        self.engine
            .replace_structure(self.config.initial_structure(kind));
        self.operation = None;
        self.steps_scroll = 0;
        let names: Vec<String> = self
            .config
            .operations(self.engine.structure())
            .iter()
            .enumerate()
            .map(|(i, op)| format!("{} {}", i + 1, op.name()))
            .collect();
        self.status_message = names.join(", ");
    }

    fn set_speed(&mut self, speed: f32) {
        let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        self.engine.set_speed(speed);
        self.status_message = format!("Speed {:.2}x", speed);
    }

    /// Turn engine events into status messages
    fn consume_events(&mut self) {
        for event in self.engine.drain_events() {
            match event {
                PlaybackEvent::DescriptionChanged(description) if !description.is_empty() => {
                    self.status_message = description;
                }
                PlaybackEvent::MutationFailed { index, reason } => {
                    self.status_message = format!("Step {} failed: {}", index + 1, reason);
                }
                PlaybackEvent::AnimationCompleted => {
                    self.status_message = "Playback complete".to_string();
                }
                _ => {}
            }
        }
    }
}

//! Playback notifications and per-call outcomes

use std::time::Duration;

/// Change notifications buffered by the engine until drained
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    StepStarted { index: usize, description: String },
    StepCompleted { index: usize },
    DescriptionChanged(String),
    AnimationCompleted,
    /// A deferred mutation was rejected by the structure; playback continues
    MutationFailed { index: usize, reason: String },
}

/// Interpolation state of the step currently animating
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    pub step: usize,
    /// 1-based frame number
    pub frame: u32,
    pub frames: u32,
    /// Eased progress, may overshoot 1.0 for appearance
    pub progress: f32,
    pub opacity: f32,
    pub scale: f32,
}

/// What a single `advance()` call did and what the driver should do next
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Not playing; nothing happened
    Idle,
    /// One interpolation frame ran; call again after `delay`
    Frame { sample: FrameSample, delay: Duration },
    /// A step finished (its mutation, if any, has been applied)
    StepFinished { index: usize },
    /// The cursor reached the end of the queue
    Completed,
}

impl StepOutcome {
    /// How long the driver should wait before calling `advance()` again
    pub fn delay(&self) -> Duration {
        match self {
            StepOutcome::Frame { delay, .. } => *delay,
            _ => Duration::ZERO,
        }
    }
}

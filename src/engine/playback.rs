// Playback engine: transport state machine over a step queue

use super::events::{FrameSample, PlaybackEvent, StepOutcome};
use crate::step::{Step, StepKind};
use crate::structures::Structure;
use std::time::Duration;

/// Interpolation frames per animated step when nothing else is configured
pub const DEFAULT_FRAMES_PER_STEP: u32 = 16;

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing played since creation or the last reset
    Idle,
    Playing,
    Paused,
    /// Cancelled by `stop()`
    Stopped,
    /// Cursor reached the end of the queue
    Completed,
}

/// Step currently being interpolated
#[derive(Debug, Clone, Copy)]
struct InFlight {
    index: usize,
    frame: u32,
}

/// Drives a step queue against the canonical structure
///
/// The engine owns no thread and never sleeps. A driver calls
/// [`PlaybackEngine::advance`] repeatedly, waiting [`StepOutcome::delay`]
/// between calls. Each call does one unit of work: one interpolation frame,
/// or finishing one step. Tests can call it in a tight loop.
///
/// # Invariants
///
/// - The cursor only moves forward, except on `reset`/`clear`.
/// - A step's mutation is applied exactly once, when its visual treatment
///   has completed (immediately for kinds without one).
/// - At every step boundary the canonical structure equals the baseline with
///   the mutations of steps `0..cursor` applied.
pub struct PlaybackEngine {
    /// Canonical structure, mutated only when a step finishes
    structure: Structure,

    /// Structure as it was before the first queued step ran
    baseline: Structure,

    queue: Vec<Step>,
    cursor: usize,
    state: PlaybackState,
    speed: f32,
    frames_per_step: u32,
    in_flight: Option<InFlight>,
    last_sample: Option<FrameSample>,
    description: String,
    events: Vec<PlaybackEvent>,
}

impl PlaybackEngine {
    pub fn new(structure: Structure) -> Self {
        PlaybackEngine {
            baseline: structure.clone(),
            structure,
            queue: Vec::new(),
            cursor: 0,
            state: PlaybackState::Idle,
            speed: 1.0,
            frames_per_step: DEFAULT_FRAMES_PER_STEP,
            in_flight: None,
            last_sample: None,
            description: String::new(),
            events: Vec::new(),
        }
    }

    pub fn with_frames_per_step(mut self, frames: u32) -> Self {
        self.frames_per_step = frames.max(1);
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    // ========== Queue management ==========

    /// Append steps to the queue
    ///
    /// Enqueueing into an empty queue pins the current structure as the
    /// baseline that `reset` rewinds to.
    pub fn enqueue(&mut self, steps: Vec<Step>) {
        if self.queue.is_empty() {
            self.baseline = self.structure.clone();
            self.cursor = 0;
        }
        log::debug!(
            "enqueued {} steps ({} total)",
            steps.len(),
            self.queue.len() + steps.len()
        );
        self.queue.extend(steps);
    }

    /// Discard the structure wholesale and start over with an empty queue
    pub fn replace_structure(&mut self, structure: Structure) {
        self.clear();
        self.baseline = structure.clone();
        self.structure = structure;
    }

    // ========== Transport ==========

    /// Start executing from the current cursor
    ///
    /// Effective from Idle, Stopped and Completed. While Paused this is a
    /// no-op (use [`resume`](Self::resume)), while Playing as well.
    pub fn play(&mut self) {
        match self.state {
            PlaybackState::Idle | PlaybackState::Stopped | PlaybackState::Completed => {
                log::debug!("play from step {}/{}", self.cursor, self.queue.len());
                self.state = PlaybackState::Playing;
            }
            PlaybackState::Paused => {
                log::debug!("play ignored: paused playback is already running, use resume");
            }
            PlaybackState::Playing => {}
        }
    }

    /// Halt advancement after the in-flight step, keeping the cursor
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            log::debug!("pause at step {}", self.cursor);
            self.state = PlaybackState::Paused;
        }
    }

    /// Continue from the same cursor
    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            log::debug!("resume at step {}", self.cursor);
            self.state = PlaybackState::Playing;
        }
    }

    /// Cancel playback without moving the cursor
    ///
    /// An in-flight step is abandoned before its mutation point: its
    /// mutation is not applied and the cursor stays on it, so the next
    /// `play` runs it again from its first frame.
    pub fn stop(&mut self) {
        if let Some(flight) = self.in_flight.take() {
            log::debug!("stop abandons step {} at frame {}", flight.index, flight.frame);
        }
        self.last_sample = None;
        if matches!(self.state, PlaybackState::Playing | PlaybackState::Paused) {
            self.state = PlaybackState::Stopped;
        }
    }

    /// Stop, rewind the cursor to 0 and restore the baseline structure
    pub fn reset(&mut self) {
        self.stop();
        self.cursor = 0;
        self.structure = self.baseline.clone();
        self.state = PlaybackState::Idle;
        self.set_description(String::new());
        log::debug!("reset to step 0 of {}", self.queue.len());
    }

    /// Stop, empty the queue and rewind the cursor
    pub fn clear(&mut self) {
        self.stop();
        self.queue.clear();
        self.cursor = 0;
        self.baseline = self.structure.clone();
        self.state = PlaybackState::Idle;
        self.set_description(String::new());
    }

    /// Execute exactly one step synchronously, whatever the transport state
    ///
    /// A step that is mid-animation is finished (that is the one step).
    /// No-op at the end of the queue.
    pub fn step_forward(&mut self) {
        if let Some(flight) = self.in_flight.take() {
            self.finish_step(flight.index);
        } else if self.cursor < self.queue.len() {
            let index = self.cursor;
            self.start_step(index);
            self.finish_step(index);
        } else {
            return;
        }

        if self.cursor == self.queue.len() && self.state != PlaybackState::Playing {
            self.complete();
        }
    }

    /// Do one unit of playback work
    pub fn advance(&mut self) -> StepOutcome {
        let Some(flight) = self.in_flight else {
            // Top of the play loop: cancellation and pause are observed here
            if self.state != PlaybackState::Playing {
                return StepOutcome::Idle;
            }
            if self.cursor >= self.queue.len() {
                self.complete();
                return StepOutcome::Completed;
            }

            let index = self.cursor;
            self.start_step(index);
            if !self.queue[index].is_animated() {
                self.finish_step(index);
                return StepOutcome::StepFinished { index };
            }
            self.in_flight = Some(InFlight { index, frame: 0 });
            return self.run_frame();
        };

        if flight.frame >= self.frames_per_step {
            self.in_flight = None;
            self.finish_step(flight.index);
            return StepOutcome::StepFinished {
                index: flight.index,
            };
        }
        self.run_frame()
    }

    /// Play whatever is left without waiting between frames
    pub fn run_to_completion(&mut self) {
        self.play();
        self.resume();
        while !matches!(self.advance(), StepOutcome::Completed | StepOutcome::Idle) {}
    }

    // ========== Internals ==========

    fn run_frame(&mut self) -> StepOutcome {
        let Some(flight) = self.in_flight.as_mut() else {
            return StepOutcome::Idle;
        };
        flight.frame += 1;
        let (index, frame) = (flight.index, flight.frame);

        let step = &self.queue[index];
        let frames = self.frames_per_step;
        let t = frame as f32 / frames as f32;
        let progress = step.kind.treatment().map_or(1.0, |e| e.apply(t));
        let (opacity, scale) = match step.kind {
            StepKind::Insert => (t, progress),
            StepKind::Delete => (1.0 - progress, 1.0),
            StepKind::Fade => (1.0 - 0.6 * progress, 1.0),
            StepKind::Scale => (1.0, 1.0 + 0.25 * progress),
            _ => (1.0, 1.0),
        };
        // Speed is read per frame so a change only affects what is left
        let delay = self.scaled(step.duration) / frames;

        let sample = FrameSample {
            step: index,
            frame,
            frames,
            progress,
            opacity,
            scale,
        };
        log::trace!("step {} frame {}/{} progress {:.3}", index, frame, frames, progress);
        self.last_sample = Some(sample);
        StepOutcome::Frame { sample, delay }
    }

    fn start_step(&mut self, index: usize) {
        let description = self.queue[index].description.clone();
        self.events.push(PlaybackEvent::StepStarted {
            index,
            description: description.clone(),
        });
        self.set_description(description);
    }

    fn finish_step(&mut self, index: usize) {
        if let Some(mutation) = &self.queue[index].mutation {
            if let Err(e) = self.structure.apply(mutation) {
                log::warn!("step {}: mutation '{}' rejected: {}", index, mutation, e);
                self.events.push(PlaybackEvent::MutationFailed {
                    index,
                    reason: e.to_string(),
                });
            }
        }
        self.last_sample = None;
        self.cursor = index + 1;
        self.events.push(PlaybackEvent::StepCompleted { index });
    }

    fn complete(&mut self) {
        log::debug!("playback completed after {} steps", self.queue.len());
        self.state = PlaybackState::Completed;
        self.events.push(PlaybackEvent::AnimationCompleted);
    }

    fn set_description(&mut self, description: String) {
        if description != self.description {
            self.description = description.clone();
            self.events.push(PlaybackEvent::DescriptionChanged(description));
        }
    }

    fn scaled(&self, duration: Duration) -> Duration {
        let speed = if self.speed.is_finite() && self.speed > 0.0 {
            self.speed
        } else {
            log::warn!("speed multiplier {} is unusable, playing at 1x", self.speed);
            1.0
        };
        Duration::try_from_secs_f32(duration.as_secs_f32() / speed).unwrap_or(Duration::MAX)
    }

    // ========== Getters ==========

    /// Hand out every event buffered since the last call
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn steps(&self) -> &[Step] {
        &self.queue
    }

    /// Cursor: index of the next step to execute
    pub fn current_step(&self) -> usize {
        self.cursor
    }

    pub fn total_steps(&self) -> usize {
        self.queue.len()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.state == PlaybackState::Paused
    }

    pub fn is_finished(&self) -> bool {
        self.cursor == self.queue.len()
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Not clamped: callers keep it in a sensible range
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn frames_per_step(&self) -> u32 {
        self.frames_per_step
    }

    pub fn current_description(&self) -> &str {
        &self.description
    }

    /// Step being animated, if any
    pub fn in_flight_step(&self) -> Option<&Step> {
        self.in_flight.map(|f| &self.queue[f.index])
    }

    /// Most recent interpolation frame of the in-flight step
    pub fn current_frame(&self) -> Option<FrameSample> {
        self.last_sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{generate, GenerateOptions, Operation};
    use crate::step::{Mutation, StepSequence, TargetRef};
    use crate::structures::array::ArrayModel;

    fn sorting_engine(values: &[i32]) -> PlaybackEngine {
        let structure = Structure::Array(ArrayModel::new(values));
        let steps = generate(&structure, &Operation::BubbleSort, &GenerateOptions::default())
            .unwrap();
        let mut engine = PlaybackEngine::new(structure);
        engine.enqueue(steps);
        engine
    }

    fn values(engine: &PlaybackEngine) -> Vec<i32> {
        match engine.structure() {
            Structure::Array(a) => a.values(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_play_runs_to_completion() {
        let mut engine = sorting_engine(&[3, 1, 2]);
        engine.run_to_completion();
        assert_eq!(engine.state(), PlaybackState::Completed);
        assert_eq!(engine.current_step(), engine.total_steps());
        assert_eq!(values(&engine), vec![1, 2, 3]);
        assert!(engine
            .drain_events()
            .contains(&PlaybackEvent::AnimationCompleted));
    }

    #[test]
    fn test_frames_then_finish() {
        let mut engine = sorting_engine(&[2, 1]).with_frames_per_step(15);
        engine.play();
        for expected in 1..=15 {
            match engine.advance() {
                StepOutcome::Frame { sample, delay } => {
                    assert_eq!(sample.frame, expected);
                    assert!(delay > Duration::ZERO);
                }
                other => panic!("expected a frame, got {:?}", other),
            }
        }
        assert_eq!(engine.advance(), StepOutcome::StepFinished { index: 0 });
        assert_eq!(engine.current_step(), 1);
    }

    #[test]
    fn test_speed_scales_frame_delay() {
        let mut engine = sorting_engine(&[2, 1]);
        engine.play();
        let slow = engine.advance().delay();
        engine.set_speed(4.0);
        let fast = engine.advance().delay();
        assert_eq!(slow, Duration::from_millis(500) / DEFAULT_FRAMES_PER_STEP);
        assert_eq!(fast * 4, slow);
    }

    #[test]
    fn test_connect_applies_immediately() {
        let structure = Structure::Array(ArrayModel::new(&[2, 1]));
        let mut seq = StepSequence::default();
        seq.push(
            Step::new(StepKind::Connect, TargetRef::Cell(0), "link")
                .with_mutation(Mutation::ArraySwap { i: 0, j: 1 }),
        );
        let mut engine = PlaybackEngine::new(structure);
        engine.enqueue(seq.into_steps());
        engine.play();
        assert_eq!(engine.advance(), StepOutcome::StepFinished { index: 0 });
        assert_eq!(values(&engine), vec![1, 2]);
    }

    #[test]
    fn test_pause_finishes_in_flight_step() {
        let mut engine = sorting_engine(&[2, 1]);
        engine.play();
        engine.advance();
        engine.pause();
        assert!(engine.is_paused());
        // The in-flight step keeps animating until its mutation point
        loop {
            if let StepOutcome::StepFinished { index } = engine.advance() {
                assert_eq!(index, 0);
                break;
            }
        }
        assert_eq!(engine.advance(), StepOutcome::Idle);
        assert_eq!(engine.current_step(), 1);

        engine.play();
        assert!(engine.is_paused(), "play does not resume a paused engine");
        engine.resume();
        assert!(engine.is_playing());
    }

    #[test]
    fn test_stop_abandons_in_flight_step() {
        let mut engine = sorting_engine(&[2, 1]);
        // Step 0 clears flags, step 1 compares, step 2 swaps
        engine.step_forward();
        engine.step_forward();
        engine.play();
        engine.advance();
        assert_eq!(engine.in_flight_step().unwrap().kind, StepKind::Swap);
        engine.stop();
        assert_eq!(engine.state(), PlaybackState::Stopped);
        assert_eq!(engine.current_step(), 2);
        assert_eq!(values(&engine), vec![2, 1]);

        engine.play();
        while !matches!(engine.advance(), StepOutcome::StepFinished { .. }) {}
        assert_eq!(values(&engine), vec![1, 2]);
    }

    #[test]
    fn test_step_forward_ignores_transport_state() {
        let mut engine = sorting_engine(&[2, 1]);
        engine.step_forward();
        assert_eq!(engine.current_step(), 1);
        assert_eq!(engine.state(), PlaybackState::Idle);
        while !engine.is_finished() {
            engine.step_forward();
        }
        assert_eq!(engine.state(), PlaybackState::Completed);
        let total = engine.total_steps();
        engine.step_forward();
        assert_eq!(engine.current_step(), total);
    }

    #[test]
    fn test_reset_rewinds_and_replays() {
        let mut engine = sorting_engine(&[3, 2, 1]);
        engine.run_to_completion();
        engine.reset();
        assert_eq!(engine.current_step(), 0);
        assert_eq!(engine.state(), PlaybackState::Idle);
        assert_eq!(values(&engine), vec![3, 2, 1]);
        assert!(engine.total_steps() > 0);

        engine.run_to_completion();
        assert_eq!(values(&engine), vec![1, 2, 3]);
    }

    #[test]
    fn test_clear_empties_queue() {
        let mut engine = sorting_engine(&[2, 1]);
        engine.step_forward();
        engine.clear();
        assert_eq!(engine.total_steps(), 0);
        assert_eq!(engine.current_step(), 0);
        engine.play();
        assert_eq!(engine.advance(), StepOutcome::Completed);
    }

    #[test]
    fn test_events_report_progress() {
        let mut engine = sorting_engine(&[1]);
        engine.step_forward();
        let events = engine.drain_events();
        assert!(matches!(
            &events[0],
            PlaybackEvent::StepStarted { index: 0, .. }
        ));
        assert!(events.contains(&PlaybackEvent::StepCompleted { index: 0 }));
        assert!(events
            .iter()
            .any(|e| matches!(e, PlaybackEvent::DescriptionChanged(_))));
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_rejected_mutation_is_reported() {
        let structure = Structure::Array(ArrayModel::new(&[1]));
        let mut engine = PlaybackEngine::new(structure);
        engine.enqueue(vec![Step::new(StepKind::Connect, TargetRef::Cell(0), "bad")
            .with_mutation(Mutation::HeapPopLast)]);
        engine.step_forward();
        assert!(engine
            .drain_events()
            .iter()
            .any(|e| matches!(e, PlaybackEvent::MutationFailed { index: 0, .. })));
        assert_eq!(values(&engine), vec![1]);
    }
}

//! Animation steps and the deferred mutation commands they carry
//!
//! A [`Step`] is one unit of the animation timeline. Generators build steps
//! through a [`StepSequence`], and the playback engine consumes them strictly
//! in order. Structural change never happens while steps are generated: it is
//! described by an optional [`Mutation`] attached to a step and interpreted
//! by [`crate::structures::Structure::apply`] once playback reaches it.
//!
//! # Visual treatment
//!
//! Every [`StepKind`] except `Connect` and `Disconnect` has a built-in visual
//! treatment (a short eased interpolation). Steps without one apply their
//! mutation immediately, with no timing delay.

mod mutation;

pub use mutation::Mutation;

use crate::engine::easing::Easing;
use rustc_hash::FxHashMap;
use std::fmt;
use std::time::Duration;

/// Nominal duration of a step before the speed multiplier is applied
pub const DEFAULT_STEP_DURATION: Duration = Duration::from_millis(500);

/// What a step does visually
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Insert,
    Delete,
    Compare,
    Swap,
    Highlight,
    Move,
    Scale,
    Fade,
    Connect,
    Disconnect,
}

impl StepKind {
    /// Easing curve of the built-in visual treatment, if the kind has one
    pub fn treatment(self) -> Option<Easing> {
        match self {
            StepKind::Highlight
            | StepKind::Compare
            | StepKind::Fade
            | StepKind::Move
            | StepKind::Swap
            | StepKind::Scale => Some(Easing::CubicInOut),
            StepKind::Insert => Some(Easing::BackOut),
            StepKind::Delete => Some(Easing::Linear),
            StepKind::Connect | StepKind::Disconnect => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StepKind::Insert => "insert",
            StepKind::Delete => "delete",
            StepKind::Compare => "compare",
            StepKind::Swap => "swap",
            StepKind::Highlight => "highlight",
            StepKind::Move => "move",
            StepKind::Scale => "scale",
            StepKind::Fade => "fade",
            StepKind::Connect => "connect",
            StepKind::Disconnect => "disconnect",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Handle to one visual element of a structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetRef {
    /// The structure as a whole (used for summary and edge-case steps)
    Whole,
    /// Array cell by index
    Cell(usize),
    /// Linked list node by arena id
    Node(usize),
    /// Hash table bucket
    Bucket(usize),
    /// Entry inside a bucket chain
    Entry { bucket: usize, position: usize },
    /// Heap array slot
    Slot(usize),
    /// Huffman tree node by arena id
    TreeNode(usize),
}

/// Free-form step parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

/// One unit of the animation timeline
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub kind: StepKind,
    pub target: TargetRef,
    pub secondary: Option<TargetRef>,
    pub duration: Duration,
    pub params: FxHashMap<String, ParamValue>,
    pub description: String,
    pub mutation: Option<Mutation>,
}

impl Step {
    pub fn new(kind: StepKind, target: TargetRef, description: impl Into<String>) -> Self {
        Step {
            kind,
            target,
            secondary: None,
            duration: DEFAULT_STEP_DURATION,
            params: FxHashMap::default(),
            description: description.into(),
            mutation: None,
        }
    }

    pub fn with_secondary(mut self, target: TargetRef) -> Self {
        self.secondary = Some(target);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_param(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = Some(mutation);
        self
    }

    /// Look up a parameter by name
    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    /// Whether the engine interpolates this step over time
    pub fn is_animated(&self) -> bool {
        self.kind.treatment().is_some()
    }

    /// All element handles this step touches
    pub fn targets(&self) -> impl Iterator<Item = TargetRef> + '_ {
        std::iter::once(self.target).chain(self.secondary)
    }
}

/// Append-only builder used by the generators
///
/// Every step pushed through the sequence gets the same nominal duration,
/// so a generator never has to think about timing.
#[derive(Debug, Clone)]
pub struct StepSequence {
    steps: Vec<Step>,
    duration: Duration,
}

impl StepSequence {
    pub fn new(duration: Duration) -> Self {
        StepSequence {
            steps: Vec::new(),
            duration,
        }
    }

    /// Append a step, stamping it with the sequence's nominal duration
    pub fn push(&mut self, step: Step) -> &mut Self {
        self.steps.push(step.with_duration(self.duration));
        self
    }

    /// Shorthand for a step without parameters or mutation
    pub fn emit(
        &mut self,
        kind: StepKind,
        target: TargetRef,
        description: impl Into<String>,
    ) -> &mut Self {
        self.push(Step::new(kind, target, description))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

impl Default for StepSequence {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_DURATION)
    }
}

/// Count the steps of a given kind (handy for summaries and tests)
pub fn count_kind(steps: &[Step], kind: StepKind) -> usize {
    steps.iter().filter(|s| s.kind == kind).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_has_no_treatment() {
        assert!(StepKind::Connect.treatment().is_none());
        assert!(StepKind::Disconnect.treatment().is_none());
        assert_eq!(StepKind::Insert.treatment(), Some(Easing::BackOut));
        assert_eq!(StepKind::Delete.treatment(), Some(Easing::Linear));
        assert_eq!(StepKind::Compare.treatment(), Some(Easing::CubicInOut));
    }

    #[test]
    fn test_sequence_stamps_duration() {
        let mut seq = StepSequence::new(Duration::from_millis(120));
        seq.emit(StepKind::Highlight, TargetRef::Cell(0), "look");
        seq.push(
            Step::new(StepKind::Swap, TargetRef::Cell(0), "swap")
                .with_secondary(TargetRef::Cell(1))
                .with_param("left", 3)
                .with_mutation(Mutation::ArraySwap { i: 0, j: 1 }),
        );

        let steps = seq.into_steps();
        assert_eq!(steps.len(), 2);
        assert!(steps.iter().all(|s| s.duration == Duration::from_millis(120)));
        assert_eq!(steps[1].param("left"), Some(&ParamValue::Int(3)));
        assert_eq!(steps[1].targets().count(), 2);
        assert_eq!(count_kind(&steps, StepKind::Swap), 1);
    }
}

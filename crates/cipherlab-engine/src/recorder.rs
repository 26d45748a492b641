//! Step recording
//!
//! Algorithms narrate their work through a [`StepRecorder`] handed in by the
//! caller. [`StepTrace`] keeps the steps in order for the response;
//! [`NoopRecorder`] drops them when only the output matters.

use serde::{Deserialize, Serialize};

/// Sink for labeled computation events, in the order they happen
pub trait StepRecorder {
    /// Append one step
    fn record(&mut self, step: String);

    /// Whether steps are kept at all; lets callers skip formatting
    fn is_recording(&self) -> bool {
        true
    }
}

impl dyn StepRecorder + '_ {
    /// Record a step built lazily, only when the recorder keeps steps
    pub fn record_with(&mut self, step: impl FnOnce() -> String) {
        if self.is_recording() {
            self.record(step());
        }
    }
}

/// Ordered, append-only list of steps for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepTrace(Vec<String>);

impl StepTrace {
    /// Create an empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded steps
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Steps in recording order
    pub fn steps(&self) -> &[String] {
        &self.0
    }

    /// Consume the trace, returning the steps
    pub fn into_steps(self) -> Vec<String> {
        self.0
    }
}

impl StepRecorder for StepTrace {
    fn record(&mut self, step: String) {
        tracing::trace!(index = self.0.len(), %step, "step");
        self.0.push(step);
    }
}

impl<'a> IntoIterator for &'a StepTrace {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Recorder that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

impl StepRecorder for NoopRecorder {
    fn record(&mut self, _step: String) {}

    fn is_recording(&self) -> bool {
        false
    }
}

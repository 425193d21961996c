//! Append-only step log for one pipeline run

use super::step::{Step, StepPayload};

/// Records steps in pipeline order.
///
/// Each run owns its recorder; nothing is shared across runs. Indices are
/// dense and start at 0.
#[derive(Debug, Default)]
pub struct StepRecorder {
    steps: Vec<Step>,
}

impl StepRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step and return its index
    pub fn record(&mut self, description: impl Into<String>, payload: StepPayload) -> usize {
        let index = self.steps.len();
        self.steps.push(Step {
            index,
            description: description.into(),
            payload,
        });
        index
    }

    /// Recorded steps in order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Most recent step
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Number of recorded steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Consume the recorder, yielding the steps
    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

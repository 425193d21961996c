//! Step trace subsystem
//!
//! Every pipeline stage appends typed steps to the run's recorder. The
//! resulting trace is the replayable audit trail of the run: it is
//! append-only, ordered, and discarded with the response.

mod recorder;
mod step;

pub use recorder::StepRecorder;
pub use step::{
    ApproximationStep, ClassificationStep, ResolutionStep, RuleInductionStep, Step, StepKind,
    StepPayload,
};

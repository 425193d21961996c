//! Pipeline orchestration
//!
//! `Engine::process` is the single synchronous entry point. It validates the
//! request (method, then threshold, then table), runs the stages in order
//! and returns either a complete `ProcessResponse` or one structured error.
//! A failed run never yields a partial result.

mod assembler;
mod config;
mod method;
mod metrics;
mod pipeline;
mod request;

pub use assembler::{ProcessResponse, ResolutionResult, ResultAssembler};
pub use config::EngineConfig;
pub use method::Method;
pub use metrics::{RunMetrics, Summary};
pub use pipeline::{process, Engine};
pub use request::ProcessRequest;

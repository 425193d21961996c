//! The processing pipeline
//!
//! DecisionTable → IndiscernibilityAnalyzer → resolver → RuleInducer →
//! ResultAssembler. Every input check happens before the first step is
//! recorded.

use super::assembler::{ProcessResponse, ResultAssembler};
use super::config::EngineConfig;
use super::method::Method;
use super::metrics::RunMetrics;
use super::request::ProcessRequest;
use crate::analyzer::IndiscernibilityAnalyzer;
use crate::errors::{EngineError, EngineResult};
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::resolver::{QualitativeResolver, QuantitativeResolver, Resolution};
use crate::rules::RuleInducer;
use crate::table::{DecisionTable, RawTable};
use crate::trace::StepRecorder;

/// Validated resolver choice
enum Strategy {
    Qualitative,
    Quantitative(QuantitativeResolver),
}

/// Stateless decision-table processing engine
///
/// Each call to `process` is a pure function of the request and the
/// configuration; an `Engine` can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Configuration in effect
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline on one request.
    ///
    /// # Errors
    ///
    /// - `InvalidMethod` for an unknown method name
    /// - `InvalidThreshold` for a threshold outside [0, 1], or any threshold
    ///   on a qualitative request
    /// - `MalformedTable` when the table fails ingestion
    /// - `InvariantViolation` when an internal consistency check fails
    pub fn process(&self, request: &ProcessRequest) -> EngineResult<ProcessResponse> {
        let scope = ObservationScope::with_fields("PIPELINE", &[("method", request.method.as_str())]);

        match self.run(request) {
            Ok(response) => {
                let summary = &response.result.summary;
                scope.complete_with_fields(&[
                    ("consistent", summary.consistent_size.to_string().as_str()),
                    ("removed", summary.removed_count.to_string().as_str()),
                    ("rules", summary.rules_count.to_string().as_str()),
                    ("steps", response.steps.len().to_string().as_str()),
                ]);
                Ok(response)
            }
            Err(err) => {
                let reason = err.to_string();
                if err.is_fatal() {
                    log_event_with_fields(
                        Event::InvariantViolated,
                        &[("detail", reason.as_str())],
                    );
                    scope.fail_fatal(err.code(), &reason);
                } else {
                    scope.fail(err.code(), &reason);
                }
                Err(err)
            }
        }
    }

    fn run(&self, request: &ProcessRequest) -> EngineResult<ProcessResponse> {
        let method: Method = request.method.parse()?;
        let strategy = self.strategy(method, request.threshold)?;
        let table = self.ingest(&request.table)?;

        let mut recorder = StepRecorder::new();
        let partition = IndiscernibilityAnalyzer::analyze(&table, &mut recorder);

        let resolution: Resolution = match &strategy {
            Strategy::Qualitative => QualitativeResolver::resolve(&table, &partition, &mut recorder),
            Strategy::Quantitative(resolver) => resolver.resolve(&table, &partition, &mut recorder),
        };
        log_event_with_fields(
            Event::ResolutionComplete,
            &[
                ("kept", resolution.consistent.len().to_string().as_str()),
                ("method", method.as_str()),
                ("removed", resolution.removed.len().to_string().as_str()),
            ],
        );

        let rules = RuleInducer::new(self.config.weight_formula)
            .induce_recorded(&resolution.consistent, &mut recorder)?;

        let metrics = RunMetrics::compute(method, &table, &partition, &resolution);
        ResultAssembler::assemble(&table, resolution, rules, metrics, recorder)
    }

    fn strategy(&self, method: Method, threshold: Option<f64>) -> EngineResult<Strategy> {
        if let (false, Some(t)) = (method.takes_threshold(), threshold) {
            return Err(EngineError::InvalidThreshold(format!(
                "{} resolution takes no threshold, got {}",
                method, t
            )));
        }

        match method {
            Method::Qualitative => Ok(Strategy::Qualitative),
            Method::Quantitative => {
                let t = threshold.unwrap_or(self.config.default_threshold);
                Ok(Strategy::Quantitative(QuantitativeResolver::new(t)?))
            }
        }
    }

    fn ingest(&self, raw: &RawTable) -> EngineResult<DecisionTable> {
        match DecisionTable::from_raw(raw, self.config.ingest_options()) {
            Ok(table) => {
                log_event_with_fields(
                    Event::TableValidated,
                    &[
                        ("attributes", table.condition_attributes().len().to_string().as_str()),
                        ("objects", table.len().to_string().as_str()),
                    ],
                );
                Ok(table)
            }
            Err(err) => {
                let reason = err.malformed_reason().map_or("unknown", |r| r.as_str());
                log_event_with_fields(
                    Event::TableRejected,
                    &[
                        ("object_id", err.object_id().unwrap_or("")),
                        ("reason", reason),
                    ],
                );
                Err(err)
            }
        }
    }
}

/// Run the pipeline with the default configuration
pub fn process(
    table: RawTable,
    method: &str,
    threshold: Option<f64>,
) -> EngineResult<ProcessResponse> {
    Engine::default().process(&ProcessRequest::new(table, method, threshold))
}

//! Rule induction over a consistent table
//!
//! Objects are grouped by condition signature; each group yields exactly
//! one rule. On a consistent table every group agrees on its decision, so
//! confidence is 1.0. A group holding two decisions means a resolver left
//! a conflict behind and is reported as an invariant violation.

use rayon::prelude::*;

use super::rule::Rule;
use super::weight::{RuleStats, WeightFormula, WeightPolicy};
use crate::analyzer::{EquivalenceClass, IndiscernibilityAnalyzer};
use crate::errors::{EngineError, EngineResult};
use crate::observability::{log_event_with_fields, Event};
use crate::table::DecisionTable;
use crate::trace::{RuleInductionStep, StepPayload, StepRecorder};

/// Derives one decision rule per distinct condition signature
#[derive(Debug, Clone, Default)]
pub struct RuleInducer<P: WeightPolicy = WeightFormula> {
    policy: P,
}

impl<P: WeightPolicy> RuleInducer<P> {
    /// Create an inducer with the given weight policy
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    /// Weight policy in use
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Induce rules in signature-group order
    pub fn induce(&self, table: &DecisionTable) -> EngineResult<Vec<Rule>> {
        if table.is_empty() {
            return Ok(Vec::new());
        }

        let partition = IndiscernibilityAnalyzer::classify(table);
        let counts = table.decision_counts();
        let table_size = table.len();

        partition
            .classes()
            .par_iter()
            .map(|group| {
                let decision = Self::group_decision(group)?;
                let decision_frequency = counts.get(decision).copied().unwrap_or(0);
                let holders = group.decisions().get(decision).copied().unwrap_or(0);

                let stats = RuleStats {
                    table_size,
                    decision_frequency,
                    support: group.len() as f64 / table_size as f64,
                    confidence: holders as f64 / group.len() as f64,
                };

                Ok(Rule {
                    condition: group.signature().clone(),
                    decision: decision.clone(),
                    support: stats.support,
                    confidence: stats.confidence,
                    weight: self.policy.weight(&stats),
                    decision_frequency,
                })
            })
            .collect()
    }

    /// Induce rules and record the rule induction step
    pub fn induce_recorded(
        &self,
        table: &DecisionTable,
        recorder: &mut StepRecorder,
    ) -> EngineResult<Vec<Rule>> {
        let rules = self.induce(table)?;

        let description = if rules.is_empty() {
            "No rules induced: the consistent table is empty".to_string()
        } else {
            format!(
                "Induced {} decision rules ({} weights)",
                rules.len(),
                self.policy.name()
            )
        };
        recorder.record(
            description,
            StepPayload::RuleInduction(RuleInductionStep {
                rules: rules.clone(),
            }),
        );

        log_event_with_fields(
            Event::RulesInduced,
            &[
                ("rules", rules.len().to_string().as_str()),
                ("weights", self.policy.name()),
            ],
        );

        Ok(rules)
    }

    fn group_decision(group: &EquivalenceClass) -> EngineResult<&crate::table::AttrValue> {
        let mut decisions = group.decisions().keys();
        match (decisions.next(), decisions.next()) {
            (Some(decision), None) => Ok(decision),
            (Some(_), Some(_)) => Err(EngineError::invariant(format!(
                "signature group {} holds {} decisions after resolution",
                group.key(),
                group.decisions().len()
            ))),
            (None, _) => Err(EngineError::invariant(format!(
                "signature group {} has no members",
                group.key()
            ))),
        }
    }
}

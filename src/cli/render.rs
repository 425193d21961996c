//! Human-readable rendering of a response

use std::fmt;

use crate::engine::ProcessResponse;

/// Text report of one run: summary, approximations and rules
pub struct TextReport<'a>(pub &'a ProcessResponse);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = &self.0.result;
        let summary = &result.summary;
        let metrics = &result.metrics;

        writeln!(f, "Method:      {}", metrics.method)?;
        if let Some(threshold) = summary.threshold {
            writeln!(f, "Threshold:   {}", threshold)?;
        }
        writeln!(
            f,
            "Objects:     {} original, {} consistent, {} removed",
            summary.original_size, summary.consistent_size, summary.removed_count
        )?;
        writeln!(
            f,
            "Classes:     {} ({} in conflict, {} objects)",
            metrics.equivalence_classes, metrics.conflict_classes, metrics.conflicting_objects
        )?;
        writeln!(f, "Consistency: {:.4}", metrics.consistency_ratio)?;
        if !result.removed_objects.is_empty() {
            writeln!(f, "Removed:     {}", result.removed_objects.join(", "))?;
        }

        if let Some(approximations) = &result.approximations {
            writeln!(f)?;
            writeln!(f, "Approximations:")?;
            for (decision, approx) in approximations.iter() {
                writeln!(
                    f,
                    "  {}: lower {}, upper {}, boundary [{}], accuracy {:.4}",
                    decision,
                    approx.lower.len(),
                    approx.upper.len(),
                    approx.boundary().join(", "),
                    approx.accuracy
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Rules ({}):", result.rules.len())?;
        for rule in &result.rules {
            writeln!(
                f,
                "  {}  [support {:.4}, confidence {:.4}, weight {:.4}]",
                rule, rule.support, rule.confidence, rule.weight
            )?;
        }
        Ok(())
    }
}

//! Audit records attached to compensation results.
//!
//! Every rule the compensation calculator applies leaves an [`AuditStep`]
//! behind, so a recruiter can show a candidate exactly how a figure was
//! reached.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use crew_planner::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "rate_lookup".to_string(),
///     rule_name: "Rate Lookup".to_string(),
///     formula: "per_diem_rate, daily_revenue = table[level][scenario]".to_string(),
///     input: serde_json::json!({ "experience_level": "expert" }),
///     output: serde_json::json!({ "per_diem_rate": "300" }),
///     reasoning: "Expert per-diem is $300".to_string(),
/// };
/// assert_eq!(step.rule_id, "rate_lookup");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The formula the rule evaluates.
    pub formula: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The ordered audit steps for one calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
}

impl AuditTrace {
    /// Appends a step, numbering it after the existing ones.
    pub fn push(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        formula: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            formula: formula.to_string(),
            input,
            output,
            reasoning,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_numbers_steps_sequentially() {
        let mut trace = AuditTrace::default();
        trace.push(
            "a",
            "A",
            "x = 1",
            serde_json::json!({}),
            serde_json::json!({}),
            "first".to_string(),
        );
        trace.push(
            "b",
            "B",
            "y = 2",
            serde_json::json!({}),
            serde_json::json!({}),
            "second".to_string(),
        );

        assert_eq!(trace.steps.len(), 2);
        assert_eq!(trace.steps[0].step_number, 1);
        assert_eq!(trace.steps[1].step_number, 2);
        assert_eq!(trace.steps[1].rule_id, "b");
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 3,
            rule_id: "per_diem_offset".to_string(),
            rule_name: "Per-Diem Offset".to_string(),
            formula: "net = max(0, gross - per_diem)".to_string(),
            input: serde_json::json!({ "gross": "9300" }),
            output: serde_json::json!({ "net": "3900" }),
            reasoning: "Bonus exceeds production per-diem".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":3"));
        assert!(json.contains("\"rule_id\":\"per_diem_offset\""));
        assert!(json.contains("\"formula\":\"net = max(0, gross - per_diem)\""));
    }
}

use serde::{Deserialize, Serialize};

use super::super::domain::{AnswerSet, NOT_SURE};
use super::rules::Rule;

/// Audit record for one rule evaluated against one answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEvaluation {
    #[serde(rename = "ruleId")]
    pub rule_id: String,
    pub fired: bool,
    pub partial: bool,
    pub uncertain: bool,
    pub conditions_met: usize,
    pub conditions_total: usize,
    pub note: String,
}

impl RuleEvaluation {
    /// Rules that did not fire but still deserve attention in the trace.
    pub fn is_inconclusive(&self) -> bool {
        !self.fired && (self.partial || self.uncertain)
    }
}

/// Evaluate every condition of `rule` against `answers`.
///
/// An unanswered condition and an explicit `not_sure` both mark the evaluation uncertain and
/// neither counts as met, so an uncertain rule can never fire.
pub fn evaluate_rule(rule: &Rule, answers: &AnswerSet) -> RuleEvaluation {
    let conditions_total = rule.conditions.len();
    let mut conditions_met = 0;
    let mut uncertain = false;

    for condition in rule.conditions {
        match answers.get(condition.question) {
            None => uncertain = true,
            Some(answer) if condition.is_satisfied_by(answer) => conditions_met += 1,
            Some(NOT_SURE) => uncertain = true,
            Some(_) => {}
        }
    }

    let fired = conditions_met == conditions_total && !uncertain;
    let partial = conditions_met > 0 && conditions_met < conditions_total;

    let note = if fired {
        rule.reason.to_string()
    } else if partial {
        format!("Partially matched ({conditions_met}/{conditions_total})")
    } else {
        "Not applicable".to_string()
    };

    RuleEvaluation {
        rule_id: rule.id.to_string(),
        fired,
        partial,
        uncertain,
        conditions_met,
        conditions_total,
        note,
    }
}

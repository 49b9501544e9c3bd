mod evaluator;
mod narrative;
pub mod rules;

pub use evaluator::{evaluate_rule, RuleEvaluation};
pub use rules::{Condition, Rule, RULES, RULES_VERSION, UNCERTAINTY_SENSITIVE};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{AnswerSet, Confidence, RiskBucket};

/// Maximum number of decisive factors cited in a classification.
pub const MAX_DECISIVE_FACTORS: usize = 3;

/// An answer cited as having driven the winning rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisiveFactor {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub answer: String,
    pub reason: String,
    #[serde(rename = "ruleId")]
    pub rule_id: String,
}

/// Follow-up needed before a definitive verdict is possible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingInfo {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub label: String,
    #[serde(rename = "whyItMatters")]
    pub why_it_matters: String,
    #[serde(rename = "followUpQuestion")]
    pub follow_up_question: String,
}

/// Immutable snapshot of one classification run, including the full rule trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub bucket: RiskBucket,
    pub confidence: Confidence,
    pub decisive_factors: Vec<DecisiveFactor>,
    pub assumptions: Vec<String>,
    pub missing_info: Vec<MissingInfo>,
    pub what_changes_outcome: Vec<String>,
    pub plain_language_summary: String,
    pub rule_trace: Vec<RuleEvaluation>,
}

impl Classification {
    /// Id of the rule that supplied the decisive factors, if any fired.
    pub fn winning_rule_id(&self) -> Option<&str> {
        self.decisive_factors
            .first()
            .map(|factor| factor.rule_id.as_str())
    }
}

/// Stateless evaluator over an ordered rule table.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    pub fn standard() -> Self {
        Self::with_rules(RULES.to_vec())
    }

    /// Rules are stably sorted by priority so table order breaks ties.
    pub fn with_rules(mut rules: Vec<Rule>) -> Self {
        rules.sort_by_key(|rule| rule.priority);
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn classify(&self, answers: &AnswerSet) -> Classification {
        let not_sure_total = answers.not_sure_count();
        let critical_not_sure: Vec<&str> = UNCERTAINTY_SENSITIVE
            .iter()
            .copied()
            .filter(|question| answers.is_not_sure(question))
            .collect();

        let mut rule_trace = Vec::with_capacity(self.rules.len());
        let mut winning_rule: Option<&Rule> = None;
        let mut any_fired = false;
        let mut any_inconclusive = false;

        for rule in &self.rules {
            let evaluation = evaluate_rule(rule, answers);
            if evaluation.fired {
                any_fired = true;
                // Rules are already in priority order, so the first one to fire wins.
                if winning_rule.is_none() {
                    winning_rule = Some(rule);
                }
            } else if evaluation.is_inconclusive() {
                any_inconclusive = true;
            }
            rule_trace.push(evaluation);
        }

        let mut bucket = winning_rule.map_or(RiskBucket::MinimalRisk, |rule| rule.bucket);
        let mut confidence = Confidence::High;

        let open_critical = critical_not_sure.len();
        let needs_clarification = if open_critical >= 2 || (open_critical == 1 && bucket.is_severe())
        {
            true
        } else if any_inconclusive && !any_fired {
            confidence = Confidence::Medium;
            not_sure_total >= 2
        } else {
            false
        };

        if needs_clarification {
            bucket = RiskBucket::NeedsClarification;
            confidence = Confidence::Low;
        }

        let decisive_factors = winning_rule
            .map(|rule| decisive_factors(rule, answers))
            .unwrap_or_default();

        let missing_info = critical_not_sure
            .iter()
            .filter_map(|question| narrative::missing_info(question))
            .collect();

        debug!(
            bucket = bucket.label(),
            confidence = confidence.label(),
            winning_rule = winning_rule.map(|rule| rule.id),
            critical_not_sure = open_critical,
            "assessment classified"
        );

        Classification {
            bucket,
            confidence,
            decisive_factors,
            assumptions: narrative::assumptions(answers),
            missing_info,
            what_changes_outcome: narrative::what_changes_outcome(bucket),
            plain_language_summary: narrative::summary(bucket, answers, open_critical),
            rule_trace,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::standard()
    }
}

fn decisive_factors(rule: &Rule, answers: &AnswerSet) -> Vec<DecisiveFactor> {
    rule.conditions
        .iter()
        .take(MAX_DECISIVE_FACTORS)
        .map(|condition| {
            let answer = answers.get(condition.question).unwrap_or("not provided");
            DecisiveFactor {
                question_id: condition.question.to_string(),
                answer: answer.to_string(),
                reason: format!("Answer '{answer}' matched condition for {}", rule.name),
                rule_id: rule.id.to_string(),
            }
        })
        .collect()
}

/// Classify `answers` against the standard rule table.
pub fn classify(answers: &AnswerSet) -> Classification {
    Classifier::standard().classify(answers)
}

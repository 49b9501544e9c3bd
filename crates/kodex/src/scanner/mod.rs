//! Stateless EU AI Act scanning core.
//!
//! Every function here takes a complete input snapshot and returns a complete result; the rule
//! table, question catalog and task catalog are static and read-only.

pub mod classifier;
pub mod domain;
pub mod estimator;
pub mod questions;
pub mod roadmap;
pub mod router;

pub use classifier::{
    classify, evaluate_rule, Classification, Classifier, DecisiveFactor, MissingInfo,
    RuleEvaluation, RULES_VERSION,
};
pub use domain::{AnswerSet, Confidence, RiskBucket, NOT_SURE};
pub use estimator::{
    default_tier_parameters, estimate_fine, EstimatorInputs, FineEstimate, PenaltyTier,
    TierParameters, TierTable,
};
pub use questions::{Question, QuestionCatalog, WizardStep, QUESTION_SET_VERSION};
pub use roadmap::{generate_roadmap, RoadmapGenerator, RoadmapTask};
pub use router::scanner_router;

/// Classification plus the roadmap derived from it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScanReport {
    pub classification: Classification,
    pub roadmap: Vec<RoadmapTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<FineEstimate>,
}

/// Run the full pipeline: classify, build the roadmap, then estimate when inputs are given.
pub fn scan(answers: &AnswerSet, estimator_inputs: Option<&EstimatorInputs>) -> ScanReport {
    let classification = classify(answers);
    let roadmap = generate_roadmap(&classification, answers);
    let estimate = estimator_inputs
        .map(|inputs| estimate_fine(classification.bucket.label(), inputs));

    ScanReport {
        classification,
        roadmap,
        estimate,
    }
}

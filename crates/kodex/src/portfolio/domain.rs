use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scanner::{
    default_tier_parameters, AnswerSet, Classification, EstimatorInputs, FineEstimate,
    PenaltyTier, RiskBucket, RoadmapTask, TierTable,
};

pub const DEFAULT_DISCLAIMER: &str =
    "Educational information only, not legal advice. Consult qualified counsel.";

/// Caller identity supplied by the upstream gateway.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub String);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ProjectId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl AssessmentId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// An AI system under assessment, owned by a single caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub owner_id: OwnerId,
    pub name: String,
    pub org_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    #[serde(default)]
    pub org_name: Option<String>,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub org_name: Option<String>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.org_name.is_none()
    }
}

/// Project view enriched with assessment statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    pub assessment_count: usize,
    pub latest_bucket: Option<RiskBucket>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFilter {
    /// Bucket label; blank is ignored and unknown labels match nothing.
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl ProjectFilter {
    pub fn matches(&self, summary: &ProjectSummary) -> bool {
        match self.bucket.as_deref().map(str::trim) {
            Some(bucket) if !bucket.is_empty() => {
                if summary.latest_bucket.map(RiskBucket::label) != Some(bucket) {
                    return false;
                }
            }
            _ => {}
        }

        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => summary
                .project
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        }
    }
}

/// Immutable, versioned snapshot of one questionnaire run.
///
/// The catalog and rule versions are stamped so an assessment can be replayed later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub project_id: ProjectId,
    pub version: u32,
    pub question_set_version: String,
    pub rules_version: String,
    #[serde(rename = "answers_json")]
    pub answers: AnswerSet,
    #[serde(rename = "classification_json")]
    pub classification: Classification,
    #[serde(rename = "estimator_inputs_json")]
    pub estimator_inputs: Option<EstimatorInputs>,
    #[serde(rename = "estimator_output_json")]
    pub estimator_output: Option<FineEstimate>,
    #[serde(rename = "roadmap_json")]
    pub roadmap: Vec<RoadmapTask>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentDraft {
    pub project_id: ProjectId,
    #[serde(rename = "answers_json")]
    pub answers: AnswerSet,
    #[serde(rename = "estimator_inputs_json", default)]
    pub estimator_inputs: Option<EstimatorInputs>,
}

/// Per-owner estimator defaults and export disclaimer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub owner_id: OwnerId,
    pub currency: String,
    pub default_turnover: Option<f64>,
    pub penalty_tier_model: PenaltyTier,
    pub tier_parameters: TierTable,
    pub disclaimer_text: String,
}

impl Settings {
    pub fn defaults(owner_id: OwnerId) -> Self {
        Self {
            owner_id,
            currency: "EUR".to_string(),
            default_turnover: None,
            penalty_tier_model: PenaltyTier::A,
            tier_parameters: default_tier_parameters(),
            disclaimer_text: DEFAULT_DISCLAIMER.to_string(),
        }
    }

    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(currency) = patch.currency {
            self.currency = currency;
        }
        if let Some(turnover) = patch.default_turnover {
            self.default_turnover = Some(turnover);
        }
        if let Some(tier) = patch.penalty_tier_model {
            self.penalty_tier_model = tier;
        }
        if let Some(tier_parameters) = patch.tier_parameters {
            self.tier_parameters = tier_parameters;
        }
        if let Some(disclaimer) = patch.disclaimer_text {
            self.disclaimer_text = disclaimer;
        }
    }

    /// Fill the gaps in caller-supplied estimator inputs from these settings.
    pub fn complete(&self, mut inputs: EstimatorInputs) -> EstimatorInputs {
        if inputs.turnover.is_none() {
            inputs.turnover = self.default_turnover;
        }
        if inputs.currency.as_deref().map_or(true, str::is_empty) {
            inputs.currency = Some(self.currency.clone());
        }
        if inputs.tier_parameters.is_empty() {
            inputs.tier_parameters = self.tier_parameters.clone();
        }
        inputs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub default_turnover: Option<f64>,
    #[serde(default)]
    pub penalty_tier_model: Option<PenaltyTier>,
    #[serde(default)]
    pub tier_parameters: Option<TierTable>,
    #[serde(default)]
    pub disclaimer_text: Option<String>,
}

/// Shareable bundle of a project, one assessment and the owner's disclaimer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentExport {
    pub project: Project,
    pub assessment: Assessment,
    pub disclaimer: String,
}

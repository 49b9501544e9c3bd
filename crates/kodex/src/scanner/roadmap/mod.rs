pub mod catalog;
pub mod ordering;

pub use catalog::{Effort, TaskCatalog, TaskPriority, TaskTemplate, Theme};
pub use ordering::{OrderingPolicy, RankKey, ThemeBoost};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classifier::Classification;
use super::domain::{AnswerSet, RiskBucket};

/// Number of tasks flagged as the immediate focus.
pub const TOP_TASKS: usize = 5;

/// Catalog task placed on a specific assessment's roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapTask {
    pub id: String,
    pub title: String,
    pub theme: Theme,
    pub why: String,
    pub checklist: Vec<String>,
    pub deliverable: String,
    pub owner: String,
    pub effort: Effort,
    pub priority: TaskPriority,
    pub applicable_buckets: Vec<RiskBucket>,
    pub dependencies: Vec<String>,
    pub is_top_5: bool,
    pub order: usize,
}

impl RoadmapTask {
    fn from_template(template: &TaskTemplate, dependencies: &[&str]) -> Self {
        Self {
            id: template.id.to_string(),
            title: template.title.to_string(),
            theme: template.theme,
            why: template.why.to_string(),
            checklist: template.checklist.iter().map(|item| item.to_string()).collect(),
            deliverable: template.deliverable.to_string(),
            owner: template.owner.to_string(),
            effort: template.effort,
            priority: template.priority,
            applicable_buckets: template.applicable_buckets.to_vec(),
            dependencies: dependencies.iter().map(|id| id.to_string()).collect(),
            is_top_5: false,
            order: 0,
        }
    }
}

/// Answer-driven tasks added regardless of the bucket, in injection order.
fn contextual_task_ids(answers: &AnswerSet) -> Vec<&'static str> {
    let mut ids = Vec::new();
    if matches!(
        answers.get("q5_data_types"),
        Some("personal_nonsensitive" | "sensitive")
    ) {
        ids.push("data_lawful_basis");
    }
    if answers.get("q1_company_role") == Some("integrator") {
        ids.push("vendor_inventory");
    }
    if answers.get("q9_behavior") == Some("generates_content") {
        ids.push("transparency_disclosure");
    }
    ids
}

/// Builds ordered remediation roadmaps from the task catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoadmapGenerator {
    catalog: TaskCatalog,
    policy: OrderingPolicy,
}

impl RoadmapGenerator {
    pub const fn standard() -> Self {
        Self {
            catalog: TaskCatalog::standard(),
            policy: OrderingPolicy::standard(),
        }
    }

    pub const fn with_policy(policy: OrderingPolicy) -> Self {
        Self {
            catalog: TaskCatalog::standard(),
            policy,
        }
    }

    pub fn catalog(&self) -> &TaskCatalog {
        &self.catalog
    }

    /// Catalog ids that apply to `bucket` plus any answer-driven additions, without duplicates.
    pub fn applicable_task_ids(&self, bucket: RiskBucket, answers: &AnswerSet) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self
            .catalog
            .templates()
            .iter()
            .filter(|template| template.applies_to(bucket))
            .map(|template| template.id)
            .collect();

        for id in contextual_task_ids(answers) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    pub fn generate(&self, classification: &Classification, answers: &AnswerSet) -> Vec<RoadmapTask> {
        let bucket = classification.bucket;

        let mut ranked: Vec<(RankKey, RoadmapTask)> = self
            .applicable_task_ids(bucket, answers)
            .into_iter()
            .filter_map(|id| self.catalog.get(id))
            .map(|template| {
                let key = self.policy.rank(bucket, template.priority, template.theme);
                let task =
                    RoadmapTask::from_template(template, self.catalog.dependencies(template.id));
                (key, task)
            })
            .collect();

        // Stable: equal keys keep catalog/injection order.
        ranked.sort_by_key(|(key, _)| *key);

        let tasks: Vec<RoadmapTask> = ranked
            .into_iter()
            .enumerate()
            .map(|(index, (_, mut task))| {
                task.is_top_5 = index < TOP_TASKS;
                task.order = index + 1;
                task
            })
            .collect();

        debug!(bucket = bucket.label(), tasks = tasks.len(), "roadmap generated");
        tasks
    }
}

/// Generate the roadmap for `classification` using the standard catalog and ordering policy.
pub fn generate_roadmap(classification: &Classification, answers: &AnswerSet) -> Vec<RoadmapTask> {
    RoadmapGenerator::standard().generate(classification, answers)
}

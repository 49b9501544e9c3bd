use serde::Serialize;

use super::super::domain::RiskBucket;

/// Version stamped on every assessment alongside the question set version.
pub const RULES_VERSION: &str = "1.0.0";

/// Questions whose "not sure" answer can block a verdict.
pub const UNCERTAINTY_SENSITIVE: [&str; 5] = [
    "q4_decision_impact",
    "q5_data_types",
    "q6_biometric",
    "q7_safety_critical",
    "q8_human_oversight",
];

/// A single answer requirement: the question must be answered with one of `accepted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub question: &'static str,
    pub accepted: &'static [&'static str],
}

impl Condition {
    pub fn is_satisfied_by(&self, answer: &str) -> bool {
        self.accepted.contains(&answer)
    }
}

/// Classification rule. Lower `priority` values take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub id: &'static str,
    pub priority: u8,
    pub name: &'static str,
    pub bucket: RiskBucket,
    pub conditions: &'static [Condition],
    pub reason: &'static str,
}

const fn when(question: &'static str, accepted: &'static [&'static str]) -> Condition {
    Condition { question, accepted }
}

pub static RULES: &[Rule] = &[
    Rule {
        id: "R001",
        priority: 1,
        name: "Prohibited: Real-time biometric identification in public spaces",
        bucket: RiskBucket::Prohibited,
        conditions: &[
            when("q6_biometric", &["yes"]),
            when("q2_deployment", &["external", "both"]),
        ],
        reason: "Real-time biometric identification systems for law enforcement purposes in publicly accessible spaces are prohibited under Art. 5 of the AI Act.",
    },
    Rule {
        id: "R002",
        priority: 1,
        name: "Prohibited: Social scoring by public authorities",
        bucket: RiskBucket::Prohibited,
        conditions: &[
            when("q3_domain", &["public_sector"]),
            when("q9_behavior", &["scores_ranks"]),
            when("q4_decision_impact", &["significant_impact"]),
        ],
        reason: "AI systems used by public authorities for social scoring that leads to detrimental treatment are prohibited under Art. 5.",
    },
    Rule {
        id: "R003",
        priority: 2,
        name: "High-risk: HR recruitment and selection",
        bucket: RiskBucket::HighRisk,
        conditions: &[
            when("q3_domain", &["hiring_hr"]),
            when("q4_decision_impact", &["significant_impact"]),
        ],
        reason: "AI systems used in employment for recruitment, screening, filtering applications, or evaluating candidates are classified as high-risk under Annex III.",
    },
    Rule {
        id: "R004",
        priority: 2,
        name: "High-risk: HR decisions affecting workers",
        bucket: RiskBucket::HighRisk,
        conditions: &[
            when("q3_domain", &["hiring_hr"]),
            when("q9_behavior", &["scores_ranks"]),
            when("q8_human_oversight", &["fully_automated"]),
        ],
        reason: "AI systems making decisions on promotion, termination, task allocation, or performance monitoring with significant impact are high-risk.",
    },
    Rule {
        id: "R005",
        priority: 2,
        name: "High-risk: Credit/finance decisions",
        bucket: RiskBucket::HighRisk,
        conditions: &[
            when("q3_domain", &["finance"]),
            when("q4_decision_impact", &["significant_impact"]),
        ],
        reason: "AI systems evaluating creditworthiness or establishing credit scores are high-risk under Annex III.",
    },
    Rule {
        id: "R006",
        priority: 2,
        name: "High-risk: Healthcare/medical context",
        bucket: RiskBucket::HighRisk,
        conditions: &[
            when("q3_domain", &["healthcare"]),
            when("q7_safety_critical", &["yes"]),
        ],
        reason: "AI systems intended to be used as safety components of medical devices are high-risk.",
    },
    Rule {
        id: "R007",
        priority: 2,
        name: "High-risk: Education assessment",
        bucket: RiskBucket::HighRisk,
        conditions: &[
            when("q3_domain", &["education"]),
            when("q4_decision_impact", &["significant_impact"]),
        ],
        reason: "AI systems determining access to education or evaluating learning outcomes are high-risk.",
    },
    Rule {
        id: "R008",
        priority: 2,
        name: "High-risk: Safety-critical infrastructure",
        bucket: RiskBucket::HighRisk,
        conditions: &[when("q7_safety_critical", &["yes"])],
        reason: "AI systems used in critical infrastructure management are classified as high-risk.",
    },
    Rule {
        id: "R009",
        priority: 2,
        name: "High-risk: Biometric categorization",
        bucket: RiskBucket::HighRisk,
        conditions: &[
            when("q6_biometric", &["yes"]),
            when("q5_data_types", &["sensitive"]),
        ],
        reason: "Biometric categorization systems using sensitive attributes are high-risk.",
    },
    Rule {
        id: "R010",
        priority: 3,
        name: "Limited risk: AI-generated content",
        bucket: RiskBucket::LimitedRisk,
        conditions: &[
            when("q9_behavior", &["generates_content"]),
            when("q2_deployment", &["external", "both"]),
        ],
        reason: "AI systems generating synthetic content must disclose that content is AI-generated (transparency obligation).",
    },
    Rule {
        id: "R011",
        priority: 3,
        name: "Limited risk: Chatbots/conversational AI",
        bucket: RiskBucket::LimitedRisk,
        conditions: &[
            when("q9_behavior", &["generates_content", "recommends"]),
            when("q2_deployment", &["external", "both"]),
            when("q4_decision_impact", &["low_impact", "no_impact"]),
        ],
        reason: "Chatbots and AI systems interacting with users must disclose they are AI (transparency obligation).",
    },
    Rule {
        id: "R012",
        priority: 4,
        name: "Minimal risk: Internal productivity tools",
        bucket: RiskBucket::MinimalRisk,
        conditions: &[
            when("q2_deployment", &["internal"]),
            when("q4_decision_impact", &["no_impact", "low_impact"]),
            when("q3_domain", &["general_productivity"]),
        ],
        reason: "Internal AI tools for general productivity with no significant impact on individuals are minimal risk.",
    },
    Rule {
        id: "R013",
        priority: 4,
        name: "Minimal risk: Low-impact advisory systems",
        bucket: RiskBucket::MinimalRisk,
        conditions: &[
            when("q8_human_oversight", &["advisory"]),
            when("q4_decision_impact", &["no_impact"]),
        ],
        reason: "AI systems providing advisory information without direct impact are generally minimal risk.",
    },
];

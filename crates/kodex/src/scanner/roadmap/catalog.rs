use serde::{Deserialize, Serialize};

use super::super::domain::RiskBucket;
use super::super::domain::RiskBucket::{
    HighRisk, LimitedRisk, MinimalRisk, NeedsClarification, Prohibited,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "Governance basics")]
    GovernanceBasics,
    #[serde(rename = "Data & privacy")]
    DataPrivacy,
    #[serde(rename = "Documentation")]
    Documentation,
    #[serde(rename = "Human oversight")]
    HumanOversight,
    #[serde(rename = "Monitoring")]
    Monitoring,
    #[serde(rename = "Vendor management")]
    VendorManagement,
    #[serde(rename = "Transparency")]
    Transparency,
}

impl Theme {
    pub const fn label(self) -> &'static str {
        match self {
            Self::GovernanceBasics => "Governance basics",
            Self::DataPrivacy => "Data & privacy",
            Self::Documentation => "Documentation",
            Self::HumanOversight => "Human oversight",
            Self::Monitoring => "Monitoring",
            Self::VendorManagement => "Vendor management",
            Self::Transparency => "Transparency",
        }
    }
}

/// Urgency tier; `P0` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskPriority {
    P0,
    P1,
    P2,
}

impl TaskPriority {
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::P0 => 0,
            Self::P1 => 1,
            Self::P2 => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effort {
    S,
    M,
    L,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub theme: Theme,
    pub why: &'static str,
    pub checklist: &'static [&'static str],
    pub deliverable: &'static str,
    pub owner: &'static str,
    pub effort: Effort,
    pub priority: TaskPriority,
    pub applicable_buckets: &'static [RiskBucket],
}

impl TaskTemplate {
    pub fn applies_to(&self, bucket: RiskBucket) -> bool {
        self.applicable_buckets.contains(&bucket)
    }
}

/// Remediation task catalog with its informational dependency map.
#[derive(Debug, Clone, Copy)]
pub struct TaskCatalog {
    templates: &'static [TaskTemplate],
}

impl TaskCatalog {
    pub const fn standard() -> Self {
        Self {
            templates: TASK_TEMPLATES,
        }
    }

    pub fn templates(&self) -> &'static [TaskTemplate] {
        self.templates
    }

    pub fn get(&self, id: &str) -> Option<&'static TaskTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    /// Tasks that should logically precede `id`. Not enforced by ordering.
    pub fn dependencies(&self, id: &str) -> &'static [&'static str] {
        match id {
            "data_dpia" => &["data_inventory", "data_lawful_basis"],
            "doc_technical" => &["gov_register", "data_inventory"],
            "doc_risk_management" => &["gov_register", "data_inventory"],
            "oversight_training" => &["oversight_design"],
            "monitor_logging" => &["gov_register"],
            "vendor_assessment" => &["vendor_inventory"],
            "transparency_explainability" => &["transparency_disclosure"],
            _ => &[],
        }
    }
}

impl Default for TaskCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

static TASK_TEMPLATES: &[TaskTemplate] = &[
    TaskTemplate {
        id: "gov_register",
        title: "Create an AI Use-Case Register",
        theme: Theme::GovernanceBasics,
        why: "You need a single source of truth for all AI systems in your organization. This is foundational for any compliance effort and required for high-risk systems.",
        checklist: &[
            "List all AI tools and systems currently in use",
            "Document the purpose and owner for each system",
            "Note vendor names and contract details for third-party AI",
            "Record deployment dates and user counts",
            "Identify which systems process personal data",
        ],
        deliverable: "AI Use-Case Register (spreadsheet or database)",
        owner: "Product / Engineering",
        effort: Effort::S,
        priority: TaskPriority::P0,
        applicable_buckets: &[Prohibited, HighRisk, LimitedRisk, MinimalRisk, NeedsClarification],
    },
    TaskTemplate {
        id: "gov_ownership",
        title: "Assign AI Compliance Ownership",
        theme: Theme::GovernanceBasics,
        why: "Someone needs to be responsible for AI compliance. In SMBs, this is often a founder, CTO, or senior product manager, not necessarily a dedicated compliance hire.",
        checklist: &[
            "Designate a person accountable for AI compliance decisions",
            "Define escalation path for AI-related concerns",
            "Schedule quarterly AI review meetings",
            "Document decision-making authority and limits",
        ],
        deliverable: "AI Governance RACI chart",
        owner: "Founder",
        effort: Effort::S,
        priority: TaskPriority::P0,
        applicable_buckets: &[Prohibited, HighRisk, LimitedRisk, MinimalRisk, NeedsClarification],
    },
    TaskTemplate {
        id: "gov_review_cadence",
        title: "Establish Review Cadence",
        theme: Theme::GovernanceBasics,
        why: "AI systems change, and so do regulations. Regular reviews ensure you catch issues early and maintain compliance over time.",
        checklist: &[
            "Set quarterly review dates for AI register",
            "Define triggers for ad-hoc reviews (new AI tool, incident, regulation change)",
            "Create simple review checklist",
            "Assign review responsibilities",
        ],
        deliverable: "AI Review Schedule (calendar entries + checklist template)",
        owner: "Product",
        effort: Effort::S,
        priority: TaskPriority::P1,
        applicable_buckets: &[Prohibited, HighRisk, LimitedRisk, MinimalRisk],
    },
    TaskTemplate {
        id: "data_inventory",
        title: "Map Data Flows for AI Systems",
        theme: Theme::DataPrivacy,
        why: "Understanding what data your AI processes is essential for both AI Act and GDPR compliance. High-risk systems have specific data governance requirements.",
        checklist: &[
            "Document input data types for each AI system",
            "Identify personal data being processed",
            "Note data retention periods",
            "Map data flows (collection → processing → storage → deletion)",
            "Flag any sensitive/special category data",
        ],
        deliverable: "AI Data Flow Diagram + Data Inventory",
        owner: "Engineering",
        effort: Effort::M,
        priority: TaskPriority::P0,
        applicable_buckets: &[Prohibited, HighRisk, LimitedRisk],
    },
    TaskTemplate {
        id: "data_lawful_basis",
        title: "Confirm GDPR Lawful Basis for AI Processing",
        theme: Theme::DataPrivacy,
        why: "AI processing of personal data requires a valid GDPR lawful basis. This is foundational: without it, the AI use may be unlawful regardless of AI Act compliance.",
        checklist: &[
            "Identify lawful basis for each AI system processing personal data",
            "Document justification for chosen basis",
            "Update privacy notices if needed",
            "Review consent mechanisms if relying on consent",
            "Consider legitimate interest assessment if using that basis",
        ],
        deliverable: "Lawful Basis Register (extension of AI Use-Case Register)",
        owner: "Legal / Compliance",
        effort: Effort::M,
        priority: TaskPriority::P0,
        applicable_buckets: &[Prohibited, HighRisk, LimitedRisk],
    },
    TaskTemplate {
        id: "data_dpia",
        title: "Conduct Data Protection Impact Assessment",
        theme: Theme::DataPrivacy,
        why: "High-risk AI processing likely requires a DPIA under GDPR Art. 35. This is a legal requirement, not just good practice.",
        checklist: &[
            "Identify if DPIA is required (high-risk processing, profiling, sensitive data)",
            "Describe the processing operations systematically",
            "Assess necessity and proportionality",
            "Identify and assess risks to individuals",
            "Document measures to mitigate risks",
            "Consult DPO if you have one",
        ],
        deliverable: "DPIA Document",
        owner: "Legal / Compliance",
        effort: Effort::L,
        priority: TaskPriority::P0,
        applicable_buckets: &[HighRisk],
    },
    TaskTemplate {
        id: "doc_technical",
        title: "Create Technical Documentation",
        theme: Theme::Documentation,
        why: "High-risk systems require detailed technical documentation. Even for other systems, documentation helps demonstrate responsible AI practices.",
        checklist: &[
            "Document system architecture and components",
            "Describe training data sources and preparation",
            "Document model performance metrics and benchmarks",
            "Record known limitations and failure modes",
            "Include version history and change log",
        ],
        deliverable: "Technical Documentation Package",
        owner: "Engineering",
        effort: Effort::L,
        priority: TaskPriority::P1,
        applicable_buckets: &[HighRisk],
    },
    TaskTemplate {
        id: "doc_instructions",
        title: "Prepare Instructions for Use",
        theme: Theme::Documentation,
        why: "Deployers of high-risk AI need clear instructions. Even internal tools benefit from usage guidelines to prevent misuse.",
        checklist: &[
            "Write intended use cases and limitations",
            "Document required human oversight procedures",
            "Explain how to interpret AI outputs",
            "Describe error handling and escalation",
            "Include contact information for support",
        ],
        deliverable: "AI Instructions for Use Document",
        owner: "Product",
        effort: Effort::M,
        priority: TaskPriority::P1,
        applicable_buckets: &[HighRisk, LimitedRisk],
    },
    TaskTemplate {
        id: "doc_risk_management",
        title: "Establish Risk Management System",
        theme: Theme::Documentation,
        why: "High-risk AI systems require a documented risk management system. This is an ongoing process, not a one-time task.",
        checklist: &[
            "Identify and analyze known and foreseeable risks",
            "Estimate and evaluate risks",
            "Evaluate risks from intended use and reasonably foreseeable misuse",
            "Document risk mitigation measures",
            "Plan for residual risk management",
            "Establish testing procedures",
        ],
        deliverable: "AI Risk Management Documentation",
        owner: "Product / Engineering",
        effort: Effort::L,
        priority: TaskPriority::P0,
        applicable_buckets: &[HighRisk],
    },
    TaskTemplate {
        id: "oversight_design",
        title: "Design Human Oversight Mechanisms",
        theme: Theme::HumanOversight,
        why: "High-risk AI must enable effective human oversight. This means designing systems so humans can intervene, not just observe.",
        checklist: &[
            "Define what decisions require human review",
            "Design intervention points in AI workflow",
            "Create override/stop mechanisms",
            "Document how humans will be notified of AI decisions",
            "Train operators on oversight responsibilities",
        ],
        deliverable: "Human Oversight Design Document + Training Materials",
        owner: "Product / Engineering",
        effort: Effort::M,
        priority: TaskPriority::P0,
        applicable_buckets: &[HighRisk],
    },
    TaskTemplate {
        id: "oversight_training",
        title: "Train Staff on AI Oversight",
        theme: Theme::HumanOversight,
        why: "People overseeing AI need to understand the system, its limitations, and when to intervene. Untrained oversight is not effective oversight.",
        checklist: &[
            "Identify who needs AI oversight training",
            "Develop training content covering system capabilities and limits",
            "Include examples of when to override AI",
            "Document training completion",
            "Plan refresher training schedule",
        ],
        deliverable: "AI Oversight Training Program",
        owner: "Product",
        effort: Effort::M,
        priority: TaskPriority::P1,
        applicable_buckets: &[HighRisk],
    },
    TaskTemplate {
        id: "monitor_logging",
        title: "Implement AI System Logging",
        theme: Theme::Monitoring,
        why: "Logs enable accountability, debugging, and compliance verification. High-risk systems have specific logging requirements.",
        checklist: &[
            "Define what inputs/outputs to log",
            "Set appropriate retention periods (consider GDPR minimization)",
            "Implement secure log storage",
            "Create access controls for logs",
            "Document logging approach and justify scope",
        ],
        deliverable: "Logging Implementation + Documentation",
        owner: "Engineering",
        effort: Effort::M,
        priority: TaskPriority::P1,
        applicable_buckets: &[HighRisk, LimitedRisk],
    },
    TaskTemplate {
        id: "monitor_performance",
        title: "Set Up Performance Monitoring",
        theme: Theme::Monitoring,
        why: "AI systems can degrade over time (model drift, data drift). Monitoring helps you catch issues before they become compliance problems.",
        checklist: &[
            "Define key performance metrics",
            "Set acceptable thresholds and alerts",
            "Establish monitoring dashboard or reports",
            "Create escalation process for metric breaches",
            "Schedule regular performance reviews",
        ],
        deliverable: "AI Performance Monitoring Setup",
        owner: "Engineering",
        effort: Effort::M,
        priority: TaskPriority::P1,
        applicable_buckets: &[HighRisk],
    },
    TaskTemplate {
        id: "monitor_incidents",
        title: "Create Incident Response Process",
        theme: Theme::Monitoring,
        why: "When AI fails or causes harm, you need a clear process for response. High-risk system providers must report serious incidents.",
        checklist: &[
            "Define what constitutes an AI incident",
            "Create incident classification (severity levels)",
            "Document response procedures for each level",
            "Establish communication templates",
            "Identify regulatory reporting requirements",
        ],
        deliverable: "AI Incident Response Plan",
        owner: "Engineering / Compliance",
        effort: Effort::M,
        priority: TaskPriority::P1,
        applicable_buckets: &[HighRisk],
    },
    TaskTemplate {
        id: "vendor_inventory",
        title: "Create Third-Party AI Vendor Inventory",
        theme: Theme::VendorManagement,
        why: "If you use third-party AI (like OpenAI, cloud ML services), you're still responsible for compliance. You need to know what you're using.",
        checklist: &[
            "List all third-party AI services and APIs",
            "Document what each vendor provides",
            "Record contract terms and data processing agreements",
            "Note vendor compliance certifications",
            "Identify vendor contact for compliance questions",
        ],
        deliverable: "Third-Party AI Vendor Register",
        owner: "Product / Legal",
        effort: Effort::S,
        priority: TaskPriority::P0,
        applicable_buckets: &[Prohibited, HighRisk, LimitedRisk, MinimalRisk],
    },
    TaskTemplate {
        id: "vendor_assessment",
        title: "Assess Vendor AI Compliance",
        theme: Theme::VendorManagement,
        why: "Your compliance depends partly on your vendors. You need to verify they can support your compliance needs.",
        checklist: &[
            "Request vendor documentation on AI Act compliance",
            "Review vendor data processing terms",
            "Assess vendor's ability to provide required documentation",
            "Evaluate vendor incident response capabilities",
            "Document assessment results",
        ],
        deliverable: "Vendor AI Compliance Assessment Report",
        owner: "Legal / Product",
        effort: Effort::M,
        priority: TaskPriority::P1,
        applicable_buckets: &[HighRisk],
    },
    TaskTemplate {
        id: "transparency_disclosure",
        title: "Implement AI Disclosure Mechanisms",
        theme: Theme::Transparency,
        why: "Users must know when they're interacting with AI. AI-generated content must be marked. This is a direct legal requirement for limited-risk systems.",
        checklist: &[
            "Identify all user-facing AI interactions",
            "Design clear disclosure messaging",
            "Implement disclosure in UI/UX",
            "For generated content, implement marking mechanism",
            "Document disclosure approach",
        ],
        deliverable: "AI Disclosure Implementation",
        owner: "Product / Engineering",
        effort: Effort::S,
        priority: TaskPriority::P0,
        applicable_buckets: &[LimitedRisk, HighRisk],
    },
    TaskTemplate {
        id: "transparency_explainability",
        title: "Provide Decision Explanations",
        theme: Theme::Transparency,
        why: "For AI making decisions about people, those affected may have rights to explanation (GDPR Art. 22). Even without legal requirement, explanations build trust.",
        checklist: &[
            "Identify decisions requiring explanation",
            "Design explanation format (technical vs. plain language)",
            "Implement explanation generation",
            "Test explanations with target audience",
            "Document explanation approach",
        ],
        deliverable: "AI Decision Explanation System",
        owner: "Engineering / Product",
        effort: Effort::L,
        priority: TaskPriority::P2,
        applicable_buckets: &[HighRisk],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique() {
        let catalog = TaskCatalog::standard();
        let ids: HashSet<_> = catalog.templates().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), catalog.templates().len());
        assert_eq!(ids.len(), 18);
    }

    #[test]
    fn dependencies_point_at_catalog_entries() {
        let catalog = TaskCatalog::standard();
        for template in catalog.templates() {
            for dependency in catalog.dependencies(template.id) {
                assert!(
                    catalog.get(dependency).is_some(),
                    "{} depends on unknown {dependency}",
                    template.id
                );
                assert_ne!(*dependency, template.id);
            }
        }
        assert!(catalog.dependencies("gov_register").is_empty());
    }

    #[test]
    fn priorities_order_by_urgency() {
        assert!(TaskPriority::P0 < TaskPriority::P1);
        assert!(TaskPriority::P1 < TaskPriority::P2);
        assert_eq!(TaskPriority::P2.ordinal(), 2);
    }
}

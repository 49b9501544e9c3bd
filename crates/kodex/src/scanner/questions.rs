use serde::Serialize;

/// Version stamped on every assessment so answers can be replayed against the same wording.
pub const QUESTION_SET_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Single,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub label: &'static str,
    pub help_text: &'static str,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(skip_serializing_if = "has_no_options")]
    pub options: &'static [QuestionOption],
    pub required: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_other: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

impl Question {
    pub fn accepts(&self, value: &str) -> bool {
        match self.kind {
            QuestionKind::Text => true,
            QuestionKind::Single => {
                self.has_other || self.options.iter().any(|option| option.value == value)
            }
        }
    }
}

fn has_no_options(options: &&'static [QuestionOption]) -> bool {
    options.is_empty()
}

/// Groups questions into the steps of the intake wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardStep {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub questions: &'static [&'static str],
}

/// The fixed questionnaire, loaded once and shared read-only.
#[derive(Debug, Clone, Copy)]
pub struct QuestionCatalog {
    questions: &'static [Question],
    steps: &'static [WizardStep],
}

impl QuestionCatalog {
    pub const fn standard() -> Self {
        Self {
            questions: QUESTIONS,
            steps: WIZARD_STEPS,
        }
    }

    pub const fn version(&self) -> &'static str {
        QUESTION_SET_VERSION
    }

    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }

    pub fn steps(&self) -> &'static [WizardStep] {
        self.steps
    }

    pub fn question(&self, id: &str) -> Option<&'static Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn required_ids(&self) -> impl Iterator<Item = &'static str> {
        self.questions
            .iter()
            .filter(|question| question.required)
            .map(|question| question.id)
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

const fn opt(value: &'static str, label: &'static str) -> QuestionOption {
    QuestionOption { value, label }
}

const NOT_SURE_OPTION: QuestionOption = opt("not_sure", "Not sure");

static QUESTIONS: &[Question] = &[
    Question {
        id: "q1_company_role",
        label: "What is your company's role with respect to the AI system?",
        help_text: "This determines which AI Act obligations apply to you.",
        kind: QuestionKind::Single,
        options: &[
            opt("developer", "We develop the AI model/system"),
            opt(
                "integrator",
                "We integrate a third-party AI system into our product",
            ),
            opt(
                "internal_user",
                "We use AI tools internally (no external customers)",
            ),
            NOT_SURE_OPTION,
        ],
        required: true,
        has_other: false,
        placeholder: None,
    },
    Question {
        id: "q2_deployment",
        label: "Who uses this AI system?",
        help_text: "Determines whether external-facing obligations apply.",
        kind: QuestionKind::Single,
        options: &[
            opt("external", "External customers/users"),
            opt("internal", "Internal employees only"),
            opt("both", "Both external and internal"),
            NOT_SURE_OPTION,
        ],
        required: true,
        has_other: false,
        placeholder: None,
    },
    Question {
        id: "q3_domain",
        label: "What domain does this AI system operate in?",
        help_text: "Some domains have specific high-risk classifications under the AI Act.",
        kind: QuestionKind::Single,
        options: &[
            opt(
                "general_productivity",
                "General productivity (writing, coding, analysis)",
            ),
            opt(
                "hiring_hr",
                "Hiring/HR (recruitment, performance, workforce management)",
            ),
            opt("finance", "Finance/credit/insurance"),
            opt("healthcare", "Healthcare"),
            opt("education", "Education"),
            opt("public_sector", "Public sector services"),
            opt("other", "Other"),
        ],
        required: true,
        has_other: true,
        placeholder: None,
    },
    Question {
        id: "q4_decision_impact",
        label: "Does this AI make or support decisions about people with meaningful impact?",
        help_text: "Consider: employment decisions, access to services, creditworthiness, etc.",
        kind: QuestionKind::Single,
        options: &[
            opt(
                "significant_impact",
                "Yes, significant impact (hiring, firing, promotions, credit)",
            ),
            opt(
                "low_impact",
                "Yes, but low impact (recommendations, suggestions)",
            ),
            opt("no_impact", "No, does not affect individuals directly"),
            NOT_SURE_OPTION,
        ],
        required: true,
        has_other: false,
        placeholder: None,
    },
    Question {
        id: "q5_data_types",
        label: "What types of personal data does the AI system process?",
        help_text: "Sensitive data includes health, biometrics, race, political opinions, etc.",
        kind: QuestionKind::Single,
        options: &[
            opt("no_personal", "No personal data"),
            opt(
                "personal_nonsensitive",
                "Personal data (non-sensitive: name, email, job history)",
            ),
            opt(
                "sensitive",
                "Sensitive/special categories (health, biometrics, ethnicity)",
            ),
            NOT_SURE_OPTION,
        ],
        required: true,
        has_other: false,
        placeholder: None,
    },
    Question {
        id: "q6_biometric",
        label: "Does the system use biometric identification or categorization?",
        help_text: "Face recognition, fingerprint scanning, emotion detection, etc.",
        kind: QuestionKind::Single,
        options: &[opt("yes", "Yes"), opt("no", "No"), NOT_SURE_OPTION],
        required: true,
        has_other: false,
        placeholder: None,
    },
    Question {
        id: "q7_safety_critical",
        label: "Is the AI used in safety-critical or critical infrastructure contexts?",
        help_text: "Medical devices, transport, energy, water, essential services.",
        kind: QuestionKind::Single,
        options: &[opt("yes", "Yes"), opt("no", "No"), NOT_SURE_OPTION],
        required: true,
        has_other: false,
        placeholder: None,
    },
    Question {
        id: "q8_human_oversight",
        label: "What level of human oversight exists for AI decisions?",
        help_text: "The AI Act requires appropriate human oversight for high-risk systems.",
        kind: QuestionKind::Single,
        options: &[
            opt(
                "fully_automated",
                "Fully automated outcomes (no human review)",
            ),
            opt("human_reviews", "Human reviews before action is taken"),
            opt("advisory", "Advisory only (human makes final decision)"),
            NOT_SURE_OPTION,
        ],
        required: true,
        has_other: false,
        placeholder: None,
    },
    Question {
        id: "q9_behavior",
        label: "What is the AI system's primary behavior?",
        help_text: "Different behaviors trigger different transparency requirements.",
        kind: QuestionKind::Single,
        options: &[
            opt("generates_content", "Generates content/code"),
            opt("scores_ranks", "Scores, ranks, or classifies people/items"),
            opt("recommends", "Recommends actions"),
            opt("other", "Other"),
        ],
        required: true,
        has_other: false,
        placeholder: None,
    },
    Question {
        id: "q10_logging",
        label: "What logging and monitoring do you have in place?",
        help_text: "High-risk systems require detailed logging of inputs, outputs, and decisions.",
        kind: QuestionKind::Single,
        options: &[
            opt("full_logging", "We log inputs/outputs and key decisions"),
            opt("partial_logging", "Partial logging"),
            opt("no_logging", "No logging"),
            NOT_SURE_OPTION,
        ],
        required: true,
        has_other: false,
        placeholder: None,
    },
    Question {
        id: "q11_use_case",
        label: "Describe your use case briefly (optional)",
        help_text: "2-3 sentences about what the AI does.",
        kind: QuestionKind::Text,
        options: &[],
        required: false,
        has_other: false,
        placeholder: Some(
            "e.g., We use an AI chatbot to answer employee HR questions about benefits and policies.",
        ),
    },
    Question {
        id: "q12_concern",
        label: "What is your biggest compliance concern? (optional)",
        help_text: "One sentence about what worries you most.",
        kind: QuestionKind::Text,
        options: &[],
        required: false,
        has_other: false,
        placeholder: Some(
            "e.g., We're not sure if our resume screening tool needs special documentation.",
        ),
    },
];

static WIZARD_STEPS: &[WizardStep] = &[
    WizardStep {
        id: "role",
        title: "Your Role",
        description: "Help us understand how you interact with AI systems",
        questions: &["q1_company_role", "q2_deployment"],
    },
    WizardStep {
        id: "domain",
        title: "Domain & Impact",
        description: "What area does your AI operate in?",
        questions: &["q3_domain", "q4_decision_impact"],
    },
    WizardStep {
        id: "data",
        title: "Data & Privacy",
        description: "What data does your system process?",
        questions: &["q5_data_types", "q6_biometric"],
    },
    WizardStep {
        id: "operations",
        title: "Operations",
        description: "How is the AI operated and monitored?",
        questions: &["q7_safety_critical", "q8_human_oversight"],
    },
    WizardStep {
        id: "behavior",
        title: "Behavior & Logging",
        description: "What does the AI do and how is it tracked?",
        questions: &["q9_behavior", "q10_logging"],
    },
    WizardStep {
        id: "context",
        title: "Additional Context",
        description: "Optional details to improve recommendations",
        questions: &["q11_use_case", "q12_concern"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn question_ids_are_unique() {
        let catalog = QuestionCatalog::standard();
        let ids: HashSet<_> = catalog.questions().iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), catalog.questions().len());
        assert_eq!(catalog.questions().len(), 12);
    }

    #[test]
    fn every_step_references_known_questions() {
        let catalog = QuestionCatalog::standard();
        let stepped: Vec<_> = catalog
            .steps()
            .iter()
            .flat_map(|step| step.questions.iter().copied())
            .collect();

        for id in &stepped {
            assert!(catalog.question(id).is_some(), "unknown question {id}");
        }
        assert_eq!(stepped.len(), catalog.questions().len());
    }

    #[test]
    fn free_text_questions_are_optional() {
        let catalog = QuestionCatalog::standard();
        let required: Vec<_> = catalog.required_ids().collect();
        assert_eq!(required.len(), 10);
        assert!(!required.contains(&"q11_use_case"));

        let use_case = catalog.question("q11_use_case").expect("use case question");
        assert!(use_case.accepts("anything goes"));
    }

    #[test]
    fn domain_question_accepts_other_text() {
        let domain = QuestionCatalog::standard()
            .question("q3_domain")
            .expect("domain question");
        assert!(domain.accepts("agritech"));

        let deployment = QuestionCatalog::standard()
            .question("q2_deployment")
            .expect("deployment question");
        assert!(deployment.accepts("both"));
        assert!(!deployment.accepts("partners"));
    }
}

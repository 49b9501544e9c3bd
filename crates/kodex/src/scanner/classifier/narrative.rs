//! Plain-language text assembled around a classification.

use super::super::domain::{AnswerSet, RiskBucket};
use super::MissingInfo;

const DISCLAIMER: &str =
    "Classification based on answers provided; actual classification may differ with more context";

fn domain_heading(domain: &str) -> Option<&'static str> {
    match domain {
        "general_productivity" => Some("General productivity domain"),
        "hiring_hr" => Some("HR/Hiring domain"),
        "finance" => Some("Finance domain"),
        "healthcare" => Some("Healthcare domain"),
        "education" => Some("Education domain"),
        "public_sector" => Some("Public sector domain"),
        _ => None,
    }
}

fn domain_phrase(domain: &str) -> Option<&'static str> {
    match domain {
        "general_productivity" => Some("general productivity"),
        "hiring_hr" => Some("HR and hiring"),
        "finance" => Some("finance"),
        "healthcare" => Some("healthcare"),
        "education" => Some("education"),
        "public_sector" => Some("public sector"),
        _ => None,
    }
}

fn role_obligation(role: &str) -> &'static str {
    match role {
        "developer" => "You develop the AI system (provider obligations may apply)",
        "integrator" => "You integrate third-party AI (deployer obligations may apply)",
        "internal_user" => "You use AI internally (user obligations may apply)",
        _ => "Role not specified",
    }
}

/// Domain sentence, role sentence and the fixed disclaimer, in that order.
pub(crate) fn assumptions(answers: &AnswerSet) -> Vec<String> {
    let mut assumptions = Vec::new();

    if let Some(domain) = answers.get("q3_domain").filter(|value| !value.is_empty()) {
        let label = domain_heading(domain).unwrap_or(domain);
        assumptions.push(format!("Domain: {label}"));
    }

    if let Some(role) = answers
        .get("q1_company_role")
        .filter(|value| !value.is_empty())
    {
        assumptions.push(role_obligation(role).to_string());
    }

    assumptions.push(DISCLAIMER.to_string());
    assumptions
}

/// Follow-up prompts for an uncertainty-sensitive question answered "not sure".
pub(crate) fn missing_info(question_id: &str) -> Option<MissingInfo> {
    let (label, why_it_matters, follow_up_question) = match question_id {
        "q4_decision_impact" => (
            "Impact on individuals",
            "This determines whether high-risk obligations apply",
            "Does this AI make decisions that significantly affect individuals' lives?",
        ),
        "q5_data_types" => (
            "Data sensitivity",
            "Sensitive data triggers additional requirements",
            "What types of personal data does the system process?",
        ),
        "q6_biometric" => (
            "Biometric data use",
            "Biometric processing is heavily regulated",
            "Does the system identify or categorize people using biometrics?",
        ),
        "q7_safety_critical" => (
            "Safety-critical context",
            "Safety-critical use cases are high-risk by default",
            "Is this AI used in contexts where failure could cause harm?",
        ),
        "q8_human_oversight" => (
            "Human oversight level",
            "Lack of oversight increases risk classification",
            "Is there human review before AI-driven actions take effect?",
        ),
        _ => return None,
    };

    Some(MissingInfo {
        question_id: question_id.to_string(),
        label: label.to_string(),
        why_it_matters: why_it_matters.to_string(),
        follow_up_question: follow_up_question.to_string(),
    })
}

pub(crate) fn what_changes_outcome(bucket: RiskBucket) -> Vec<String> {
    let sentences: &[&str] = match bucket {
        RiskBucket::Prohibited => &[
            "If biometric identification or social scoring is removed from the system's scope, it may be reassessed as high-risk instead of prohibited",
        ],
        RiskBucket::HighRisk => &[
            "If human oversight is added before all decisions, some obligations may be simplified",
            "If impact on individuals is reduced, may be reclassified as limited risk",
        ],
        RiskBucket::LimitedRisk => &[
            "If decisions significantly impact individuals, classification may elevate to high-risk",
            "If only used internally, may be reclassified as minimal risk",
        ],
        RiskBucket::MinimalRisk => &[
            "If this AI makes significant decisions about people, it may be classified as high-risk",
            "If deployed externally with content generation, transparency obligations may apply",
        ],
        RiskBucket::NeedsClarification => {
            &["Answering the missing questions would allow definitive classification"]
        }
    };

    sentences.iter().map(|sentence| sentence.to_string()).collect()
}

pub(crate) fn summary(bucket: RiskBucket, answers: &AnswerSet, uncertain_critical: usize) -> String {
    let domain = answers.get("q3_domain").unwrap_or("your domain");
    let domain = domain_phrase(domain).unwrap_or(domain);

    match bucket {
        RiskBucket::Prohibited => format!(
            "Based on your inputs, this AI system may fall under prohibited practices in the EU AI Act. \
             Prohibited systems cannot be placed on the EU market. This classification is driven by the \
             combination of {domain} use case and the nature of decisions being made. Consult legal \
             counsel immediately before proceeding."
        ),
        RiskBucket::HighRisk => format!(
            "Based on your inputs, this AI system likely falls into the high-risk category under the EU \
             AI Act. High-risk systems in {domain} require conformity assessment, registration in the EU \
             database, quality management systems, and ongoing monitoring. This does not mean you cannot \
             use the system; it means specific compliance steps are required."
        ),
        RiskBucket::LimitedRisk => "Based on your inputs, this AI system likely falls into the limited \
             risk category. The primary obligation is transparency: users must be informed they are \
             interacting with AI, and AI-generated content must be disclosed. Beyond transparency \
             requirements, limited-risk systems do not face the extensive compliance burdens of \
             high-risk systems."
            .to_string(),
        RiskBucket::MinimalRisk => "Based on your inputs, this AI system appears to be minimal risk \
             under the EU AI Act. Minimal-risk systems (like spam filters, most productivity tools, and \
             internal analytics) can be developed and used freely. However, general principles of \
             responsible AI and existing laws (like GDPR for personal data) still apply."
            .to_string(),
        RiskBucket::NeedsClarification => format!(
            "We cannot provide a definitive classification because {uncertain_critical} key question(s) \
             were answered with 'Not sure'. The classification could range from minimal to high-risk \
             depending on these answers. Please review the missing information section and provide \
             clarification, or consult with someone in your organization who can answer these questions."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assumptions_fall_back_to_raw_domain_and_unknown_role() {
        let answers = AnswerSet::new()
            .with("q3_domain", "agritech")
            .with("q1_company_role", "reseller");

        let assumptions = assumptions(&answers);

        assert_eq!(
            assumptions,
            vec![
                "Domain: agritech".to_string(),
                "Role not specified".to_string(),
                DISCLAIMER.to_string(),
            ]
        );
    }

    #[test]
    fn summary_interpolates_domain_phrase() {
        let answers = AnswerSet::new().with("q3_domain", "hiring_hr");
        let text = summary(RiskBucket::HighRisk, &answers, 0);
        assert!(text.contains("High-risk systems in HR and hiring require"));

        let text = summary(RiskBucket::Prohibited, &AnswerSet::new(), 0);
        assert!(text.contains("combination of your domain use case"));
    }

    #[test]
    fn every_bucket_offers_guidance() {
        for bucket in RiskBucket::ordered() {
            let guidance = what_changes_outcome(bucket);
            assert!((1..=2).contains(&guidance.len()), "{bucket} guidance");
        }
    }

    #[test]
    fn missing_info_only_covers_sensitive_questions() {
        assert!(missing_info("q6_biometric").is_some());
        assert!(missing_info("q10_logging").is_none());
    }
}

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Answer value a respondent selects to signal explicit uncertainty.
pub const NOT_SURE: &str = "not_sure";

/// EU AI Act risk classification produced by the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskBucket {
    #[serde(rename = "Prohibited")]
    Prohibited,
    #[serde(rename = "High-risk")]
    HighRisk,
    #[serde(rename = "Limited risk")]
    LimitedRisk,
    #[serde(rename = "Minimal risk")]
    MinimalRisk,
    #[serde(rename = "Needs clarification")]
    NeedsClarification,
}

impl RiskBucket {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Prohibited,
            Self::HighRisk,
            Self::LimitedRisk,
            Self::MinimalRisk,
            Self::NeedsClarification,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Prohibited => "Prohibited",
            Self::HighRisk => "High-risk",
            Self::LimitedRisk => "Limited risk",
            Self::MinimalRisk => "Minimal risk",
            Self::NeedsClarification => "Needs clarification",
        }
    }

    /// Resolve a wire label back to a bucket; unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|bucket| bucket.label() == label.trim())
    }

    /// The two buckets where a single open critical question blocks a verdict.
    pub const fn is_severe(self) -> bool {
        matches!(self, Self::Prohibited | Self::HighRisk)
    }
}

impl fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Questionnaire responses keyed by question id.
///
/// JSON `null` is dropped so that it behaves exactly like an unanswered question, and
/// non-string scalars are kept in their JSON text form so they never match an option value
/// by accident.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question_id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(question_id.into(), value.into());
    }

    pub fn with(mut self, question_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(question_id, value);
        self
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    /// Whether the respondent explicitly answered "not sure".
    pub fn is_not_sure(&self, question_id: &str) -> bool {
        self.get(question_id) == Some(NOT_SURE)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of answers carrying the uncertainty sentinel, across every question.
    pub fn not_sure_count(&self) -> usize {
        self.0.values().filter(|value| *value == NOT_SURE).count()
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for AnswerSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let answers = raw
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(text) => Some((key, text)),
                other => Some((key, other.to_string())),
            })
            .collect();
        Ok(Self(answers))
    }
}

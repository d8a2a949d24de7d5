use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw survey answers exactly as the presentation layer collects them.
///
/// Every field is optional; missing answers degrade to safe defaults
/// during normalization instead of failing the analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProfile {
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, rename = "cityRural")]
    pub city_rural: Option<String>,
    #[serde(default)]
    pub income: Option<String>,
    #[serde(default)]
    pub employment: Option<String>,
    #[serde(default)]
    pub home: Option<String>,
    #[serde(default)]
    pub commute: Option<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub religion: Option<String>,
    #[serde(default)]
    pub race: Option<String>,
}

/// Parsed monthly income bracket extracted from a survey label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeBand {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub label: String,
}

/// Normalized view of the survey answers consumed by all scoring logic.
///
/// Derived once per analysis call and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserContext {
    pub income_band: IncomeBand,
    pub age: f64,
    pub is_student: bool,
    pub is_retired: bool,
    pub commute: String,
    pub locale: String,
    pub concerns: Vec<String>,
    pub employment: String,
    pub home: String,
    pub income: f64,
}

/// Declarative predicate fields deciding whether a policy applies to a user.
///
/// An absent field places no constraint on that dimension; all present
/// constraints must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilityRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_in: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commute_in: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_in: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_in: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_lt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_lte: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_gt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_gte: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_lt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_lte: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_gt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_gte: Option<f64>,
}

/// Named formula reference plus its parameters.
///
/// `kind` must match a registered formula name or the policy contributes
/// zero effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComputeSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

/// One concrete proposal with eligibility and a computable monetary effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    pub title: String,
    pub description: String,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(default)]
    pub eligibility: EligibilityRule,
    #[serde(default)]
    pub compute: ComputeSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A country+candidate's structured policy document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub country: String,
    pub candidate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_manifesto_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieved_at: Option<String>,
    #[serde(default)]
    pub policies: Vec<Policy>,
}

/// Free-text knowledge-base entry for one qualitative topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyTopicEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<Value>,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub source: String,
}

/// Categorical outcome label for a qualitative topic.
///
/// Declaration order is the fixed priority order used when the verdict
/// tally is summarized.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    LikelyPositive,
    Mixed,
    Unclear,
    LikelyNegative,
    PolicyChange,
}

impl Verdict {
    pub const fn ordered() -> [Verdict; 5] {
        [
            Verdict::LikelyPositive,
            Verdict::Mixed,
            Verdict::Unclear,
            Verdict::LikelyNegative,
            Verdict::PolicyChange,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Verdict::LikelyPositive => "likely positive",
            Verdict::Mixed => "mixed",
            Verdict::Unclear => "unclear",
            Verdict::LikelyNegative => "likely negative",
            Verdict::PolicyChange => "policy change",
        }
    }
}

/// Per-policy line of a monetary analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyEffectRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(rename = "monthlyCost")]
    pub monthly_cost: f64,
    #[serde(rename = "monthlyBenefit")]
    pub monthly_benefit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Monetary form of an analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonetaryImpact {
    pub country: String,
    pub candidate: String,
    pub rows: Vec<PolicyEffectRow>,
    #[serde(rename = "monthlyCost")]
    pub monthly_cost: f64,
    #[serde(rename = "monthlyBenefit")]
    pub monthly_benefit: f64,
    pub net: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_manifesto_url: Option<String>,
}

/// Scored qualitative topic, carrying the KB entry's supporting text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicResult {
    pub topic: String,
    pub verdict: Verdict,
    pub rationale: String,
    pub details: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<String>,
}

/// Qualitative form of an analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitativeImpact {
    pub topics: Vec<TopicResult>,
    pub summary: String,
}

impl QualitativeImpact {
    /// Sentinel returned when no policy data exists for a selection.
    pub fn no_data() -> Self {
        Self {
            topics: Vec::new(),
            summary: "No policy data found for this selection.".to_string(),
        }
    }
}

/// Result of one analysis call, serializable to JSON without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImpactResult {
    Monetary(MonetaryImpact),
    Qualitative(QualitativeImpact),
}

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use super::domain::{ComputeSpec, EligibilityRule, Manifest, Policy, PolicyTopicEntry};
use super::schema;

/// Raised when a knowledge-base document cannot be read or parsed at all.
///
/// Schema drift inside a well-formed document is handled permissively
/// (warnings, not errors); an unreadable document is a startup failure.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeBaseError {
    #[error("knowledge base document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read knowledge base file: {0}")]
    Io(#[from] std::io::Error),
}

const BUILTIN_MANIFESTS: &str = include_str!("../../data/manifests.json");
const BUILTIN_TOPIC_INDEX: &str = include_str!("../../data/policy_index.json");

/// Load-once index of structured manifests, keyed by country then candidate.
#[derive(Debug, Default)]
pub struct ManifestStore {
    by_country: BTreeMap<String, BTreeMap<String, Manifest>>,
}

impl ManifestStore {
    /// The curated manifest document bundled with the crate.
    pub fn builtin() -> Result<Self, KnowledgeBaseError> {
        Self::load(BUILTIN_MANIFESTS)
    }

    pub fn load(raw: &str) -> Result<Self, KnowledgeBaseError> {
        let doc: Value = serde_json::from_str(raw)?;
        Ok(Self::from_document(&doc))
    }

    pub fn from_path(path: &Path) -> Result<Self, KnowledgeBaseError> {
        let raw = std::fs::read_to_string(path)?;
        Self::load(&raw)
    }

    /// Validate and index every manifest in a `{ "manifests": [...] }`
    /// document. Validation failures warn with the offending field names
    /// but the record is still indexed; only a manifest without its
    /// identity fields is excluded, since it cannot be keyed.
    pub fn from_document(doc: &Value) -> Self {
        let mut store = Self::default();

        let Some(manifests) = doc.get("manifests").and_then(Value::as_array) else {
            warn!("manifest document missing or malformed 'manifests' array");
            return store;
        };

        for raw in manifests {
            let country = raw.get("country").and_then(Value::as_str);
            let candidate = raw.get("candidate").and_then(Value::as_str);

            let errors = schema::validate_manifest(raw);
            if !errors.is_empty() {
                warn!(
                    country = country.unwrap_or("NO_COUNTRY"),
                    candidate = candidate.unwrap_or("NO_CANDIDATE"),
                    fields = ?errors,
                    "manifest failed validation"
                );
            }

            if let Some(policies) = raw.get("policies").and_then(Value::as_array) {
                for policy in policies {
                    let policy_errors = schema::validate_policy(policy);
                    if !policy_errors.is_empty() {
                        warn!(
                            country = country.unwrap_or("NO_COUNTRY"),
                            candidate = candidate.unwrap_or("NO_CANDIDATE"),
                            policy = policy.get("id").and_then(serde_json::Value::as_str).unwrap_or("NO_ID"),
                            fields = ?policy_errors,
                            "policy failed validation"
                        );
                    }
                }
            }

            let Some(manifest) = manifest_from_value(raw) else {
                continue;
            };

            // Last write wins for duplicate (country, candidate) pairs.
            store
                .by_country
                .entry(manifest.country.clone())
                .or_default()
                .insert(manifest.candidate.clone(), manifest);
        }

        store
    }

    pub fn countries(&self) -> Vec<&str> {
        self.by_country.keys().map(String::as_str).collect()
    }

    pub fn candidates(&self, country: &str) -> Vec<&str> {
        self.by_country
            .get(country)
            .map(|candidates| candidates.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn manifest(&self, country: &str, candidate: &str) -> Option<&Manifest> {
        self.by_country
            .get(country)?
            .get(candidate)
    }
}

fn manifest_from_value(raw: &Value) -> Option<Manifest> {
    let country = raw.get("country").and_then(Value::as_str)?.to_string();
    let candidate = raw.get("candidate").and_then(Value::as_str)?.to_string();

    let policies = raw
        .get("policies")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(policy_from_value).collect())
        .unwrap_or_default();

    Some(Manifest {
        country,
        candidate,
        source_manifesto_url: string_field(raw, "source_manifesto_url"),
        retrieved_at: string_field(raw, "retrieved_at"),
        policies,
    })
}

fn policy_from_value(raw: &Value) -> Policy {
    let eligibility = raw
        .get("eligibility")
        .cloned()
        .and_then(|value| serde_json::from_value::<EligibilityRule>(value).ok())
        .unwrap_or_default();

    let compute = ComputeSpec {
        kind: raw
            .get("compute")
            .and_then(|value| value.get("type"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        params: raw
            .get("compute")
            .and_then(|value| value.get("params"))
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default(),
    };

    Policy {
        id: required_string_field(raw, "id"),
        title: required_string_field(raw, "title"),
        description: required_string_field(raw, "description"),
        source_url: required_string_field(raw, "source_url"),
        effective_date: string_field(raw, "effective_date"),
        eligibility,
        compute,
        notes: string_field(raw, "notes"),
    }
}

fn string_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}

fn required_string_field(raw: &Value, key: &str) -> String {
    string_field(raw, key).unwrap_or_default()
}

/// Load-once index of free-text topic entries, keyed by
/// country -> party -> topic.
#[derive(Debug, Default)]
pub struct TopicIndex {
    by_country: BTreeMap<String, BTreeMap<String, BTreeMap<String, PolicyTopicEntry>>>,
}

impl TopicIndex {
    /// The curated topic index bundled with the crate.
    pub fn builtin() -> Result<Self, KnowledgeBaseError> {
        Self::load(BUILTIN_TOPIC_INDEX)
    }

    pub fn load(raw: &str) -> Result<Self, KnowledgeBaseError> {
        let doc: Value = serde_json::from_str(raw)?;
        Ok(Self::from_document(&doc))
    }

    pub fn from_path(path: &Path) -> Result<Self, KnowledgeBaseError> {
        let raw = std::fs::read_to_string(path)?;
        Self::load(&raw)
    }

    pub fn from_document(doc: &Value) -> Self {
        let mut index = Self::default();

        let Some(countries) = doc.as_object() else {
            warn!("topic index document is not an object");
            return index;
        };

        for (country, parties) in countries {
            let Some(parties) = parties.as_object() else {
                warn!(country, "topic index country entry is not an object");
                continue;
            };

            for (party, topics) in parties {
                let Some(topics) = topics.as_object() else {
                    warn!(country, party, "topic index party entry is not an object");
                    continue;
                };

                for (topic, entry) in topics {
                    match serde_json::from_value::<PolicyTopicEntry>(entry.clone()) {
                        Ok(entry) => {
                            index
                                .by_country
                                .entry(country.clone())
                                .or_default()
                                .entry(party.clone())
                                .or_default()
                                .insert(topic.clone(), entry);
                        }
                        Err(err) => {
                            warn!(country, party, topic, %err, "skipping malformed topic entry");
                        }
                    }
                }
            }
        }

        index
    }

    pub fn countries(&self) -> Vec<&str> {
        self.by_country.keys().map(String::as_str).collect()
    }

    pub fn parties(&self, country: &str) -> Vec<&str> {
        self.by_country
            .get(country)
            .map(|parties| parties.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn party_topics(
        &self,
        country: &str,
        party: &str,
    ) -> Option<&BTreeMap<String, PolicyTopicEntry>> {
        self.by_country.get(country)?.get(party)
    }
}

/// Availability of the qualitative KB, decided once at composition time.
///
/// Replaces call-time "try to load and swallow the error" fallbacks: a
/// deployment either carries the topic index or it does not.
#[derive(Debug)]
pub enum TopicSource {
    Available(TopicIndex),
    Unavailable,
}

impl TopicSource {
    pub fn party_topics(
        &self,
        country: &str,
        party: &str,
    ) -> Option<&BTreeMap<String, PolicyTopicEntry>> {
        match self {
            TopicSource::Available(index) => index.party_topics(country, party),
            TopicSource::Unavailable => None,
        }
    }

    pub fn countries(&self) -> Vec<&str> {
        match self {
            TopicSource::Available(index) => index.countries(),
            TopicSource::Unavailable => Vec::new(),
        }
    }

    pub fn parties(&self, country: &str) -> Vec<&str> {
        match self {
            TopicSource::Available(index) => index.parties(country),
            TopicSource::Unavailable => Vec::new(),
        }
    }
}

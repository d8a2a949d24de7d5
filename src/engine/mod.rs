//! Impact-scoring engine: maps a user profile and a party's policy
//! parameters into per-policy and aggregate effects.
//!
//! The knowledge base is loaded once at startup and shared immutably;
//! each analysis call derives a fresh `UserContext` and returns a fresh
//! `ImpactResult`, so concurrent calls are fully independent.

mod aggregate;
mod assumptions;
mod compute;
pub mod domain;
mod eligibility;
mod normalizer;
mod router;
mod schema;
mod scorer;
mod store;

#[cfg(test)]
mod tests;

pub use assumptions::{AssumptionBook, CountryAssumptions};
pub use domain::{
    ComputeSpec, EligibilityRule, ImpactResult, IncomeBand, Manifest, MonetaryImpact, Policy,
    PolicyEffectRow, PolicyTopicEntry, QualitativeImpact, RawProfile, TopicResult, UserContext,
    Verdict,
};
pub use router::{impact_router, AnalyzeRequest};
pub use store::{KnowledgeBaseError, ManifestStore, TopicIndex, TopicSource};

use std::collections::{BTreeMap, BTreeSet};

use compute::round2;

/// Stateless analysis engine composing the manifest store, the optional
/// qualitative topic index, and the economic assumptions.
pub struct ImpactEngine {
    manifests: ManifestStore,
    topics: TopicSource,
    assumptions: AssumptionBook,
}

impl ImpactEngine {
    pub fn new(manifests: ManifestStore, topics: TopicSource, assumptions: AssumptionBook) -> Self {
        Self {
            manifests,
            topics,
            assumptions,
        }
    }

    /// Build an engine over the knowledge base bundled with the crate.
    pub fn with_builtin_data() -> Result<Self, KnowledgeBaseError> {
        Ok(Self::new(
            ManifestStore::builtin()?,
            TopicSource::Available(TopicIndex::builtin()?),
            AssumptionBook::default(),
        ))
    }

    /// Countries known to either knowledge base, sorted and de-duplicated.
    pub fn countries(&self) -> Vec<String> {
        let mut countries: BTreeSet<&str> = self.manifests.countries().into_iter().collect();
        countries.extend(self.topics.countries());
        countries.into_iter().map(str::to_string).collect()
    }

    /// Candidates and parties selectable for a country; empty when the
    /// country is unknown.
    pub fn candidates(&self, country: &str) -> Vec<String> {
        let mut candidates: BTreeSet<&str> =
            self.manifests.candidates(country).into_iter().collect();
        candidates.extend(self.topics.parties(country));
        candidates.into_iter().map(str::to_string).collect()
    }

    /// Analyze the impact of a `(country, party)` selection on a user.
    ///
    /// Structured manifests take precedence; parties known only to the
    /// qualitative topic index are scored by verdict. An unknown pair
    /// returns the empty-result sentinel, never an error.
    pub fn analyze(&self, country: &str, party: &str, profile: &RawProfile) -> ImpactResult {
        let user = normalizer::normalize(profile);

        if let Some(manifest) = self.manifests.manifest(country, party) {
            return ImpactResult::Monetary(self.monetary_impact(manifest, &user));
        }

        if let Some(topics) = self.topics.party_topics(country, party) {
            return ImpactResult::Qualitative(self.qualitative_impact(topics, &user));
        }

        ImpactResult::Qualitative(QualitativeImpact::no_data())
    }

    fn monetary_impact(&self, manifest: &Manifest, user: &UserContext) -> MonetaryImpact {
        let mut rows = Vec::new();
        let mut effects = Vec::new();

        for policy in &manifest.policies {
            if !eligibility::is_eligible(&policy.eligibility, user) {
                continue;
            }

            let effect =
                compute::compute_effect(policy, user, &manifest.country, &self.assumptions);
            let cost = effect.monthly_cost.unwrap_or(0.0);
            let benefit = effect.monthly_benefit.unwrap_or(0.0);
            effects.push((cost, benefit));

            rows.push(PolicyEffectRow {
                id: policy.id.clone(),
                title: policy.title.clone(),
                description: policy.description.clone(),
                source_url: policy.source_url.clone(),
                effective_date: policy.effective_date.clone(),
                monthly_cost: round2(cost),
                monthly_benefit: round2(benefit),
                note: effect.note,
            });
        }

        let totals = aggregate::total_effects(effects);

        MonetaryImpact {
            country: manifest.country.clone(),
            candidate: manifest.candidate.clone(),
            rows,
            monthly_cost: totals.monthly_cost,
            monthly_benefit: totals.monthly_benefit,
            net: totals.net,
            source_manifesto_url: manifest.source_manifesto_url.clone(),
        }
    }

    fn qualitative_impact(
        &self,
        topics: &BTreeMap<String, PolicyTopicEntry>,
        user: &UserContext,
    ) -> QualitativeImpact {
        let mut results = Vec::new();
        let mut counts: BTreeMap<Verdict, usize> = BTreeMap::new();

        for (topic, entry) in topics {
            let score = scorer::score_topic(topic, entry, user);
            *counts.entry(score.verdict).or_insert(0) += 1;

            results.push(TopicResult {
                topic: topic.clone(),
                verdict: score.verdict,
                rationale: score.rationale,
                details: entry.details.clone(),
                source: entry.source.clone(),
                signals: score.signals,
            });
        }

        QualitativeImpact {
            topics: results,
            summary: aggregate::summarize_verdicts(&counts),
        }
    }
}

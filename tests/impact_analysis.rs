//! End-to-end analysis flows over the bundled knowledge base.

use manifesto_impact::engine::{ImpactEngine, ImpactResult, RawProfile, Verdict};

fn engine() -> ImpactEngine {
    ImpactEngine::with_builtin_data().expect("bundled knowledge base loads")
}

fn survey_profile() -> RawProfile {
    RawProfile {
        age: Some("34".to_string()),
        income: Some("3000".to_string()),
        employment: Some("Employed".to_string()),
        home: Some("Rent".to_string()),
        commute: Some("Car".to_string()),
        city_rural: Some("City".to_string()),
        concerns: vec!["Environment".to_string()],
        ..RawProfile::default()
    }
}

#[test]
fn manifest_selection_produces_a_monetary_breakdown() {
    let result = engine().analyze("France", "Candidate A", &survey_profile());

    let ImpactResult::Monetary(impact) = result else {
        panic!("expected a monetary result for a manifest-backed selection");
    };

    assert_eq!(impact.country, "France");
    assert_eq!(impact.candidate, "Candidate A");
    assert_eq!(impact.rows.len(), 3);

    let fuel_row = impact
        .rows
        .iter()
        .find(|row| row.id == "fr-a-fuel-duty")
        .expect("fuel duty applies to a car commuter");
    assert_eq!(fuel_row.monthly_cost, 5.6);
    assert_eq!(
        fuel_row.note.as_deref(),
        Some("assumes 70 L of fuel per month")
    );

    assert_eq!(impact.monthly_benefit, 40.0);
    assert_eq!(impact.monthly_cost, 26.6);
    assert_eq!(impact.net, 13.4);
    assert!(impact.source_manifesto_url.is_some());
}

#[test]
fn ineligible_policies_are_excluded_from_the_breakdown() {
    let walker = RawProfile {
        commute: Some("Walk".to_string()),
        home: Some("Own".to_string()),
        ..survey_profile()
    };

    let ImpactResult::Monetary(impact) = engine().analyze("France", "Candidate A", &walker) else {
        panic!("expected a monetary result");
    };

    // Only the universal VAT change remains.
    assert_eq!(impact.rows.len(), 1);
    assert_eq!(impact.rows[0].id, "fr-a-vat-increase");
    assert_eq!(impact.monthly_benefit, 0.0);
}

#[test]
fn topic_only_party_gets_per_topic_verdicts() {
    let ImpactResult::Qualitative(impact) = engine().analyze("France", "LFI", &survey_profile())
    else {
        panic!("expected a qualitative result for a topic-only party");
    };

    assert_eq!(impact.topics.len(), 3);

    let energy = impact
        .topics
        .iter()
        .find(|topic| topic.topic == "prices_energy")
        .expect("energy topic scored");
    assert_eq!(energy.verdict, Verdict::LikelyPositive);
    assert!(!energy.details.is_empty());
    assert!(!energy.source.is_empty());

    assert_eq!(impact.summary, "likely positive: 1 • mixed: 2");
}

#[test]
fn unknown_selection_answers_with_the_sentinel() {
    let ImpactResult::Qualitative(impact) =
        engine().analyze("Atlantis", "Candidate A", &survey_profile())
    else {
        panic!("expected the qualitative sentinel");
    };

    assert!(impact.topics.is_empty());
    assert_eq!(impact.summary, "No policy data found for this selection.");
}

#[test]
fn analysis_is_deterministic_for_identical_input() {
    let engine = engine();
    let profile = survey_profile();

    let first = engine.analyze("France", "Candidate A", &profile);
    let second = engine.analyze("France", "Candidate A", &profile);

    let first_json = serde_json::to_string(&first).expect("result serializes");
    let second_json = serde_json::to_string(&second).expect("result serializes");
    assert_eq!(first_json, second_json);

    let first_lfi = engine.analyze("France", "LFI", &profile);
    let second_lfi = engine.analyze("France", "LFI", &profile);
    assert_eq!(
        serde_json::to_string(&first_lfi).expect("result serializes"),
        serde_json::to_string(&second_lfi).expect("result serializes")
    );
}

#[test]
fn selection_lists_cover_both_knowledge_bases() {
    let engine = engine();

    assert_eq!(engine.countries(), vec!["France", "Germany"]);

    let french = engine.candidates("France");
    assert!(french.contains(&"Candidate A".to_string()));
    assert!(french.contains(&"LFI".to_string()));

    let german = engine.candidates("Germany");
    assert_eq!(
        german,
        vec!["Candidate A".to_string(), "Candidate B".to_string()]
    );
}

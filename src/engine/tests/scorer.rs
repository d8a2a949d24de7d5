use crate::engine::domain::{IncomeBand, PolicyTopicEntry, UserContext, Verdict};
use crate::engine::scorer::score_topic;

fn entry_with_stance(stance: &str) -> PolicyTopicEntry {
    PolicyTopicEntry {
        stance: Some(stance.to_string()),
        ..PolicyTopicEntry::default()
    }
}

fn user_with_band(min: Option<f64>, max: Option<f64>) -> UserContext {
    UserContext {
        income_band: IncomeBand {
            min,
            max,
            label: String::new(),
        },
        ..UserContext::default()
    }
}

#[test]
fn minimum_wage_lifts_low_bands() {
    let score = score_topic(
        "wages_minimum",
        &PolicyTopicEntry::default(),
        &user_with_band(Some(1000.0), Some(1500.0)),
    );

    assert_eq!(score.verdict, Verdict::LikelyPositive);
    assert_eq!(
        score.rationale,
        "Minimum-wage increase could lift pay toward 1,600€ net."
    );
    assert!(score
        .signals
        .contains(&"income band tops out below 1,600€".to_string()));
}

#[test]
fn minimum_wage_is_mixed_above_threshold() {
    let score = score_topic(
        "wages_minimum",
        &PolicyTopicEntry::default(),
        &user_with_band(Some(1700.0), None),
    );

    assert_eq!(score.verdict, Verdict::Mixed);
    assert_eq!(
        score.rationale,
        "Already above proposed minimum; indirect effects depend on sector."
    );
}

#[test]
fn retirement_age_favors_older_non_students() {
    let older = UserContext {
        age: 58.0,
        ..UserContext::default()
    };
    let score = score_topic("retirement_age", &PolicyTopicEntry::default(), &older);
    assert_eq!(score.verdict, Verdict::LikelyPositive);
    assert_eq!(
        score.rationale,
        "Lower legal retirement age could bring eligibility sooner."
    );
}

#[test]
fn retirement_age_stays_mixed_for_students_and_the_young() {
    let older_student = UserContext {
        age: 58.0,
        is_student: true,
        ..UserContext::default()
    };
    let score = score_topic(
        "retirement_age",
        &PolicyTopicEntry::default(),
        &older_student,
    );
    assert_eq!(score.verdict, Verdict::Mixed);

    let young = UserContext {
        age: 30.0,
        ..UserContext::default()
    };
    let score = score_topic("retirement_age", &PolicyTopicEntry::default(), &young);
    assert_eq!(score.verdict, Verdict::Mixed);
    assert_eq!(
        score.rationale,
        "Effect depends on contribution years and timing."
    );
}

#[test]
fn energy_prices_are_always_likely_positive() {
    let score = score_topic(
        "prices_energy",
        &PolicyTopicEntry::default(),
        &UserContext::default(),
    );
    assert_eq!(score.verdict, Verdict::LikelyPositive);
}

#[test]
fn energy_mix_depends_on_environment_concern() {
    let concerned = UserContext {
        concerns: vec!["environment".to_string()],
        ..UserContext::default()
    };
    let score = score_topic("energy_mix", &PolicyTopicEntry::default(), &concerned);
    assert_eq!(score.verdict, Verdict::Mixed);

    let indifferent = score_topic(
        "energy_mix",
        &PolicyTopicEntry::default(),
        &UserContext::default(),
    );
    assert_eq!(indifferent.verdict, Verdict::Unclear);
    assert_eq!(
        indifferent.rationale,
        "Impact depends on priorities and implementation."
    );
}

#[test]
fn vat_essentials_adds_low_income_note() {
    let low = score_topic(
        "vat_essentials",
        &PolicyTopicEntry::default(),
        &user_with_band(Some(1000.0), Some(1999.0)),
    );
    assert_eq!(low.verdict, Verdict::LikelyPositive);
    assert_eq!(
        low.rationale,
        "Lower VAT on essentials typically reduces basket prices. Lower-income households may benefit more."
    );

    let high = score_topic(
        "vat_essentials",
        &PolicyTopicEntry::default(),
        &user_with_band(Some(5000.0), None),
    );
    assert_eq!(
        high.rationale,
        "Lower VAT on essentials typically reduces basket prices."
    );
}

#[test]
fn structural_topics_map_to_fixed_verdicts() {
    let user = UserContext::default();
    let entry = PolicyTopicEntry::default();

    assert_eq!(
        score_topic("building_renovation", &entry, &user).verdict,
        Verdict::Mixed
    );
    assert_eq!(
        score_topic("tax_work_prod", &entry, &user).verdict,
        Verdict::Mixed
    );
    assert_eq!(
        score_topic("security_sentencing", &entry, &user).verdict,
        Verdict::PolicyChange
    );
    assert_eq!(
        score_topic("immigration_rules", &entry, &user).verdict,
        Verdict::PolicyChange
    );
}

#[test]
fn unknown_topic_falls_back_to_unclear() {
    let score = score_topic(
        "space_program",
        &PolicyTopicEntry::default(),
        &UserContext::default(),
    );
    assert_eq!(score.verdict, Verdict::Unclear);
    assert_eq!(score.rationale, "Insufficient information.");
}

#[test]
fn party_stance_is_surfaced_as_a_signal() {
    let score = score_topic(
        "immigration_rules",
        &entry_with_stance("restrictive"),
        &UserContext::default(),
    );
    assert!(score
        .signals
        .contains(&"party stance: restrictive".to_string()));
}

use serde_json::json;

use super::common::policy_with_compute;
use crate::engine::compute::{compute_effect, round2, MonetaryEffect};
use crate::engine::domain::UserContext;
use crate::engine::{AssumptionBook, CountryAssumptions};

fn driver_with_income(income: f64) -> UserContext {
    UserContext {
        income,
        commute: "car".to_string(),
        ..UserContext::default()
    }
}

#[test]
fn fixed_benefit_reads_amount_param() {
    let policy = policy_with_compute("fixed_benefit", json!({ "amount": 40 }));
    let effect = compute_effect(
        &policy,
        &UserContext::default(),
        "France",
        &AssumptionBook::default(),
    );

    assert_eq!(effect.monthly_benefit, Some(40.0));
    assert_eq!(effect.monthly_cost, None);
    assert_eq!(effect.note, None);
}

#[test]
fn missing_amount_defaults_to_zero() {
    let policy = policy_with_compute("fixed_cost", json!({}));
    let effect = compute_effect(
        &policy,
        &UserContext::default(),
        "France",
        &AssumptionBook::default(),
    );

    assert_eq!(effect.monthly_cost, Some(0.0));
}

#[test]
fn vat_delta_scales_income_by_default_spend_share() {
    let policy = policy_with_compute("vat_delta", json!({ "delta": 0.01 }));
    let effect = compute_effect(
        &policy,
        &driver_with_income(3000.0),
        "France",
        &AssumptionBook::default(),
    );

    assert_eq!(effect.monthly_cost, Some(21.0));
    assert_eq!(
        effect.note.as_deref(),
        Some("assumes 70% of income is exposed to VAT")
    );
}

#[test]
fn explicit_spend_share_suppresses_assumption_note() {
    let policy = policy_with_compute("vat_delta", json!({ "delta": 0.01, "spend_share": 0.5 }));
    let effect = compute_effect(
        &policy,
        &driver_with_income(3000.0),
        "France",
        &AssumptionBook::default(),
    );

    assert_eq!(effect.monthly_cost, Some(15.0));
    assert_eq!(effect.note, None);
}

#[test]
fn fuel_duty_applies_only_to_car_commuters() {
    let policy = policy_with_compute("fuel_duty_delta", json!({ "delta_per_liter": 0.08 }));

    let driver_effect = compute_effect(
        &policy,
        &driver_with_income(0.0),
        "France",
        &AssumptionBook::default(),
    );
    assert_eq!(driver_effect.monthly_cost, Some(0.08 * 70.0));
    assert_eq!(
        driver_effect.note.as_deref(),
        Some("assumes 70 L of fuel per month")
    );

    let walker = UserContext {
        commute: "walk".to_string(),
        ..UserContext::default()
    };
    let walker_effect = compute_effect(&policy, &walker, "France", &AssumptionBook::default());
    assert_eq!(walker_effect, MonetaryEffect::default());
}

#[test]
fn fuel_duty_honors_country_assumption_override() {
    let assumptions = AssumptionBook::default().with_country(
        "Germany",
        CountryAssumptions {
            vat_spend_share: None,
            fuel_liters_per_month: Some(50.0),
        },
    );
    let policy = policy_with_compute("fuel_duty_delta", json!({ "delta_per_liter": 0.05 }));

    let effect = compute_effect(&policy, &driver_with_income(0.0), "Germany", &assumptions);
    assert_eq!(effect.monthly_cost, Some(2.5));
    assert_eq!(effect.note.as_deref(), Some("assumes 50 L of fuel per month"));
}

#[test]
fn self_employed_charge_delta_guards_on_employment() {
    let policy = policy_with_compute("self_employed_charge_delta", json!({ "amount": 30 }));

    let self_employed = UserContext {
        employment: "Self-employed".to_string(),
        ..UserContext::default()
    };
    let effect = compute_effect(&policy, &self_employed, "Germany", &AssumptionBook::default());
    assert_eq!(effect.monthly_benefit, Some(30.0));

    let employed = UserContext {
        employment: "Employed".to_string(),
        ..UserContext::default()
    };
    let no_effect = compute_effect(&policy, &employed, "Germany", &AssumptionBook::default());
    assert_eq!(no_effect, MonetaryEffect::default());
}

#[test]
fn unknown_compute_kind_is_a_silent_no_op() {
    let policy = policy_with_compute("carbon_dividend", json!({ "amount": 100 }));
    let effect = compute_effect(
        &policy,
        &driver_with_income(3000.0),
        "France",
        &AssumptionBook::default(),
    );

    assert_eq!(effect, MonetaryEffect::default());
}

#[test]
fn rounding_snaps_to_two_decimals() {
    assert_eq!(round2(5.6000000000000005), 5.6);
    assert_eq!(round2(0.005), 0.01);
    assert_eq!(round2(12.0), 12.0);
}

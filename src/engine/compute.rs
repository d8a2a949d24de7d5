use serde_json::{Map, Value};

use super::assumptions::AssumptionBook;
use super::domain::{Policy, UserContext};

/// Monetary effect of a single eligible policy on a user, in currency
/// per month. Absent fields mean no effect on that side.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct MonetaryEffect {
    pub monthly_cost: Option<f64>,
    pub monthly_benefit: Option<f64>,
    pub note: Option<String>,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Dispatch a policy through the fixed formula registry.
///
/// An unknown `compute.type` yields an empty effect rather than an
/// error, so unrecognized future policy kinds stay harmless.
pub(crate) fn compute_effect(
    policy: &Policy,
    user: &UserContext,
    country: &str,
    assumptions: &AssumptionBook,
) -> MonetaryEffect {
    let params = &policy.compute.params;

    match policy.compute.kind.as_str() {
        "fixed_benefit" => MonetaryEffect {
            monthly_benefit: Some(param(params, "amount").unwrap_or(0.0)),
            ..MonetaryEffect::default()
        },
        "fixed_cost" => MonetaryEffect {
            monthly_cost: Some(param(params, "amount").unwrap_or(0.0)),
            ..MonetaryEffect::default()
        },
        "vat_delta" => {
            let delta = param(params, "delta").unwrap_or(0.0);
            let (spend_share, assumed) = match param(params, "spend_share") {
                Some(share) => (share, false),
                None => (assumptions.vat_spend_share(country), true),
            };

            MonetaryEffect {
                monthly_cost: Some(delta * spend_share * user.income),
                note: assumed.then(|| {
                    format!(
                        "assumes {:.0}% of income is exposed to VAT",
                        spend_share * 100.0
                    )
                }),
                ..MonetaryEffect::default()
            }
        }
        "fuel_duty_delta" => {
            if !user.commute.eq_ignore_ascii_case("car") {
                return MonetaryEffect::default();
            }

            let delta_per_liter = param(params, "delta_per_liter").unwrap_or(0.0);
            let (liters, assumed) = match param(params, "liters_per_month") {
                Some(liters) => (liters, false),
                None => (assumptions.fuel_liters_per_month(country), true),
            };

            MonetaryEffect {
                monthly_cost: Some(delta_per_liter * liters),
                note: assumed.then(|| format!("assumes {liters:.0} L of fuel per month")),
                ..MonetaryEffect::default()
            }
        }
        "self_employed_charge_delta" => {
            if !user.employment.eq_ignore_ascii_case("self-employed") {
                return MonetaryEffect::default();
            }

            MonetaryEffect {
                monthly_benefit: Some(param(params, "amount").unwrap_or(0.0)),
                ..MonetaryEffect::default()
            }
        }
        _ => MonetaryEffect::default(),
    }
}

fn param(params: &Map<String, Value>, key: &str) -> Option<f64> {
    params.get(key).and_then(Value::as_f64)
}

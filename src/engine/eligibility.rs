use super::domain::{EligibilityRule, UserContext};

/// Decide whether a user qualifies for a policy.
///
/// Pure and total: each recognized constraint is evaluated independently
/// and combined by AND; an absent constraint is vacuously true.
pub(crate) fn is_eligible(rule: &EligibilityRule, user: &UserContext) -> bool {
    set_matches(rule.home_in.as_deref(), &user.home)
        && set_matches(rule.commute_in.as_deref(), &user.commute)
        && set_matches(rule.employment_in.as_deref(), &user.employment)
        && set_matches(rule.location_in.as_deref(), &user.locale)
        && bound(rule.income_lt, |limit| user.income < limit)
        && bound(rule.income_lte, |limit| user.income <= limit)
        && bound(rule.income_gt, |limit| user.income > limit)
        && bound(rule.income_gte, |limit| user.income >= limit)
        && bound(rule.age_lt, |limit| user.age < limit)
        && bound(rule.age_lte, |limit| user.age <= limit)
        && bound(rule.age_gt, |limit| user.age > limit)
        && bound(rule.age_gte, |limit| user.age >= limit)
}

/// Membership is case-insensitive: user fields are lowercased during
/// normalization while KB lists carry display casing.
fn set_matches(list: Option<&[String]>, value: &str) -> bool {
    match list {
        None => true,
        Some(items) if items.is_empty() => true,
        Some(items) => items.iter().any(|item| item.eq_ignore_ascii_case(value)),
    }
}

fn bound(limit: Option<f64>, check: impl Fn(f64) -> bool) -> bool {
    limit.map(check).unwrap_or(true)
}

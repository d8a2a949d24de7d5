use std::sync::OnceLock;

use regex::Regex;

use super::domain::{IncomeBand, RawProfile, UserContext};

fn dash_range() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*[\-–—]\s*(\d+)").expect("hard-coded pattern"))
}

fn less_than() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)less than\s*(\d+)").expect("hard-coded pattern"))
}

fn or_more() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+)\s*or more").expect("hard-coded pattern"))
}

/// Convert raw survey answers into the canonical user context.
///
/// Pure and total: missing answers degrade to safe defaults, never errors.
pub(crate) fn normalize(profile: &RawProfile) -> UserContext {
    let employment_raw = profile.employment.clone().unwrap_or_default();
    let employment_lower = employment_raw.to_ascii_lowercase();

    UserContext {
        income_band: parse_income_band(profile.income.as_deref().unwrap_or_default()),
        age: coerce_number(profile.age.as_deref()),
        is_student: employment_lower.contains("student"),
        is_retired: employment_lower.contains("retired"),
        commute: profile
            .commute
            .as_deref()
            .unwrap_or_default()
            .to_ascii_lowercase(),
        locale: profile
            .city_rural
            .as_deref()
            .unwrap_or_default()
            .to_ascii_lowercase(),
        concerns: profile
            .concerns
            .iter()
            .map(|concern| concern.to_ascii_lowercase())
            .collect(),
        employment: employment_raw,
        home: profile.home.clone().unwrap_or_default(),
        income: coerce_number(profile.income.as_deref()),
    }
}

/// Extract `{min, max}` from an income label such as "2,000 – 2,999",
/// "Less than 1,000" or "50,000 or more". Unparsable input yields
/// `{min: None, max: None}` with the original label preserved.
pub(crate) fn parse_income_band(label: &str) -> IncomeBand {
    let clean = label.replace([',', '€'], "");

    if let Some(captures) = dash_range().captures(&clean) {
        return IncomeBand {
            min: captures[1].parse().ok(),
            max: captures[2].parse().ok(),
            label: label.to_string(),
        };
    }

    if let Some(captures) = less_than().captures(&clean) {
        return IncomeBand {
            min: Some(0.0),
            max: captures[1].parse().ok(),
            label: label.to_string(),
        };
    }

    if let Some(captures) = or_more().captures(&clean) {
        return IncomeBand {
            min: captures[1].parse().ok(),
            max: None,
            label: label.to_string(),
        };
    }

    IncomeBand {
        min: None,
        max: None,
        label: label.to_string(),
    }
}

/// Numeric coercion for free-text survey fields: separators stripped,
/// anything non-numeric becomes 0.
pub(crate) fn coerce_number(raw: Option<&str>) -> f64 {
    raw.map(|value| {
        value
            .replace([',', '€'], "")
            .trim()
            .parse::<f64>()
            .unwrap_or(0.0)
    })
    .unwrap_or(0.0)
}

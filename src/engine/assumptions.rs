use std::collections::BTreeMap;

const DEFAULT_VAT_SPEND_SHARE: f64 = 0.70;
const DEFAULT_FUEL_LITERS_PER_MONTH: f64 = 70.0;

/// Per-country overrides for the economic assumptions behind the formulas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CountryAssumptions {
    pub vat_spend_share: Option<f64>,
    pub fuel_liters_per_month: Option<f64>,
}

/// Economic assumptions used when a policy omits a parameter: the share
/// of income exposed to VAT and the default monthly car fuel usage.
/// General defaults apply unless a country override is registered.
#[derive(Debug, Clone)]
pub struct AssumptionBook {
    vat_spend_share: f64,
    fuel_liters_per_month: f64,
    by_country: BTreeMap<String, CountryAssumptions>,
}

impl Default for AssumptionBook {
    fn default() -> Self {
        Self {
            vat_spend_share: DEFAULT_VAT_SPEND_SHARE,
            fuel_liters_per_month: DEFAULT_FUEL_LITERS_PER_MONTH,
            by_country: BTreeMap::new(),
        }
    }
}

impl AssumptionBook {
    pub fn with_country(mut self, country: &str, overrides: CountryAssumptions) -> Self {
        self.by_country.insert(country.to_string(), overrides);
        self
    }

    pub fn vat_spend_share(&self, country: &str) -> f64 {
        self.by_country
            .get(country)
            .and_then(|overrides| overrides.vat_spend_share)
            .unwrap_or(self.vat_spend_share)
    }

    pub fn fuel_liters_per_month(&self, country: &str) -> f64 {
        self.by_country
            .get(country)
            .and_then(|overrides| overrides.fuel_liters_per_month)
            .unwrap_or(self.fuel_liters_per_month)
    }
}

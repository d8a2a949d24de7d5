use super::domain::{PolicyTopicEntry, UserContext, Verdict};

/// Scored outcome for a single topic.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TopicScore {
    pub verdict: Verdict,
    pub rationale: String,
    pub signals: Vec<String>,
}

impl TopicScore {
    fn new(verdict: Verdict, rationale: &str) -> Self {
        Self {
            verdict,
            rationale: rationale.to_string(),
            signals: Vec::new(),
        }
    }

    fn with_signal(mut self, signal: &str) -> Self {
        self.signals.push(signal.to_string());
        self
    }
}

struct TopicRule {
    topic: &'static str,
    score: fn(&UserContext) -> TopicScore,
}

/// The canonical rule table. One entry per recognized topic key; every
/// rule is a pure predicate-to-verdict function over the user context.
const RULES: &[TopicRule] = &[
    TopicRule {
        topic: "wages_minimum",
        score: score_wages_minimum,
    },
    TopicRule {
        topic: "retirement_age",
        score: score_retirement_age,
    },
    TopicRule {
        topic: "prices_energy",
        score: score_prices_energy,
    },
    TopicRule {
        topic: "energy_mix",
        score: score_energy_mix,
    },
    TopicRule {
        topic: "vat_essentials",
        score: score_vat_essentials,
    },
    TopicRule {
        topic: "building_renovation",
        score: score_building_renovation,
    },
    TopicRule {
        topic: "tax_work_prod",
        score: score_tax_work_prod,
    },
    TopicRule {
        topic: "security_sentencing",
        score: score_security_sentencing,
    },
    TopicRule {
        topic: "immigration_rules",
        score: score_immigration_rules,
    },
];

/// Score one KB topic for a user. Unrecognized topic keys fall back to
/// an "unclear" verdict instead of failing the analysis.
pub(crate) fn score_topic(topic: &str, entry: &PolicyTopicEntry, user: &UserContext) -> TopicScore {
    let mut score = RULES
        .iter()
        .find(|rule| rule.topic == topic)
        .map(|rule| (rule.score)(user))
        .unwrap_or_else(unclear);

    if let Some(stance) = &entry.stance {
        score.signals.push(format!("party stance: {stance}"));
    }

    score
}

fn unclear() -> TopicScore {
    TopicScore::new(Verdict::Unclear, "Insufficient information.")
}

fn score_wages_minimum(user: &UserContext) -> TopicScore {
    let under_1600 = user.income_band.max.map_or(false, |max| max < 1600.0);
    if under_1600 {
        TopicScore::new(
            Verdict::LikelyPositive,
            "Minimum-wage increase could lift pay toward 1,600€ net.",
        )
        .with_signal("income band tops out below 1,600€")
    } else {
        TopicScore::new(
            Verdict::Mixed,
            "Already above proposed minimum; indirect effects depend on sector.",
        )
    }
}

fn score_retirement_age(user: &UserContext) -> TopicScore {
    if user.age >= 55.0 && !user.is_student {
        TopicScore::new(
            Verdict::LikelyPositive,
            "Lower legal retirement age could bring eligibility sooner.",
        )
        .with_signal("age 55 or older")
    } else {
        TopicScore::new(
            Verdict::Mixed,
            "Effect depends on contribution years and timing.",
        )
    }
}

fn score_prices_energy(_user: &UserContext) -> TopicScore {
    TopicScore::new(
        Verdict::LikelyPositive,
        "Energy price caps/controls aim to reduce bill volatility.",
    )
}

fn score_energy_mix(user: &UserContext) -> TopicScore {
    let cares_about_environment = user
        .concerns
        .iter()
        .any(|concern| concern == "environment");
    if cares_about_environment {
        TopicScore::new(
            Verdict::Mixed,
            "Nuclear+renewables can cut emissions; views differ on nuclear risk/cost.",
        )
        .with_signal("concerned about the environment")
    } else {
        TopicScore::new(
            Verdict::Unclear,
            "Impact depends on priorities and implementation.",
        )
    }
}

fn score_vat_essentials(user: &UserContext) -> TopicScore {
    let mut score = TopicScore::new(
        Verdict::LikelyPositive,
        "Lower VAT on essentials typically reduces basket prices.",
    );
    if user.income_band.max.map_or(false, |max| max < 2000.0) {
        score.rationale.push_str(" Lower-income households may benefit more.");
        score = score.with_signal("income band tops out below 2,000€");
    }
    score
}

fn score_building_renovation(_user: &UserContext) -> TopicScore {
    TopicScore::new(
        Verdict::Mixed,
        "Retrofits can cut bills and emissions; eligibility/timing vary.",
    )
}

fn score_tax_work_prod(_user: &UserContext) -> TopicScore {
    TopicScore::new(
        Verdict::Mixed,
        "Lower charges can support firms/jobs; fiscal trade-offs apply.",
    )
}

fn score_security_sentencing(_user: &UserContext) -> TopicScore {
    TopicScore::new(
        Verdict::PolicyChange,
        "Harsher sentencing/more resources; personal impact is situational.",
    )
}

fn score_immigration_rules(_user: &UserContext) -> TopicScore {
    TopicScore::new(
        Verdict::PolicyChange,
        "Rules would tighten; effect depends on status/plans.",
    )
}

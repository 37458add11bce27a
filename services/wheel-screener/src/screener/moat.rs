//! Competitive moat sub-score (0 to 7).
//!
//! Seven criteria inferred from sector, industry, market-cap tier and
//! margin. Ambiguous or unknown categories earn nothing.

use super::categories::{
    CONSUMER_BRAND_SECTORS, NETWORK_EFFECT_TERMS, PATENT_SECTORS, SWITCHING_COST_TERMS,
};
use super::metrics::NormalizedMetrics;
use super::rules::{self, Rule, ScoreCategory, SubScore, Verdict};

const BILLION: f64 = 1.0e9;
const BRAND_MIN_CAP: f64 = 50.0 * BILLION;
const COST_ADVANTAGE_MIN_CAP: f64 = 10.0 * BILLION;
const COST_ADVANTAGE_MIN_MARGIN: f64 = 0.15;
const NICHE_MIN_CAP: f64 = 1.0 * BILLION;
const NICHE_MAX_CAP: f64 = 10.0 * BILLION;
const LONGEVITY_MIN_DIVIDEND_YEARS: u32 = 5;
const LONGEVITY_MIN_CAP: f64 = 100.0 * BILLION;

/// Moat rubric in evaluation order.
pub static RULES: [Rule; 7] = [
    Rule {
        criterion: "Brand",
        max_points: 1.0,
        evaluate: brand,
    },
    Rule {
        criterion: "Patents/Licenses",
        max_points: 1.0,
        evaluate: patents,
    },
    Rule {
        criterion: "Cost Advantage",
        max_points: 1.0,
        evaluate: cost_advantage,
    },
    Rule {
        criterion: "Switching Costs",
        max_points: 1.0,
        evaluate: switching_costs,
    },
    Rule {
        criterion: "Network Effects",
        max_points: 1.0,
        evaluate: network_effects,
    },
    Rule {
        criterion: "Niche Market",
        max_points: 1.0,
        evaluate: niche_market,
    },
    Rule {
        criterion: "Longevity",
        max_points: 1.0,
        evaluate: longevity,
    },
];

/// Score the competitive moat.
pub fn score(metrics: &NormalizedMetrics) -> SubScore {
    rules::evaluate(ScoreCategory::Moat, &RULES, metrics)
}

fn billions(cap: f64) -> String {
    format!("${:.1}B", cap / BILLION)
}

fn brand(m: &NormalizedMetrics) -> Verdict {
    match m.market_cap {
        None => Verdict::unknown("Market cap unavailable"),
        Some(cap) if cap > BRAND_MIN_CAP && CONSUMER_BRAND_SECTORS.matches_opt(m.sector.as_ref()) => {
            Verdict::met(format!("Consumer-facing leader at {}", billions(cap)))
        }
        Some(cap) if cap > BRAND_MIN_CAP => {
            Verdict::partial(format!("Scale brand at {}", billions(cap)))
        }
        Some(cap) => Verdict::not_met(format!("Market cap {} too small for brand power", billions(cap))),
    }
}

fn patents(m: &NormalizedMetrics) -> Verdict {
    match &m.sector {
        None => Verdict::unknown("Sector unavailable"),
        Some(sector) if PATENT_SECTORS.matches(sector) => {
            Verdict::met(format!("{sector} sector is patent-protected"))
        }
        Some(sector) => Verdict::not_met(format!("{sector} sector not patent-driven")),
    }
}

fn cost_advantage(m: &NormalizedMetrics) -> Verdict {
    match (m.net_margin, m.market_cap) {
        (Some(nm), Some(cap)) if nm > COST_ADVANTAGE_MIN_MARGIN && cap > COST_ADVANTAGE_MIN_CAP => {
            Verdict::met(format!("Net margin {:.1}% at {} scale", nm * 100.0, billions(cap)))
        }
        (Some(nm), _) if nm <= COST_ADVANTAGE_MIN_MARGIN => {
            Verdict::not_met(format!("Net margin {:.1}% not above 15%", nm * 100.0))
        }
        (_, Some(cap)) if cap <= COST_ADVANTAGE_MIN_CAP => {
            Verdict::not_met(format!("Market cap {} lacks scale", billions(cap)))
        }
        _ => Verdict::unknown("Net margin or market cap unavailable"),
    }
}

fn switching_costs(m: &NormalizedMetrics) -> Verdict {
    let candidates = [m.sector.as_ref(), m.industry.as_ref()];
    match SWITCHING_COST_TERMS.first_match(&candidates) {
        Some(category) => Verdict::met(format!("{category} carries high switching costs")),
        None if candidates.iter().all(Option::is_none) => {
            Verdict::unknown("Sector and industry unavailable")
        }
        None => Verdict::not_met("No switching-cost business identified"),
    }
}

fn network_effects(m: &NormalizedMetrics) -> Verdict {
    match &m.industry {
        None => Verdict::unknown("Industry unavailable"),
        Some(industry) if NETWORK_EFFECT_TERMS.matches(industry) => {
            Verdict::met(format!("{industry} benefits from network effects"))
        }
        Some(industry) => Verdict::not_met(format!("{industry} has no network effect")),
    }
}

fn niche_market(m: &NormalizedMetrics) -> Verdict {
    match m.market_cap {
        None => Verdict::unknown("Market cap unavailable"),
        Some(cap) if cap > NICHE_MIN_CAP && cap < NICHE_MAX_CAP => {
            Verdict::partial(format!("Mid-size {} may dominate a niche", billions(cap)))
        }
        Some(cap) => Verdict::not_met(format!("Market cap {} outside niche range", billions(cap))),
    }
}

fn longevity(m: &NormalizedMetrics) -> Verdict {
    match (m.dividend_history_years, m.market_cap) {
        (Some(years), _) if years >= LONGEVITY_MIN_DIVIDEND_YEARS => {
            Verdict::met(format!("{years} years of dividend history"))
        }
        (_, Some(cap)) if cap > LONGEVITY_MIN_CAP => {
            Verdict::partial(format!("Established at {}", billions(cap)))
        }
        (None, None) => Verdict::unknown("Dividend history and market cap unavailable"),
        _ => Verdict::not_met("No evidence of longevity"),
    }
}

//! Risk deductions (0 to -3).
//!
//! Three independent checks, one point off each. A check with no data to
//! go on deducts nothing.

use super::categories::{
    CategorySet, CHINA_DOMICILES, GOVERNMENT_RISK_TERMS, TECHNOLOGY_RISK_TERMS,
};
use super::metrics::{Category, NormalizedMetrics};
use super::rules::{self, Rule, ScoreCategory, SubScore, Verdict};

/// Risk checks in evaluation order.
pub static RULES: [Rule; 3] = [
    Rule {
        criterion: "Technology Risk",
        max_points: -1.0,
        evaluate: technology,
    },
    Rule {
        criterion: "Government Dependence",
        max_points: -1.0,
        evaluate: government,
    },
    Rule {
        criterion: "China Exposure",
        max_points: -1.0,
        evaluate: china,
    },
];

/// Score risk deductions.
pub fn score(metrics: &NormalizedMetrics) -> SubScore {
    rules::evaluate(ScoreCategory::Risk, &RULES, metrics)
}

fn check(set: &CategorySet, candidates: &[Option<&Category>], missing: &str) -> Verdict {
    match set.first_match(candidates) {
        Some(category) => Verdict::met(format!("{category}: {}", set.name())),
        None if candidates.iter().all(Option::is_none) => Verdict::unknown(missing),
        None => Verdict::not_met(format!("Not {}", set.name())),
    }
}

fn technology(m: &NormalizedMetrics) -> Verdict {
    check(
        &TECHNOLOGY_RISK_TERMS,
        &[m.sector.as_ref(), m.industry.as_ref()],
        "Sector and industry unavailable",
    )
}

fn government(m: &NormalizedMetrics) -> Verdict {
    check(
        &GOVERNMENT_RISK_TERMS,
        &[m.sector.as_ref(), m.industry.as_ref()],
        "Sector and industry unavailable",
    )
}

fn china(m: &NormalizedMetrics) -> Verdict {
    check(&CHINA_DOMICILES, &[m.country.as_ref()], "Country unavailable")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screener::rules::Outcome;

    fn record(sector: &str, industry: &str, country: &str) -> NormalizedMetrics {
        NormalizedMetrics {
            sector: Category::parse(sector),
            industry: Category::parse(industry),
            country: Category::parse(country),
            ..Default::default()
        }
    }

    #[test]
    fn test_deductions_stack() {
        let sub = score(&record("Technology", "Aerospace & Defense Electronics", "China"));
        assert_eq!(sub.value, -3.0);
    }

    #[test]
    fn test_single_deduction() {
        let sub = score(&record("Technology", "Semiconductors", "United States"));
        assert_eq!(sub.value, -1.0);
        let tech = sub.breakdown.get("Technology Risk").unwrap();
        assert_eq!(tech.outcome, Outcome::Met);
        assert!(tech.rationale.starts_with("Semiconductors"));
    }

    #[test]
    fn test_hong_kong_domicile() {
        let sub = score(&record("Industrials", "Conglomerates", "Hong Kong"));
        assert_eq!(sub.value, -1.0);
    }

    #[test]
    fn test_taiwan_is_not_a_chinese_domicile() {
        let sub = score(&record("Industrials", "Conglomerates", "Republic of China"));
        assert_eq!(sub.value, 0.0);
        let china = sub.breakdown.get("China Exposure").unwrap();
        assert_eq!(china.outcome, Outcome::NotMet);
    }

    #[test]
    fn test_unknown_deducts_nothing() {
        let sub = score(&NormalizedMetrics::default());
        assert_eq!(sub.value, 0.0);
        assert!(sub.breakdown.iter().all(|c| c.outcome == Outcome::Unknown));
    }

    #[test]
    fn test_max_points_sum_to_minus_three() {
        let total: f64 = RULES.iter().map(|r| r.max_points).sum();
        assert_eq!(total, -3.0);
    }
}

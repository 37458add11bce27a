//! Fixed sector, industry and domicile category sets.
//!
//! Every categorical rule in the rubric is a membership test against one of
//! these sets. Sets come in two flavours:
//!
//! - [`MatchMode::WholeLabel`]: the normalized key must equal a member
//!   (`"consumer defensive"`). A bare `"consumer"` matches nothing.
//! - [`MatchMode::AnyTerm`]: any member term appears in the token list;
//!   multi-word terms must appear as a contiguous run
//!   (`"social media"` inside `"internet social media platforms"`).

use std::collections::HashSet;
use std::sync::LazyLock;

use super::metrics::Category;

/// How a [`CategorySet`] compares against a [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    WholeLabel,
    AnyTerm,
}

/// A named, immutable set of category terms.
#[derive(Debug)]
pub struct CategorySet {
    name: &'static str,
    mode: MatchMode,
    words: HashSet<&'static str>,
    phrases: Vec<Vec<&'static str>>,
}

impl CategorySet {
    /// Build a set. Terms must already be lower-case and single-spaced.
    pub fn new(name: &'static str, mode: MatchMode, terms: &[&'static str]) -> Self {
        let mut words = HashSet::new();
        let mut phrases = Vec::new();

        for term in terms {
            if mode == MatchMode::AnyTerm && term.contains(' ') {
                phrases.push(term.split(' ').collect());
            } else {
                words.insert(*term);
            }
        }

        Self {
            name,
            mode,
            words,
            phrases,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Membership test for one category value.
    pub fn matches(&self, category: &Category) -> bool {
        match self.mode {
            MatchMode::WholeLabel => self.words.contains(category.key()),
            MatchMode::AnyTerm => {
                let tokens = category.tokens();
                tokens.iter().any(|t| self.words.contains(t.as_str()))
                    || self.phrases.iter().any(|phrase| {
                        tokens
                            .windows(phrase.len())
                            .any(|window| window.iter().zip(phrase).all(|(t, p)| t == p))
                    })
            }
        }
    }

    /// Test an optional category; unknown never matches.
    pub fn matches_opt(&self, category: Option<&Category>) -> bool {
        category.is_some_and(|c| self.matches(c))
    }

    /// First known candidate that belongs to the set.
    pub fn first_match<'a>(&self, candidates: &[Option<&'a Category>]) -> Option<&'a Category> {
        candidates
            .iter()
            .flatten()
            .copied()
            .find(|c| self.matches(c))
    }
}

// ============================================================================
// Moat sets
// ============================================================================

/// Consumer-facing sectors where scale translates into brand power.
pub static CONSUMER_BRAND_SECTORS: LazyLock<CategorySet> = LazyLock::new(|| {
    CategorySet::new(
        "consumer-facing sectors",
        MatchMode::WholeLabel,
        &[
            "consumer cyclical",
            "consumer defensive",
            "consumer staples",
            "consumer discretionary",
            "communication services",
        ],
    )
});

/// Sectors protected by patents and licences.
pub static PATENT_SECTORS: LazyLock<CategorySet> = LazyLock::new(|| {
    CategorySet::new(
        "patent-protected sectors",
        MatchMode::WholeLabel,
        &["healthcare", "health care", "technology", "information technology"],
    )
});

/// Businesses customers find expensive to leave.
pub static SWITCHING_COST_TERMS: LazyLock<CategorySet> = LazyLock::new(|| {
    CategorySet::new(
        "high switching cost",
        MatchMode::AnyTerm,
        &[
            "software",
            "bank",
            "banks",
            "banking",
            "insurance",
            "utility",
            "utilities",
        ],
    )
});

/// Platforms whose value grows with their user base.
pub static NETWORK_EFFECT_TERMS: LazyLock<CategorySet> = LazyLock::new(|| {
    CategorySet::new(
        "network effect",
        MatchMode::AnyTerm,
        &[
            "internet",
            "payment",
            "payments",
            "social media",
            "marketplace",
            "marketplaces",
        ],
    )
});

// ============================================================================
// Risk sets
// ============================================================================

/// Fast-moving technology segments.
pub static TECHNOLOGY_RISK_TERMS: LazyLock<CategorySet> = LazyLock::new(|| {
    CategorySet::new(
        "fast-changing technology",
        MatchMode::AnyTerm,
        &[
            "semiconductor",
            "semiconductors",
            "software",
            "electronic",
            "electronics",
        ],
    )
});

/// Revenue dependent on government budgets.
pub static GOVERNMENT_RISK_TERMS: LazyLock<CategorySet> = LazyLock::new(|| {
    CategorySet::new(
        "government dependent",
        MatchMode::AnyTerm,
        &["aerospace", "defense", "defence", "government"],
    )
});

/// Chinese domiciles, including the special administrative regions.
///
/// Whole labels only: "Republic of China" is Taiwan.
pub static CHINA_DOMICILES: LazyLock<CategorySet> = LazyLock::new(|| {
    CategorySet::new(
        "chinese domicile",
        MatchMode::WholeLabel,
        &[
            "china",
            "mainland china",
            "people s republic of china",
            "peoples republic of china",
            "prc",
            "hong kong",
            "hong kong sar",
            "hong kong sar china",
            "hong kong china",
            "macau",
            "macao",
            "macau sar",
            "macao sar",
            "macau sar china",
            "macao sar china",
        ],
    )
});

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn cat(s: &str) -> Category {
        Category::parse(s).unwrap()
    }

    #[test_case("Consumer Defensive", true)]
    #[test_case("consumer staples", true)]
    #[test_case("Communication Services", true)]
    #[test_case("Consumer", false ; "ambiguous prefix")]
    #[test_case("Consumer Staples Distribution", false ; "longer label")]
    #[test_case("Technology", false)]
    fn test_consumer_brand_sectors(label: &str, expected: bool) {
        assert_eq!(CONSUMER_BRAND_SECTORS.matches(&cat(label)), expected);
    }

    #[test_case("Software—Infrastructure", true)]
    #[test_case("Software - Application", true)]
    #[test_case("Banks—Regional", true)]
    #[test_case("Insurance—Life", true)]
    #[test_case("Utilities—Regulated Electric", true)]
    #[test_case("Semiconductors", false)]
    #[test_case("Softwares Inc", false ; "token must match exactly")]
    fn test_switching_cost_terms(label: &str, expected: bool) {
        assert_eq!(SWITCHING_COST_TERMS.matches(&cat(label)), expected);
    }

    #[test_case("Internet Content & Information", true)]
    #[test_case("Social Media Platforms", true)]
    #[test_case("Media—Social", false ; "phrase order matters")]
    #[test_case("Specialty Retail", false)]
    fn test_network_effect_terms(label: &str, expected: bool) {
        assert_eq!(NETWORK_EFFECT_TERMS.matches(&cat(label)), expected);
    }

    #[test_case("Semiconductors", true)]
    #[test_case("Semiconductor Equipment & Materials", true)]
    #[test_case("Consumer Electronics", true)]
    #[test_case("Electronic Components", true)]
    #[test_case("Technology", false ; "sector name alone")]
    fn test_technology_risk_terms(label: &str, expected: bool) {
        assert_eq!(TECHNOLOGY_RISK_TERMS.matches(&cat(label)), expected);
    }

    #[test_case("Aerospace & Defense", true)]
    #[test_case("Government Services", true)]
    #[test_case("Industrials", false)]
    fn test_government_risk_terms(label: &str, expected: bool) {
        assert_eq!(GOVERNMENT_RISK_TERMS.matches(&cat(label)), expected);
    }

    #[test_case("China", true)]
    #[test_case("Hong Kong", true)]
    #[test_case("People's Republic of China", true)]
    #[test_case("Hong Kong SAR, China", true ; "hong kong sar")]
    #[test_case("Macao", true)]
    #[test_case("PRC", true)]
    #[test_case("Kong", false ; "partial phrase")]
    #[test_case("Republic of China", false ; "taiwan official name")]
    #[test_case("Taiwan", false)]
    #[test_case("China Town, Singapore", false ; "china as one word of a longer label")]
    #[test_case("United States", false)]
    fn test_china_domiciles(label: &str, expected: bool) {
        assert_eq!(CHINA_DOMICILES.matches(&cat(label)), expected);
    }

    #[test]
    fn test_unknown_never_matches() {
        assert!(!PATENT_SECTORS.matches_opt(None));
        assert!(PATENT_SECTORS.matches_opt(Some(&cat("Healthcare"))));
    }
}

//! Rule-table primitives shared by the three sub-score calculators.
//!
//! Each category is an ordered table of [`Rule`] records. Evaluating a table
//! folds the rules into a [`SubScore`] whose value always equals the total of
//! its [`ScoreBreakdown`].

use serde::Serialize;

use super::metrics::NormalizedMetrics;

// ============================================================================
// Outcome & Verdict
// ============================================================================

/// How a single criterion resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Full award (or, for a risk rule, the deduction applies)
    Met,
    /// Half award
    Partial,
    /// Metric known but below the bar
    NotMet,
    /// Inputs missing, nothing awarded
    Unknown,
}

impl Outcome {
    /// Share of the rule's `max_points` this outcome earns.
    pub fn credit(self) -> f64 {
        match self {
            Self::Met => 1.0,
            Self::Partial => 0.5,
            Self::NotMet | Self::Unknown => 0.0,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Met => write!(f, "met"),
            Self::Partial => write!(f, "partial"),
            Self::NotMet => write!(f, "not met"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// What a rule function decides about one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub outcome: Outcome,
    pub rationale: String,
}

impl Verdict {
    pub fn met(rationale: impl Into<String>) -> Self {
        Self::new(Outcome::Met, rationale)
    }

    pub fn partial(rationale: impl Into<String>) -> Self {
        Self::new(Outcome::Partial, rationale)
    }

    pub fn not_met(rationale: impl Into<String>) -> Self {
        Self::new(Outcome::NotMet, rationale)
    }

    pub fn unknown(rationale: impl Into<String>) -> Self {
        Self::new(Outcome::Unknown, rationale)
    }

    fn new(outcome: Outcome, rationale: impl Into<String>) -> Self {
        Self {
            outcome,
            rationale: rationale.into(),
        }
    }
}

// ============================================================================
// Rule
// ============================================================================

/// One row of a rubric table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Display name of the criterion
    pub criterion: &'static str,
    /// Award for a fully met rule; negative for deductions
    pub max_points: f64,
    pub evaluate: fn(&NormalizedMetrics) -> Verdict,
}

impl Rule {
    /// Apply the rule to one record.
    pub fn apply(&self, metrics: &NormalizedMetrics) -> CriterionScore {
        let verdict = (self.evaluate)(metrics);
        CriterionScore {
            criterion: self.criterion,
            points: self.max_points * verdict.outcome.credit(),
            max_points: self.max_points,
            outcome: verdict.outcome,
            rationale: verdict.rationale,
        }
    }
}

// ============================================================================
// Breakdown
// ============================================================================

/// Points awarded for one criterion and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionScore {
    pub criterion: &'static str,
    pub points: f64,
    pub max_points: f64,
    pub outcome: Outcome,
    pub rationale: String,
}

/// Per-criterion breakdown of a sub-score, in rule-table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreBreakdown(Vec<CriterionScore>);

impl ScoreBreakdown {
    /// Sum of awarded points.
    pub fn total(&self) -> f64 {
        self.0.iter().map(|c| c.points).sum()
    }

    /// Sum of the table's maximum awards.
    pub fn max_total(&self) -> f64 {
        self.0.iter().map(|c| c.max_points).sum()
    }

    /// Look up a criterion by name.
    pub fn get(&self, criterion: &str) -> Option<&CriterionScore> {
        self.0.iter().find(|c| c.criterion == criterion)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CriterionScore> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Criteria that could not be judged for lack of data.
    pub fn unknown_criteria(&self) -> Vec<&'static str> {
        self.0
            .iter()
            .filter(|c| c.outcome == Outcome::Unknown)
            .map(|c| c.criterion)
            .collect()
    }
}

// ============================================================================
// Sub-scores
// ============================================================================

/// The three scored categories of the rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Financial,
    Moat,
    Risk,
}

impl ScoreCategory {
    /// Inclusive range of the category's sub-score.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Self::Financial => (0.0, 9.0),
            Self::Moat => (0.0, 7.0),
            Self::Risk => (-3.0, 0.0),
        }
    }
}

impl std::fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Financial => write!(f, "financial"),
            Self::Moat => write!(f, "moat"),
            Self::Risk => write!(f, "risk"),
        }
    }
}

/// A bounded category score plus the breakdown that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SubScore {
    pub category: ScoreCategory,
    pub value: f64,
    pub breakdown: ScoreBreakdown,
}

/// Fold a rule table over one record.
pub fn evaluate(category: ScoreCategory, rules: &[Rule], metrics: &NormalizedMetrics) -> SubScore {
    let breakdown = ScoreBreakdown(rules.iter().map(|rule| rule.apply(metrics)).collect());
    let (lo, hi) = category.bounds();
    let value = breakdown.total().clamp(lo, hi);

    SubScore {
        category,
        value,
        breakdown,
    }
}

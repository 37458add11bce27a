//! Aggregation of sub-scores into a final, immutable [`ScoreResult`].
//!
//! The aggregator is the only place where the pass/fail decision is made.

use serde::Serialize;
use thiserror::Error;
use wheel_common::validation::{MAX_REACHABLE_SCORE, MIN_REACHABLE_SCORE};

use super::metrics::{Category, NormalizedMetrics};
use super::rules::{ScoreBreakdown, ScoreCategory, SubScore};

// ============================================================================
// Pass Threshold
// ============================================================================

/// Rejected pass threshold.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ThresholdError {
    #[error("pass threshold must be a finite number, got {0}")]
    NotFinite(f64),

    #[error("pass threshold {value} is outside the reachable score range [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },
}

impl From<ThresholdError> for wheel_common::Error {
    fn from(err: ThresholdError) -> Self {
        wheel_common::Error::Config(err.to_string())
    }
}

/// Minimum total score for a ticker to pass. Always finite and reachable.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PassThreshold(f64);

impl PassThreshold {
    pub const DEFAULT: f64 = 7.0;

    pub fn new(value: f64) -> Result<Self, ThresholdError> {
        if !value.is_finite() {
            return Err(ThresholdError::NotFinite(value));
        }
        if !(MIN_REACHABLE_SCORE..=MAX_REACHABLE_SCORE).contains(&value) {
            return Err(ThresholdError::OutOfRange {
                value,
                min: MIN_REACHABLE_SCORE,
                max: MAX_REACHABLE_SCORE,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_met_by(self, total: f64) -> bool {
        total >= self.0
    }
}

impl Default for PassThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<f64> for PassThreshold {
    type Error = ThresholdError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for PassThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Score Band
// ============================================================================

/// Coarse quality label derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Poor,
    Marginal,
    Good,
    Excellent,
}

impl ScoreBand {
    pub fn from_total(total: f64) -> Self {
        if total >= 11.0 {
            Self::Excellent
        } else if total >= 7.0 {
            Self::Good
        } else if total >= 4.0 {
            Self::Marginal
        } else {
            Self::Poor
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Marginal => write!(f, "marginal"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

// ============================================================================
// Score Result
// ============================================================================

/// Descriptive fields passed through to the result unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Identity {
    pub ticker: String,
    pub company_name: Option<String>,
    pub sector: Option<Category>,
    pub industry: Option<Category>,
    pub country: Option<Category>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub beta: Option<f64>,
}

impl From<&NormalizedMetrics> for Identity {
    fn from(m: &NormalizedMetrics) -> Self {
        Self {
            ticker: m.ticker.clone(),
            company_name: m.company_name.clone(),
            sector: m.sector.clone(),
            industry: m.industry.clone(),
            country: m.country.clone(),
            current_price: m.current_price,
            market_cap: m.market_cap,
            dividend_yield: m.dividend_yield,
            beta: m.beta,
        }
    }
}

/// Scored outcome for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    #[serde(flatten)]
    identity: Identity,
    financial_score: f64,
    moat_score: f64,
    risk_deduction: f64,
    total_score: f64,
    threshold: PassThreshold,
    passing: bool,
    band: ScoreBand,
    financial_breakdown: ScoreBreakdown,
    moat_breakdown: ScoreBreakdown,
    risk_breakdown: ScoreBreakdown,
}

impl ScoreResult {
    pub fn ticker(&self) -> &str {
        &self.identity.ticker
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn sector(&self) -> Option<&Category> {
        self.identity.sector.as_ref()
    }

    pub fn current_price(&self) -> Option<f64> {
        self.identity.current_price
    }

    pub fn financial_score(&self) -> f64 {
        self.financial_score
    }

    pub fn moat_score(&self) -> f64 {
        self.moat_score
    }

    pub fn risk_deduction(&self) -> f64 {
        self.risk_deduction
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    pub fn threshold(&self) -> PassThreshold {
        self.threshold
    }

    pub fn is_passing(&self) -> bool {
        self.passing
    }

    pub fn band(&self) -> ScoreBand {
        self.band
    }

    pub fn financial_breakdown(&self) -> &ScoreBreakdown {
        &self.financial_breakdown
    }

    pub fn moat_breakdown(&self) -> &ScoreBreakdown {
        &self.moat_breakdown
    }

    pub fn risk_breakdown(&self) -> &ScoreBreakdown {
        &self.risk_breakdown
    }
}

/// Combine the three sub-scores into a result and classify it.
pub fn aggregate(
    identity: Identity,
    financial: SubScore,
    moat: SubScore,
    risk: SubScore,
    threshold: PassThreshold,
) -> ScoreResult {
    debug_assert_eq!(financial.category, ScoreCategory::Financial);
    debug_assert_eq!(moat.category, ScoreCategory::Moat);
    debug_assert_eq!(risk.category, ScoreCategory::Risk);

    let total_score = financial.value + moat.value + risk.value;

    ScoreResult {
        identity,
        financial_score: financial.value,
        moat_score: moat.value,
        risk_deduction: risk.value,
        total_score,
        threshold,
        passing: threshold.is_met_by(total_score),
        band: ScoreBand::from_total(total_score),
        financial_breakdown: financial.breakdown,
        moat_breakdown: moat.breakdown,
        risk_breakdown: risk.breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sub(category: ScoreCategory, value: f64) -> SubScore {
        SubScore {
            category,
            value,
            breakdown: ScoreBreakdown::default(),
        }
    }

    fn result(financial: f64, moat: f64, risk: f64, threshold: f64) -> ScoreResult {
        aggregate(
            Identity {
                ticker: "TEST".into(),
                ..Default::default()
            },
            sub(ScoreCategory::Financial, financial),
            sub(ScoreCategory::Moat, moat),
            sub(ScoreCategory::Risk, risk),
            PassThreshold::new(threshold).unwrap(),
        )
    }

    #[test]
    fn test_reachable_range_matches_category_bounds() {
        let categories = [ScoreCategory::Financial, ScoreCategory::Moat, ScoreCategory::Risk];
        let min: f64 = categories.iter().map(|c| c.bounds().0).sum();
        let max: f64 = categories.iter().map(|c| c.bounds().1).sum();
        assert_eq!(min, MIN_REACHABLE_SCORE);
        assert_eq!(max, MAX_REACHABLE_SCORE);
    }

    #[test_case(7.0, true ; "equal passes")]
    #[test_case(6.5, false ; "half below fails")]
    fn test_passing_at_default_threshold(total: f64, expected: bool) {
        let r = result(total, 0.0, 0.0, 7.0);
        assert_eq!(r.is_passing(), expected);
    }

    #[test]
    fn test_total_is_exact_sum() {
        let r = result(7.5, 4.5, -1.0, 7.0);
        assert_eq!(r.total_score(), 11.0);
        assert!(r.is_passing());
        assert_eq!(r.band(), ScoreBand::Excellent);
    }

    #[test_case(16.0, ScoreBand::Excellent)]
    #[test_case(11.0, ScoreBand::Excellent)]
    #[test_case(10.5, ScoreBand::Good)]
    #[test_case(7.0, ScoreBand::Good)]
    #[test_case(4.0, ScoreBand::Marginal)]
    #[test_case(3.5, ScoreBand::Poor)]
    #[test_case(-3.0, ScoreBand::Poor)]
    fn test_score_band(total: f64, expected: ScoreBand) {
        assert_eq!(ScoreBand::from_total(total), expected);
    }

    #[test_case(f64::NAN ; "nan")]
    #[test_case(f64::INFINITY ; "infinity")]
    #[test_case(16.5 ; "above ceiling")]
    #[test_case(-3.5 ; "below floor")]
    fn test_invalid_thresholds_rejected(value: f64) {
        assert!(PassThreshold::new(value).is_err());
        assert!(PassThreshold::try_from(value).is_err());
    }

    #[test]
    fn test_threshold_error_is_config_error() {
        let err: wheel_common::Error = PassThreshold::new(42.0).unwrap_err().into();
        assert!(err.is_config());
        assert!(err.to_string().contains("outside the reachable score range"));
    }

    #[test]
    fn test_result_serializes_flat_identity() {
        let json = serde_json::to_value(result(5.0, 2.0, 0.0, 7.0)).unwrap();
        assert_eq!(json["ticker"], "TEST");
        assert_eq!(json["total_score"], 7.0);
        assert_eq!(json["threshold"], 7.0);
        assert_eq!(json["band"], "good");
        assert_eq!(json["passing"], true);
    }
}

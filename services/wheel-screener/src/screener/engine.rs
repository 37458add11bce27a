//! Scoring engine.
//!
//! Runs the full pipeline for one record or a batch:
//! 1. Normalize raw metrics
//! 2. Score financial strength, moat and risk independently
//! 3. Aggregate into a classified [`ScoreResult`]

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};
use wheel_common::config::ScoringSettings;

use super::aggregate::{aggregate, Identity, PassThreshold, ScoreResult, ThresholdError};
use super::metrics::{NormalizedMetrics, RawMetrics};
use super::normalize::normalize;
use super::{financial, moat, risk};

// ============================================================================
// Scoring Config
// ============================================================================

/// Engine settings before validation.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub pass_threshold: f64,
    /// Fan batches out across the rayon thread pool
    pub parallel: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            pass_threshold: PassThreshold::DEFAULT,
            parallel: true,
        }
    }
}

impl From<&ScoringSettings> for ScoringConfig {
    fn from(settings: &ScoringSettings) -> Self {
        Self {
            pass_threshold: settings.pass_threshold,
            parallel: settings.parallel,
        }
    }
}

// ============================================================================
// Scoring Engine
// ============================================================================

/// Stateless scorer holding a validated pass threshold.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    threshold: PassThreshold,
    parallel: bool,
}

impl ScoringEngine {
    /// Create an engine, rejecting an invalid threshold.
    pub fn new(config: ScoringConfig) -> Result<Self, ThresholdError> {
        Ok(Self {
            threshold: PassThreshold::new(config.pass_threshold)?,
            parallel: config.parallel,
        })
    }

    /// Create with the default threshold.
    pub fn with_defaults() -> Self {
        Self {
            threshold: PassThreshold::default(),
            parallel: true,
        }
    }

    pub fn threshold(&self) -> PassThreshold {
        self.threshold
    }

    /// Normalize and score one record.
    pub fn score(&self, raw: &RawMetrics) -> ScoreResult {
        self.score_normalized(&normalize(raw))
    }

    /// Score an already-normalized record.
    pub fn score_normalized(&self, metrics: &NormalizedMetrics) -> ScoreResult {
        let result = aggregate(
            Identity::from(metrics),
            financial::score(metrics),
            moat::score(metrics),
            risk::score(metrics),
            self.threshold,
        );

        debug!(
            ticker = %result.ticker(),
            financial = result.financial_score(),
            moat = result.moat_score(),
            risk = result.risk_deduction(),
            total = result.total_score(),
            passing = result.is_passing(),
            "Scored ticker"
        );

        result
    }

    /// Score a batch. Returns exactly one result per record, in input order.
    pub fn score_batch(&self, records: &[RawMetrics]) -> Vec<ScoreResult> {
        let start = Instant::now();

        let results: Vec<ScoreResult> = if self.parallel {
            records.par_iter().map(|raw| self.score(raw)).collect()
        } else {
            records.iter().map(|raw| self.score(raw)).collect()
        };

        let passing = results.iter().filter(|r| r.is_passing()).count();
        info!(
            records = results.len(),
            passing,
            threshold = self.threshold.value(),
            parallel = self.parallel,
            duration_ms = start.elapsed().as_millis() as u64,
            "Scored batch"
        );

        results
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

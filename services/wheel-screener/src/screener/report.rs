//! In-memory views over a scored batch.
//!
//! Views:
//! - All results ranked by total score
//! - Passing results only
//! - Budget-friendly passing results (cheap enough for small accounts)
//! - Results grouped by sector

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::{PassThreshold, ScoreResult};

// ============================================================================
// Report View
// ============================================================================

/// Which slice of a report to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportView {
    /// Every result, ranked
    All,
    /// Passing results, ranked
    Passing,
    /// Passing results under the budget price
    Budget,
    /// Results grouped by sector
    Sector,
}

impl std::fmt::Display for ReportView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Passing => write!(f, "passing"),
            Self::Budget => write!(f, "budget"),
            Self::Sector => write!(f, "sector"),
        }
    }
}

impl std::str::FromStr for ReportView {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "ranked" => Ok(Self::All),
            "passing" | "pass" => Ok(Self::Passing),
            "budget" | "budget-friendly" => Ok(Self::Budget),
            "sector" | "by-sector" => Ok(Self::Sector),
            _ => Err(format!("Unknown report view: {}", s)),
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Headline counts for a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenSummary {
    pub total: usize,
    pub passing: usize,
    /// Passing share of the batch (%)
    pub pass_rate: f64,
    pub budget_friendly: usize,
    pub budget_price_limit: f64,
}

impl std::fmt::Display for ScreenSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scored {} tickers: {} passed ({:.1}%), {} under ${}",
            self.total, self.passing, self.pass_rate, self.budget_friendly, self.budget_price_limit
        )
    }
}

// ============================================================================
// Screen Report
// ============================================================================

/// A scored batch with its run metadata, ranked by total score.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenReport {
    /// Run identifier
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub threshold: PassThreshold,
    results: Vec<ScoreResult>,
}

impl ScreenReport {
    /// Build a report from engine output.
    pub fn new(mut results: Vec<ScoreResult>, threshold: PassThreshold) -> Self {
        results.sort_by(|a, b| {
            b.total_score()
                .total_cmp(&a.total_score())
                .then_with(|| a.ticker().cmp(b.ticker()))
        });

        Self {
            id: wheel_common::logging::generate_run_id(),
            generated_at: Utc::now(),
            threshold,
            results,
        }
    }

    /// All results, best first.
    pub fn ranked(&self) -> &[ScoreResult] {
        &self.results
    }

    pub fn passing(&self) -> Vec<&ScoreResult> {
        self.results.iter().filter(|r| r.is_passing()).collect()
    }

    /// Passing results with a known price strictly below `max_price`.
    pub fn budget_friendly(&self, max_price: f64) -> Vec<&ScoreResult> {
        self.results
            .iter()
            .filter(|r| r.is_passing())
            .filter(|r| r.current_price().is_some_and(|p| p > 0.0 && p < max_price))
            .collect()
    }

    /// Results grouped by sector label; unknown sectors are left out.
    pub fn by_sector(&self) -> BTreeMap<String, Vec<&ScoreResult>> {
        let mut groups: BTreeMap<String, Vec<&ScoreResult>> = BTreeMap::new();
        for result in &self.results {
            if let Some(sector) = result.sector() {
                groups.entry(sector.label().to_string()).or_default().push(result);
            }
        }
        groups
    }

    /// Get the top N results by score.
    pub fn top(&self, n: usize) -> Vec<&ScoreResult> {
        self.results.iter().take(n).collect()
    }

    pub fn summary(&self, budget_price_limit: f64) -> ScreenSummary {
        let total = self.results.len();
        let passing = self.passing().len();
        let pass_rate = if total > 0 {
            (passing as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        ScreenSummary {
            total,
            passing,
            pass_rate,
            budget_friendly: self.budget_friendly(budget_price_limit).len(),
            budget_price_limit,
        }
    }

    /// Render one view as JSON.
    ///
    /// Views are emitted in full unless `limit` caps the number of rows.
    /// The sector view is never capped.
    pub fn render(
        &self,
        view: ReportView,
        limit: Option<usize>,
        budget_price_limit: f64,
    ) -> serde_json::Result<serde_json::Value> {
        let cap = limit.unwrap_or(usize::MAX);
        let rows = match view {
            ReportView::All => serde_json::to_value(self.top(cap))?,
            ReportView::Passing => {
                serde_json::to_value(self.passing().into_iter().take(cap).collect::<Vec<_>>())?
            }
            ReportView::Budget => serde_json::to_value(
                self.budget_friendly(budget_price_limit)
                    .into_iter()
                    .take(cap)
                    .collect::<Vec<_>>(),
            )?,
            ReportView::Sector => serde_json::to_value(self.by_sector())?,
        };

        Ok(serde_json::json!({
            "id": self.id,
            "generated_at": self.generated_at,
            "threshold": self.threshold,
            "view": view.to_string(),
            "summary": self.summary(budget_price_limit),
            "results": rows,
        }))
    }
}

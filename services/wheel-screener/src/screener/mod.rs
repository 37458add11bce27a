//! Quality screener for wheel-strategy candidates.
//!
//! Pipeline:
//! 1. `normalize`: raw metrics into validated metrics, unknown kept as `None`
//! 2. `financial`, `moat`, `risk`: independent rule tables
//! 3. `aggregate`: total score, threshold check and band
//!
//! `engine` drives the pipeline over batches and `report` builds views over
//! the results.

pub mod aggregate;
pub mod categories;
pub mod engine;
pub mod financial;
pub mod input;
pub mod metrics;
pub mod moat;
pub mod normalize;
pub mod report;
pub mod risk;
pub mod rules;

pub use aggregate::{aggregate, Identity, PassThreshold, ScoreBand, ScoreResult, ThresholdError};
pub use engine::{ScoringConfig, ScoringEngine};
pub use input::{load_metrics, parse_metrics};
pub use metrics::{Category, NormalizedMetrics, RawMetrics, Trend};
pub use normalize::normalize;
pub use report::{ReportView, ScreenReport, ScreenSummary};
pub use rules::{CriterionScore, Outcome, ScoreBreakdown, ScoreCategory, SubScore};

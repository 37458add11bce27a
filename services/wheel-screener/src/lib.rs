//! Wheel Screener - deterministic quality scoring of equities.
//!
//! Converts per-company fundamentals into a bounded financial sub-score,
//! a competitive-moat sub-score and risk deductions, then classifies each
//! ticker as passing or failing a configurable threshold.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod screener;

pub use screener::{
    load_metrics, normalize, parse_metrics, Outcome, PassThreshold, RawMetrics, ReportView,
    ScoreBand, ScoreBreakdown, ScoreResult, ScoringConfig, ScoringEngine, ScreenReport,
    ThresholdError,
};

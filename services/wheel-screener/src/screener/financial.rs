//! Financial strength sub-score (0 to 9).
//!
//! Nine criteria, one point each. Half points go to companies that look
//! healthy but whose history cannot be confirmed from the available data.

use super::metrics::{NormalizedMetrics, Trend};
use super::rules::{self, Rule, ScoreCategory, SubScore, Verdict};

const EPS_GROWTH_MIN: f64 = 0.05;
const DIVIDEND_YEARS_MIN: u32 = 5;
const NET_MARGIN_STRONG: f64 = 0.10;
const NET_MARGIN_FAIR: f64 = 0.05;
const ROE_STRONG: f64 = 0.15;
const ROE_FAIR: f64 = 0.10;
/// Above this ROE is treated as leverage-driven and unsustainable.
const ROE_CEILING: f64 = 0.40;
const COVERAGE_STRONG: f64 = 10.0;
const COVERAGE_FAIR: f64 = 5.0;
const DEBT_TO_EQUITY_MAX: f64 = 0.5;

/// Financial rubric in evaluation order.
pub static RULES: [Rule; 9] = [
    Rule {
        criterion: "EPS Growth",
        max_points: 1.0,
        evaluate: eps_growth,
    },
    Rule {
        criterion: "Dividend",
        max_points: 1.0,
        evaluate: dividend,
    },
    Rule {
        criterion: "Share Count",
        max_points: 1.0,
        evaluate: share_count,
    },
    Rule {
        criterion: "Book Value",
        max_points: 1.0,
        evaluate: book_value,
    },
    Rule {
        criterion: "Free Cash Flow",
        max_points: 1.0,
        evaluate: free_cash_flow,
    },
    Rule {
        criterion: "Net Margin",
        max_points: 1.0,
        evaluate: net_margin,
    },
    Rule {
        criterion: "Return on Equity",
        max_points: 1.0,
        evaluate: return_on_equity,
    },
    Rule {
        criterion: "Interest Coverage",
        max_points: 1.0,
        evaluate: interest_coverage,
    },
    Rule {
        criterion: "Debt/Equity",
        max_points: 1.0,
        evaluate: debt_to_equity,
    },
];

/// Score financial strength.
pub fn score(metrics: &NormalizedMetrics) -> SubScore {
    rules::evaluate(ScoreCategory::Financial, &RULES, metrics)
}

fn pct(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn eps_growth(m: &NormalizedMetrics) -> Verdict {
    match (m.eps_growth, m.eps_stable_history) {
        (None, None) => Verdict::unknown("EPS growth and history unavailable"),
        (Some(g), _) if g > EPS_GROWTH_MIN => {
            Verdict::met(format!("EPS growth {} above {}", pct(g), pct(EPS_GROWTH_MIN)))
        }
        (_, Some(true)) => Verdict::met("Long-term EPS trend stable"),
        (Some(g), _) => Verdict::not_met(format!("EPS growth {} not above {}", pct(g), pct(EPS_GROWTH_MIN))),
        (None, Some(false)) => Verdict::not_met("Long-term EPS trend unstable"),
    }
}

fn dividend(m: &NormalizedMetrics) -> Verdict {
    match m.dividend_rate {
        None => Verdict::unknown("Dividend rate unavailable"),
        Some(rate) if rate <= 0.0 => Verdict::not_met("No dividend paid"),
        Some(_) => match (m.dividend_history_years, m.dividend_consistent) {
            (Some(years), Some(true)) if years >= DIVIDEND_YEARS_MIN => {
                Verdict::met(format!("{years} years of uninterrupted dividends"))
            }
            _ => Verdict::partial("Pays a dividend; long consistent record not confirmed"),
        },
    }
}

fn share_count(m: &NormalizedMetrics) -> Verdict {
    match m.shares_trend {
        Some(trend @ (Trend::Stable | Trend::Decreasing)) => {
            Verdict::met(format!("Share count {trend}"))
        }
        _ if m.shares_outstanding.is_some() && m.buyback_program == Some(true) => {
            Verdict::partial("Buyback programme active; share trend not confirmed")
        }
        Some(trend) => Verdict::not_met(format!("Share count {trend}")),
        None if m.buyback_program.is_none() => Verdict::unknown("Share count trend unavailable"),
        None => Verdict::not_met("No buyback programme and share trend unknown"),
    }
}

fn book_value(m: &NormalizedMetrics) -> Verdict {
    match (m.book_value_trend, m.book_value_per_share) {
        (Some(Trend::Increasing), _) => Verdict::met("Book value increasing"),
        (_, Some(bv)) if bv > 0.0 => {
            Verdict::partial(format!("Positive book value {bv:.2} per share; growth unverified"))
        }
        (None, None) => Verdict::unknown("Book value unavailable"),
        (Some(trend), _) => Verdict::not_met(format!("Book value {trend}")),
        (None, Some(bv)) => Verdict::not_met(format!("Book value {bv:.2} per share not positive")),
    }
}

fn free_cash_flow(m: &NormalizedMetrics) -> Verdict {
    match m.free_cash_flow {
        None => Verdict::unknown("Free cash flow unavailable"),
        Some(fcf) if fcf > 0.0 => Verdict::met(format!("Positive free cash flow {fcf:.0}")),
        Some(fcf) => Verdict::not_met(format!("Free cash flow {fcf:.0} not positive")),
    }
}

fn net_margin(m: &NormalizedMetrics) -> Verdict {
    match m.net_margin {
        None => Verdict::unknown("Net margin unavailable"),
        Some(nm) if nm > NET_MARGIN_STRONG => {
            Verdict::met(format!("Net margin {} above {}", pct(nm), pct(NET_MARGIN_STRONG)))
        }
        Some(nm) if nm > NET_MARGIN_FAIR && m.net_margin_stable == Some(true) => {
            Verdict::partial(format!("Net margin {} stable but below {}", pct(nm), pct(NET_MARGIN_STRONG)))
        }
        Some(nm) => Verdict::not_met(format!("Net margin {}", pct(nm))),
    }
}

fn return_on_equity(m: &NormalizedMetrics) -> Verdict {
    match m.return_on_equity {
        None => Verdict::unknown("Return on equity unavailable"),
        Some(roe) if roe > ROE_CEILING => {
            Verdict::not_met(format!("ROE {} above {} is unsustainable", pct(roe), pct(ROE_CEILING)))
        }
        Some(roe) if roe >= ROE_STRONG => Verdict::met(format!("ROE {}", pct(roe))),
        Some(roe) if roe >= ROE_FAIR => {
            Verdict::partial(format!("ROE {} below {}", pct(roe), pct(ROE_STRONG)))
        }
        Some(roe) => Verdict::not_met(format!("ROE {} below {}", pct(roe), pct(ROE_FAIR))),
    }
}

fn interest_coverage(m: &NormalizedMetrics) -> Verdict {
    if m.total_debt.is_some_and(|debt| debt == 0.0) {
        return Verdict::met("No debt");
    }

    match m.interest_coverage {
        None => Verdict::unknown("Interest coverage unavailable"),
        Some(ic) if ic > COVERAGE_STRONG => Verdict::met(format!("Interest coverage {ic:.1}x")),
        Some(ic) if ic > COVERAGE_FAIR => {
            Verdict::partial(format!("Interest coverage {ic:.1}x below {COVERAGE_STRONG}x"))
        }
        Some(ic) => Verdict::not_met(format!("Interest coverage {ic:.1}x")),
    }
}

fn debt_to_equity(m: &NormalizedMetrics) -> Verdict {
    match m.debt_to_equity {
        None => Verdict::unknown("Debt/equity unavailable"),
        Some(de) if de < DEBT_TO_EQUITY_MAX => Verdict::met(format!("Debt/equity {de:.2}")),
        Some(de) => Verdict::not_met(format!("Debt/equity {de:.2} not below {DEBT_TO_EQUITY_MAX}")),
    }
}

//! Metrics normalizer.
//!
//! Turns a [`RawMetrics`] record into [`NormalizedMetrics`]. This is a total
//! function: it never fails. Values outside their plausible domain (a
//! negative price, a negative debt/equity ratio, NaN) become unknown instead
//! of being clamped, so a dirty feed can only lower a score, never raise it.

use tracing::debug;

use super::metrics::{Category, NormalizedMetrics, RawMetrics};

/// Plausibility check applied to one numeric field.
#[derive(Debug, Clone, Copy)]
enum Domain {
    /// Any finite number
    Finite,
    /// Strictly greater than zero
    Positive,
    /// Zero or greater
    NonNegative,
    /// Inclusive range
    Range(f64, f64),
}

impl Domain {
    fn admits(self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            Self::Finite => true,
            Self::Positive => value > 0.0,
            Self::NonNegative => value >= 0.0,
            Self::Range(lo, hi) => (lo..=hi).contains(&value),
        }
    }
}

/// Field-by-field validator that remembers which ticker it is working on.
struct Normalizer<'a> {
    ticker: &'a str,
    discarded: usize,
}

impl<'a> Normalizer<'a> {
    fn number(&mut self, field: &'static str, value: Option<f64>, domain: Domain) -> Option<f64> {
        let value = value?;
        if domain.admits(value) {
            Some(value)
        } else {
            self.discarded += 1;
            debug!(
                ticker = %self.ticker,
                field,
                value,
                "Discarding implausible value as unknown"
            );
            None
        }
    }

    fn text(&self, value: Option<&str>) -> Option<String> {
        value
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn category(&mut self, field: &'static str, value: Option<&str>) -> Option<Category> {
        let raw = value?;
        let parsed = Category::parse(raw);
        if parsed.is_none() && !raw.trim().is_empty() {
            self.discarded += 1;
            debug!(ticker = %self.ticker, field, value = raw, "Placeholder category treated as unknown");
        }
        parsed
    }
}

/// Normalize one raw record.
pub fn normalize(raw: &RawMetrics) -> NormalizedMetrics {
    let ticker = raw.ticker.trim().to_uppercase();
    let mut n = Normalizer {
        ticker: &ticker,
        discarded: 0,
    };

    let normalized = NormalizedMetrics {
        ticker: ticker.clone(),
        company_name: n.text(raw.company_name.as_deref()),
        sector: n.category("sector", raw.sector.as_deref()),
        industry: n.category("industry", raw.industry.as_deref()),
        country: n.category("country", raw.country.as_deref()),
        current_price: n.number("current_price", raw.current_price, Domain::Positive),
        market_cap: n.number("market_cap", raw.market_cap, Domain::Positive),

        eps_growth: n.number("eps_growth", raw.eps_growth, Domain::Finite),
        eps_stable_history: raw.eps_stable_history,

        dividend_rate: n.number("dividend_rate", raw.dividend_rate, Domain::NonNegative),
        dividend_history_years: raw.dividend_history_years,
        dividend_consistent: raw.dividend_consistent,
        dividend_yield: n.number("dividend_yield", raw.dividend_yield, Domain::Range(0.0, 1.0)),

        shares_outstanding: n.number("shares_outstanding", raw.shares_outstanding, Domain::Positive),
        shares_trend: raw.shares_trend,
        buyback_program: raw.buyback_program,

        book_value_per_share: n.number("book_value_per_share", raw.book_value_per_share, Domain::Finite),
        book_value_trend: raw.book_value_trend,

        free_cash_flow: n.number("free_cash_flow", raw.free_cash_flow, Domain::Finite),

        net_margin: n.number("net_margin", raw.net_margin, Domain::Finite),
        net_margin_stable: raw.net_margin_stable,

        return_on_equity: n.number("return_on_equity", raw.return_on_equity, Domain::Finite),

        interest_coverage: n.number("interest_coverage", raw.interest_coverage, Domain::Finite),
        total_debt: n.number("total_debt", raw.total_debt, Domain::NonNegative),
        debt_to_equity: n.number("debt_to_equity", raw.debt_to_equity, Domain::NonNegative),

        beta: n.number("beta", raw.beta, Domain::Finite),
    };

    if n.discarded > 0 {
        debug!(ticker = %ticker, discarded = n.discarded, "Normalized record with malformed fields");
    }

    normalized
}
